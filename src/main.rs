//src/main.rs

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;

pub fn build_router(app_state: AppState) -> Router {
    let casa_routes = Router::new()
        .route("/"
               ,get(handlers::casas::list_casas)
               .post(handlers::casas::create_casa)
        )
        .route("/import"
               ,post(handlers::casas::import_casas)
        )
        .route("/{codigo}"
               ,get(handlers::casas::get_casa)
               .put(handlers::casas::update_casa)
               .delete(handlers::casas::delete_casa)
        );

    let documento_routes = Router::new()
        .route("/"
               ,get(handlers::documentos::list_documentos_faltantes)
               .put(handlers::documentos::upsert_documento_faltante)
        )
        .route("/{codigo}/{documento}"
               ,delete(handlers::documentos::delete_documento_faltante)
        );

    let analise_routes = Router::new()
        .route("/documentos", get(handlers::analise::analyze_documents))
        .route("/casas", get(handlers::analise::property_summaries))
        .route("/grafico", get(handlers::analise::chart));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/casas", casa_routes)
        .route("/api/gestao"
               ,get(handlers::gestao::list_registros)
               .post(handlers::gestao::import_gestao)
               .delete(handlers::gestao::clear_gestao)
        )
        .nest("/api/documentos-faltantes", documento_routes)
        .route("/api/documentos/normalizar", get(handlers::documentos::normalizar))
        .nest("/api/analise", analise_routes)
        .route("/api/dashboard/resumo", get(handlers::dashboard::get_summary))
        .route("/api/relatorios/conformidade", get(handlers::relatorios::compliance_report))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new(&config).await?;
    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
