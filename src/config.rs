// src/config.rs

use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{
        CasaRepository, ColecaoStore, DocumentoFaltanteRepository, GestaoRepository, MemoryStore,
        PgStore,
    },
    services::{
        casa_service::CasaService, compliance_service::ComplianceService,
        dashboard_service::DashboardService, documento_service::DocumentoService,
        gestao_service::GestaoService, report_service::ReportService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub fonts_dir: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            fonts_dir: env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub casa_service: CasaService,
    pub gestao_service: GestaoService,
    pub documento_service: DocumentoService,
    pub compliance_service: ComplianceService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn ColecaoStore> = match &config.database_url {
            Some(database_url) => {
                // Conecta ao banco de dados, usando '?' para propagar erros
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgStore::new(db_pool))
            }
            None => {
                tracing::warn!("DATABASE_URL não definida; usando armazenamento em memória (os dados somem ao reiniciar).");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::from_store(store, config.fonts_dir.clone()))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_store(store: Arc<dyn ColecaoStore>, fonts_dir: String) -> Self {
        let casa_repo = CasaRepository::new(store.clone());
        let gestao_repo = GestaoRepository::new(store.clone());
        let documento_repo = DocumentoFaltanteRepository::new(store);

        let compliance_service = ComplianceService::new(
            casa_repo.clone(),
            gestao_repo.clone(),
            documento_repo.clone(),
        );

        Self {
            casa_service: CasaService::new(casa_repo),
            gestao_service: GestaoService::new(gestao_repo),
            documento_service: DocumentoService::new(documento_repo),
            dashboard_service: DashboardService::new(compliance_service.clone()),
            report_service: ReportService::new(compliance_service.clone(), fonts_dir),
            compliance_service,
        }
    }
}
