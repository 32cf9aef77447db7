// src/handlers/gestao.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::gestao::{ImportacaoGestaoResumo, PlanilhaPayload, RegistroGestao},
};

// GET /api/gestao
#[utoipa::path(
    get,
    path = "/api/gestao",
    tag = "Gestão",
    responses(
        (status = 200, description = "Matriz de presença de documentos por casa", body = Vec<RegistroGestao>)
    )
)]
pub async fn list_registros(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let registros = app_state.gestao_service.list_registros().await?;
    Ok((StatusCode::OK, Json(registros)))
}

// POST /api/gestao
#[utoipa::path(
    post,
    path = "/api/gestao",
    tag = "Gestão",
    request_body = PlanilhaPayload,
    responses(
        (status = 200, description = "Matriz substituída pela planilha", body = ImportacaoGestaoResumo),
        (status = 400, description = "Planilha sem cabeçalho"),
        (status = 422, description = "Planilha sem a coluna de código")
    )
)]
pub async fn import_gestao(
    State(app_state): State<AppState>,
    Json(payload): Json<PlanilhaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.gestao_service.import_gestao(payload).await?;
    Ok((StatusCode::OK, Json(resumo)))
}

// DELETE /api/gestao
#[utoipa::path(
    delete,
    path = "/api/gestao",
    tag = "Gestão",
    responses(
        (status = 204, description = "Matriz apagada")
    )
)]
pub async fn clear_gestao(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    app_state.gestao_service.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
