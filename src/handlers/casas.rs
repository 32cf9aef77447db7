// src/handlers/casas.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        casa::{CasaOracao, ImportacaoCasasResumo},
        gestao::PlanilhaPayload,
    },
};

// GET /api/casas
#[utoipa::path(
    get,
    path = "/api/casas",
    tag = "Casas",
    responses(
        (status = 200, description = "Casas de oração cadastradas", body = Vec<CasaOracao>)
    )
)]
pub async fn list_casas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let casas = app_state.casa_service.list_casas().await?;
    Ok((StatusCode::OK, Json(casas)))
}

// POST /api/casas
#[utoipa::path(
    post,
    path = "/api/casas",
    tag = "Casas",
    request_body = CasaOracao,
    responses(
        (status = 201, description = "Casa criada", body = CasaOracao),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Código já cadastrado")
    )
)]
pub async fn create_casa(
    State(app_state): State<AppState>,
    Json(payload): Json<CasaOracao>,
) -> Result<impl IntoResponse, AppError> {
    let casa = app_state.casa_service.create_casa(payload).await?;
    Ok((StatusCode::CREATED, Json(casa)))
}

// POST /api/casas/import
#[utoipa::path(
    post,
    path = "/api/casas/import",
    tag = "Casas",
    request_body = PlanilhaPayload,
    responses(
        (status = 200, description = "Cadastro importado (insere ou atualiza por código)", body = ImportacaoCasasResumo),
        (status = 422, description = "Planilha sem a coluna de código")
    )
)]
pub async fn import_casas(
    State(app_state): State<AppState>,
    Json(payload): Json<PlanilhaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.casa_service.import_casas(payload).await?;
    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/casas/{codigo}
#[utoipa::path(
    get,
    path = "/api/casas/{codigo}",
    tag = "Casas",
    params(
        ("codigo" = String, Path, description = "Código da casa de oração")
    ),
    responses(
        (status = 200, description = "Casa encontrada", body = CasaOracao),
        (status = 404, description = "Casa não encontrada")
    )
)]
pub async fn get_casa(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let casa = app_state.casa_service.get_casa(&codigo).await?;
    Ok((StatusCode::OK, Json(casa)))
}

// PUT /api/casas/{codigo}
#[utoipa::path(
    put,
    path = "/api/casas/{codigo}",
    tag = "Casas",
    params(
        ("codigo" = String, Path, description = "Código da casa de oração")
    ),
    request_body = CasaOracao,
    responses(
        (status = 200, description = "Casa atualizada", body = CasaOracao),
        (status = 404, description = "Casa não encontrada")
    )
)]
pub async fn update_casa(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
    Json(payload): Json<CasaOracao>,
) -> Result<impl IntoResponse, AppError> {
    let casa = app_state.casa_service.update_casa(&codigo, payload).await?;
    Ok((StatusCode::OK, Json(casa)))
}

// DELETE /api/casas/{codigo}
#[utoipa::path(
    delete,
    path = "/api/casas/{codigo}",
    tag = "Casas",
    params(
        ("codigo" = String, Path, description = "Código da casa de oração")
    ),
    responses(
        (status = 204, description = "Casa removida"),
        (status = 404, description = "Casa não encontrada")
    )
)]
pub async fn delete_casa(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.casa_service.delete_casa(&codigo).await?;
    Ok(StatusCode::NO_CONTENT)
}
