// src/handlers/documentos.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::documento::{DocumentoFaltante, NormalizacaoResponse, UpsertDocumentoFaltantePayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NormalizarQuery {
    /// Nome do documento como aparece na planilha
    pub nome: String,
}

// GET /api/documentos-faltantes
#[utoipa::path(
    get,
    path = "/api/documentos-faltantes",
    tag = "Documentos",
    responses(
        (status = 200, description = "Desconsiderações e observações gravadas", body = Vec<DocumentoFaltante>)
    )
)]
pub async fn list_documentos_faltantes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let itens = app_state.documento_service.list_documentos_faltantes().await?;
    Ok((StatusCode::OK, Json(itens)))
}

// PUT /api/documentos-faltantes
#[utoipa::path(
    put,
    path = "/api/documentos-faltantes",
    tag = "Documentos",
    request_body = UpsertDocumentoFaltantePayload,
    responses(
        (status = 200, description = "Desconsideração criada ou substituída", body = DocumentoFaltante),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn upsert_documento_faltante(
    State(app_state): State<AppState>,
    Json(payload): Json<UpsertDocumentoFaltantePayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.documento_service.upsert_documento_faltante(payload).await?;
    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/documentos-faltantes/{codigo}/{documento}
#[utoipa::path(
    delete,
    path = "/api/documentos-faltantes/{codigo}/{documento}",
    tag = "Documentos",
    params(
        ("codigo" = String, Path, description = "Código da casa de oração"),
        ("documento" = String, Path, description = "Nome canônico do documento")
    ),
    responses(
        (status = 204, description = "Desconsideração removida"),
        (status = 404, description = "Desconsideração não encontrada")
    )
)]
pub async fn delete_documento_faltante(
    State(app_state): State<AppState>,
    Path((codigo, documento)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    app_state.documento_service.delete_documento_faltante(&codigo, &documento).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/documentos/normalizar?nome=
#[utoipa::path(
    get,
    path = "/api/documentos/normalizar",
    tag = "Documentos",
    params(NormalizarQuery),
    responses(
        (status = 200, description = "Nome canônico e classificação do documento", body = NormalizacaoResponse)
    )
)]
pub async fn normalizar(
    State(app_state): State<AppState>,
    Query(query): Query<NormalizarQuery>,
) -> impl IntoResponse {
    Json(app_state.documento_service.probe_name(&query.nome))
}
