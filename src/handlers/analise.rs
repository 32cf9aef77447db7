// src/handlers/analise.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::analise::{AnaliseDocumento, EntradaGrafico, ResumoCasa},
};

// GET /api/analise/documentos
#[utoipa::path(
    get,
    path = "/api/analise/documentos",
    tag = "Análise",
    responses(
        (status = 200, description = "Conformidade por documento, obrigatórios primeiro. Grava as desconsiderações automáticas que faltarem.", body = Vec<AnaliseDocumento>)
    )
)]
pub async fn analyze_documents(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let analises = app_state.compliance_service.analyze().await?;
    Ok((StatusCode::OK, Json(analises)))
}

// GET /api/analise/casas
#[utoipa::path(
    get,
    path = "/api/analise/casas",
    tag = "Análise",
    responses(
        (status = 200, description = "Conformidade por casa de oração", body = Vec<ResumoCasa>)
    )
)]
pub async fn property_summaries(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resumos = app_state.compliance_service.property_summaries().await?;
    Ok((StatusCode::OK, Json(resumos)))
}

// GET /api/analise/grafico
#[utoipa::path(
    get,
    path = "/api/analise/grafico",
    tag = "Análise",
    responses(
        (status = 200, description = "Série do gráfico (documentos sem nenhuma casa ficam de fora)", body = Vec<EntradaGrafico>)
    )
)]
pub async fn chart(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let grafico = app_state.compliance_service.chart().await?;
    Ok((StatusCode::OK, Json(grafico)))
}
