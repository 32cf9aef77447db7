// src/handlers/relatorios.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{common::error::AppError, config::AppState};

// GET /api/relatorios/conformidade
#[utoipa::path(
    get,
    path = "/api/relatorios/conformidade",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Relatório de conformidade em PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 500, description = "Fonte ausente ou falha ao gerar o PDF")
    )
)]
pub async fn compliance_report(
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state.report_service.generate_compliance_pdf().await?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let disposition = format!(
        "attachment; filename=\"conformidade_{}.pdf\"",
        Utc::now().format("%Y%m%d")
    );
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, pdf_bytes).into_response())
}
