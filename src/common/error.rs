use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// O motor de conformidade não falha; estes erros vêm das bordas
// (armazenamento, validação de entrada, planilha, PDF).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Casa de oração não encontrada: {0}")]
    CasaNotFound(String),

    #[error("Desconsideração não encontrada: {codigo} / {documento}")]
    DocumentoFaltanteNotFound { codigo: String, documento: String },

    #[error("{0}")]
    UniqueConstraintViolation(String),

    #[error("Planilha inválida: {0}")]
    PlanilhaInvalida(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar o PDF: {0}")]
    PdfError(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CasaNotFound(codigo) => (
                StatusCode::NOT_FOUND,
                format!("Casa de oração '{}' não encontrada.", codigo),
            ),
            AppError::DocumentoFaltanteNotFound { codigo, documento } => (
                StatusCode::NOT_FOUND,
                format!("Não há desconsideração para '{}' na casa '{}'.", documento, codigo),
            ),
            AppError::UniqueConstraintViolation(message) => (StatusCode::CONFLICT, message),
            AppError::PlanilhaInvalida(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),

            // Todos os outros erros viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::CasaNotFound("A".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UniqueConstraintViolation("duplicada".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::PlanilhaInvalida("sem código".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::PdfError("falhou".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
