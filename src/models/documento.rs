// src/models/documento.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Desconsideração (override) de um documento faltante, chave (codigo, documento)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoFaltante {
    pub codigo: String,

    // Nome canônico do documento
    pub documento: String,

    #[serde(default)]
    pub observacao: Option<String>,

    // "Trate como presente" para efeito de conformidade
    #[serde(default)]
    pub desconsiderar: bool,

    #[serde(default)]
    pub data_observacao: Option<DateTime<Utc>>,

    #[serde(default)]
    pub responsavel: Option<String>,
}

impl DocumentoFaltante {
    pub fn is_mesma_chave(&self, codigo: &str, documento: &str) -> bool {
        self.codigo == codigo && self.documento == documento
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDocumentoFaltantePayload {
    #[validate(length(min = 1, message = "O código da casa é obrigatório."))]
    #[schema(example = "BR-21-0001")]
    pub codigo: String,

    #[validate(length(min = 1, message = "O documento é obrigatório."))]
    #[schema(example = "Habite-se")]
    pub documento: String,

    #[validate(length(max = 2000, message = "A observação deve ter no máximo 2000 caracteres."))]
    #[schema(example = "Processo em andamento na prefeitura")]
    pub observacao: Option<String>,

    #[serde(default)]
    pub desconsiderar: bool,

    #[schema(example = "Irmão João")]
    pub responsavel: Option<String>,
}

// Resposta da sonda de normalização
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizacaoResponse {
    pub entrada: String,
    pub documento: String,
    pub reconhecido: bool,
    pub obrigatorio: bool,
}
