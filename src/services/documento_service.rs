// src/services/documento_service.rs

use chrono::Utc;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::DocumentoFaltanteRepository,
    models::documento::{DocumentoFaltante, NormalizacaoResponse, UpsertDocumentoFaltantePayload},
    services::{classifier::is_mandatory, normalizer},
};

// Desconsiderações manuais feitas pelo usuário
#[derive(Clone)]
pub struct DocumentoService {
    repo: DocumentoFaltanteRepository,
}

impl DocumentoService {
    pub fn new(repo: DocumentoFaltanteRepository) -> Self {
        Self { repo }
    }

    pub async fn list_documentos_faltantes(&self) -> Result<Vec<DocumentoFaltante>, AppError> {
        self.repo.list().await
    }

    /// Cria ou substitui a desconsideração da chave (codigo, documento).
    /// O documento é gravado pelo nome canônico, o mesmo usado na análise.
    pub async fn upsert_documento_faltante(
        &self,
        payload: UpsertDocumentoFaltantePayload,
    ) -> Result<DocumentoFaltante, AppError> {
        payload.validate()?;

        let observacao = payload
            .observacao
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());

        let item = DocumentoFaltante {
            codigo: payload.codigo.trim().to_string(),
            documento: normalizer::normalize(payload.documento.trim()),
            observacao,
            desconsiderar: payload.desconsiderar,
            data_observacao: Some(Utc::now()),
            responsavel: payload.responsavel.filter(|r| !r.trim().is_empty()),
        };

        let salvo = self.repo.upsert(item).await?;
        tracing::info!(
            "Desconsideração de '{}' na casa {} gravada (desconsiderar = {}).",
            salvo.documento, salvo.codigo, salvo.desconsiderar
        );
        Ok(salvo)
    }

    pub async fn delete_documento_faltante(&self, codigo: &str, documento: &str) -> Result<(), AppError> {
        self.repo.delete(codigo, &normalizer::normalize(documento.trim())).await
    }

    // Sonda: como um nome de coluna seria lido na importação
    pub fn probe_name(&self, nome: &str) -> NormalizacaoResponse {
        let canonico = normalizer::lookup(nome);
        let documento = canonico.map(str::to_string).unwrap_or_else(|| nome.to_string());
        NormalizacaoResponse {
            entrada: nome.to_string(),
            obrigatorio: is_mandatory(&documento),
            reconhecido: canonico.is_some(),
            documento,
        }
    }
}
