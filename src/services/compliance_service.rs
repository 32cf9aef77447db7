// src/services/compliance_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{CasaRepository, DocumentoFaltanteRepository, GestaoRepository},
    models::{
        analise::{AnaliseDocumento, EntradaGrafico, ResumoCasa},
        casa::CasaOracao,
        documento::DocumentoFaltante,
        gestao::RegistroGestao,
    },
    services::analyzer,
};

/// Estado carregado e já reconciliado com as desconsiderações automáticas.
pub struct Reconciliacao {
    pub casas: Vec<CasaOracao>,
    pub matriz: Vec<RegistroGestao>,
    pub desconsideracoes: Vec<DocumentoFaltante>,
}

impl Reconciliacao {
    pub fn analyses(&self) -> Vec<AnaliseDocumento> {
        let mut analises =
            analyzer::compute_analyses(&self.matriz, &self.casas, &self.desconsideracoes);
        analyzer::sort_by_priority(&mut analises);
        analises
    }

    // Denominador usado em todas as estatísticas
    pub fn casas_com_gestao(&self) -> usize {
        analyzer::count_considered(&self.matriz, &self.casas)
    }

    pub fn property_summaries(&self) -> Vec<ResumoCasa> {
        analyzer::compute_property_summaries(&self.matriz, &self.casas, &self.desconsideracoes)
    }
}

#[derive(Clone)]
pub struct ComplianceService {
    casa_repo: CasaRepository,
    gestao_repo: GestaoRepository,
    documento_repo: DocumentoFaltanteRepository,
}

impl ComplianceService {
    pub fn new(
        casa_repo: CasaRepository,
        gestao_repo: GestaoRepository,
        documento_repo: DocumentoFaltanteRepository,
    ) -> Self {
        Self { casa_repo, gestao_repo, documento_repo }
    }

    /// Grava as desconsiderações automáticas que ainda não existem.
    pub async fn commit_overrides(&self, propostas: Vec<DocumentoFaltante>) -> Result<usize, AppError> {
        let criadas = self.documento_repo.insert_missing(propostas).await?;
        if criadas > 0 {
            tracing::info!("{} desconsiderações automáticas gravadas.", criadas);
        }
        Ok(criadas)
    }

    /// Carrega tudo, propõe e grava as desconsiderações automáticas.
    ///
    /// Toda consulta de análise passa por aqui, então uma simples leitura do
    /// dashboard pode criar registros em `documentos_faltantes`.
    pub async fn reconcile(&self) -> Result<Reconciliacao, AppError> {
        let casas = self.casa_repo.list().await?;
        let matriz = self.gestao_repo.list().await?;
        let mut desconsideracoes = self.documento_repo.list().await?;

        let propostas = analyzer::propose_overrides(&matriz, &casas, &desconsideracoes, Utc::now());
        if !propostas.is_empty() {
            self.commit_overrides(propostas.clone()).await?;
            desconsideracoes.extend(propostas);
        }

        Ok(Reconciliacao { casas, matriz, desconsideracoes })
    }

    /// Análise por documento, obrigatórios primeiro.
    pub async fn analyze(&self) -> Result<Vec<AnaliseDocumento>, AppError> {
        Ok(self.reconcile().await?.analyses())
    }

    pub async fn property_summaries(&self) -> Result<Vec<ResumoCasa>, AppError> {
        Ok(self.reconcile().await?.property_summaries())
    }

    pub async fn chart(&self) -> Result<Vec<EntradaGrafico>, AppError> {
        let analises = self.analyze().await?;
        Ok(analyzer::chart_entries(&analises))
    }
}
