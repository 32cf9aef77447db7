// src/services/casa_service.rs

use validator::Validate;

use crate::{
    common::error::AppError,
    db::CasaRepository,
    models::{
        casa::{CasaOracao, ImportacaoCasasResumo},
        gestao::PlanilhaPayload,
    },
    services::planilha::{cell, find_column, optional_cell},
};

pub(crate) const COLUNAS_CODIGO: &[&str] = &["codigo", "cod", "cod. casa", "codigo da casa"];
const COLUNAS_NOME: &[&str] = &["nome", "casa de oracao", "nome da casa", "localidade"];
const COLUNAS_TIPO: &[&str] = &["tipo imovel", "tipo_imovel", "tipo de imovel", "tipo"];
const COLUNAS_ENDERECO: &[&str] = &["endereco"];
const COLUNAS_OBSERVACOES: &[&str] = &["observacoes", "observacao", "obs"];
const COLUNAS_STATUS: &[&str] = &["status", "situacao"];

/// Converte a planilha de cadastro em casas. Retorna as casas e quantas linhas foram ignoradas.
pub fn parse_casas(planilha: &PlanilhaPayload) -> Result<(Vec<CasaOracao>, usize), AppError> {
    let cabecalhos = &planilha.cabecalhos;
    let col_codigo = find_column(cabecalhos, COLUNAS_CODIGO).ok_or_else(|| {
        AppError::PlanilhaInvalida("A planilha de cadastro não possui a coluna 'Código'.".to_string())
    })?;
    let col_nome = find_column(cabecalhos, COLUNAS_NOME);
    let col_tipo = find_column(cabecalhos, COLUNAS_TIPO);
    let col_endereco = find_column(cabecalhos, COLUNAS_ENDERECO);
    let col_observacoes = find_column(cabecalhos, COLUNAS_OBSERVACOES);
    let col_status = find_column(cabecalhos, COLUNAS_STATUS);

    let mut casas = Vec::with_capacity(planilha.linhas.len());
    let mut ignoradas = 0;

    for (numero, linha) in planilha.linhas.iter().enumerate() {
        let codigo = cell(linha, col_codigo);
        if codigo.is_empty() {
            tracing::warn!("Linha {} do cadastro sem código, ignorada.", numero + 2);
            ignoradas += 1;
            continue;
        }

        // Sem nome na planilha, usa o próprio código
        let nome = optional_cell(linha, col_nome).unwrap_or_else(|| codigo.to_string());

        casas.push(CasaOracao {
            codigo: codigo.to_string(),
            nome,
            tipo_imovel: optional_cell(linha, col_tipo),
            endereco: optional_cell(linha, col_endereco),
            observacoes: optional_cell(linha, col_observacoes),
            status: optional_cell(linha, col_status),
        });
    }

    Ok((casas, ignoradas))
}

#[derive(Clone)]
pub struct CasaService {
    repo: CasaRepository,
}

impl CasaService {
    pub fn new(repo: CasaRepository) -> Self {
        Self { repo }
    }

    pub async fn list_casas(&self) -> Result<Vec<CasaOracao>, AppError> {
        self.repo.list().await
    }

    pub async fn get_casa(&self, codigo: &str) -> Result<CasaOracao, AppError> {
        self.repo
            .find(codigo)
            .await?
            .ok_or_else(|| AppError::CasaNotFound(codigo.to_string()))
    }

    pub async fn create_casa(&self, casa: CasaOracao) -> Result<CasaOracao, AppError> {
        casa.validate()?;
        let casa = self.repo.create(casa).await?;
        tracing::info!("Casa {} cadastrada.", casa.codigo);
        Ok(casa)
    }

    /// O código vem do caminho; o do corpo é ignorado.
    pub async fn update_casa(&self, codigo: &str, mut casa: CasaOracao) -> Result<CasaOracao, AppError> {
        casa.codigo = codigo.to_string();
        casa.validate()?;
        self.repo.update(codigo, casa).await
    }

    // As desconsiderações da casa continuam guardadas
    pub async fn delete_casa(&self, codigo: &str) -> Result<(), AppError> {
        self.repo.delete(codigo).await?;
        tracing::info!("Casa {} removida do cadastro.", codigo);
        Ok(())
    }

    pub async fn import_casas(&self, planilha: PlanilhaPayload) -> Result<ImportacaoCasasResumo, AppError> {
        planilha.validate()?;

        let (casas, linhas_ignoradas) = parse_casas(&planilha)?;
        let (casas_criadas, casas_atualizadas) = self.repo.upsert_many(casas).await?;

        tracing::info!(
            "✅ Cadastro importado: {} novas, {} atualizadas, {} linhas ignoradas.",
            casas_criadas, casas_atualizadas, linhas_ignoradas
        );

        Ok(ImportacaoCasasResumo {
            linhas_lidas: planilha.linhas.len(),
            linhas_ignoradas,
            casas_criadas,
            casas_atualizadas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn planilha(cabecalhos: &[&str], linhas: &[&[&str]]) -> PlanilhaPayload {
        PlanilhaPayload {
            cabecalhos: cabecalhos.iter().map(|c| c.to_string()).collect(),
            linhas: linhas
                .iter()
                .map(|linha| linha.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    fn service() -> CasaService {
        CasaService::new(CasaRepository::new(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn test_parse_casas_maps_headers() {
        let p = planilha(
            &["Código", "Casa de Oração", "Tipo Imóvel", "Endereço"],
            &[
                &["A", "Centro", "IP - Imóvel Próprio", "Rua 1"],
                &["", "Sem código", "", ""],
                &["B", "", "AL - Imóvel Alugado"],
            ],
        );

        let (casas, ignoradas) = parse_casas(&p).unwrap();
        assert_eq!(ignoradas, 1);
        assert_eq!(casas.len(), 2);
        assert_eq!(casas[0].nome, "Centro");
        assert_eq!(casas[0].endereco.as_deref(), Some("Rua 1"));
        assert_eq!(casas[1].nome, "B");
        assert_eq!(casas[1].tipo_imovel.as_deref(), Some("AL - Imóvel Alugado"));
        assert_eq!(casas[1].endereco, None);
    }

    #[test]
    fn test_parse_casas_requires_codigo_column() {
        let p = planilha(&["Nome"], &[&["Centro"]]);
        assert!(matches!(parse_casas(&p), Err(AppError::PlanilhaInvalida(_))));
    }

    #[tokio::test]
    async fn test_import_upserts_by_codigo() {
        let service = service();
        let primeira = planilha(&["codigo", "nome"], &[&["A", "Centro"], &["B", "Vila"]]);
        let resumo = service.import_casas(primeira).await.unwrap();
        assert_eq!(resumo.casas_criadas, 2);

        let segunda = planilha(&["codigo", "nome"], &[&["A", "Centro Novo"], &["C", "Bairro"]]);
        let resumo = service.import_casas(segunda).await.unwrap();
        assert_eq!(resumo.casas_criadas, 1);
        assert_eq!(resumo.casas_atualizadas, 1);

        let casas = service.list_casas().await.unwrap();
        assert_eq!(casas.len(), 3);
        assert_eq!(service.get_casa("A").await.unwrap().nome, "Centro Novo");
    }

    #[tokio::test]
    async fn test_crud() {
        let service = service();
        let casa = CasaOracao {
            codigo: "A".to_string(),
            nome: "Centro".to_string(),
            tipo_imovel: Some("IP".to_string()),
            endereco: None,
            observacoes: None,
            status: None,
        };

        service.create_casa(casa.clone()).await.unwrap();
        assert!(matches!(
            service.create_casa(casa.clone()).await,
            Err(AppError::UniqueConstraintViolation(_))
        ));

        let mut editada = casa.clone();
        editada.codigo = "outro".to_string();
        editada.nome = "Centro II".to_string();
        let salva = service.update_casa("A", editada).await.unwrap();
        assert_eq!(salva.codigo, "A");
        assert_eq!(salva.nome, "Centro II");

        service.delete_casa("A").await.unwrap();
        assert!(matches!(service.get_casa("A").await, Err(AppError::CasaNotFound(_))));
        assert!(matches!(service.delete_casa("A").await, Err(AppError::CasaNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = service();
        let casa = CasaOracao {
            codigo: "A".to_string(),
            nome: String::new(),
            tipo_imovel: None,
            endereco: None,
            observacoes: None,
            status: None,
        };
        assert!(matches!(service.create_casa(casa).await, Err(AppError::ValidationError(_))));
    }
}
