// src/services/gestao_service.rs

use std::collections::HashMap;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::GestaoRepository,
    models::gestao::{ImportacaoGestaoResumo, PlanilhaPayload, Presenca, RegistroGestao},
    services::{
        casa_service::COLUNAS_CODIGO,
        normalizer::{fold, normalize},
        planilha::{cell, find_column},
    },
};

// Colunas de dados da casa que podem vir junto na planilha de gestão
const COLUNAS_NAO_DOCUMENTO: &[&str] = &[
    "nome",
    "casa de oracao",
    "nome da casa",
    "localidade",
    "endereco",
    "tipo",
    "tipo imovel",
    "tipo_imovel",
    "tipo de imovel",
    "status",
    "situacao",
    "observacoes",
    "observacao",
    "obs",
];

/// Monta a matriz de presença a partir da planilha de gestão.
///
/// Cada cabeçalho vira um documento canônico; colunas que caem no mesmo
/// documento são mescladas. Linhas repetidas da mesma casa também.
pub fn build_matrix(
    planilha: &PlanilhaPayload,
) -> Result<(Vec<RegistroGestao>, ImportacaoGestaoResumo), AppError> {
    let cabecalhos = &planilha.cabecalhos;
    let col_codigo = find_column(cabecalhos, COLUNAS_CODIGO).ok_or_else(|| {
        AppError::PlanilhaInvalida("A planilha de gestão não possui a coluna 'Código'.".to_string())
    })?;

    let ignoradas: Vec<String> = COLUNAS_NAO_DOCUMENTO.iter().map(|c| fold(c)).collect();
    let mut colunas: Vec<(usize, String)> = Vec::new();
    let mut documentos: Vec<String> = Vec::new();
    let mut colunas_mescladas = Vec::new();

    for (indice, cabecalho) in cabecalhos.iter().enumerate() {
        let dobrado = fold(cabecalho);
        if indice == col_codigo || dobrado.is_empty() || ignoradas.contains(&dobrado) {
            continue;
        }

        let documento = normalize(cabecalho.trim());
        if documentos.contains(&documento) {
            tracing::debug!("Coluna '{}' mesclada em '{}'", cabecalho, documento);
            colunas_mescladas.push(cabecalho.clone());
        } else {
            documentos.push(documento.clone());
        }
        colunas.push((indice, documento));
    }

    let mut registros: Vec<RegistroGestao> = Vec::new();
    let mut posicoes: HashMap<String, usize> = HashMap::new();
    let mut linhas_ignoradas = 0;

    for (numero, linha) in planilha.linhas.iter().enumerate() {
        let codigo = cell(linha, col_codigo);
        if codigo.is_empty() {
            tracing::warn!("Linha {} da gestão sem código, ignorada.", numero + 2);
            linhas_ignoradas += 1;
            continue;
        }

        let posicao = *posicoes.entry(codigo.to_string()).or_insert_with(|| {
            registros.push(RegistroGestao::new(codigo));
            registros.len() - 1
        });
        let registro = &mut registros[posicao];

        for (indice, documento) in &colunas {
            registro.marcar(documento.clone(), Presenca::from_marcacao(cell(linha, *indice)));
        }
    }

    let resumo = ImportacaoGestaoResumo {
        linhas_lidas: planilha.linhas.len(),
        linhas_ignoradas,
        documentos,
        colunas_mescladas,
    };

    Ok((registros, resumo))
}

#[derive(Clone)]
pub struct GestaoService {
    repo: GestaoRepository,
}

impl GestaoService {
    pub fn new(repo: GestaoRepository) -> Self {
        Self { repo }
    }

    pub async fn list_registros(&self) -> Result<Vec<RegistroGestao>, AppError> {
        self.repo.list().await
    }

    /// Substitui a matriz inteira pela da planilha.
    pub async fn import_gestao(&self, planilha: PlanilhaPayload) -> Result<ImportacaoGestaoResumo, AppError> {
        planilha.validate()?;

        let (registros, resumo) = build_matrix(&planilha)?;
        self.repo.replace(&registros).await?;

        tracing::info!(
            "✅ Gestão importada: {} casas, {} documentos, {} colunas mescladas.",
            registros.len(), resumo.documentos.len(), resumo.colunas_mescladas.len()
        );
        Ok(resumo)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.repo.clear().await?;
        tracing::info!("Matriz de gestão apagada.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, services::normalizer};
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

    #[test]
    fn test_columns_are_normalized_and_merged() {
        let p = planilha(
            &["Código", "Nome", "Alvará", "ALVARA DE FUNCIONAMENTO", "Relatório Anual Customizado"],
            &[&["A", "Centro", "", "X", "x"], &["B", "Vila", "nao", "", ""]],
        );

        let (registros, resumo) = build_matrix(&p).unwrap();
        assert_eq!(
            resumo.documentos,
            vec![
                normalizer::ALVARA_FUNCIONAMENTO.to_string(),
                "Relatório Anual Customizado".to_string()
            ]
        );
        assert_eq!(resumo.colunas_mescladas, vec!["ALVARA DE FUNCIONAMENTO".to_string()]);

        assert_eq!(registros.len(), 2);
        assert_eq!(registros[0].presenca(normalizer::ALVARA_FUNCIONAMENTO), Presenca::Presente);
        assert!(registros[0].possui("Relatório Anual Customizado"));
        // Primeira coluna preenchida vence quando nenhuma tem "X"
        assert_eq!(registros[1].presenca(normalizer::ALVARA_FUNCIONAMENTO), Presenca::Ausente);
        // "Nome" não é documento
        assert!(!registros[0].documentos.contains_key("Nome"));
    }

    #[test]
    fn test_duplicate_rows_merge_into_one_record() {
        let p = planilha(&["codigo", "IPTU"], &[&["A", ""], &["A", "X"], &["", "X"]]);
        let (registros, resumo) = build_matrix(&p).unwrap();
        assert_eq!(registros.len(), 1);
        assert!(registros[0].possui(normalizer::IPTU));
        assert_eq!(resumo.linhas_ignoradas, 1);
        assert_eq!(resumo.linhas_lidas, 3);
    }

    #[test]
    fn test_missing_codigo_column_is_rejected() {
        let p = planilha(&["Alvará"], &[&["X"]]);
        assert!(matches!(build_matrix(&p), Err(AppError::PlanilhaInvalida(_))));
    }

    #[tokio::test]
    async fn test_import_replaces_previous_matrix() {
        let service = GestaoService::new(GestaoRepository::new(Arc::new(MemoryStore::new())));

        service
            .import_gestao(planilha(&["codigo", "IPTU"], &[&["A", "X"], &["B", ""]]))
            .await
            .unwrap();
        service
            .import_gestao(planilha(&["codigo", "AVCB"], &[&["C", "X"]]))
            .await
            .unwrap();

        let registros = service.list_registros().await.unwrap();
        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].codigo, "C");
        assert!(registros[0].possui(normalizer::AVCB));

        service.clear().await.unwrap();
        assert!(service.list_registros().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_rejects_empty_header() {
        let service = GestaoService::new(GestaoRepository::new(Arc::new(MemoryStore::new())));
        let resultado = service.import_gestao(planilha(&[], &[])).await;
        assert!(matches!(resultado, Err(AppError::ValidationError(_))));
    }
}
