// src/db/documento_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::store::{load_list, save_list, ColecaoStore, COLECAO_DOCUMENTOS_FALTANTES},
    models::documento::DocumentoFaltante,
};

// Desconsiderações de documentos faltantes, chave (codigo, documento).
// Nada aqui apaga registros sozinho: só `delete` remove.
#[derive(Clone)]
pub struct DocumentoFaltanteRepository {
    store: Arc<dyn ColecaoStore>,
}

impl DocumentoFaltanteRepository {
    pub fn new(store: Arc<dyn ColecaoStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<DocumentoFaltante>, AppError> {
        load_list(self.store.as_ref(), COLECAO_DOCUMENTOS_FALTANTES).await
    }

    pub async fn find(
        &self,
        codigo: &str,
        documento: &str,
    ) -> Result<Option<DocumentoFaltante>, AppError> {
        let itens = self.list().await?;
        Ok(itens.into_iter().find(|item| item.is_mesma_chave(codigo, documento)))
    }

    /// Cria ou substitui o registro da chave (ação do usuário).
    pub async fn upsert(&self, novo: DocumentoFaltante) -> Result<DocumentoFaltante, AppError> {
        let mut itens = self.list().await?;
        match itens
            .iter_mut()
            .find(|item| item.is_mesma_chave(&novo.codigo, &novo.documento))
        {
            Some(existente) => *existente = novo.clone(),
            None => itens.push(novo.clone()),
        }

        save_list(self.store.as_ref(), COLECAO_DOCUMENTOS_FALTANTES, &itens).await?;
        Ok(novo)
    }

    /// Grava só as chaves que ainda não existem; nunca sobrescreve.
    /// Retorna quantos registros foram criados.
    pub async fn insert_missing(&self, propostas: Vec<DocumentoFaltante>) -> Result<usize, AppError> {
        if propostas.is_empty() {
            return Ok(0);
        }

        let mut itens = self.list().await?;
        let mut criados = 0;
        for proposta in propostas {
            if itens
                .iter()
                .any(|item| item.is_mesma_chave(&proposta.codigo, &proposta.documento))
            {
                continue;
            }
            itens.push(proposta);
            criados += 1;
        }

        if criados > 0 {
            save_list(self.store.as_ref(), COLECAO_DOCUMENTOS_FALTANTES, &itens).await?;
        }
        Ok(criados)
    }

    pub async fn delete(&self, codigo: &str, documento: &str) -> Result<(), AppError> {
        let mut itens = self.list().await?;
        let antes = itens.len();
        itens.retain(|item| !item.is_mesma_chave(codigo, documento));
        if itens.len() == antes {
            return Err(AppError::DocumentoFaltanteNotFound {
                codigo: codigo.to_string(),
                documento: documento.to_string(),
            });
        }

        save_list(self.store.as_ref(), COLECAO_DOCUMENTOS_FALTANTES, &itens).await
    }
}
