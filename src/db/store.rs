// src/db/store.rs

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::common::error::AppError;

// Nomes das coleções persistidas
pub const COLECAO_CASAS: &str = "casas";
pub const COLECAO_GESTAO: &str = "gestao";
pub const COLECAO_DOCUMENTOS_FALTANTES: &str = "documentos_faltantes";

/// Armazenamento de coleções nomeadas, cada uma guardada inteira como um JSON.
///
/// Não há transação entre coleções: ler, alterar e salvar de volta não é
/// atômico, e duas requisições concorrentes podem sobrescrever uma à outra
/// (vale a última escrita).
#[async_trait]
pub trait ColecaoStore: Send + Sync {
    async fn load(&self, colecao: &str) -> Result<Option<Value>, AppError>;
    async fn save(&self, colecao: &str, dados: Value) -> Result<(), AppError>;
    async fn clear(&self, colecao: &str) -> Result<(), AppError>;
}

/// Lê uma coleção como lista tipada. Coleção inexistente é lista vazia.
pub async fn load_list<T: DeserializeOwned>(
    store: &dyn ColecaoStore,
    colecao: &str,
) -> Result<Vec<T>, AppError> {
    match store.load(colecao).await? {
        Some(dados) => Ok(serde_json::from_value(dados)?),
        None => Ok(Vec::new()),
    }
}

pub async fn save_list<T: Serialize>(
    store: &dyn ColecaoStore,
    colecao: &str,
    itens: &[T],
) -> Result<(), AppError> {
    store.save(colecao, serde_json::to_value(itens)?).await
}

// Store em memória: usado nos testes e quando não há DATABASE_URL
#[derive(Default)]
pub struct MemoryStore {
    colecoes: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ColecaoStore for MemoryStore {
    async fn load(&self, colecao: &str) -> Result<Option<Value>, AppError> {
        Ok(self.colecoes.read().await.get(colecao).cloned())
    }

    async fn save(&self, colecao: &str, dados: Value) -> Result<(), AppError> {
        self.colecoes.write().await.insert(colecao.to_string(), dados);
        Ok(())
    }

    async fn clear(&self, colecao: &str) -> Result<(), AppError> {
        self.colecoes.write().await.remove(colecao);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_load_save_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.load(COLECAO_CASAS).await.unwrap(), None);

        store.save(COLECAO_CASAS, json!([{ "codigo": "A" }])).await.unwrap();
        assert_eq!(
            store.load(COLECAO_CASAS).await.unwrap(),
            Some(json!([{ "codigo": "A" }]))
        );
        // Coleções são independentes
        assert_eq!(store.load(COLECAO_GESTAO).await.unwrap(), None);

        store.clear(COLECAO_CASAS).await.unwrap();
        assert_eq!(store.load(COLECAO_CASAS).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_typed_lists() {
        let store = MemoryStore::new();
        let vazia: Vec<String> = load_list(&store, COLECAO_GESTAO).await.unwrap();
        assert!(vazia.is_empty());

        save_list(&store, COLECAO_GESTAO, &["a".to_string(), "b".to_string()]).await.unwrap();
        let lida: Vec<String> = load_list(&store, COLECAO_GESTAO).await.unwrap();
        assert_eq!(lida, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_corrupted_collection_is_an_error() {
        let store = MemoryStore::new();
        store.save(COLECAO_GESTAO, json!({ "nao": "lista" })).await.unwrap();
        let lida: Result<Vec<String>, _> = load_list(&store, COLECAO_GESTAO).await;
        assert!(matches!(lida, Err(AppError::SerializationError(_))));
    }
}
