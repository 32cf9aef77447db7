// src/db/gestao_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::store::{load_list, save_list, ColecaoStore, COLECAO_GESTAO},
    models::gestao::RegistroGestao,
};

// A matriz de presença de documentos. Cada importação substitui a matriz inteira.
#[derive(Clone)]
pub struct GestaoRepository {
    store: Arc<dyn ColecaoStore>,
}

impl GestaoRepository {
    pub fn new(store: Arc<dyn ColecaoStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<RegistroGestao>, AppError> {
        load_list(self.store.as_ref(), COLECAO_GESTAO).await
    }

    pub async fn replace(&self, registros: &[RegistroGestao]) -> Result<(), AppError> {
        save_list(self.store.as_ref(), COLECAO_GESTAO, registros).await
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.clear(COLECAO_GESTAO).await
    }
}
