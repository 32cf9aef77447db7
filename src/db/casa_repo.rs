// src/db/casa_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::store::{load_list, save_list, ColecaoStore, COLECAO_CASAS},
    models::casa::CasaOracao,
};

// O repositório do cadastro de casas de oração, chave `codigo`
#[derive(Clone)]
pub struct CasaRepository {
    store: Arc<dyn ColecaoStore>,
}

impl CasaRepository {
    pub fn new(store: Arc<dyn ColecaoStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<CasaOracao>, AppError> {
        load_list(self.store.as_ref(), COLECAO_CASAS).await
    }

    pub async fn find(&self, codigo: &str) -> Result<Option<CasaOracao>, AppError> {
        let casas = self.list().await?;
        Ok(casas.into_iter().find(|casa| casa.codigo == codigo))
    }

    /// Insere ou substitui cada casa pelo código (vale a última escrita).
    /// Retorna (criadas, atualizadas).
    pub async fn upsert_many(&self, novas: Vec<CasaOracao>) -> Result<(usize, usize), AppError> {
        let mut casas = self.list().await?;
        let mut criadas = 0;
        let mut atualizadas = 0;

        for nova in novas {
            match casas.iter_mut().find(|casa| casa.codigo == nova.codigo) {
                Some(existente) => {
                    *existente = nova;
                    atualizadas += 1;
                }
                None => {
                    casas.push(nova);
                    criadas += 1;
                }
            }
        }

        save_list(self.store.as_ref(), COLECAO_CASAS, &casas).await?;
        Ok((criadas, atualizadas))
    }

    pub async fn create(&self, casa: CasaOracao) -> Result<CasaOracao, AppError> {
        let mut casas = self.list().await?;
        if casas.iter().any(|existente| existente.codigo == casa.codigo) {
            return Err(AppError::UniqueConstraintViolation(format!(
                "Já existe uma casa com o código '{}'.",
                casa.codigo
            )));
        }

        casas.push(casa.clone());
        save_list(self.store.as_ref(), COLECAO_CASAS, &casas).await?;
        Ok(casa)
    }

    pub async fn update(&self, codigo: &str, casa: CasaOracao) -> Result<CasaOracao, AppError> {
        let mut casas = self.list().await?;
        let existente = casas
            .iter_mut()
            .find(|existente| existente.codigo == codigo)
            .ok_or_else(|| AppError::CasaNotFound(codigo.to_string()))?;

        *existente = casa.clone();
        save_list(self.store.as_ref(), COLECAO_CASAS, &casas).await?;
        Ok(casa)
    }

    pub async fn delete(&self, codigo: &str) -> Result<(), AppError> {
        let mut casas = self.list().await?;
        let antes = casas.len();
        casas.retain(|casa| casa.codigo != codigo);
        if casas.len() == antes {
            return Err(AppError::CasaNotFound(codigo.to_string()));
        }

        save_list(self.store.as_ref(), COLECAO_CASAS, &casas).await
    }
}
