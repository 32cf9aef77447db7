// src/db/pg_store.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{common::error::AppError, db::store::ColecaoStore};

// Cada coleção é uma linha da tabela `colecoes` (ver migrations/)
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ColecaoStore for PgStore {
    async fn load(&self, colecao: &str) -> Result<Option<Value>, AppError> {
        let dados = sqlx::query_scalar::<_, Value>("SELECT dados FROM colecoes WHERE nome = $1")
            .bind(colecao)
            .fetch_optional(&self.pool)
            .await?;

        Ok(dados)
    }

    async fn save(&self, colecao: &str, dados: Value) -> Result<(), AppError> {
        // UPSERT: a coleção inteira é substituída
        sqlx::query(
            r#"
            INSERT INTO colecoes (nome, dados)
            VALUES ($1, $2)
            ON CONFLICT (nome)
            DO UPDATE SET
                dados = EXCLUDED.dados,
                atualizado_em = NOW()
            "#,
        )
        .bind(colecao)
        .bind(dados)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear(&self, colecao: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM colecoes WHERE nome = $1")
            .bind(colecao)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
