// src/models/gestao.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Marcação de um documento na planilha de gestão.
///
/// Só `Presente` conta como "possui o documento"; `Ausente` e `Desconhecido`
/// entram igualmente como faltantes nas estatísticas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Presenca {
    Presente,
    Ausente,
    #[default]
    Desconhecido,
}

impl Presenca {
    /// "X" (sem diferenciar maiúsculas, após trim) é presente; vazio é desconhecido;
    /// qualquer outro texto é ausente.
    pub fn from_marcacao(valor: &str) -> Self {
        let valor = valor.trim();
        if valor.eq_ignore_ascii_case("x") {
            Presenca::Presente
        } else if valor.is_empty() {
            Presenca::Desconhecido
        } else {
            Presenca::Ausente
        }
    }

    pub fn is_presente(&self) -> bool {
        matches!(self, Presenca::Presente)
    }

    /// Junta duas colunas que normalizaram para o mesmo documento.
    /// `self` é o valor já acumulado (colunas anteriores).
    pub fn merge(self, outra: Presenca) -> Presenca {
        match (self, outra) {
            (Presenca::Presente, _) | (_, Presenca::Presente) => Presenca::Presente,
            (Presenca::Desconhecido, outra) => outra,
            (atual, _) => atual,
        }
    }
}

// Uma linha da matriz: o código da casa e a presença de cada documento canônico
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistroGestao {
    pub codigo: String,
    pub documentos: BTreeMap<String, Presenca>,
}

impl RegistroGestao {
    pub fn new(codigo: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            documentos: BTreeMap::new(),
        }
    }

    pub fn presenca(&self, documento: &str) -> Presenca {
        self.documentos.get(documento).copied().unwrap_or_default()
    }

    pub fn possui(&self, documento: &str) -> bool {
        self.presenca(documento).is_presente()
    }

    /// Insere aplicando a regra de merge quando a chave já existe.
    pub fn marcar(&mut self, documento: impl Into<String>, presenca: Presenca) {
        let entrada = self.documentos.entry(documento.into()).or_default();
        *entrada = entrada.merge(presenca);
    }
}

/// Planilha já decodificada: linha de cabeçalho + linhas de valores, na ordem das colunas.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanilhaPayload {
    #[validate(length(min = 1, message = "A planilha precisa de uma linha de cabeçalho."))]
    pub cabecalhos: Vec<String>,

    #[serde(default)]
    pub linhas: Vec<Vec<String>>,
}

// Resultado da importação da planilha de gestão
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportacaoGestaoResumo {
    pub linhas_lidas: usize,
    pub linhas_ignoradas: usize,
    pub documentos: Vec<String>,
    /// Colunas que caíram no mesmo documento canônico de uma coluna anterior
    pub colunas_mescladas: Vec<String>,
}
