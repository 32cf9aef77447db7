// src/models/casa.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// --- ENUMS ---

// Interpretação do campo livre `tipo_imovel` pelo prefixo (ex: "IP - Imóvel Próprio")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoImovel {
    Proprio,
    Alugado,
    Cedido,
    NaoDeterminado,
    NaoInformado,
}

impl TipoImovel {
    /// Classifica o texto livre da planilha. Vazio ou prefixo desconhecido vira `NaoInformado`.
    pub fn from_texto(texto: Option<&str>) -> Self {
        let prefixo = texto
            .map(|t| t.trim().to_uppercase())
            .unwrap_or_default();

        if prefixo.starts_with("IP") {
            TipoImovel::Proprio
        } else if prefixo.starts_with("AL") {
            TipoImovel::Alugado
        } else if prefixo.starts_with("CD") {
            TipoImovel::Cedido
        } else if prefixo.starts_with("ND") {
            TipoImovel::NaoDeterminado
        } else {
            TipoImovel::NaoInformado
        }
    }

    pub fn rotulo(&self) -> &'static str {
        match self {
            TipoImovel::Proprio => "Próprio",
            TipoImovel::Alugado => "Alugado",
            TipoImovel::Cedido => "Cedido",
            TipoImovel::NaoDeterminado => "Não determinado",
            TipoImovel::NaoInformado => "Não informado",
        }
    }
}

// --- CASA DE ORAÇÃO ---

// Os nomes dos campos seguem as colunas da planilha de cadastro (snake_case).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct CasaOracao {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "BR-21-0001")]
    pub codigo: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Jardim Primavera")]
    pub nome: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "IP - Imóvel Próprio")]
    pub tipo_imovel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ativa")]
    pub status: Option<String>,
}

impl CasaOracao {
    pub fn tipo(&self) -> TipoImovel {
        TipoImovel::from_texto(self.tipo_imovel.as_deref())
    }
}

// Resultado da importação da planilha de cadastro
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportacaoCasasResumo {
    pub linhas_lidas: usize,
    pub linhas_ignoradas: usize,
    pub casas_criadas: usize,
    pub casas_atualizadas: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipo_imovel_by_prefix() {
        assert_eq!(TipoImovel::from_texto(Some("IP - Imóvel Próprio")), TipoImovel::Proprio);
        assert_eq!(TipoImovel::from_texto(Some("  al - Imóvel Alugado")), TipoImovel::Alugado);
        assert_eq!(TipoImovel::from_texto(Some("CD - Cedido")), TipoImovel::Cedido);
        assert_eq!(TipoImovel::from_texto(Some("ND")), TipoImovel::NaoDeterminado);
        assert_eq!(TipoImovel::from_texto(Some("Imóvel Próprio")), TipoImovel::NaoInformado);
        assert_eq!(TipoImovel::from_texto(None), TipoImovel::NaoInformado);
    }
}
