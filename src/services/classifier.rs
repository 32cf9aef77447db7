// src/services/classifier.rs

use std::sync::LazyLock;

use crate::{
    models::casa::TipoImovel,
    services::normalizer::{self, fold},
};

// Documentos cuja falta pesa contra a conformidade
const OBRIGATORIOS: &[&str] = &[
    normalizer::ALVARA_FUNCIONAMENTO,
    normalizer::AVCB,
    normalizer::PROJETO_APROVADO,
    normalizer::HABITE_SE,
    normalizer::RG_RESPONSAVEL,
    normalizer::CPF_RESPONSAVEL,
];

static OBRIGATORIOS_DOBRADOS: LazyLock<Vec<String>> =
    LazyLock::new(|| OBRIGATORIOS.iter().map(|nome| fold(nome)).collect());

/// O tipo de documento é obrigatório em algum imóvel? Depende só do nome.
pub fn is_mandatory(documento: &str) -> bool {
    let dobrado = fold(&normalizer::normalize(documento));
    OBRIGATORIOS_DOBRADOS.iter().any(|obrigatorio| *obrigatorio == dobrado)
}

/// Exceções por tipo de imóvel. A ordem de `PRECEDENCIA` decide qual regra
/// vale quando um nome casa com mais de uma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegraExcecao {
    // Escritura, averbação, compra e venda: só para imóvel próprio
    Propriedade,
    // Projeto aprovado e habite-se: podem ser dispensados em imóvel alugado
    ProjetoHabite,
    // Contrato de aluguel: só para imóvel alugado
    ContratoAluguel,
}

impl RegraExcecao {
    pub const PRECEDENCIA: [RegraExcecao; 3] = [
        RegraExcecao::Propriedade,
        RegraExcecao::ProjetoHabite,
        RegraExcecao::ContratoAluguel,
    ];

    /// `dobrado` precisa estar na forma de `fold`.
    pub fn casa_com(&self, dobrado: &str) -> bool {
        match self {
            RegraExcecao::Propriedade => {
                dobrado.contains("averbacao")
                    || dobrado.contains("escritura")
                    || (dobrado.contains("compra") && dobrado.contains("venda"))
            }
            RegraExcecao::ProjetoHabite => {
                let projeto_aprovado = dobrado
                    .find("projeto")
                    .is_some_and(|inicio| dobrado[inicio..].contains("aprovado"));
                projeto_aprovado || dobrado.contains("habite")
            }
            RegraExcecao::ContratoAluguel => {
                dobrado.contains("contrato") && dobrado.contains("aluguel")
            }
        }
    }

    /// A regra dispensa o documento para este tipo de imóvel?
    pub fn dispensa(&self, tipo: TipoImovel) -> bool {
        match self {
            RegraExcecao::Propriedade => tipo != TipoImovel::Proprio,
            RegraExcecao::ProjetoHabite => tipo == TipoImovel::Alugado,
            RegraExcecao::ContratoAluguel => tipo != TipoImovel::Alugado,
        }
    }

    pub fn observacao(&self) -> &'static str {
        match self {
            RegraExcecao::Propriedade => "Não é imóvel próprio, portanto não é obrigatório.",
            RegraExcecao::ProjetoHabite => "Imóvel alugado, documento pode ser desconsiderado.",
            RegraExcecao::ContratoAluguel => {
                "Contrato de aluguel é obrigatório somente para imóveis alugados."
            }
        }
    }
}

/// Primeira regra (em ordem de precedência) que dispensa o documento para o tipo do imóvel.
pub fn exemption_for(documento: &str, tipo: TipoImovel) -> Option<RegraExcecao> {
    let dobrado = fold(documento);
    RegraExcecao::PRECEDENCIA
        .into_iter()
        .find(|regra| regra.casa_com(&dobrado) && regra.dispensa(tipo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_documents() {
        assert!(is_mandatory(normalizer::ALVARA_FUNCIONAMENTO));
        assert!(is_mandatory("AVCB"));
        assert!(is_mandatory("habite se"));
        assert!(is_mandatory("Projeto Aprovado"));
        assert!(is_mandatory("RG do Responsável"));
        assert!(!is_mandatory("Escritura"));
        assert!(!is_mandatory("IPTU"));
    }

    #[test]
    fn test_unknown_document_is_not_mandatory() {
        assert!(!is_mandatory("Relatório Anual Customizado"));
        assert!(!is_mandatory(""));
    }

    #[test]
    fn test_is_mandatory_is_stable_across_calls() {
        let primeira = is_mandatory("Alvará");
        for _ in 0..3 {
            assert_eq!(is_mandatory("Alvará"), primeira);
        }
    }

    #[test]
    fn test_deed_rule_only_for_owned() {
        assert_eq!(exemption_for("Escritura", TipoImovel::Proprio), None);
        assert_eq!(exemption_for("Escritura", TipoImovel::Alugado), Some(RegraExcecao::Propriedade));
        assert_eq!(exemption_for("Averbação da Construção", TipoImovel::Cedido), Some(RegraExcecao::Propriedade));
        assert_eq!(exemption_for("Contrato de Compra e Venda", TipoImovel::NaoInformado), Some(RegraExcecao::Propriedade));
    }

    #[test]
    fn test_project_rule_only_for_rented() {
        assert_eq!(exemption_for("Projeto Aprovado", TipoImovel::Alugado), Some(RegraExcecao::ProjetoHabite));
        assert_eq!(exemption_for("Projeto de reforma aprovado", TipoImovel::Alugado), Some(RegraExcecao::ProjetoHabite));
        assert_eq!(exemption_for("Habite-se", TipoImovel::Alugado), Some(RegraExcecao::ProjetoHabite));
        assert_eq!(exemption_for("Habite-se", TipoImovel::Proprio), None);
        // "aprovado" antes de "projeto" não conta
        assert_eq!(exemption_for("Aprovado sem projeto", TipoImovel::Alugado), None);
    }

    #[test]
    fn test_rental_contract_rule() {
        assert_eq!(exemption_for("Contrato de Aluguel", TipoImovel::Alugado), None);
        assert_eq!(exemption_for("Contratos de Aluguel", TipoImovel::Proprio), Some(RegraExcecao::ContratoAluguel));
        assert_eq!(exemption_for("Aluguel", TipoImovel::Proprio), None);
    }

    #[test]
    fn test_overlapping_names_follow_precedence() {
        let nome = "Escritura e Contrato de Aluguel";
        // alugado: a regra de propriedade dispara primeiro
        assert_eq!(exemption_for(nome, TipoImovel::Alugado), Some(RegraExcecao::Propriedade));
        // próprio: propriedade não dispensa, então vale a do contrato de aluguel
        assert_eq!(exemption_for(nome, TipoImovel::Proprio), Some(RegraExcecao::ContratoAluguel));
    }

    #[test]
    fn test_unrelated_document_has_no_exemption() {
        assert_eq!(exemption_for("Alvará de Funcionamento", TipoImovel::Alugado), None);
        assert_eq!(exemption_for("IPTU", TipoImovel::Cedido), None);
    }
}
