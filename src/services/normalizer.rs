// src/services/normalizer.rs

//! Normalização de nomes de documentos vindos das colunas da planilha.
//!
//! Cada planilha exportada escreve os documentos de um jeito ("Alvará",
//! "ALVARA DE FUNCIONAMENTO", "Habite se"...). Aqui tudo é dobrado para uma
//! forma sem acentos e minúscula e comparado por substring contra o
//! dicionário abaixo.

use std::sync::LazyLock;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

// --- NOMES CANÔNICOS ---

pub const ALVARA_FUNCIONAMENTO: &str = "Alvará de Funcionamento";
pub const CLCB: &str = "CLCB - Certificado de Licença do Corpo de Bombeiros";
pub const AVCB: &str = "AVCB - Auto de Vistoria do Corpo de Bombeiros";
pub const PROJETO_APROVADO: &str = "Projeto Aprovado";
pub const HABITE_SE: &str = "Habite-se";
pub const AVERBACAO: &str = "Averbação da Construção";
pub const ESCRITURA: &str = "Escritura";
pub const COMPRA_E_VENDA: &str = "Contrato de Compra e Venda";
pub const CONTRATO_ALUGUEL: &str = "Contrato de Aluguel";
pub const TERMO_CESSAO: &str = "Termo de Cessão";
pub const IPTU: &str = "IPTU";
pub const MATRICULA: &str = "Matrícula do Imóvel";
pub const ONUS_REAIS: &str = "Certidão de Ônus Reais";
pub const LAUDO_ELETRICO: &str = "Laudo Elétrico";
// Chaves antigas de documentos pessoais, mantidas para planilhas legadas
pub const RG_RESPONSAVEL: &str = "RG do Responsável";
pub const CPF_RESPONSAVEL: &str = "CPF do Responsável";

/// Dicionário (chave bruta -> nome canônico).
///
/// A ORDEM IMPORTA: a primeira entrada que casar vence. Chaves mais
/// específicas vêm antes das genéricas (ex: "clcb" antes de "avcb", para que
/// o nome canônico do CLCB não caia no AVCB). Todo nome canônico precisa
/// casar primeiro com uma entrada que aponta para ele mesmo.
const DICIONARIO: &[(&str, &str)] = &[
    ("alvara de funcionamento", ALVARA_FUNCIONAMENTO),
    ("alvara", ALVARA_FUNCIONAMENTO),
    ("licenca de funcionamento", ALVARA_FUNCIONAMENTO),
    ("clcb", CLCB),
    ("certificado de licenca do corpo de bombeiros", CLCB),
    ("avcb", AVCB),
    ("auto de vistoria", AVCB),
    ("projeto aprovado", PROJETO_APROVADO),
    ("planta aprovada", PROJETO_APROVADO),
    ("habite-se", HABITE_SE),
    ("habite se", HABITE_SE),
    ("habitese", HABITE_SE),
    ("averbação", AVERBACAO),
    ("escritura", ESCRITURA),
    ("compra e venda", COMPRA_E_VENDA),
    ("contrato de aluguel", CONTRATO_ALUGUEL),
    ("contrato de locação", CONTRATO_ALUGUEL),
    ("aluguel", CONTRATO_ALUGUEL),
    ("termo de cessão", TERMO_CESSAO),
    ("comodato", TERMO_CESSAO),
    ("iptu", IPTU),
    ("matrícula", MATRICULA),
    ("ônus reais", ONUS_REAIS),
    ("laudo elétrico", LAUDO_ELETRICO),
    ("instalações elétricas", LAUDO_ELETRICO),
    ("rg do responsável", RG_RESPONSAVEL),
    ("cpf do responsável", CPF_RESPONSAVEL),
];

// Chaves já dobradas, na mesma ordem do dicionário
static DICIONARIO_DOBRADO: LazyLock<Vec<(String, &'static str)>> = LazyLock::new(|| {
    DICIONARIO
        .iter()
        .map(|(chave, canonico)| (fold(chave), *canonico))
        .collect()
});

/// Forma dobrada: NFD sem marcas combinantes, minúscula, sem espaços nas pontas.
pub fn fold(texto: &str) -> String {
    texto
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Procura a entrada do dicionário para o nome bruto.
pub fn lookup(nome: &str) -> Option<&'static str> {
    let dobrado = fold(nome);
    // "" é substring de qualquer chave
    if dobrado.is_empty() {
        return None;
    }

    DICIONARIO_DOBRADO
        .iter()
        .find(|(chave, _)| dobrado.contains(chave.as_str()) || chave.contains(dobrado.as_str()))
        .map(|(_, canonico)| *canonico)
}

/// Nome canônico do documento, ou a entrada original intacta se nada casar.
pub fn normalize(nome: &str) -> String {
    match lookup(nome) {
        Some(canonico) => canonico.to_string(),
        None => nome.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Nomes canônicos sem repetição, na ordem de declaração
    fn canonical_names() -> Vec<&'static str> {
        let mut nomes: Vec<&'static str> = Vec::new();
        for (_, canonico) in DICIONARIO {
            if !nomes.contains(canonico) {
                nomes.push(*canonico);
            }
        }
        nomes
    }

    #[test]
    fn test_fold_strips_accents_case_and_spaces() {
        assert_eq!(fold("  Averbação da CONSTRUÇÃO "), "averbacao da construcao");
        assert_eq!(fold("Ônus"), "onus");
    }

    #[test]
    fn test_normalize_is_accent_and_case_insensitive() {
        assert_eq!(normalize("Averbação"), normalize("averbacao"));
        assert_eq!(normalize("AVERBACAO"), AVERBACAO);
        assert_eq!(normalize("alvará"), ALVARA_FUNCIONAMENTO);
        assert_eq!(normalize("HABITE SE"), HABITE_SE);
    }

    #[test]
    fn test_normalize_matches_substring_both_ways() {
        // entrada contém a chave
        assert_eq!(normalize("Escritura do Imóvel"), ESCRITURA);
        // chave contém a entrada
        assert_eq!(normalize("Vistoria"), AVCB);
    }

    #[test]
    fn test_normalize_unknown_returns_input_unchanged() {
        assert_eq!(normalize("Relatório Anual Customizado"), "Relatório Anual Customizado");
        assert_eq!(normalize("  Outro Documento "), "  Outro Documento ");
    }

    #[test]
    fn test_normalize_empty_input_is_identity() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "   ");
    }

    #[test]
    fn test_first_entry_in_declaration_order_wins() {
        // "alvara" aparece antes de "avcb" no dicionário
        assert_eq!(normalize("Alvará e AVCB"), ALVARA_FUNCIONAMENTO);
        // "clcb" é declarado antes de "avcb"
        assert_eq!(normalize("CLCB/AVCB"), CLCB);
    }

    #[test]
    fn test_canonical_names_map_to_themselves() {
        for canonico in canonical_names() {
            assert_eq!(normalize(canonico), canonico);
        }
    }

    #[test]
    fn test_normalize_is_idempotent_over_dictionary() {
        for (chave, canonico) in DICIONARIO {
            let uma_vez = normalize(chave);
            assert_eq!(normalize(&uma_vez), uma_vez);
            assert_eq!(normalize(canonico), normalize(&normalize(canonico)));
        }
    }
}
