// src/services/planilha.rs

// Helpers para planilhas já decodificadas (cabeçalho + linhas de texto)

use crate::services::normalizer::fold;

/// Índice da primeira coluna cujo cabeçalho dobrado é igual a algum dos nomes.
pub fn find_column(cabecalhos: &[String], nomes: &[&str]) -> Option<usize> {
    cabecalhos.iter().position(|cabecalho| {
        let dobrado = fold(cabecalho);
        nomes.iter().any(|nome| fold(nome) == dobrado)
    })
}

/// Célula aparada; linhas mais curtas que o cabeçalho valem como vazias.
pub fn cell(linha: &[String], indice: usize) -> &str {
    linha.get(indice).map(|valor| valor.trim()).unwrap_or("")
}

pub fn optional_cell(linha: &[String], indice: Option<usize>) -> Option<String> {
    indice
        .map(|i| cell(linha, i))
        .filter(|valor| !valor.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cabecalhos(nomes: &[&str]) -> Vec<String> {
        nomes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_find_column_ignores_accents_and_case() {
        let cab = cabecalhos(&["Nome", " CÓDIGO ", "Tipo Imóvel"]);
        assert_eq!(find_column(&cab, &["codigo"]), Some(1));
        assert_eq!(find_column(&cab, &["tipo imovel", "tipo"]), Some(2));
        assert_eq!(find_column(&cab, &["endereco"]), None);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let linha = cabecalhos(&["A", "  b  "]);
        assert_eq!(cell(&linha, 1), "b");
        assert_eq!(cell(&linha, 5), "");
        assert_eq!(optional_cell(&linha, Some(5)), None);
        assert_eq!(optional_cell(&linha, None), None);
        assert_eq!(optional_cell(&linha, Some(0)), Some("A".to_string()));
    }
}
