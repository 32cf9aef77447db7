// src/services/analyzer.rs

//! Motor de conformidade documental.
//!
//! Tudo aqui é puro: recebe o cadastro, a matriz de gestão e as
//! desconsiderações já carregados e devolve estatísticas. Persistir as
//! desconsiderações automáticas fica com o `ComplianceService`.
//!
//! Denominador: só entram as casas cadastradas que possuem registro de
//! gestão. Linhas da matriz cujo código não existe no cadastro são ignoradas.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::{
    models::{
        analise::{AnaliseDocumento, CasaPendente, EntradaGrafico, ResumoCasa},
        casa::CasaOracao,
        documento::DocumentoFaltante,
        gestao::RegistroGestao,
    },
    services::classifier::{exemption_for, is_mandatory},
};

pub const RESPONSAVEL_AUTOMATICO: &str = "Sistema";

type IndiceDesconsideracoes<'a> = HashMap<(&'a str, &'a str), &'a DocumentoFaltante>;

fn indexar(desconsideracoes: &[DocumentoFaltante]) -> IndiceDesconsideracoes<'_> {
    let mut indice = HashMap::with_capacity(desconsideracoes.len());
    for item in desconsideracoes {
        // Em caso de chave repetida vale a primeira
        indice
            .entry((item.codigo.as_str(), item.documento.as_str()))
            .or_insert(item);
    }
    indice
}

/// Casas cadastradas com registro de gestão, na ordem da matriz.
fn casas_consideradas<'a>(
    matriz: &'a [RegistroGestao],
    casas: &'a [CasaOracao],
) -> Vec<(&'a CasaOracao, &'a RegistroGestao)> {
    let cadastro: HashMap<&str, &CasaOracao> =
        casas.iter().map(|casa| (casa.codigo.as_str(), casa)).collect();

    matriz
        .iter()
        .filter_map(|registro| {
            let casa = cadastro.get(registro.codigo.as_str());
            if casa.is_none() {
                tracing::debug!("Registro de gestão sem casa cadastrada: {}", registro.codigo);
            }
            casa.map(|casa| (*casa, registro))
        })
        .collect()
}

pub fn count_considered(matriz: &[RegistroGestao], casas: &[CasaOracao]) -> usize {
    casas_consideradas(matriz, casas).len()
}

/// Todas as chaves de documento que aparecem na matriz.
pub fn document_keys(matriz: &[RegistroGestao]) -> BTreeSet<&str> {
    matriz
        .iter()
        .flat_map(|registro| registro.documentos.keys())
        .map(String::as_str)
        .filter(|chave| !chave.eq_ignore_ascii_case("codigo"))
        .collect()
}

fn percentual(parte: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    parte as f64 / total as f64 * 100.0
}

// =========================================================================
//  FASE 1: PROPOSTA DE DESCONSIDERAÇÕES AUTOMÁTICAS
// =========================================================================

/// Desconsiderações que as regras por tipo de imóvel gerariam e que ainda
/// não existem. Nunca propõe nada para uma chave que já tem registro.
pub fn propose_overrides(
    matriz: &[RegistroGestao],
    casas: &[CasaOracao],
    existentes: &[DocumentoFaltante],
    agora: DateTime<Utc>,
) -> Vec<DocumentoFaltante> {
    let indice = indexar(existentes);
    let consideradas = casas_consideradas(matriz, casas);
    let mut propostas = Vec::new();

    for documento in document_keys(matriz) {
        for (casa, registro) in &consideradas {
            if registro.possui(documento) || indice.contains_key(&(casa.codigo.as_str(), documento)) {
                continue;
            }
            // A mesma casa pode aparecer duas vezes só se a matriz tiver linhas repetidas
            if propostas
                .iter()
                .any(|p: &DocumentoFaltante| p.is_mesma_chave(&casa.codigo, documento))
            {
                continue;
            }

            if let Some(regra) = exemption_for(documento, casa.tipo()) {
                propostas.push(DocumentoFaltante {
                    codigo: casa.codigo.clone(),
                    documento: documento.to_string(),
                    observacao: Some(regra.observacao().to_string()),
                    desconsiderar: true,
                    data_observacao: Some(agora),
                    responsavel: Some(RESPONSAVEL_AUTOMATICO.to_string()),
                });
            }
        }
    }

    propostas
}

// =========================================================================
//  FASE 2: ESTATÍSTICAS
// =========================================================================

/// Estatística por documento, na ordem alfabética das chaves.
/// Use `sort_by_priority` para a ordem de exibição.
pub fn compute_analyses(
    matriz: &[RegistroGestao],
    casas: &[CasaOracao],
    desconsideracoes: &[DocumentoFaltante],
) -> Vec<AnaliseDocumento> {
    let indice = indexar(desconsideracoes);
    let consideradas = casas_consideradas(matriz, casas);
    let total_casas = consideradas.len();

    document_keys(matriz)
        .into_iter()
        .map(|documento| {
            let mut casas_com_documento = 0;
            let mut casas_desconsideradas = 0;
            let mut casas_pendentes = Vec::new();

            for (casa, registro) in &consideradas {
                if registro.possui(documento) {
                    casas_com_documento += 1;
                    continue;
                }

                let desconsideracao = indice.get(&(casa.codigo.as_str(), documento));
                let desconsiderar = desconsideracao.is_some_and(|d| d.desconsiderar);
                if desconsiderar {
                    casas_desconsideradas += 1;
                }

                casas_pendentes.push(CasaPendente {
                    codigo: casa.codigo.clone(),
                    nome: casa.nome.clone(),
                    tipo_imovel: casa.tipo_imovel.clone(),
                    desconsiderar,
                    observacao: desconsideracao.and_then(|d| d.observacao.clone()),
                    data_observacao: desconsideracao.and_then(|d| d.data_observacao),
                    responsavel: desconsideracao.and_then(|d| d.responsavel.clone()),
                });
            }

            let casas_sem_documento = casas_pendentes.len() - casas_desconsideradas;
            tracing::debug!(
                "{}: {} com documento, {} desconsideradas, {} faltando (de {})",
                documento, casas_com_documento, casas_desconsideradas, casas_sem_documento, total_casas
            );

            AnaliseDocumento {
                documento: documento.to_string(),
                obrigatorio: is_mandatory(documento),
                total_casas,
                casas_com_documento,
                casas_sem_documento,
                casas_desconsideradas,
                percentual_original: percentual(casas_com_documento, total_casas),
                percentual_real: percentual(casas_com_documento + casas_desconsideradas, total_casas),
                casas_pendentes,
            }
        })
        .collect()
}

/// Obrigatórios primeiro, depois quem tem mais casas faltando, depois pelo nome.
pub fn sort_by_priority(analises: &mut [AnaliseDocumento]) {
    analises.sort_by(|a, b| {
        b.obrigatorio
            .cmp(&a.obrigatorio)
            .then_with(|| b.casas_sem_documento.cmp(&a.casas_sem_documento))
            .then_with(|| a.documento.cmp(&b.documento))
    });
}

/// Estatística por casa, com os mesmos critérios (e denominador) da análise por documento.
pub fn compute_property_summaries(
    matriz: &[RegistroGestao],
    casas: &[CasaOracao],
    desconsideracoes: &[DocumentoFaltante],
) -> Vec<ResumoCasa> {
    let indice = indexar(desconsideracoes);
    let chaves = document_keys(matriz);

    casas_consideradas(matriz, casas)
        .into_iter()
        .map(|(casa, registro)| {
            let mut documentos_presentes = 0;
            let mut documentos_desconsiderados = 0;
            let mut documentos_faltantes = 0;
            let mut obrigatorios_faltantes = Vec::new();

            for documento in &chaves {
                if registro.possui(documento) {
                    documentos_presentes += 1;
                } else if indice
                    .get(&(casa.codigo.as_str(), *documento))
                    .is_some_and(|d| d.desconsiderar)
                {
                    documentos_desconsiderados += 1;
                } else {
                    documentos_faltantes += 1;
                    if is_mandatory(documento) {
                        obrigatorios_faltantes.push(documento.to_string());
                    }
                }
            }

            let total_documentos = chaves.len();
            ResumoCasa {
                codigo: casa.codigo.clone(),
                nome: casa.nome.clone(),
                tipo: casa.tipo(),
                total_documentos,
                documentos_presentes,
                documentos_desconsiderados,
                documentos_faltantes,
                obrigatorios_faltantes,
                percentual_original: percentual(documentos_presentes, total_documentos),
                percentual_real: percentual(documentos_presentes + documentos_desconsiderados, total_documentos),
            }
        })
        .collect()
}

/// Dados prontos para o gráfico. Documentos sem nenhuma casa em dia ficam de fora.
pub fn chart_entries(analises: &[AnaliseDocumento]) -> Vec<EntradaGrafico> {
    analises
        .iter()
        .map(|analise| EntradaGrafico {
            name: analise.documento.clone(),
            value: analise.casas_com_documento + analise.casas_desconsideradas,
            original_value: analise.casas_com_documento,
            exemptions: analise.casas_desconsideradas,
        })
        .filter(|entrada| entrada.value > 0)
        .collect()
}
