// src/services/report_service.rs

use chrono::Utc;
use genpdf::{elements, style, Element};

use crate::{
    common::error::AppError,
    models::analise::{AnaliseDocumento, DashboardResumo},
    services::{compliance_service::ComplianceService, dashboard_service::build_summary},
};

const FONTE: &str = "Roboto";

#[derive(Clone)]
pub struct ReportService {
    compliance: ComplianceService,
    fonts_dir: String,
}

impl ReportService {
    pub fn new(compliance: ComplianceService, fonts_dir: String) -> Self {
        Self { compliance, fonts_dir }
    }

    pub async fn generate_compliance_pdf(&self) -> Result<Vec<u8>, AppError> {
        // 1. Busca os Dados (e grava as desconsiderações automáticas, como qualquer análise)
        let reconciliacao = self.compliance.reconcile().await?;
        let analises = reconciliacao.analyses();
        let resumo = build_summary(&reconciliacao.casas, reconciliacao.casas_com_gestao(), &analises);

        // 2. Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, FONTE, None).map_err(|_| {
            AppError::FontNotFound(format!("Fonte {} não encontrada em {}", FONTE, self.fonts_dir))
        })?;

        let buffer = render_report(font_family, &resumo, &analises)?;
        tracing::info!(
            "Relatório de conformidade gerado ({} documentos, {} bytes).",
            analises.len(), buffer.len()
        );
        Ok(buffer)
    }
}

fn pdf_error(e: genpdf::error::Error) -> AppError {
    AppError::PdfError(e.to_string())
}

// Uma linha da tabela por documento, na ordem das colunas do cabeçalho
fn table_rows(analises: &[AnaliseDocumento]) -> Vec<[String; 7]> {
    analises
        .iter()
        .map(|analise| {
            [
                analise.documento.clone(),
                if analise.obrigatorio { "Sim" } else { "Não" }.to_string(),
                analise.casas_com_documento.to_string(),
                analise.casas_desconsideradas.to_string(),
                analise.casas_sem_documento.to_string(),
                format!("{:.1}", analise.percentual_original),
                format!("{:.1}", analise.percentual_real),
            ]
        })
        .collect()
}

/// Seções de pendências: só documentos obrigatórios com casas pendentes.
fn pending_sections(analises: &[AnaliseDocumento]) -> Vec<(String, Vec<String>)> {
    analises
        .iter()
        .filter(|a| a.obrigatorio && !a.casas_pendentes.is_empty())
        .map(|analise| {
            let titulo = format!("{}: {} pendente(s)", analise.documento, analise.casas_pendentes.len());
            let linhas = analise
                .casas_pendentes
                .iter()
                .map(|pendente| {
                    let situacao = if pendente.desconsiderar { "desconsiderado" } else { "faltando" };
                    let mut linha = format!("{} - {} ({})", pendente.codigo, pendente.nome, situacao);
                    if let Some(obs) = &pendente.observacao {
                        linha.push_str(&format!(": {}", obs));
                    }
                    linha
                })
                .collect();
            (titulo, linhas)
        })
        .collect()
}

fn render_report(
    font_family: genpdf::fonts::FontFamily<genpdf::fonts::FontData>,
    resumo: &DashboardResumo,
    analises: &[AnaliseDocumento],
) -> Result<Vec<u8>, AppError> {
    let mut doc = genpdf::Document::new(font_family);
    doc.set_title("Relatório de Conformidade Documental");
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(elements::Paragraph::new("RELATÓRIO DE CONFORMIDADE DOCUMENTAL")
        .styled(style::Style::new().bold().with_font_size(16)));
    doc.push(elements::Paragraph::new(format!("Gerado em: {}", Utc::now().format("%d/%m/%Y %H:%M")))
        .styled(style::Style::new().with_font_size(9)));
    doc.push(elements::Break::new(1.5));

    // --- RESUMO ---
    doc.push(elements::Paragraph::new(format!(
        "Casas cadastradas: {}   |   Com dados de gestão: {}",
        resumo.total_casas, resumo.casas_com_gestao
    )));
    doc.push(elements::Paragraph::new(format!(
        "Documentos monitorados: {} ({} obrigatórios)",
        resumo.documentos_monitorados, resumo.documentos_obrigatorios
    )));
    doc.push(elements::Paragraph::new(format!(
        "Conformidade média dos obrigatórios: {:.1}%   |   Pendências obrigatórias: {}",
        resumo.conformidade_obrigatorios, resumo.pendencias_obrigatorias
    )));
    doc.push(elements::Break::new(2));

    // --- TABELA POR DOCUMENTO ---
    // Pesos das colunas: Documento (5), Obrig. (1), Possui (1), Desc. (1), Faltam (1), % (1), % Real (1)
    let mut table = elements::TableLayout::new(vec![5, 1, 1, 1, 1, 1, 1]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold().with_font_size(9);
    table.row()
        .element(elements::Paragraph::new("Documento").styled(style_bold))
        .element(elements::Paragraph::new("Obrig.").styled(style_bold))
        .element(elements::Paragraph::new("Possui").styled(style_bold))
        .element(elements::Paragraph::new("Desc.").styled(style_bold))
        .element(elements::Paragraph::new("Faltam").styled(style_bold))
        .element(elements::Paragraph::new("%").styled(style_bold))
        .element(elements::Paragraph::new("% Real").styled(style_bold))
        .push()
        .map_err(pdf_error)?;

    let style_linha = style::Style::new().with_font_size(9);
    for celulas in table_rows(analises) {
        let mut linha = table.row();
        for celula in celulas {
            linha = linha.element(elements::Paragraph::new(celula).styled(style_linha));
        }
        linha.push().map_err(pdf_error)?;
    }

    doc.push(table);

    // --- PENDÊNCIAS DOS OBRIGATÓRIOS ---
    for (titulo, linhas) in pending_sections(analises) {
        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new(titulo).styled(style::Style::new().bold().with_font_size(11)));

        for linha in linhas {
            doc.push(elements::Paragraph::new(linha).styled(style::Style::new().with_font_size(9)));
        }
    }

    // 3. Renderiza para Buffer (Memória)
    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analise::CasaPendente;
    use pretty_assertions::assert_eq;
    use crate::db::{
        store::ColecaoStore, CasaRepository, DocumentoFaltanteRepository, GestaoRepository,
        MemoryStore,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_fonts_is_reported() {
        let store: Arc<dyn ColecaoStore> = Arc::new(MemoryStore::new());
        let compliance = ComplianceService::new(
            CasaRepository::new(store.clone()),
            GestaoRepository::new(store.clone()),
            DocumentoFaltanteRepository::new(store),
        );
        let service = ReportService::new(compliance, "./pasta-que-nao-existe".to_string());

        let resultado = service.generate_compliance_pdf().await;
        assert!(matches!(resultado, Err(AppError::FontNotFound(_))));
    }

    fn pendente(codigo: &str, desconsiderar: bool, observacao: Option<&str>) -> CasaPendente {
        CasaPendente {
            codigo: codigo.to_string(),
            nome: format!("Casa {}", codigo),
            tipo_imovel: Some("AL".to_string()),
            desconsiderar,
            observacao: observacao.map(str::to_string),
            data_observacao: None,
            responsavel: None,
        }
    }

    fn analise(documento: &str, obrigatorio: bool, pendentes: Vec<CasaPendente>) -> AnaliseDocumento {
        let desconsideradas = pendentes.iter().filter(|p| p.desconsiderar).count();
        AnaliseDocumento {
            documento: documento.to_string(),
            obrigatorio,
            total_casas: 3,
            casas_com_documento: 3 - pendentes.len(),
            casas_sem_documento: pendentes.len() - desconsideradas,
            casas_desconsideradas: desconsideradas,
            percentual_original: (3 - pendentes.len()) as f64 / 3.0 * 100.0,
            percentual_real: (3 - pendentes.len() + desconsideradas) as f64 / 3.0 * 100.0,
            casas_pendentes: pendentes,
        }
    }

    #[test]
    fn test_table_rows_follow_header_columns() {
        let analises = vec![
            analise("Habite-se", true, vec![pendente("B", true, None)]),
            analise("IPTU", false, vec![pendente("B", false, None), pendente("C", false, None)]),
        ];

        assert_eq!(
            table_rows(&analises),
            vec![
                [
                    "Habite-se".to_string(),
                    "Sim".to_string(),
                    "2".to_string(),
                    "1".to_string(),
                    "0".to_string(),
                    "66.7".to_string(),
                    "100.0".to_string(),
                ],
                [
                    "IPTU".to_string(),
                    "Não".to_string(),
                    "1".to_string(),
                    "0".to_string(),
                    "2".to_string(),
                    "33.3".to_string(),
                    "33.3".to_string(),
                ],
            ]
        );
    }

    #[test]
    fn test_pending_sections_only_for_mandatory_documents() {
        let analises = vec![
            analise(
                "Habite-se",
                true,
                vec![
                    pendente("B", true, Some("Imóvel alugado, documento pode ser desconsiderado.")),
                    pendente("C", false, None),
                ],
            ),
            analise("Alvará de Funcionamento", true, Vec::new()),
            analise("IPTU", false, vec![pendente("B", false, None)]),
        ];

        assert_eq!(
            pending_sections(&analises),
            vec![(
                "Habite-se: 2 pendente(s)".to_string(),
                vec![
                    "B - Casa B (desconsiderado): Imóvel alugado, documento pode ser desconsiderado."
                        .to_string(),
                    "C - Casa C (faltando)".to_string(),
                ],
            )]
        );
    }
}
