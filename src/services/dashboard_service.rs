// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use crate::{
    common::error::AppError,
    models::{
        analise::{AnaliseDocumento, ContagemTipo, DashboardResumo},
        casa::{CasaOracao, TipoImovel},
    },
    services::compliance_service::ComplianceService,
};

/// Monta os cards do topo a partir do cadastro e da análise já calculada.
pub fn build_summary(
    casas: &[CasaOracao],
    casas_com_gestao: usize,
    analises: &[AnaliseDocumento],
) -> DashboardResumo {
    let mut por_tipo: BTreeMap<TipoImovel, usize> = BTreeMap::new();
    for casa in casas {
        *por_tipo.entry(casa.tipo()).or_default() += 1;
    }

    let obrigatorios: Vec<&AnaliseDocumento> = analises.iter().filter(|a| a.obrigatorio).collect();
    let conformidade_obrigatorios = if obrigatorios.is_empty() {
        0.0
    } else {
        obrigatorios.iter().map(|a| a.percentual_real).sum::<f64>() / obrigatorios.len() as f64
    };

    DashboardResumo {
        total_casas: casas.len(),
        casas_com_gestao,
        casas_por_tipo: por_tipo
            .into_iter()
            .map(|(tipo, quantidade)| ContagemTipo {
                tipo,
                rotulo: tipo.rotulo().to_string(),
                quantidade,
            })
            .collect(),
        documentos_monitorados: analises.len(),
        documentos_obrigatorios: obrigatorios.len(),
        conformidade_obrigatorios,
        pendencias_obrigatorias: obrigatorios.iter().map(|a| a.casas_sem_documento).sum(),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    compliance: ComplianceService,
}

impl DashboardService {
    pub fn new(compliance: ComplianceService) -> Self {
        Self { compliance }
    }

    pub async fn get_summary(&self) -> Result<DashboardResumo, AppError> {
        let reconciliacao = self.compliance.reconcile().await?;
        let analises = reconciliacao.analyses();

        Ok(build_summary(&reconciliacao.casas, reconciliacao.casas_com_gestao(), &analises))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn casa(codigo: &str, tipo: Option<&str>) -> CasaOracao {
        CasaOracao {
            codigo: codigo.to_string(),
            nome: codigo.to_string(),
            tipo_imovel: tipo.map(str::to_string),
            endereco: None,
            observacoes: None,
            status: None,
        }
    }

    fn analise(documento: &str, obrigatorio: bool, sem: usize, real: f64) -> AnaliseDocumento {
        AnaliseDocumento {
            documento: documento.to_string(),
            obrigatorio,
            total_casas: 4,
            casas_com_documento: 4 - sem,
            casas_sem_documento: sem,
            casas_desconsideradas: 0,
            percentual_original: real,
            percentual_real: real,
            casas_pendentes: Vec::new(),
        }
    }

    #[test]
    fn test_build_summary() {
        let casas = vec![
            casa("A", Some("IP")),
            casa("B", Some("AL")),
            casa("C", Some("IP - Próprio")),
            casa("D", None),
        ];
        let analises = vec![
            analise("Alvará de Funcionamento", true, 1, 75.0),
            analise("Habite-se", true, 2, 50.0),
            analise("IPTU", false, 4, 0.0),
        ];

        let resumo = build_summary(&casas, 4, &analises);
        assert_eq!(resumo.total_casas, 4);
        assert_eq!(resumo.documentos_monitorados, 3);
        assert_eq!(resumo.documentos_obrigatorios, 2);
        assert_eq!(resumo.conformidade_obrigatorios, 62.5);
        assert_eq!(resumo.pendencias_obrigatorias, 3);
        assert_eq!(
            resumo.casas_por_tipo,
            vec![
                ContagemTipo { tipo: TipoImovel::Proprio, rotulo: "Próprio".to_string(), quantidade: 2 },
                ContagemTipo { tipo: TipoImovel::Alugado, rotulo: "Alugado".to_string(), quantidade: 1 },
                ContagemTipo { tipo: TipoImovel::NaoInformado, rotulo: "Não informado".to_string(), quantidade: 1 },
            ]
        );
    }

    #[test]
    fn test_summary_without_mandatory_documents() {
        let resumo = build_summary(&[], 0, &[]);
        assert_eq!(resumo.conformidade_obrigatorios, 0.0);
        assert!(resumo.casas_por_tipo.is_empty());
    }
}
