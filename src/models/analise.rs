// src/models/analise.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::casa::TipoImovel;

// 1. Uma casa que não possui o documento, com o estado da desconsideração
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasaPendente {
    pub codigo: String,
    pub nome: String,
    pub tipo_imovel: Option<String>,
    pub desconsiderar: bool,
    pub observacao: Option<String>,
    pub data_observacao: Option<DateTime<Utc>>,
    pub responsavel: Option<String>,
}

// 2. Estatística por documento (recalculada a cada consulta)
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseDocumento {
    pub documento: String,
    pub obrigatorio: bool,
    pub total_casas: usize,
    pub casas_com_documento: usize,
    pub casas_sem_documento: usize,
    pub casas_desconsideradas: usize,
    pub percentual_original: f64,
    pub percentual_real: f64,
    pub casas_pendentes: Vec<CasaPendente>,
}

// 3. Estatística por casa
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoCasa {
    pub codigo: String,
    pub nome: String,
    pub tipo: TipoImovel,
    pub total_documentos: usize,
    pub documentos_presentes: usize,
    pub documentos_desconsiderados: usize,
    pub documentos_faltantes: usize,
    pub obrigatorios_faltantes: Vec<String>,
    pub percentual_original: f64,
    pub percentual_real: f64,
}

// 4. Gráfico de conformidade (value = originalValue + exemptions)
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntradaGrafico {
    pub name: String,
    pub value: usize,
    pub original_value: usize,
    pub exemptions: usize,
}

// 5. Cards do dashboard
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContagemTipo {
    pub tipo: TipoImovel,
    pub rotulo: String,
    pub quantidade: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResumo {
    pub total_casas: usize,
    pub casas_com_gestao: usize,
    pub casas_por_tipo: Vec<ContagemTipo>,
    pub documentos_monitorados: usize,
    pub documentos_obrigatorios: usize,
    // Média do percentual real dos documentos obrigatórios
    pub conformidade_obrigatorios: f64,
    pub pendencias_obrigatorias: usize,
}
