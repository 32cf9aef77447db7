// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gestão de Casas de Oração",
        description = "Normalização de documentos e análise de conformidade documental"
    ),
    paths(
        // --- Casas ---
        handlers::casas::list_casas,
        handlers::casas::create_casa,
        handlers::casas::import_casas,
        handlers::casas::get_casa,
        handlers::casas::update_casa,
        handlers::casas::delete_casa,

        // --- Gestão ---
        handlers::gestao::list_registros,
        handlers::gestao::import_gestao,
        handlers::gestao::clear_gestao,

        // --- Documentos ---
        handlers::documentos::list_documentos_faltantes,
        handlers::documentos::upsert_documento_faltante,
        handlers::documentos::delete_documento_faltante,
        handlers::documentos::normalizar,

        // --- Análise ---
        handlers::analise::analyze_documents,
        handlers::analise::property_summaries,
        handlers::analise::chart,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Relatórios ---
        handlers::relatorios::compliance_report,
    ),
    components(
        schemas(
            // --- Casas ---
            models::casa::TipoImovel,
            models::casa::CasaOracao,
            models::casa::ImportacaoCasasResumo,

            // --- Gestão ---
            models::gestao::Presenca,
            models::gestao::RegistroGestao,
            models::gestao::PlanilhaPayload,
            models::gestao::ImportacaoGestaoResumo,

            // --- Documentos ---
            models::documento::DocumentoFaltante,
            models::documento::UpsertDocumentoFaltantePayload,
            models::documento::NormalizacaoResponse,

            // --- Análise ---
            models::analise::CasaPendente,
            models::analise::AnaliseDocumento,
            models::analise::ResumoCasa,
            models::analise::EntradaGrafico,
            models::analise::ContagemTipo,
            models::analise::DashboardResumo,
        )
    ),
    tags(
        (name = "Casas", description = "Cadastro das Casas de Oração"),
        (name = "Gestão", description = "Planilha de gestão (presença de documentos por casa)"),
        (name = "Documentos", description = "Desconsiderações, observações e normalização de nomes"),
        (name = "Análise", description = "Conformidade por documento e por casa"),
        (name = "Dashboard", description = "Indicadores gerais"),
        (name = "Relatórios", description = "Relatório de conformidade em PDF")
    )
)]
pub struct ApiDoc;
