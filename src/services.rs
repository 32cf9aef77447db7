pub mod normalizer;
pub mod classifier;
pub mod analyzer;
pub mod planilha;
pub mod casa_service;
pub mod gestao_service;
pub mod documento_service;
pub mod compliance_service;
pub mod dashboard_service;
pub mod report_service;
