pub mod casas;
pub mod gestao;
pub mod documentos;
pub mod analise;
pub mod dashboard;
pub mod relatorios;
