pub mod casa;
pub mod gestao;
pub mod documento;
pub mod analise;
