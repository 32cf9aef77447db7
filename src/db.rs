pub mod store;
pub use store::{ColecaoStore, MemoryStore};
pub mod pg_store;
pub use pg_store::PgStore;
pub mod casa_repo;
pub use casa_repo::CasaRepository;
pub mod gestao_repo;
pub use gestao_repo::GestaoRepository;
pub mod documento_repo;
pub use documento_repo::DocumentoFaltanteRepository;
