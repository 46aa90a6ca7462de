pub mod chunking_service;
pub mod document_loader;
pub mod embedding_service;

pub use chunking_service::ChunkingService;
pub use document_loader::DocumentLoaderService;
pub use embedding_service::{EmbeddingModelHandle, EmbeddingService};
