pub mod document_extractor;
pub mod embedding_provider;
pub mod text_splitter;

pub use document_extractor::DocumentExtractor;
pub use embedding_provider::EmbeddingProvider;
pub use text_splitter::TextSplitter;
