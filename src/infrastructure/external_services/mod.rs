pub mod document_extractors;
pub mod embedding;
pub mod recursive_splitter;

pub use document_extractors::PdfExtractor;
pub use embedding::{FastEmbedProvider, InferenceEmbeddingProvider};
pub use recursive_splitter::RTSplitter;
