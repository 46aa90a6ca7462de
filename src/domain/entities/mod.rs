pub mod document;
pub mod embedding;
pub mod text_chunk;

pub use document::Document;
pub use embedding::Embedding;
pub use text_chunk::TextChunk;
