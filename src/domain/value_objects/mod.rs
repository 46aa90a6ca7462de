pub mod document_metadata;
pub mod file_hash;

pub use document_metadata::DocumentMetadata;
pub use file_hash::FileHash;
