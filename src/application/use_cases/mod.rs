pub mod ingest_documents;

pub use ingest_documents::{IngestDocumentsUseCase, IngestionOutcome, IngestionSummary};
