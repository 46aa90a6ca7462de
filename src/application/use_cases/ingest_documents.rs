use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::application::services::{ChunkingService, DocumentLoaderService, EmbeddingService};
use crate::domain::entities::{Document, Embedding, TextChunk};
use crate::error::PipelineResult;

/// Everything one ingestion run produced, ready to be indexed.
#[derive(Debug, Clone, Default)]
pub struct IngestionOutcome {
    pub documents: Vec<Document>,
    pub chunks: Vec<TextChunk>,
    pub embeddings: Vec<Embedding>,
    pub model_name: Option<String>,
    pub embedding_dimension: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionSummary {
    pub files: usize,
    pub documents: usize,
    pub chunks: usize,
    pub embeddings: usize,
    pub model_name: Option<String>,
    pub embedding_dimension: Option<usize>,
}

impl IngestionOutcome {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn summary(&self) -> IngestionSummary {
        let files: BTreeSet<&str> = self.documents.iter().filter_map(|d| d.source()).collect();

        IngestionSummary {
            files: files.len(),
            documents: self.documents.len(),
            chunks: self.chunks.len(),
            embeddings: self.embeddings.len(),
            model_name: self.model_name.clone(),
            embedding_dimension: self.embedding_dimension,
        }
    }
}

pub struct IngestDocumentsUseCase {
    document_loader: Arc<DocumentLoaderService>,
    chunking_service: Arc<ChunkingService>,
    embedding_service: Arc<EmbeddingService>,
}

impl IngestDocumentsUseCase {
    pub fn new(
        document_loader: Arc<DocumentLoaderService>,
        chunking_service: Arc<ChunkingService>,
        embedding_service: Arc<EmbeddingService>,
    ) -> Self {
        Self {
            document_loader,
            chunking_service,
            embedding_service,
        }
    }

    pub async fn execute(&self) -> PipelineResult<IngestionOutcome> {
        let documents = self.document_loader.load_pdf_files().await?;

        if documents.is_empty() {
            tracing::warn!("Nothing to ingest from {}.", self.document_loader.data_path().display());
            return Ok(IngestionOutcome::default());
        }

        let chunks = self.chunking_service.create_text_chunks(&documents)?;

        let model = self.embedding_service.get_embedding_model()?;
        let embeddings = self
            .embedding_service
            .embed_chunks(model.as_ref(), &chunks)
            .await?;

        let (model_name, _) = model.model_info();
        Ok(IngestionOutcome {
            documents,
            chunks,
            embeddings,
            model_name: Some(model_name),
            embedding_dimension: Some(model.embedding_dimension()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::application::services::EmbeddingModelHandle;
    use crate::infrastructure::external_services::{PdfExtractor, RTSplitter};
    use crate::test_support::{HashingEmbeddingProvider, write_pdf};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn use_case(data_path: &Path, embedding_service: EmbeddingService) -> IngestDocumentsUseCase {
        IngestDocumentsUseCase::new(
            Arc::new(DocumentLoaderService::new(data_path, Arc::new(PdfExtractor::new()))),
            Arc::new(ChunkingService::new(Arc::new(RTSplitter::new(20, 5).unwrap()))),
            Arc::new(embedding_service),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_with_test_model() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(
            &dir.path().join("triage.pdf"),
            &["Check airway breathing circulation", "Record vital signs every hour"],
            None,
        );

        let service = EmbeddingService::new("hashing-test-model", || {
            Ok(Arc::new(HashingEmbeddingProvider::new(8)) as EmbeddingModelHandle)
        });
        let outcome = use_case(dir.path(), service).execute().await.unwrap();

        assert_eq!(outcome.documents.len(), 2);
        assert!(outcome.chunks.len() >= 2);
        assert_eq!(outcome.embeddings.len(), outcome.chunks.len());
        assert!(outcome.chunks.iter().all(|c| c.character_count() <= 20));

        let summary = outcome.summary();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.model_name.as_deref(), Some("hashing-test-model"));
        assert_eq!(summary.embedding_dimension, Some(8));
    }

    #[tokio::test]
    async fn test_chunk_offsets_point_into_extracted_pages() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(
            &dir.path().join("dosage.pdf"),
            &[
                "Take  two  tablets   daily.  Take  two  tablets   daily.  Drink  water.",
                "   Rest    well.    Rest    well.    Call  if  fever  persists.",
            ],
            None,
        );

        let service = EmbeddingService::new("hashing-test-model", || {
            Ok(Arc::new(HashingEmbeddingProvider::new(8)) as EmbeddingModelHandle)
        });
        let outcome = use_case(dir.path(), service).execute().await.unwrap();

        assert_eq!(outcome.documents.len(), 2);
        assert!(outcome.chunks.len() > 4);
        for chunk in &outcome.chunks {
            let page = chunk.page().unwrap();
            let text = outcome.documents[page].text();
            let start = chunk.start_index();
            assert_eq!(&text[start..start + chunk.text().len()], chunk.text());
        }
    }

    #[tokio::test]
    async fn test_empty_directory_skips_chunking_and_model() {
        let dir = tempfile::tempdir().unwrap();
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();

        let service = EmbeddingService::new("hashing-test-model", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(HashingEmbeddingProvider::new(8)) as EmbeddingModelHandle)
        });
        let outcome = use_case(dir.path(), service).execute().await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.summary().chunks, 0);
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_failure_halts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("triage.pdf"), &["Some text"], None);

        let service = EmbeddingService::new("acme/missing", || {
            Err(EmbeddingProviderError::ModelError("no weights".to_string()))
        });
        let err = use_case(dir.path(), service).execute().await.unwrap_err();

        assert!(err.is_initialization());
    }

    #[tokio::test]
    async fn test_missing_directory_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let service = EmbeddingService::new("hashing-test-model", || {
            Ok(Arc::new(HashingEmbeddingProvider::new(8)) as EmbeddingModelHandle)
        });

        let err = use_case(&dir.path().join("absent"), service)
            .execute()
            .await
            .unwrap_err();

        assert!(err.is_configuration());
    }
}
