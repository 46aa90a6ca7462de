use std::sync::Arc;

use crate::application::ports::EmbeddingProvider;
use crate::application::ports::embedding_provider::EmbeddingProviderError;
use crate::domain::entities::{Embedding, TextChunk};
use crate::error::{PipelineError, PipelineResult};

/// Shared, read-only handle to a loaded embedding model.
pub type EmbeddingModelHandle = Arc<dyn EmbeddingProvider>;

type ModelLoader = dyn Fn() -> Result<EmbeddingModelHandle, EmbeddingProviderError> + Send + Sync;

const DEFAULT_BATCH_SIZE: usize = 32;

pub struct EmbeddingService {
    model_name: String,
    loader: Box<ModelLoader>,
    batch_size: usize,
}

impl EmbeddingService {
    pub fn new<F>(model_name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<EmbeddingModelHandle, EmbeddingProviderError> + Send + Sync + 'static,
    {
        Self {
            model_name: model_name.into(),
            loader: Box::new(loader),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn get_embedding_model(&self) -> PipelineResult<EmbeddingModelHandle> {
        tracing::info!("Initializing embeddings model {}.", self.model_name);

        let model = (self.loader)().map_err(|e| {
            PipelineError::Initialization(format!(
                "Error initializing embeddings model {}: {}",
                self.model_name, e
            ))
            .logged()
        })?;

        tracing::info!(
            "Embeddings model {} initialized successfully ({} dimensions).",
            self.model_name,
            model.embedding_dimension()
        );

        Ok(model)
    }

    pub async fn embed_chunks(
        &self,
        model: &dyn EmbeddingProvider,
        chunks: &[TextChunk],
    ) -> PipelineResult<Vec<Embedding>> {
        let (model_name, _) = model.model_info();
        let mut embeddings = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text().to_string()).collect();

            let vectors = model.embed_documents(&texts).await.map_err(|e| {
                PipelineError::Embedding(format!("Error embedding chunks: {}", e)).logged()
            })?;

            if vectors.len() != batch.len() {
                return Err(PipelineError::Embedding(format!(
                    "Error embedding chunks: expected {} vectors, got {}",
                    batch.len(),
                    vectors.len()
                ))
                .logged());
            }

            for (chunk, vector) in batch.iter().zip(vectors) {
                embeddings.push(Embedding::new(chunk.id(), model_name.clone(), vector));
            }
        }

        tracing::info!("Embedded {} chunks with {}.", embeddings.len(), model_name);
        Ok(embeddings)
    }
}
