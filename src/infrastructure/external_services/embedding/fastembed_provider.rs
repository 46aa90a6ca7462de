use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

/// Hub identifiers this backend can load, with the vector width they produce.
const SUPPORTED_MODELS: &[(&str, EmbeddingModel, usize)] = &[
    ("sentence-transformers/all-MiniLM-L6-v2", EmbeddingModel::AllMiniLML6V2, 384),
    ("sentence-transformers/all-MiniLM-L12-v2", EmbeddingModel::AllMiniLML12V2, 384),
    ("BAAI/bge-small-en-v1.5", EmbeddingModel::BGESmallENV15, 384),
    ("BAAI/bge-base-en-v1.5", EmbeddingModel::BGEBaseENV15, 768),
];

pub fn resolve_model(model_name: &str) -> Option<(EmbeddingModel, usize)> {
    SUPPORTED_MODELS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(model_name))
        .map(|(_, model, dim)| (model.clone(), *dim))
}

/// In-process ONNX sentence embeddings. Weights are downloaded into the cache
/// directory on first use.
pub struct FastEmbedProvider {
    model: TextEmbedding,
    model_name: String,
    dimension: usize,
}

impl FastEmbedProvider {
    pub fn new(model_name: &str, cache_dir: Option<PathBuf>) -> Result<Self, EmbeddingProviderError> {
        let (model, dimension) = resolve_model(model_name).ok_or_else(|| {
            EmbeddingProviderError::InvalidInput(format!("Unsupported embedding model: {}", model_name))
        })?;

        let mut options = InitOptions::new(model).with_show_download_progress(false);
        if let Some(cache_dir) = cache_dir {
            options = options.with_cache_dir(cache_dir);
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingProviderError::ModelError(e.to_string()))?;

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimension,
        })
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), EmbeddingProviderError> {
        if vector.len() != self.dimension {
            return Err(EmbeddingProviderError::ModelError(format!(
                "Expected {}-dimensional vector, got {}",
                self.dimension,
                vector.len()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let mut embeddings = self.embed_documents(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| EmbeddingProviderError::ModelError("No embedding returned".to_string()))
    }

    async fn embed_documents(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self
            .model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbeddingProviderError::ModelError(e.to_string()))?;

        if embeddings.len() != texts.len() {
            return Err(EmbeddingProviderError::ModelError(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        for vector in &embeddings {
            self.check_dimension(vector)?;
        }

        Ok(embeddings)
    }

    fn model_info(&self) -> (String, Option<String>) {
        (self.model_name.clone(), None)
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }
}
