use std::env;
use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

const DEFAULT_DATA_PATH: &str = "data/";
const DEFAULT_CHUNK_SIZE: usize = 500;
const DEFAULT_CHUNK_OVERLAP: usize = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingBackend {
    /// In-process ONNX inference.
    Local,
    /// HTTP inference service.
    Remote {
        service_url: String,
        timeout_secs: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingConfig {
    pub model_name: String,
    pub backend: EmbeddingBackend,
    pub cache_dir: Option<PathBuf>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_EMBEDDING_MODEL.to_string(),
            backend: EmbeddingBackend::Local,
            cache_dir: None,
        }
    }
}

/// Settings for one ingestion run. Built once and handed to each component.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionConfig {
    pub data_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embedding: EmbeddingConfig,
}

impl IngestionConfig {
    pub fn new(
        data_path: impl Into<PathBuf>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> PipelineResult<Self> {
        let config = Self {
            data_path: data_path.into(),
            chunk_size,
            chunk_overlap,
            embedding: EmbeddingConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_embedding(mut self, embedding: EmbeddingConfig) -> Self {
        self.embedding = embedding;
        self
    }

    /// Reads `DATA_PATH`, `CHUNK_SIZE`, `CHUNK_OVERLAP`, `EMBEDDINGS_SERVICE_URL`,
    /// `EMBEDDINGS_TIMEOUT_SECS` and `MODEL_CACHE_DIR`, after loading `.env` if present.
    pub fn from_env() -> PipelineResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> PipelineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("DATA_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let chunk_size = parse_var(&lookup, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?;
        let chunk_overlap = parse_var(&lookup, "CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?;

        let backend = match lookup("EMBEDDINGS_SERVICE_URL").filter(|v| !v.trim().is_empty()) {
            Some(service_url) => EmbeddingBackend::Remote {
                service_url,
                timeout_secs: parse_var(&lookup, "EMBEDDINGS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            None => EmbeddingBackend::Local,
        };

        let embedding = EmbeddingConfig {
            backend,
            cache_dir: lookup("MODEL_CACHE_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            ..EmbeddingConfig::default()
        };

        Ok(Self::new(data_path, chunk_size, chunk_overlap)?.with_embedding(embedding))
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.chunk_size == 0 {
            return Err(PipelineError::Configuration(
                "CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(PipelineError::Configuration(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> PipelineResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| {
            PipelineError::Configuration(format!("{} has invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
