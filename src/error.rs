use thiserror::Error;

/// Failure kinds surfaced by the ingestion pipeline.
///
/// Every variant is logged where it is raised and then returned to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Ingestion error: {0}")]
    Ingestion(String),
    #[error("Initialization error: {0}")]
    Initialization(String),
    #[error("Embedding error: {0}")]
    Embedding(String),
}

impl PipelineError {
    /// Emits the error at `error` level and hands it back for propagation.
    pub fn logged(self) -> Self {
        tracing::error!("{}", self);
        self
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, PipelineError::Configuration(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }

    pub fn is_ingestion(&self) -> bool {
        matches!(self, PipelineError::Ingestion(_))
    }

    pub fn is_initialization(&self) -> bool {
        matches!(self, PipelineError::Initialization(_))
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
