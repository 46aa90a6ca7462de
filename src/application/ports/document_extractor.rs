use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::entities::Document;

#[derive(Debug, Error)]
pub enum DocumentExtractionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("IO error: {0}")]
    IoError(String),
}

#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    pub extract_metadata: bool,
    pub password: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            extract_metadata: true,
            password: String::new(),
        }
    }
}

/// Turns one file into page-level [`Document`]s, in page order.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_pages(
        &self,
        file_path: &Path,
        options: &ExtractionOptions,
    ) -> Result<Vec<Document>, DocumentExtractionError>;

    fn supported_extensions(&self) -> Vec<String>;

    fn can_extract(&self, file_path: &Path) -> bool {
        file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
