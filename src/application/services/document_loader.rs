use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::DocumentExtractor;
use crate::application::ports::document_extractor::ExtractionOptions;
use crate::domain::entities::Document;
use crate::error::{PipelineError, PipelineResult};

/// Loads every PDF sitting directly inside `data_path`, one [`Document`] per page.
pub struct DocumentLoaderService {
    data_path: PathBuf,
    document_extractor: Arc<dyn DocumentExtractor>,
    extraction_options: ExtractionOptions,
}

impl DocumentLoaderService {
    pub fn new(data_path: impl Into<PathBuf>, document_extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self {
            data_path: data_path.into(),
            document_extractor,
            extraction_options: ExtractionOptions::default(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Files come back sorted by path, pages in page order, so repeated
    /// calls over an unchanged directory agree.
    pub async fn load_pdf_files(&self) -> PipelineResult<Vec<Document>> {
        self.check_data_path().await?;

        tracing::info!("Loading PDF files from {}", self.data_path.display());

        let files = self.list_pdf_files().await?;
        let mut documents = Vec::new();

        for file in &files {
            let pages = self
                .document_extractor
                .extract_pages(file, &self.extraction_options)
                .await
                .map_err(|e| {
                    PipelineError::Ingestion(format!(
                        "Error loading PDF files: {}: {}",
                        file.display(),
                        e
                    ))
                    .logged()
                })?;

            tracing::debug!("{}: {} pages", file.display(), pages.len());
            documents.extend(pages);
        }

        if documents.is_empty() {
            tracing::warn!(
                "No PDF documents found in the specified directory: {}",
                self.data_path.display()
            );
        } else {
            tracing::info!(
                "Loaded {} PDF documents from {} files.",
                documents.len(),
                files.len()
            );
        }

        Ok(documents)
    }

    async fn check_data_path(&self) -> PipelineResult<()> {
        let metadata = match tokio::fs::metadata(&self.data_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PipelineError::Configuration(format!(
                    "Data path {} does not exist.",
                    self.data_path.display()
                ))
                .logged());
            }
            Err(e) => {
                return Err(PipelineError::Configuration(format!(
                    "Data path {} is not readable: {}",
                    self.data_path.display(),
                    e
                ))
                .logged());
            }
        };

        if !metadata.is_dir() {
            return Err(PipelineError::Configuration(format!(
                "Data path {} is not a directory.",
                self.data_path.display()
            ))
            .logged());
        }

        Ok(())
    }

    async fn list_pdf_files(&self) -> PipelineResult<Vec<PathBuf>> {
        let io_error = |e: std::io::Error| {
            PipelineError::Ingestion(format!(
                "Error loading PDF files: cannot read {}: {}",
                self.data_path.display(),
                e
            ))
            .logged()
        };

        let mut entries = tokio::fs::read_dir(&self.data_path).await.map_err(io_error)?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let path = entry.path();
            if !self.document_extractor.can_extract(&path) {
                continue;
            }

            let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
                PipelineError::Ingestion(format!(
                    "Error loading PDF files: cannot read {}: {}",
                    path.display(),
                    e
                ))
                .logged()
            })?;
            if metadata.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::external_services::PdfExtractor;
    use crate::test_support::write_pdf;

    fn loader(path: &Path) -> DocumentLoaderService {
        DocumentLoaderService::new(path, Arc::new(PdfExtractor::new()))
    }

    #[tokio::test]
    async fn test_loads_every_page_of_every_pdf() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("b.pdf"), &["Beta one", "Beta two", "Beta three"], None);
        write_pdf(&dir.path().join("a.pdf"), &["Alpha one", "Alpha two"], None);

        let docs = loader(dir.path()).load_pdf_files().await.unwrap();

        assert_eq!(docs.len(), 5);
        assert!(docs[0].source().unwrap().ends_with("a.pdf"));
        assert_eq!(docs[0].page(), Some(0));
        assert_eq!(docs[1].page(), Some(1));
        assert!(docs[2].source().unwrap().ends_with("b.pdf"));
        assert_eq!(docs[4].page(), Some(2));
        assert!(docs[4].text().contains("Beta three"));
    }

    #[tokio::test]
    async fn test_order_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.pdf", "m.pdf", "c.pdf"] {
            write_pdf(&dir.path().join(name), &[name], None);
        }

        let loader = loader(dir.path());
        let first = loader.load_pdf_files().await.unwrap();
        let second = loader.load_pdf_files().await.unwrap();

        assert_eq!(first, second);
        let sources: Vec<_> = first.iter().map(|d| d.source().unwrap().to_string()).collect();
        let mut sorted = sources.clone();
        sorted.sort();
        assert_eq!(sources, sorted);
    }

    #[tokio::test]
    async fn test_ignores_non_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("guide.pdf"), &["Guide"], None);
        std::fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();
        std::fs::write(dir.path().join("README"), "not a pdf").unwrap();
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let docs = loader(dir.path()).load_pdf_files().await.unwrap();

        assert_eq!(docs.len(), 1);
        assert!(docs[0].source().unwrap().ends_with("guide.pdf"));
    }

    #[tokio::test]
    async fn test_does_not_descend_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("archive")).unwrap();
        write_pdf(&dir.path().join("archive").join("old.pdf"), &["Old"], None);

        let docs = loader(dir.path()).load_pdf_files().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_empty_directory_returns_no_documents() {
        let dir = tempfile::tempdir().unwrap();

        let docs = loader(dir.path()).load_pdf_files().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_path_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = loader(&missing).load_pdf_files().await.unwrap_err();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_file_path_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        write_pdf(&file, &["x"], None);

        let err = loader(&file).load_pdf_files().await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_corrupted_pdf_is_ingestion_error() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("good.pdf"), &["fine"], None);
        std::fs::write(dir.path().join("bad.pdf"), b"this is not a pdf").unwrap();

        let err = loader(dir.path()).load_pdf_files().await.unwrap_err();

        assert!(err.is_ingestion());
        assert!(err.to_string().contains("bad.pdf"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_pdf_entry_is_ingestion_error() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("good.pdf"), &["fine"], None);
        std::os::unix::fs::symlink(dir.path().join("gone.pdf"), dir.path().join("report.pdf"))
            .unwrap();

        let err = loader(dir.path()).load_pdf_files().await.unwrap_err();

        assert!(err.is_ingestion());
        assert!(err.to_string().contains("report.pdf"));
    }
}
