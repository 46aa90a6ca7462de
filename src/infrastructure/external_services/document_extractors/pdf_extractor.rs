use async_trait::async_trait;
use lopdf::{Dictionary, Document as PdfDocument, Object};
use std::path::Path;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractionOptions,
};
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentMetadata, FileHash};

/// Page-per-document PDF extraction backed by `lopdf`.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn page_text(doc: &PdfDocument, page_num: u32) -> Result<String, String> {
        let text = doc
            .extract_text(&[page_num])
            .map_err(|e| format!("Failed to extract text from page {}: {}", page_num, e))?;

        let lines: Vec<&str> = text
            .split('\n')
            .map(|s| s.trim_end())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }

    fn info_dictionary(doc: &PdfDocument) -> Option<&Dictionary> {
        match doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
        let bytes = info.get(key).ok()?.as_str().ok()?;
        let value = match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        };
        let value = value.trim().to_string();
        (!value.is_empty()).then_some(value)
    }

    fn file_metadata(&self, doc: &PdfDocument, file_path: &Path, data: &[u8]) -> DocumentMetadata {
        let mut metadata = DocumentMetadata::new();
        metadata.set_source(file_path.to_string_lossy().to_string());
        metadata.set_file_hash(FileHash::from_bytes(data).into());

        if let Some(info) = Self::info_dictionary(doc) {
            if let Some(title) = Self::info_string(info, b"Title") {
                metadata.set_title(title);
            }
            if let Some(author) = Self::info_string(info, b"Author") {
                metadata.set_author(author);
            }
            if let Some(subject) = Self::info_string(info, b"Subject") {
                metadata.set_subject(subject);
            }
        }

        metadata
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_pages(
        &self,
        file_path: &Path,
        options: &ExtractionOptions,
    ) -> Result<Vec<Document>, DocumentExtractionError> {
        if !self.can_extract(file_path) {
            return Err(DocumentExtractionError::UnsupportedFormat(
                file_path.display().to_string(),
            ));
        }

        let data = tokio::fs::read(file_path)
            .await
            .map_err(|e| DocumentExtractionError::IoError(e.to_string()))?;

        let mut doc = PdfDocument::load_mem(&data)
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(&options.password).map_err(|_e| {
                DocumentExtractionError::ExtractionFailed(
                    "Failed to decrypt PDF - invalid password".to_string(),
                )
            })?;
        }

        let base_metadata = if options.extract_metadata {
            self.file_metadata(&doc, file_path, &data)
        } else {
            let mut metadata = DocumentMetadata::new();
            metadata.set_source(file_path.to_string_lossy().to_string());
            metadata
        };

        let pages = doc.get_pages();
        let total_pages = pages.len();
        let mut documents = Vec::with_capacity(total_pages);

        for (index, page_num) in pages.keys().enumerate() {
            let mut metadata = base_metadata.clone();
            metadata.set_page(index);
            metadata.set_total_pages(total_pages);

            let text = match Self::page_text(&doc, *page_num) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("{} ({})", e, file_path.display());
                    metadata.set_property("extraction_error", serde_json::Value::String(e));
                    String::new()
                }
            };

            documents.push(Document::new(text, metadata));
        }

        Ok(documents)
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec!["pdf".to_string()]
    }
}
