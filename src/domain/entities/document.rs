use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DocumentMetadata;

/// One page of extracted text together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    metadata: DocumentMetadata,
}

impl Document {
    pub fn new(text: String, metadata: DocumentMetadata) -> Self {
        Self { text, metadata }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.source()
    }

    pub fn page(&self) -> Option<usize> {
        self.metadata.page()
    }

    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }
}
