use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::DocumentMetadata;

/// A bounded slice of a [`Document`](super::Document), the unit that gets embedded.
///
/// `metadata` is the source document's metadata plus `chunk_index` and
/// `start_index` (byte offset of `text` inside the document text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    id: Uuid,
    text: String,
    metadata: DocumentMetadata,
}

impl TextChunk {
    pub fn new(
        text: String,
        mut metadata: DocumentMetadata,
        chunk_index: usize,
        start_index: usize,
    ) -> Self {
        metadata.set_chunk_index(chunk_index);
        metadata.set_start_index(start_index);

        Self {
            id: Uuid::new_v4(),
            text,
            metadata,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn chunk_index(&self) -> usize {
        self.metadata.chunk_index().unwrap_or_default()
    }

    pub fn start_index(&self) -> usize {
        self.metadata.start_index().unwrap_or_default()
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

    pub fn belongs_to_same_page(&self, other: &TextChunk) -> bool {
        self.source() == other.source() && self.page() == other.page()
    }
}
