use std::sync::Arc;

use crate::application::ports::TextSplitter;
use crate::domain::entities::{Document, TextChunk};
use crate::error::{PipelineError, PipelineResult};

pub struct ChunkingService {
    text_splitter: Arc<dyn TextSplitter>,
}

impl ChunkingService {
    pub fn new(text_splitter: Arc<dyn TextSplitter>) -> Self {
        Self { text_splitter }
    }

    pub fn chunk_size(&self) -> usize {
        self.text_splitter.chunk_size()
    }

    pub fn chunk_overlap(&self) -> usize {
        self.text_splitter.chunk_overlap()
    }

    pub fn create_text_chunks(&self, documents: &[Document]) -> PipelineResult<Vec<TextChunk>> {
        if documents.is_empty() {
            return Err(PipelineError::Validation("No documents to process.".to_string()).logged());
        }

        tracing::info!("Creating text chunks from {} documents.", documents.len());

        let mut chunks = Vec::new();
        for document in documents {
            chunks.extend(self.split_document(document)?);
        }

        tracing::info!("Created {} text chunks from documents.", chunks.len());
        Ok(chunks)
    }

    fn split_document(&self, document: &Document) -> PipelineResult<Vec<TextChunk>> {
        let text = document.text();
        let spans = self.text_splitter.split_spans(text).map_err(|e| {
            PipelineError::Ingestion(format!(
                "Error generating chunks for {}: {}",
                describe(document),
                e
            ))
            .logged()
        })?;

        let chunk_size = self.text_splitter.chunk_size();
        let mut chunks = Vec::with_capacity(spans.len());

        for (index, span) in spans.into_iter().enumerate() {
            let length = span.text.chars().count();
            if length > chunk_size {
                return Err(PipelineError::Ingestion(format!(
                    "Error generating chunks for {}: chunk of {} characters exceeds limit of {}",
                    describe(document),
                    length,
                    chunk_size
                ))
                .logged());
            }

            if text.get(span.start..span.end()) != Some(span.text.as_str()) {
                return Err(PipelineError::Ingestion(format!(
                    "Error generating chunks for {}: chunk {} does not match the text at byte {}",
                    describe(document),
                    index,
                    span.start
                ))
                .logged());
            }

            chunks.push(TextChunk::new(span.text, document.metadata().clone(), index, span.start));
        }

        Ok(chunks)
    }
}

fn describe(document: &Document) -> String {
    match (document.source(), document.page()) {
        (Some(source), Some(page)) => format!("{} (page {})", source, page),
        (Some(source), None) => source.to_string(),
        _ => "document".to_string(),
    }
}
