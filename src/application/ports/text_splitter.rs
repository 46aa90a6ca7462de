use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextSplitterError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Split failed: {0}")]
    SplitFailed(String),
}

/// A piece of split text and the byte offset it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub start: usize,
    pub text: String,
}

impl TextSpan {
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Splits text into pieces no longer than [`chunk_size`](TextSplitter::chunk_size)
/// characters, where consecutive pieces share at most
/// [`chunk_overlap`](TextSplitter::chunk_overlap) characters.
///
/// Every span returned by [`split_spans`](TextSplitter::split_spans) is an
/// exact slice of the input: `&text[span.start..span.end()] == span.text`.
pub trait TextSplitter: Send + Sync {
    fn split_spans(&self, text: &str) -> Result<Vec<TextSpan>, TextSplitterError>;

    fn split_text(&self, text: &str) -> Result<Vec<String>, TextSplitterError> {
        Ok(self
            .split_spans(text)?
            .into_iter()
            .map(|span| span.text)
            .collect())
    }

    fn chunk_size(&self) -> usize;

    fn chunk_overlap(&self) -> usize;
}
