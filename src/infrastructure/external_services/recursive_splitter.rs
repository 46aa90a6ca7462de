use std::collections::VecDeque;
use std::ops::Range;

use crate::application::ports::text_splitter::{TextSpan, TextSplitter, TextSplitterError};

/// Recursive character splitter.
///
/// Text is cut on the coarsest separator it contains (paragraphs, then lines,
/// then words, then characters). Pieces are packed greedily up to
/// `chunk_size` characters, and the tail of each chunk, at most
/// `chunk_overlap` characters of whole pieces, is carried into the next one.
///
/// Pieces are tracked as byte ranges of the input, so a chunk is always the
/// original text between its first and last piece, separators included.
#[derive(Debug, Clone)]
pub struct RTSplitter {
    separators: Vec<&'static str>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RTSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        if chunk_size == 0 {
            return Err(TextSplitterError::InvalidParameters(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        if chunk_overlap >= chunk_size {
            return Err(TextSplitterError::InvalidParameters(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            separators: vec![
                "\n\n", // Double newline (paragraphs)
                "\n",   // Single newline
                " ",    // Space
                "",     // Character level
            ],
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn with_separators(mut self, separators: Vec<&'static str>) -> Self {
        self.separators = separators;
        self
    }

    fn split_by_length(&self, text: &str, range: Range<usize>) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        let bounds: Vec<usize> = text[range.clone()]
            .char_indices()
            .map(|(i, _)| range.start + i)
            .chain(std::iter::once(range.end))
            .collect();
        let char_count = bounds.len() - 1;
        let step = self.chunk_size - self.chunk_overlap;
        let mut start = 0;

        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            if let Some(trimmed) = trim_range(text, bounds[start]..bounds[end]) {
                chunks.push(trimmed);
            }

            if end == char_count {
                break;
            }

            start += step;
        }

        chunks
    }

    fn recursive_split(
        &self,
        text: &str,
        range: Range<usize>,
        separators: &[&'static str],
    ) -> Vec<Range<usize>> {
        let segment = &text[range.clone()];
        let mut final_chunks = Vec::new();

        let mut separator = separators.last().copied().unwrap_or("");
        let mut remaining: &[&'static str] = &[];
        for (i, candidate) in separators.iter().copied().enumerate() {
            if candidate.is_empty() {
                separator = candidate;
                break;
            }
            if segment.contains(candidate) {
                separator = candidate;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let splits = split_ranges(segment, range.start, separator);
        let mut good_splits: Vec<Range<usize>> = Vec::new();

        for split in splits {
            if char_len(&text[split.clone()]) < self.chunk_size {
                good_splits.push(split);
                continue;
            }

            if !good_splits.is_empty() {
                final_chunks.extend(self.merge_splits(text, &good_splits));
                good_splits.clear();
            }

            if remaining.is_empty() {
                final_chunks.extend(self.split_by_length(text, split));
            } else {
                final_chunks.extend(self.recursive_split(text, split, remaining));
            }
        }

        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(text, &good_splits));
        }

        final_chunks
    }

    fn merge_splits(&self, text: &str, splits: &[Range<usize>]) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        let mut current: VecDeque<Range<usize>> = VecDeque::new();

        for split in splits {
            if let (Some(head), Some(tail)) =
                (current.front().map(|r| r.start), current.back().map(|r| r.end))
            {
                if char_len(&text[head..split.end]) > self.chunk_size {
                    if let Some(chunk) = trim_range(text, head..tail) {
                        chunks.push(chunk);
                    }

                    // Keep at most `chunk_overlap` characters as the head of the next chunk.
                    while let Some(first) = current.front() {
                        let kept = char_len(&text[first.start..tail]);
                        let grown = char_len(&text[first.start..split.end]);
                        if kept <= self.chunk_overlap && grown <= self.chunk_size {
                            break;
                        }
                        current.pop_front();
                    }
                }
            }

            current.push_back(split.clone());
        }

        if let (Some(first), Some(last)) = (current.front(), current.back()) {
            if let Some(chunk) = trim_range(text, first.start..last.end) {
                chunks.push(chunk);
            }
        }

        chunks
    }
}

impl TextSplitter for RTSplitter {
    fn split_spans(&self, text: &str) -> Result<Vec<TextSpan>, TextSplitterError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .recursive_split(text, 0..text.len(), &self.separators)
            .into_iter()
            .map(|range| TextSpan::new(range.start, &text[range]))
            .collect())
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte ranges of the non-empty pieces of `segment` between occurrences of
/// `separator`, shifted by `offset`. An empty separator yields one range per char.
fn split_ranges(segment: &str, offset: usize, separator: &str) -> Vec<Range<usize>> {
    if separator.is_empty() {
        return segment
            .char_indices()
            .map(|(i, c)| offset + i..offset + i + c.len_utf8())
            .collect();
    }

    let mut ranges = Vec::new();
    let mut piece_start = 0;
    for (i, _) in segment.match_indices(separator) {
        if i > piece_start {
            ranges.push(offset + piece_start..offset + i);
        }
        piece_start = i + separator.len();
    }
    if piece_start < segment.len() {
        ranges.push(offset + piece_start..offset + segment.len());
    }

    ranges
}

fn trim_range(text: &str, range: Range<usize>) -> Option<Range<usize>> {
    let slice = &text[range.clone()];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }

    let start = range.start + (slice.len() - slice.trim_start().len());
    Some(start..start + trimmed.len())
}
