//! Ingestion pipeline for a medical RAG assistant.
//!
//! PDFs in a data directory are loaded page by page, split into overlapping
//! chunks, and embedded with a sentence-embedding model.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{PipelineError, PipelineResult};
