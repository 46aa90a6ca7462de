use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SOURCE: &str = "source";
const PAGE: &str = "page";
const TOTAL_PAGES: &str = "total_pages";
const FILE_HASH: &str = "file_hash";
const TITLE: &str = "title";
const AUTHOR: &str = "author";
const SUBJECT: &str = "subject";
const CHUNK_INDEX: &str = "chunk_index";
const START_INDEX: &str = "start_index";

/// Open key/value metadata attached to documents and chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentMetadata {
    properties: BTreeMap<String, serde_json::Value>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn get_property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    // Well-known keys
    pub fn set_source(&mut self, source: String) {
        self.set_property(SOURCE, serde_json::Value::String(source));
    }

    pub fn source(&self) -> Option<&str> {
        self.get_str(SOURCE)
    }

    pub fn set_page(&mut self, page: usize) {
        self.set_property(PAGE, serde_json::Value::from(page));
    }

    pub fn page(&self) -> Option<usize> {
        self.get_usize(PAGE)
    }

    pub fn set_total_pages(&mut self, total: usize) {
        self.set_property(TOTAL_PAGES, serde_json::Value::from(total));
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.get_usize(TOTAL_PAGES)
    }

    pub fn set_file_hash(&mut self, hash: String) {
        self.set_property(FILE_HASH, serde_json::Value::String(hash));
    }

    pub fn file_hash(&self) -> Option<&str> {
        self.get_str(FILE_HASH)
    }

    pub fn set_title(&mut self, title: String) {
        self.set_property(TITLE, serde_json::Value::String(title));
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str(TITLE)
    }

    pub fn set_author(&mut self, author: String) {
        self.set_property(AUTHOR, serde_json::Value::String(author));
    }

    pub fn author(&self) -> Option<&str> {
        self.get_str(AUTHOR)
    }

    pub fn set_subject(&mut self, subject: String) {
        self.set_property(SUBJECT, serde_json::Value::String(subject));
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str(SUBJECT)
    }

    pub fn set_chunk_index(&mut self, index: usize) {
        self.set_property(CHUNK_INDEX, serde_json::Value::from(index));
    }

    pub fn chunk_index(&self) -> Option<usize> {
        self.get_usize(CHUNK_INDEX)
    }

    pub fn set_start_index(&mut self, index: usize) {
        self.set_property(START_INDEX, serde_json::Value::from(index));
    }

    pub fn start_index(&self) -> Option<usize> {
        self.get_usize(START_INDEX)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get_property(key).and_then(|v| v.as_str())
    }

    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get_property(key)
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
    }
}

impl From<DocumentMetadata> for serde_json::Value {
    fn from(metadata: DocumentMetadata) -> Self {
        serde_json::Value::Object(metadata.properties.into_iter().collect())
    }
}
