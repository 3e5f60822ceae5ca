// src/metadata.rs

use serde::{Deserialize, Serialize};

/// A bounded unit of document text together with its structural context.
///
/// Serializes to the wire form consumers expect:
/// `{"content": "...", "metadata": {"headerPath": ["Outer", "Inner"]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// Enclosing section titles, outermost first
    pub header_path: Vec<String>,
}

impl Chunk {
    pub fn new(content: impl Into<String>, header_path: Vec<String>) -> Self {
        Self {
            content: content.into(),
            metadata: ChunkMetadata { header_path },
        }
    }

    /// Length of the content in characters, the unit `max_chunk_size` is measured in.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn header_path(&self) -> &[String] {
        &self.metadata.header_path
    }
}
