// src/ingest.rs
//! Keys chunks for an indexing consumer.
//!
//! The consumer embeds `content` and stores each record under `id`; nothing
//! here performs I/O.

use serde::{Deserialize, Serialize};

use crate::metadata::Chunk;

/// Separator used when flattening a header path for display.
pub const HEADER_LABEL_SEPARATOR: &str = " > ";

/// A chunk keyed by its source document and position within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRecord {
    /// `<document_id>-<sequence_index>`
    pub id: String,
    pub document_id: String,
    pub sequence_index: usize,
    pub content: String,
    pub header_path: Vec<String>,
    /// Header path joined with `" > "`, e.g. `"Chapter 3 > Linked Lists"`
    pub header_label: String,
}

pub fn header_label(header_path: &[String]) -> String {
    header_path.join(HEADER_LABEL_SEPARATOR)
}

/// Assign `(document_id, sequence_index)` keys in chunk order, starting at 0.
pub fn index_chunks(document_id: &str, chunks: Vec<Chunk>) -> Vec<ChunkRecord> {
    chunks
        .into_iter()
        .enumerate()
        .map(|(sequence_index, chunk)| {
            let header_path = chunk.metadata.header_path;
            ChunkRecord {
                id: format!("{document_id}-{sequence_index}"),
                document_id: document_id.to_string(),
                sequence_index,
                content: chunk.content,
                header_label: header_label(&header_path),
                header_path,
            }
        })
        .collect()
}
