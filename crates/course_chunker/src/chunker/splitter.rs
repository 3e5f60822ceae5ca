// src/chunker/splitter.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// One or more blank (or whitespace-only) lines.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

const PARAGRAPH_JOINER: &str = "\n\n";
const JOINER_LEN: usize = 2;

/// Paragraph-boundary splitter for sections larger than the size limit.
///
/// Paragraphs are packed greedily in document order. A paragraph that is
/// itself longer than the limit is emitted whole rather than cut.
pub struct ParagraphSplitter {
    max_chunk_size: usize,
}

impl ParagraphSplitter {
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Split on blank-line boundaries, dropping the separators.
    pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
        PARAGRAPH_BREAK.split(text)
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut buffer = String::new();
        // Character length of `buffer`, kept alongside to avoid rescanning it
        let mut buffer_len = 0usize;

        for paragraph in Self::paragraphs(text) {
            let paragraph_len = paragraph.chars().count();

            if !buffer.is_empty() && buffer_len + JOINER_LEN + paragraph_len > self.max_chunk_size
            {
                push_trimmed(&mut pieces, &buffer);
                buffer.clear();
                buffer.push_str(paragraph);
                buffer_len = paragraph_len;
            } else if buffer.is_empty() {
                buffer.push_str(paragraph);
                buffer_len = paragraph_len;
            } else {
                buffer.push_str(PARAGRAPH_JOINER);
                buffer.push_str(paragraph);
                buffer_len += JOINER_LEN + paragraph_len;
            }
        }

        push_trimmed(&mut pieces, &buffer);
        pieces
    }
}

fn push_trimmed(pieces: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        pieces.push(trimmed.to_string());
    }
}
