// src/chunker/accumulator.rs

use tracing::debug;

use crate::chunker::splitter::ParagraphSplitter;
use crate::metadata::Chunk;

/// Buffers the non-header lines of the section currently open.
#[derive(Debug, Default)]
pub struct ContentAccumulator<'a> {
    lines: Vec<&'a str>,
}

impl<'a> ContentAccumulator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Turn the buffered section into chunks tagged with `header_path`.
    ///
    /// The buffer is always cleared. Whitespace-only sections produce nothing.
    /// Returns the number of chunks appended to `out`.
    pub fn flush(
        &mut self,
        header_path: &[String],
        splitter: &ParagraphSplitter,
        out: &mut Vec<Chunk>,
    ) -> usize {
        if self.lines.is_empty() {
            return 0;
        }

        let joined = self.lines.join("\n");
        self.lines.clear();

        let content = joined.trim();
        if content.is_empty() {
            return 0;
        }

        let char_count = content.chars().count();
        if char_count <= splitter.max_chunk_size() {
            out.push(Chunk::new(content, header_path.to_vec()));
            debug!(depth = header_path.len(), chars = char_count, "flushed section");
            return 1;
        }

        debug!(
            depth = header_path.len(),
            chars = char_count,
            max = splitter.max_chunk_size(),
            "section exceeds limit, splitting on paragraphs"
        );

        let before = out.len();
        out.extend(
            splitter
                .split(content)
                .into_iter()
                .map(|piece| Chunk::new(piece, header_path.to_vec())),
        );
        let emitted = out.len() - before;
        debug!(depth = header_path.len(), chunks = emitted, "flushed split section");
        emitted
    }
}
