// src/chunker/hierarchy.rs

use tracing::{trace, warn};

use crate::chunker::accumulator::ContentAccumulator;
use crate::chunker::fence::{FenceDetector, FencePolicy};
use crate::chunker::headers::{HeaderFrame, HeaderStack};
use crate::chunker::splitter::ParagraphSplitter;
use crate::metadata::Chunk;

/// Single-pass, header-aware chunker.
///
/// Each line either toggles the fence state, opens a new section, or is
/// buffered as content. The buffer is flushed before every header and once
/// at end of input, so a chunk's header path is the stack as it stood
/// before the header that closed its section.
pub struct HierarchyChunker {
    splitter: ParagraphSplitter,
    fence_policy: FencePolicy,
}

/// Call-local scan state. Never outlives one `chunk` call.
struct ChunkerState<'a> {
    headers: HeaderStack,
    content: ContentAccumulator<'a>,
    fence: FenceDetector,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkerState<'a> {
    fn new() -> Self {
        Self {
            headers: HeaderStack::new(),
            content: ContentAccumulator::new(),
            fence: FenceDetector::new(),
            chunks: Vec::new(),
        }
    }

    fn flush(&mut self, splitter: &ParagraphSplitter) {
        if self.content.is_empty() {
            return;
        }
        let path = self.headers.path();
        self.content.flush(&path, splitter, &mut self.chunks);
    }
}

impl HierarchyChunker {
    pub fn new(max_chunk_size: usize, fence_policy: FencePolicy) -> Self {
        Self {
            splitter: ParagraphSplitter::new(max_chunk_size),
            fence_policy,
        }
    }

    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut state = ChunkerState::new();

        for line in text.split('\n') {
            state.fence.observe(line);

            let header = if self.fence_policy.allows_header(state.fence.in_fence()) {
                HeaderFrame::parse(line)
            } else {
                None
            };

            match header {
                Some(frame) => {
                    state.flush(&self.splitter);
                    trace!(level = frame.level, title = %frame.text, "opening section");
                    let popped = state.headers.push(frame);
                    trace!(popped, depth = state.headers.depth(), "header stack updated");
                }
                None => state.content.push(line),
            }
        }

        if state.fence.in_fence() {
            warn!("input ended inside an unterminated code fence");
        }
        state.flush(&self.splitter);

        state.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker() -> HierarchyChunker {
        HierarchyChunker::new(1000, FencePolicy::SuppressHeaders)
    }

    #[test]
    fn test_content_before_first_header_has_empty_path() {
        let chunks = chunker().chunk("preamble\n# A\nbody");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "preamble");
        assert!(chunks[0].header_path().is_empty());
        assert_eq!(chunks[1].content, "body");
        assert_eq!(chunks[1].header_path(), ["A".to_string()]);
    }

    #[test]
    fn test_header_path_is_snapshot_before_update() {
        let chunks = chunker().chunk("# A\none\n## B\ntwo\n# C\nthree");
        let paths: Vec<Vec<String>> = chunks.iter().map(|c| c.header_path().to_vec()).collect();

        assert_eq!(
            paths,
            vec![
                vec!["A".to_string()],
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string()],
            ]
        );
    }

    #[test]
    fn test_headers_without_content_emit_nothing() {
        assert!(chunker().chunk("# A\n## B\n### C").is_empty());
    }

    #[test]
    fn test_fence_lines_are_kept_as_content() {
        let chunks = chunker().chunk("# Code\n```rust\nfn main() {}\n```");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "```rust\nfn main() {}\n```");
    }

    #[test]
    fn test_suppressed_header_inside_fence() {
        let chunks = chunker().chunk("```\n# fake header\n```");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].content.contains("# fake header"));
        assert!(chunks[0].header_path().is_empty());
    }

    #[test]
    fn test_ignore_policy_matches_headers_inside_fence() {
        let chunks = HierarchyChunker::new(1000, FencePolicy::Ignore)
            .chunk("```\n# fake header\n```");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "```");
        assert!(chunks[0].header_path().is_empty());
        assert_eq!(chunks[1].content, "```");
        assert_eq!(chunks[1].header_path(), ["fake header".to_string()]);
    }

    #[test]
    fn test_unterminated_fence_still_flushes() {
        let chunks = chunker().chunk("# A\n```\ncode\n# still code");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "```\ncode\n# still code");
        assert_eq!(chunks[0].header_path(), ["A".to_string()]);
    }

    #[test]
    fn test_oversized_section_shares_header_path() {
        let para = "z".repeat(40);
        let text = format!("# Big\n{para}\n\n{para}\n\n{para}");
        let chunks = HierarchyChunker::new(50, FencePolicy::SuppressHeaders).chunk(&text);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(chunk.content, para);
            assert_eq!(chunk.header_path(), ["Big".to_string()]);
        }
    }
}
