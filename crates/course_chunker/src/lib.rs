// src/lib.rs
//! # Course Chunker
//!
//! Splits long-form markdown (course notes, textbook chapters) into bounded,
//! context-preserving chunks for retrieval and indexing. Every chunk carries
//! the full path of section headers that encloses it.
//!
//! ## Features
//!
//! - **Header tracking**: ATX headers (`#` to `######`) maintain a section stack;
//!   skipped levels are handled (`H1 → H3 → H2` nests `H2` under `H1`)
//! - **Fence awareness**: `# comments` inside triple-backtick blocks are not
//!   mistaken for headers (configurable, see [`FencePolicy`])
//! - **Size bounding**: sections longer than `max_chunk_size` characters are
//!   split on paragraph boundaries
//! - **Pure**: one pass, no I/O, no shared state; safe to call from many threads
//!
//! ## Quick Start
//!
//! ```rust
//! let chunks = course_chunker::chunk("# A\n## B\ntext", 1000);
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].content, "text");
//! assert_eq!(chunks[0].metadata.header_path, vec!["A", "B"]);
//! ```
//!
//! ## Advanced Usage
//!
//! ```rust
//! use course_chunker::{Chunker, FencePolicy};
//!
//! let chunker = Chunker::builder()
//!     .max_chunk_size(500)
//!     .fence_policy(FencePolicy::Ignore)
//!     .build();
//!
//! let chunks = chunker.chunk("# My Document\n\nContent here.");
//! ```

pub mod chunker;
pub mod ingest;
pub mod metadata;

pub use chunker::{FencePolicy, HeaderFrame};
pub use ingest::{index_chunks, ChunkRecord};
pub use metadata::{Chunk, ChunkMetadata};

use std::borrow::Cow;

use chunker::HierarchyChunker;

/// Default size limit, in characters, for a single chunk.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;

/// Chunk `document` with the default fence policy.
///
/// Total for any input: the empty string yields no chunks, text without
/// headers yields chunks with an empty header path.
pub fn chunk(document: &str, max_chunk_size: usize) -> Vec<Chunk> {
    Chunker::builder()
        .max_chunk_size(max_chunk_size)
        .build()
        .chunk(document)
}

/// Main chunker interface for markdown text.
///
/// Holds only configuration; every call to [`Chunker::chunk`] starts from a
/// fresh scan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_chunk_size: usize,
    fence_policy: FencePolicy,
}

impl Default for Chunker {
    /// Create a chunker with default settings.
    ///
    /// Default configuration:
    /// - max_chunk_size: 1000
    /// - fence_policy: SuppressHeaders
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            fence_policy: FencePolicy::default(),
        }
    }
}

impl Chunker {
    /// Create a builder for custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use course_chunker::Chunker;
    ///
    /// let chunker = Chunker::builder()
    ///     .max_chunk_size(400)
    ///     .build();
    /// assert_eq!(chunker.max_chunk_size(), 400);
    /// ```
    pub fn builder() -> ChunkerBuilder {
        ChunkerBuilder::new()
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn fence_policy(&self) -> FencePolicy {
        self.fence_policy
    }

    /// Chunk the markdown text, preserving document order.
    ///
    /// Note: CRLF line endings are normalized to LF before chunking. A lone CR
    /// is not a line break and stays in the content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use course_chunker::Chunker;
    ///
    /// let chunker = Chunker::default();
    /// let markdown = "# Introduction\n\nThis is content.\n\n## Section\n\nMore content.";
    /// let chunks = chunker.chunk(markdown);
    ///
    /// assert_eq!(chunks.len(), 2);
    /// assert_eq!(chunks[1].metadata.header_path, vec!["Introduction", "Section"]);
    /// ```
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let normalized = if text.contains("\r\n") {
            Cow::Owned(text.replace("\r\n", "\n"))
        } else {
            Cow::Borrowed(text)
        };

        HierarchyChunker::new(self.max_chunk_size, self.fence_policy).chunk(&normalized)
    }
}

/// Builder for configuring a Chunker with custom settings.
pub struct ChunkerBuilder {
    max_chunk_size: usize,
    fence_policy: FencePolicy,
}

impl ChunkerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            fence_policy: FencePolicy::default(),
        }
    }

    /// Set the maximum chunk length in characters.
    ///
    /// A single paragraph longer than this is still emitted whole.
    ///
    /// Default: 1000
    pub fn max_chunk_size(mut self, max: usize) -> Self {
        self.max_chunk_size = max;
        self
    }

    /// Set how header-like lines inside code fences are treated.
    ///
    /// Default: [`FencePolicy::SuppressHeaders`]
    pub fn fence_policy(mut self, policy: FencePolicy) -> Self {
        self.fence_policy = policy;
        self
    }

    /// Build the Chunker with the configured settings.
    pub fn build(self) -> Chunker {
        Chunker {
            max_chunk_size: self.max_chunk_size,
            fence_policy: self.fence_policy,
        }
    }
}

impl Default for ChunkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
