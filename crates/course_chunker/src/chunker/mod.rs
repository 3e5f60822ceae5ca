// src/chunker/mod.rs

pub mod accumulator;
pub mod fence;
pub mod headers;
pub mod hierarchy;
pub mod splitter;

pub use fence::{FenceDetector, FencePolicy};
pub use headers::{HeaderFrame, HeaderStack};
pub use hierarchy::HierarchyChunker;
pub use splitter::ParagraphSplitter;
