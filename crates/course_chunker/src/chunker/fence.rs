// src/chunker/fence.rs

use serde::{Deserialize, Serialize};

const FENCE_MARKER: &str = "```";

/// Whether header-looking lines inside a fenced code block open new sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FencePolicy {
    /// Lines inside a fence are always content, even `# comment` lines.
    #[default]
    SuppressHeaders,
    /// Header detection runs regardless of fence state.
    Ignore,
}

impl FencePolicy {
    pub fn allows_header(self, in_fence: bool) -> bool {
        match self {
            Self::SuppressHeaders => !in_fence,
            Self::Ignore => true,
        }
    }
}

/// Tracks whether the scan is inside a triple-backtick fence.
///
/// Nesting is not modelled: every delimiter line flips the state.
#[derive(Debug, Default)]
pub struct FenceDetector {
    in_fence: bool,
}

impl FenceDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_delimiter(line: &str) -> bool {
        line.trim().starts_with(FENCE_MARKER)
    }

    /// Feed one line; returns true if it toggled the fence state.
    pub fn observe(&mut self, line: &str) -> bool {
        if Self::is_delimiter(line) {
            self.in_fence = !self.in_fence;
            true
        } else {
            false
        }
    }

    pub fn in_fence(&self) -> bool {
        self.in_fence
    }
}
