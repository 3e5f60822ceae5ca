// src/chunker/headers.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// ATX header: one to six `#`, whitespace, then the title.
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)").expect("header pattern is valid"));

/// One level of the enclosing section hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFrame {
    pub level: u8,
    pub text: String,
}

impl HeaderFrame {
    /// Parse an ATX header line. The line must start with the `#` run.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HEADER_RE.captures(line)?;
        let level = caps.get(1)?.as_str().len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        Some(Self { level, text })
    }
}

/// Stack of open sections, outermost at the bottom.
///
/// Levels strictly increase from bottom to top. At most six frames are live.
#[derive(Debug, Default)]
pub struct HeaderStack {
    frames: Vec<HeaderFrame>,
}

impl HeaderStack {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(6),
        }
    }

    /// Close every section at the new header's level or deeper, then open it.
    ///
    /// Returns the number of frames popped.
    pub fn push(&mut self, frame: HeaderFrame) -> usize {
        let mut popped = 0;
        while self
            .frames
            .last()
            .is_some_and(|top| top.level >= frame.level)
        {
            self.frames.pop();
            popped += 1;
        }
        self.frames.push(frame);
        popped
    }

    /// Snapshot of the titles, outermost first.
    pub fn path(&self) -> Vec<String> {
        self.frames.iter().map(|f| f.text.clone()).collect()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
