//! Reading markdown inputs from files or stdin.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

const STDIN_MARKER: &str = "-";
const STDIN_DOCUMENT_ID: &str = "stdin";
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Map CLI paths to sources. No paths means stdin.
    pub fn from_args(paths: &[PathBuf]) -> Vec<Self> {
        if paths.is_empty() {
            return vec![Self::Stdin];
        }
        paths
            .iter()
            .map(|p| {
                if p.as_os_str() == STDIN_MARKER {
                    Self::Stdin
                } else {
                    Self::File(p.clone())
                }
            })
            .collect()
    }

    /// Document id used for record keys: the file stem, or `stdin`.
    pub fn document_id(&self) -> String {
        match self {
            Self::Stdin => STDIN_DOCUMENT_ID.to_string(),
            Self::File(path) => file_stem(path),
        }
    }
}

/// Reject inputs whose document ids collide, since record ids are derived from them.
pub fn ensure_unique_ids(sources: &[InputSource]) -> Result<()> {
    let mut seen = HashSet::with_capacity(sources.len());
    for source in sources {
        let id = source.document_id();
        if !seen.insert(id.clone()) {
            match source {
                InputSource::Stdin => bail!("stdin can only be given once"),
                InputSource::File(path) => bail!(
                    "Duplicate document id {id:?} for {}; rename the file so record ids stay unique",
                    path.display()
                ),
            }
        }
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug)]
pub struct Document {
    pub id: String,
    pub text: String,
}

pub fn read_document(source: &InputSource) -> Result<Document> {
    let text = match source {
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read markdown from stdin")?;
            text
        }
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?,
    };

    let text = match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => text,
    };

    Ok(Document {
        id: source.document_id(),
        text,
    })
}
