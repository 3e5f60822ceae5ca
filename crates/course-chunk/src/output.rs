//! Rendering chunked documents to stdout.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use course_chunker::{index_chunks, Chunk, ChunkRecord};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One JSON array holding every chunk
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
    /// Human-readable listing
    Pretty,
}

/// Chunks produced from one input, in document order.
#[derive(Debug)]
pub struct ChunkedDocument {
    pub document_id: String,
    pub chunks: Vec<Chunk>,
}

pub fn render<W: Write>(
    out: &mut W,
    format: OutputFormat,
    documents: Vec<ChunkedDocument>,
    as_records: bool,
) -> Result<()> {
    match (format, as_records) {
        (OutputFormat::Json, false) => write_json(out, &flatten_chunks(documents)),
        (OutputFormat::Json, true) => write_json(out, &flatten_records(documents)),
        (OutputFormat::Jsonl, false) => write_jsonl(out, &flatten_chunks(documents)),
        (OutputFormat::Jsonl, true) => write_jsonl(out, &flatten_records(documents)),
        (OutputFormat::Pretty, _) => write_pretty(out, &flatten_records(documents)),
    }
}

fn flatten_chunks(documents: Vec<ChunkedDocument>) -> Vec<Chunk> {
    documents.into_iter().flat_map(|d| d.chunks).collect()
}

fn flatten_records(documents: Vec<ChunkedDocument>) -> Vec<ChunkRecord> {
    documents
        .into_iter()
        .flat_map(|d| index_chunks(&d.document_id, d.chunks))
        .collect()
}

fn write_json<W: Write, T: Serialize>(out: &mut W, items: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, items).context("Failed to serialize chunks")?;
    writeln!(out).context("Failed to write output")?;
    Ok(())
}

fn write_jsonl<W: Write, T: Serialize>(out: &mut W, items: &[T]) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item).context("Failed to serialize chunk")?;
        writeln!(out).context("Failed to write output")?;
    }
    Ok(())
}

fn write_pretty<W: Write>(out: &mut W, records: &[ChunkRecord]) -> Result<()> {
    for record in records {
        let path = if record.header_path.is_empty() {
            "(no headers)".dimmed()
        } else {
            record.header_label.as_str().cyan()
        };

        writeln!(
            out,
            "{} {} {}",
            record.id.bold(),
            path,
            format!("[{} chars]", record.content.chars().count()).dimmed()
        )
        .context("Failed to write output")?;

        for line in record.content.lines() {
            writeln!(out, "    {line}").context("Failed to write output")?;
        }
        writeln!(out).context("Failed to write output")?;
    }
    Ok(())
}
