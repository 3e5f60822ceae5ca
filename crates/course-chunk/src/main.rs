//! course-chunk - Split markdown course material into header-tagged chunks
//!
//! Usage:
//!   course-chunk notes.md                 Print chunks as a JSON array
//!   course-chunk -f pretty week1.md week2.md
//!   cat notes.md | course-chunk --records Emit keyed records for indexing

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use course_chunker::{Chunker, FencePolicy};
use rayon::prelude::*;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod output;

use config::{default_config_path, load_config, Config, EnvDefaults, Overrides, Settings};
use input::{ensure_unique_ids, read_document, InputSource};
use output::{render, ChunkedDocument, OutputFormat};

#[derive(Parser)]
#[command(name = "course-chunk")]
#[command(about = "Split markdown into size-bounded chunks tagged with their header path")]
#[command(version)]
struct Cli {
    /// Markdown files to chunk ("-" or nothing reads stdin)
    files: Vec<PathBuf>,

    /// Maximum chunk length in characters
    #[arg(long)]
    max_chunk_size: Option<usize>,

    /// How header-like lines inside code fences are treated
    #[arg(long, value_enum)]
    fence_policy: Option<FencePolicyArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Emit records keyed by document id and sequence index
    #[arg(long)]
    records: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum FencePolicyArg {
    /// Lines inside fences are never headers
    SuppressHeaders,
    /// Detect headers inside fences too
    Ignore,
}

impl From<FencePolicyArg> for FencePolicy {
    fn from(arg: FencePolicyArg) -> Self {
        match arg {
            FencePolicyArg::SuppressHeaders => FencePolicy::SuppressHeaders,
            FencePolicyArg::Ignore => FencePolicy::Ignore,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let config = match &cli.config {
        Some(path) => {
            ensure!(path.exists(), "Config file not found: {}", path.display());
            load_config(path)?
        }
        None => match default_config_path().and_then(|path| load_config(&path)) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load default config: {err:#}. Using defaults.");
                Config::default()
            }
        },
    };

    let overrides = Overrides {
        max_chunk_size: cli.max_chunk_size,
        fence_policy: cli.fence_policy.map(FencePolicy::from),
        format: cli.format,
    };
    Settings::resolve(&overrides, &config, &EnvDefaults::from_env()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(&cli)?;
    debug!(?settings, "resolved settings");

    let chunker = Chunker::builder()
        .max_chunk_size(settings.max_chunk_size)
        .fence_policy(settings.fence_policy)
        .build();

    let sources = InputSource::from_args(&cli.files);
    ensure_unique_ids(&sources)?;

    let documents = sources
        .par_iter()
        .map(|source| -> Result<ChunkedDocument> {
            let document = read_document(source)?;
            let chunks = chunker.chunk(&document.text);
            debug!(document = %document.id, chunks = chunks.len(), "chunked document");
            Ok(ChunkedDocument {
                document_id: document.id,
                chunks,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total: usize = documents.iter().map(|d| d.chunks.len()).sum();
    info!(documents = documents.len(), chunks = total, "chunking complete");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render(&mut out, settings.format, documents, cli.records)?;
    out.flush()?;

    Ok(())
}
