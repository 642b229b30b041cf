//! Command line argument parsing for the concord CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Concord - a key-word-in-context query engine for POS-tagged corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "concord")]
#[command(about = "Key-word-in-context queries over POS-tagged corpora")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ConcordArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ConcordArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a corpus and serve the query API over HTTP
    Serve(ServeArgs),

    /// Run a single query and print the matches
    Query(QueryArgs),

    /// Show corpus statistics
    Stats(StatsArgs),
}

/// Arguments for the HTTP server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Corpus file (JSON lines, one tagged text per line)
    #[arg(short, long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "1420")]
    pub port: u16,

    /// Verification threads (default: all logical CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for one-shot queries
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Corpus file (JSON lines, one tagged text per line)
    #[arg(short, long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Query pattern, e.g. [word="他們"][pos="VC"]
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Only match texts with this metadata value
    #[arg(short, long)]
    pub gender: Option<u8>,

    /// Context words to the left of the keyword
    #[arg(long, default_value = "10")]
    pub left: usize,

    /// Context words to the right of the keyword
    #[arg(long, default_value = "10")]
    pub right: usize,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Tag keyword tokens as word/tag in TSV output
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub kwtag: bool,

    /// Tag context tokens as word/tag in TSV output
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub ctxtag: bool,

    /// Verification threads (default: all logical CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Corpus file (JSON lines, one tagged text per line)
    #[arg(short, long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

/// Output formats for one-shot queries
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per match
    Text,
    /// The full result set as JSON
    Json,
    /// Tab-separated left/keyword/right columns
    Tsv,
}
