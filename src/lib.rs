//! # Concord
//!
//! A key-word-in-context (KWIC) concordance query engine for POS-tagged
//! corpora.
//!
//! ## Features
//!
//! - Positional one-gram index over token/tag/metadata triples
//! - Corpus-query patterns: `[word="他們"][pos="V.*"]`
//! - Seed-and-verify n-gram matching with a specificity-chosen anchor
//! - Parallel candidate verification
//! - Concordance extraction with configurable context windows
//! - TSV export and an HTTP query API

pub mod api;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod export;
pub mod index;
pub mod query;
pub mod search;

pub mod prelude {
    //! Convenient single import for library users.
    pub use crate::corpus::{Corpus, Sentence, Text, Token, load_jsonl};
    pub use crate::error::{ConcordError, Result};
    pub use crate::index::{Position, PositionalIndex};
    pub use crate::query::{TokenSpec, parse_query};
    pub use crate::search::{ConcordanceEngine, EngineConfig, ResultSet};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
