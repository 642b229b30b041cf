//! Positional indexing over a corpus.
//!
//! The index assigns dense integer ids to every distinct word and POS
//! tag, then records one entry per token occurrence keyed by those ids.
//! Posting lists are grouped by text metadata so a metadata equality
//! filter narrows the search before any pattern matching runs.

pub mod positional;
pub mod vocabulary;

// Re-export commonly used types
pub use positional::{GenderTexts, IndexStats, OneGram, Position, PositionalIndex};
pub use vocabulary::{PosId, TokenId, Vocabulary};
