//! Error types for the Concord library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ConcordError`] enum. Constructor helpers keep call sites short.
//!
//! # Examples
//!
//! ```
//! use concord::error::{ConcordError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ConcordError::invalid_query("empty query"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Concord operations.
///
/// Uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for the common variants.
#[derive(Error, Debug)]
pub enum ConcordError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Query string could not be parsed into token blocks
    #[error("Parse error: {0}")]
    Parse(String),

    /// Query parsed but is structurally unusable (empty, no constraints, ...)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Corpus loading or index construction errors
    #[error("Index error: {0}")]
    IndexBuild(String),

    /// A word or tag pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ConcordError.
pub type Result<T> = std::result::Result<T, ConcordError>;

impl ConcordError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        ConcordError::Parse(msg.into())
    }

    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        ConcordError::InvalidQuery(msg.into())
    }

    /// Create a new index build error.
    pub fn index_build<S: Into<String>>(msg: S) -> Self {
        ConcordError::IndexBuild(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ConcordError::Other(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ConcordError::Other(format!("Not found: {}", msg.into()))
    }
}
