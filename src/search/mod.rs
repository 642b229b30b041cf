//! Query execution and context extraction.

pub mod concordance;
pub mod engine;
pub mod results;

pub use self::engine::{ConcordanceEngine, EngineConfig};
pub use self::results::{Concordance, ConcordanceEntry, NgramMatch, ResultSet};
