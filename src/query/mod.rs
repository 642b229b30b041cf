//! Query parsing, pattern matching, and anchor scoring.

pub mod parser;
pub mod pattern;
pub mod specificity;

pub use self::parser::{TokenSpec, parse_query};
pub use self::pattern::{MatchOp, MatchOps, TokenMatcher};
pub use self::specificity::{pick_anchor, specificity};
