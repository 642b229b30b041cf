//! Pattern matching operators over vocabulary entries.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a pattern string is matched against a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchOp {
    /// String equality.
    #[default]
    Exact,
    /// `%` matches any run of characters, everything else is literal.
    /// The whole entry must match.
    Wildcard,
    /// Regular expression search with implicit word-boundary anchors,
    /// so a bare pattern like `打` only matches the whole entry unless
    /// the pattern itself crosses boundaries.
    Regex,
}

/// Match operators for the two fields of a token pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOps {
    pub word: MatchOp,
    pub pos: MatchOp,
}

impl Default for MatchOps {
    /// Words match exactly, tags by regex. A per-token `word.regex`
    /// flag overrides the word side at query time.
    fn default() -> Self {
        MatchOps {
            word: MatchOp::Exact,
            pos: MatchOp::Regex,
        }
    }
}

/// A single compiled field matcher.
#[derive(Debug, Clone)]
pub enum TokenMatcher {
    Exact(String),
    Pattern(Regex),
}

impl TokenMatcher {
    /// Compile `pattern` under the given operator.
    pub fn compile(pattern: &str, op: MatchOp) -> Result<TokenMatcher> {
        match op {
            MatchOp::Exact => Ok(TokenMatcher::Exact(pattern.to_string())),
            MatchOp::Wildcard => {
                let escaped = pattern
                    .split('%')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*");
                Ok(TokenMatcher::Pattern(Regex::new(&format!(
                    "^{escaped}$"
                ))?))
            }
            MatchOp::Regex => Ok(TokenMatcher::Pattern(Regex::new(&format!(
                r"\b{pattern}\b"
            ))?)),
        }
    }

    /// Test a vocabulary entry against the compiled pattern.
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            TokenMatcher::Exact(s) => s == value,
            TokenMatcher::Pattern(re) => re.is_match(value),
        }
    }
}
