//! Query result types.

use serde::Serialize;

use crate::corpus::Token;
use crate::index::Position;

/// A validated n-gram match.
///
/// `position` is the seed position, i.e. where the anchor token occurs.
/// Verification guarantees the whole window fits in the seed's
/// sentence, so `position.offset >= anchor` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramMatch {
    /// Position of the anchor token occurrence.
    pub position: Position,
    /// Index of the anchor within the query.
    pub anchor: usize,
    /// Width of the matched n-gram.
    pub len: usize,
    /// Metadata of the text the match came from.
    pub gender: Option<u8>,
}

impl NgramMatch {
    /// Position of the first keyword token.
    pub fn keyword_position(&self) -> Position {
        Position::new(
            self.position.text_id,
            self.position.sent_id,
            self.position.offset - self.anchor as u32,
        )
    }
}

/// Display context around one match: up to `left`/`right` tokens on
/// either side of the keyword, possibly spanning sentence boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Concordance {
    pub left: Vec<Token>,
    pub keyword: Vec<Token>,
    pub right: Vec<Token>,
}

/// One display record of a result set. `position` locates the first
/// keyword token.
#[derive(Debug, Clone, Serialize)]
pub struct ConcordanceEntry {
    #[serde(flatten)]
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<u8>,
    #[serde(flatten)]
    pub concordance: Concordance,
}

/// An immutable snapshot of one query's results, in corpus order.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    /// The pattern string these results answer.
    pub pattern: String,
    pub entries: Vec<ConcordanceEntry>,
}

impl ResultSet {
    /// Number of matches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
