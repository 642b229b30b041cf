//! Pattern string parsing into token-match specs.
//!
//! A query pattern is a sequence of bracket groups, one per token:
//! `[word="他們" pos="Nh"][word.regex="打|踢" pos="V.*"]`. Values take
//! double or single quotes. A `word.regex` value supersedes `word` and
//! marks the word pattern as a regular expression. A bracket-free
//! string is shorthand for a single exact-word, any-tag token.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ConcordError, Result};

/// One parsed token slot of a query pattern.
///
/// `None` in a field means "match anything in this field".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSpec {
    /// Word pattern.
    pub word: Option<String>,
    /// Whether the word pattern is a regular expression.
    pub word_is_regex: bool,
    /// POS tag pattern.
    pub pos: Option<String>,
}

impl TokenSpec {
    /// A spec with no constraints.
    pub fn new() -> Self {
        TokenSpec::default()
    }

    /// A spec matching `word` exactly, with any tag.
    pub fn exact_word<S: Into<String>>(word: S) -> Self {
        TokenSpec {
            word: Some(word.into()),
            word_is_regex: false,
            pos: None,
        }
    }

    /// A spec whose word field is a regular expression.
    pub fn regex_word<S: Into<String>>(pattern: S) -> Self {
        TokenSpec {
            word: Some(pattern.into()),
            word_is_regex: true,
            pos: None,
        }
    }

    /// Set the tag pattern.
    pub fn with_pos<S: Into<String>>(mut self, pos: S) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Whether neither field constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.word.is_none() && self.pos.is_none()
    }
}

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new(r#"word=['"]([^'"]+)['"]"#).unwrap();
    static ref WORD_REGEX_PATTERN: Regex =
        Regex::new(r#"word\.regex=['"]([^'"]+)['"]"#).unwrap();
    static ref POS_PATTERN: Regex = Regex::new(r#"pos=['"]([^'" ]+)['"]"#).unwrap();
}

/// Parse a pattern string into an ordered list of token specs.
///
/// Output order equals the left-to-right order of depth-0 bracket
/// groups in the input. Unbalanced brackets are a parse error.
pub fn parse_query(pattern: &str) -> Result<Vec<TokenSpec>> {
    // Single exact token shorthand
    if !pattern.contains('[') && !pattern.contains(']') {
        return Ok(vec![TokenSpec::exact_word(pattern)]);
    }

    let mut specs = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in pattern.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    start = i + 1;
                }
                depth += 1;
            }
            ']' => {
                if depth == 0 {
                    return Err(ConcordError::parse(format!(
                        "unbalanced brackets: unexpected ']' at byte {i}"
                    )));
                }
                depth -= 1;
                if depth == 0 {
                    specs.push(parse_block(&pattern[start..i]));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ConcordError::parse("unbalanced brackets: missing ']'"));
    }

    Ok(specs)
}

/// Scan one bracket group's content for its key/value sub-patterns.
fn parse_block(inside: &str) -> TokenSpec {
    let word_regex = WORD_REGEX_PATTERN
        .captures(inside)
        .map(|c| c[1].to_string());
    let word_is_regex = word_regex.is_some();
    let word =
        word_regex.or_else(|| WORD_PATTERN.captures(inside).map(|c| c[1].to_string()));
    let pos = POS_PATTERN.captures(inside).map(|c| c[1].to_string());

    TokenSpec {
        word,
        word_is_regex,
        pos,
    }
}
