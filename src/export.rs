//! Result export as a tab-separated concordance table.

use crate::corpus::Token;
use crate::search::ResultSet;

/// Column formatting switches for TSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Attach `/tag` to keyword tokens.
    pub kwtag: bool,
    /// Attach `/tag` to context tokens.
    pub ctxtag: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            kwtag: true,
            ctxtag: true,
        }
    }
}

/// Render a result set as a three-column table: left context, keyword,
/// right context, one match per line after the header.
///
/// Keyword tokens are space-joined, as `word/tag` when `kwtag` is set.
/// Tagged context renders the same way; untagged context collapses to
/// the bare words with no separator.
pub fn to_tsv(results: &ResultSet, options: ExportOptions) -> String {
    let mut out = String::from("left\tkeyword\tright\n");

    for entry in &results.entries {
        let c = &entry.concordance;
        let keyword = if options.kwtag {
            tagged(&c.keyword)
        } else {
            spaced(&c.keyword)
        };
        let (left, right) = if options.ctxtag {
            (tagged(&c.left), tagged(&c.right))
        } else {
            (bare(&c.left), bare(&c.right))
        };
        out.push_str(&format!("{left}\t{keyword}\t{right}\n"));
    }

    out
}

fn tagged(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}/{}", t.word, t.tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn spaced(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn bare(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.word.as_str()).collect()
}
