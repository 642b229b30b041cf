//! Context extraction around a validated match.

use crate::corpus::{Text, Token};
use crate::search::results::Concordance;

/// Slice a keyword of width `n` starting at (`sent_id`, `offset`) out
/// of `text`, with up to `left`/`right` context tokens on either side.
///
/// The text is flattened across sentence boundaries first, so context
/// may span sentences even though n-gram matches never do. All slices
/// saturate at the text edges; a short or empty slice is a valid
/// result and extraction never fails.
pub fn extract(
    text: &Text,
    sent_id: u32,
    offset: u32,
    n: usize,
    left: usize,
    right: usize,
) -> Concordance {
    let flat: Vec<&Token> = text.sentences.iter().flatten().collect();

    let preceding = (sent_id as usize).min(text.sentences.len());
    let keyword_idx = text.sentences[..preceding]
        .iter()
        .map(|s| s.len())
        .sum::<usize>()
        + offset as usize;

    let kw_start = keyword_idx.min(flat.len());
    let kw_end = keyword_idx.saturating_add(n).min(flat.len());
    let left_start = kw_start.saturating_sub(left);
    let right_end = kw_end.saturating_add(right).min(flat.len());

    Concordance {
        left: flat[left_start..kw_start].iter().map(|&t| t.clone()).collect(),
        keyword: flat[kw_start..kw_end].iter().map(|&t| t.clone()).collect(),
        right: flat[kw_end..right_end].iter().map(|&t| t.clone()).collect(),
    }
}
