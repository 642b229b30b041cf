//! Selectivity scoring for anchor selection.

use crate::query::parser::TokenSpec;

/// Metacharacters that mark a word regex as narrowing rather than
/// broadening the match.
const REGEX_METACHARS: [char; 9] = ['^', '$', '[', ']', '{', '}', '(', ')', '|'];

/// Score a token spec by estimated selectivity. Higher means the spec
/// is expected to match fewer corpus positions.
///
/// CJK ideographs in the word pattern weigh 1.2 each, a narrowing word
/// regex adds 1, ASCII letters in the tag pattern weigh 0.5 each, and a
/// `%` wildcard in the tag costs 0.2. Absent fields contribute nothing.
/// This is a heuristic for picking the anchor only; it never affects
/// which matches are returned.
pub fn specificity(spec: &TokenSpec) -> f64 {
    let mut score = 0.0;

    if let Some(word) = &spec.word {
        let cjk = word
            .chars()
            .filter(|c| ('\u{4E00}'..='\u{9FFF}').contains(c))
            .count();
        score += 1.2 * cjk as f64;
        if spec.word_is_regex && word.chars().any(|c| REGEX_METACHARS.contains(&c)) {
            score += 1.0;
        }
    }

    if let Some(pos) = &spec.pos {
        let letters = pos.chars().filter(char::is_ascii_alphabetic).count();
        score += 0.5 * letters as f64;
        if pos.contains('%') {
            score -= 0.2;
        }
    }

    score
}

/// Index of the highest-scoring spec, ties broken by lowest index.
///
/// Expects a non-empty slice; an empty query is rejected before anchor
/// selection runs.
pub fn pick_anchor(specs: &[TokenSpec]) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, spec) in specs.iter().enumerate() {
        let score = specificity(spec);
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    best
}
