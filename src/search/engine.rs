//! The concordance query engine: seed-and-verify n-gram matching.

use std::path::Path;

use ahash::AHashSet;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, load_jsonl};
use crate::error::{ConcordError, Result};
use crate::index::{IndexStats, OneGram, PosId, Position, PositionalIndex, TokenId};
use crate::query::{MatchOp, MatchOps, TokenMatcher, TokenSpec, parse_query, pick_anchor};
use crate::search::concordance;
use crate::search::results::{Concordance, ConcordanceEntry, NgramMatch, ResultSet};

/// Configuration for a [`ConcordanceEngine`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Worker threads for candidate verification. `None` uses the
    /// number of logical CPUs.
    pub num_threads: Option<usize>,
    /// Match operators applied to query patterns. A per-token
    /// `word.regex` flag still overrides the word operator.
    pub match_ops: MatchOps,
}

/// The vocabulary ids satisfying one token spec, precomputed once per
/// query so verification never re-runs a regex per candidate.
///
/// `None` means the field is unconstrained; an empty set means the
/// pattern matched no vocabulary entry at all.
#[derive(Debug, Clone, Default)]
struct MatchSet {
    token_ids: Option<AHashSet<TokenId>>,
    pos_ids: Option<AHashSet<PosId>>,
}

impl MatchSet {
    fn matches(&self, token_id: TokenId, pos_id: PosId) -> bool {
        self.token_ids
            .as_ref()
            .map_or(true, |s| s.contains(&token_id))
            && self.pos_ids.as_ref().map_or(true, |s| s.contains(&pos_id))
    }
}

/// Long-lived query engine owning a corpus and its positional index.
///
/// Both are immutable after construction, so queries are read-only and
/// run concurrently without locking. Candidate verification is farmed
/// out to an internal thread pool.
pub struct ConcordanceEngine {
    corpus: Corpus,
    index: PositionalIndex,
    match_ops: MatchOps,
    thread_pool: ThreadPool,
}

impl ConcordanceEngine {
    /// Build an engine over an already-loaded corpus.
    pub fn new(corpus: Corpus) -> Result<Self> {
        Self::with_config(corpus, EngineConfig::default())
    }

    /// Build an engine over an already-loaded corpus with explicit
    /// configuration.
    pub fn with_config(corpus: Corpus, config: EngineConfig) -> Result<Self> {
        let num_threads = config.num_threads.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("concord-search-{i}"))
            .build()
            .map_err(|e| ConcordError::other(format!("Failed to create thread pool: {e}")))?;

        let index = PositionalIndex::build(&corpus);

        Ok(ConcordanceEngine {
            corpus,
            index,
            match_ops: config.match_ops,
            thread_pool,
        })
    }

    /// Load a JSONL corpus from `path` and build an engine over it.
    pub fn open<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        let corpus = load_jsonl(path.as_ref())?;
        let engine = Self::with_config(corpus, config)?;

        let stats = engine.stats();
        tracing::info!(
            path = %path.as_ref().display(),
            texts = stats.texts,
            tokens = stats.tokens,
            distinct_words = stats.distinct_words,
            "corpus indexed"
        );
        Ok(engine)
    }

    /// The corpus this engine serves.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The positional index built at construction time.
    pub fn index(&self) -> &PositionalIndex {
        &self.index
    }

    /// Corpus-level counts for reporting.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Execute parsed token specs and return validated matches in
    /// corpus order.
    ///
    /// A single-spec query short-circuits to the one-gram lookup; the
    /// lookup result already satisfies the only constraint, so no
    /// verification pass runs. Longer queries go through seed-and-verify
    /// with the anchor picked by specificity.
    pub fn run_query(&self, specs: &[TokenSpec], gender: Option<u8>) -> Result<Vec<NgramMatch>> {
        if specs.is_empty() {
            return Err(ConcordError::invalid_query("empty query"));
        }

        if specs.len() == 1 {
            let set = self.match_set(&specs[0])?;
            let hits =
                self.index
                    .lookup_one_gram(set.token_ids.as_ref(), set.pos_ids.as_ref(), gender)?;
            return Ok(hits
                .into_iter()
                .map(|g| NgramMatch {
                    position: g.position,
                    anchor: 0,
                    len: 1,
                    gender: g.gender,
                })
                .collect());
        }

        self.run_query_anchored(specs, gender, pick_anchor(specs))
    }

    /// Seed-and-verify with an explicit anchor index.
    ///
    /// Every valid anchor yields the same match set once seed positions
    /// are re-expressed at the keyword start; [`run_query`] merely picks
    /// a cheap one.
    ///
    /// [`run_query`]: ConcordanceEngine::run_query
    pub fn run_query_anchored(
        &self,
        specs: &[TokenSpec],
        gender: Option<u8>,
        anchor: usize,
    ) -> Result<Vec<NgramMatch>> {
        if specs.is_empty() {
            return Err(ConcordError::invalid_query("empty query"));
        }
        if anchor >= specs.len() {
            return Err(ConcordError::invalid_query(format!(
                "anchor {anchor} out of range for a {}-token query",
                specs.len()
            )));
        }

        let match_sets = self.match_sets(specs)?;
        let seed = &match_sets[anchor];
        let candidates =
            self.index
                .lookup_one_gram(seed.token_ids.as_ref(), seed.pos_ids.as_ref(), gender)?;

        let n = specs.len();
        let matches: Vec<NgramMatch> = self.thread_pool.install(|| {
            candidates
                .par_iter()
                .filter(|g| self.verify_window(g, anchor, &match_sets))
                .map(|g| NgramMatch {
                    position: g.position,
                    anchor,
                    len: n,
                    gender: g.gender,
                })
                .collect()
        });

        tracing::debug!(
            candidates = candidates.len(),
            matches = matches.len(),
            anchor,
            "verified n-gram candidates"
        );

        Ok(matches)
    }

    /// Parse a pattern string, run it, and extract display context for
    /// every match.
    pub fn concordance_query(
        &self,
        pattern: &str,
        gender: Option<u8>,
        left: usize,
        right: usize,
    ) -> Result<ResultSet> {
        let specs = parse_query(pattern)?;
        let matches = self.run_query(&specs, gender)?;

        let entries = matches
            .iter()
            .map(|m| {
                let keyword = m.keyword_position();
                ConcordanceEntry {
                    position: keyword,
                    gender: m.gender,
                    concordance: self.extract_concordance(keyword, m.len, left, right),
                }
            })
            .collect();

        Ok(ResultSet {
            pattern: pattern.to_string(),
            entries,
        })
    }

    /// Extract left/keyword/right context for a keyword of width `n`
    /// starting at `position`. Out-of-range positions yield empty or
    /// truncated slices, never an error.
    pub fn extract_concordance(
        &self,
        position: Position,
        n: usize,
        left: usize,
        right: usize,
    ) -> Concordance {
        match self.corpus.text(position.text_id) {
            Some(text) => {
                concordance::extract(text, position.sent_id, position.offset, n, left, right)
            }
            None => Concordance::default(),
        }
    }

    /// Check the n-token window around one candidate seed. Windows
    /// never cross sentence boundaries; a window running off either end
    /// of the sentence rejects the candidate.
    fn verify_window(&self, seed: &OneGram, anchor: usize, match_sets: &[MatchSet]) -> bool {
        let pos = seed.position;
        let Some(sentence) = self.index.sentence_ids(pos.text_id, pos.sent_id) else {
            return false;
        };
        let Some(window_start) = (pos.offset as usize).checked_sub(anchor) else {
            return false;
        };
        let Some(window) = sentence.get(window_start..window_start + match_sets.len()) else {
            return false;
        };

        window
            .iter()
            .zip(match_sets)
            .all(|(&(token_id, pos_id), set)| set.matches(token_id, pos_id))
    }

    fn match_sets(&self, specs: &[TokenSpec]) -> Result<Vec<MatchSet>> {
        specs.iter().map(|spec| self.match_set(spec)).collect()
    }

    /// Materialize the vocabulary ids satisfying one spec.
    fn match_set(&self, spec: &TokenSpec) -> Result<MatchSet> {
        let token_ids = match &spec.word {
            Some(word) => {
                let op = if spec.word_is_regex {
                    MatchOp::Regex
                } else {
                    self.match_ops.word
                };
                Some(self.matching_token_ids(word, op)?)
            }
            None => None,
        };
        let pos_ids = match &spec.pos {
            Some(pos) => Some(self.matching_pos_ids(pos, self.match_ops.pos)?),
            None => None,
        };

        Ok(MatchSet { token_ids, pos_ids })
    }

    /// Word ids matching `pattern` under `op`. Exact patterns take the
    /// dictionary route instead of scanning the vocabulary.
    fn matching_token_ids(&self, pattern: &str, op: MatchOp) -> Result<AHashSet<TokenId>> {
        let vocab = self.index.vocabulary();
        if op == MatchOp::Exact {
            return Ok(vocab.word_id(pattern).into_iter().collect());
        }

        let matcher = TokenMatcher::compile(pattern, op)?;
        Ok(vocab
            .words()
            .filter(|(_, word)| matcher.is_match(word))
            .map(|(id, _)| id)
            .collect())
    }

    /// Tag ids matching `pattern` under `op`.
    fn matching_pos_ids(&self, pattern: &str, op: MatchOp) -> Result<AHashSet<PosId>> {
        let vocab = self.index.vocabulary();
        if op == MatchOp::Exact {
            return Ok(vocab.tag_id(pattern).into_iter().collect());
        }

        let matcher = TokenMatcher::compile(pattern, op)?;
        Ok(vocab
            .tags()
            .filter(|(_, tag)| matcher.is_match(tag))
            .map(|(id, _)| id)
            .collect())
    }
}
