//! One-gram positional index build and lookup.

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::corpus::Corpus;
use crate::error::{ConcordError, Result};
use crate::index::vocabulary::{PosId, TokenId, Vocabulary};

/// Corpus coordinates of a single token.
///
/// The derived ordering is corpus order: text, then sentence, then
/// offset within the sentence. All components are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub text_id: u32,
    pub sent_id: u32,
    pub offset: u32,
}

impl Position {
    pub fn new(text_id: u32, sent_id: u32, offset: u32) -> Self {
        Position {
            text_id,
            sent_id,
            offset,
        }
    }
}

/// One indexed token occurrence. Exactly one record exists per corpus
/// token; the collection is append-only at build time and read-only
/// afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneGram {
    pub position: Position,
    pub gender: Option<u8>,
    pub token_id: TokenId,
    pub pos_id: PosId,
}

/// Corpus-level counts reported by the `stats` CLI command and the
/// `/stats` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub texts: usize,
    pub sentences: usize,
    pub tokens: usize,
    pub distinct_words: usize,
    pub distinct_tags: usize,
    pub texts_by_gender: Vec<GenderTexts>,
}

/// Number of texts carrying one metadata value.
#[derive(Debug, Clone, Serialize)]
pub struct GenderTexts {
    pub gender: Option<u8>,
    pub texts: usize,
}

/// Positional index over every token occurrence in a corpus.
///
/// Two posting maps mirror the composite lookups a query needs: one
/// keyed token-first and one tag-first, both pre-grouped by the text
/// metadata value. Posting lists hold record indices in corpus order.
#[derive(Debug)]
pub struct PositionalIndex {
    vocabulary: Vocabulary,
    records: Vec<OneGram>,
    by_gender_token: AHashMap<(Option<u8>, TokenId), Vec<u32>>,
    by_gender_pos: AHashMap<(Option<u8>, PosId), Vec<u32>>,
    /// Distinct metadata values seen at build time with their text
    /// counts, sorted by value.
    gender_texts: Vec<(Option<u8>, usize)>,
    /// Token/tag id pairs per sentence, indexed [text][sentence][offset].
    sentences: Vec<Vec<Vec<(TokenId, PosId)>>>,
}

impl PositionalIndex {
    /// Build the index with a single scan over the corpus.
    pub fn build(corpus: &Corpus) -> Self {
        let mut vocabulary = Vocabulary::new();
        let mut records = Vec::with_capacity(corpus.token_count());
        let mut by_gender_token: AHashMap<(Option<u8>, TokenId), Vec<u32>> = AHashMap::new();
        let mut by_gender_pos: AHashMap<(Option<u8>, PosId), Vec<u32>> = AHashMap::new();
        let mut gender_texts: AHashMap<Option<u8>, usize> = AHashMap::new();
        let mut sentences = Vec::with_capacity(corpus.len());

        for (text_id, text) in corpus.texts().iter().enumerate() {
            *gender_texts.entry(text.gender).or_default() += 1;
            let mut text_sentences = Vec::with_capacity(text.sentences.len());
            for (sent_id, sentence) in text.sentences.iter().enumerate() {
                let mut ids = Vec::with_capacity(sentence.len());
                for (offset, token) in sentence.iter().enumerate() {
                    let token_id = vocabulary.intern_word(&token.word);
                    let pos_id = vocabulary.intern_tag(&token.tag);
                    let record_idx = records.len() as u32;
                    records.push(OneGram {
                        position: Position::new(text_id as u32, sent_id as u32, offset as u32),
                        gender: text.gender,
                        token_id,
                        pos_id,
                    });
                    by_gender_token
                        .entry((text.gender, token_id))
                        .or_default()
                        .push(record_idx);
                    by_gender_pos
                        .entry((text.gender, pos_id))
                        .or_default()
                        .push(record_idx);
                    ids.push((token_id, pos_id));
                }
                text_sentences.push(ids);
            }
            sentences.push(text_sentences);
        }
        let mut gender_texts: Vec<_> = gender_texts.into_iter().collect();
        gender_texts.sort_unstable();

        PositionalIndex {
            vocabulary,
            records,
            by_gender_token,
            by_gender_pos,
            gender_texts,
            sentences,
        }
    }

    /// The vocabulary this index was built with.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Total number of indexed token occurrences.
    pub fn token_count(&self) -> usize {
        self.records.len()
    }

    /// Token/tag id pairs of one sentence, or `None` if out of range.
    pub fn sentence_ids(&self, text_id: u32, sent_id: u32) -> Option<&[(TokenId, PosId)]> {
        self.sentences
            .get(text_id as usize)
            .and_then(|t| t.get(sent_id as usize))
            .map(Vec::as_slice)
    }

    /// Corpus-level counts for reporting.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            texts: self.sentences.len(),
            sentences: self.sentences.iter().map(|t| t.len()).sum(),
            tokens: self.records.len(),
            distinct_words: self.vocabulary.word_count(),
            distinct_tags: self.vocabulary.tag_count(),
            texts_by_gender: self
                .gender_texts
                .iter()
                .map(|&(gender, texts)| GenderTexts { gender, texts })
                .collect(),
        }
    }

    /// Find all one-gram records whose token id is in `token_ids` (when
    /// given), whose tag id is in `pos_ids` (when given), and whose text
    /// metadata equals `gender` (when given).
    ///
    /// `None` means unconstrained; an empty set constrains to nothing
    /// and yields no records. At least one id set must be given. When
    /// both are, the side with fewer postings drives the scan and the
    /// other is applied as a per-record filter. Results are in corpus
    /// order.
    pub fn lookup_one_gram(
        &self,
        token_ids: Option<&AHashSet<TokenId>>,
        pos_ids: Option<&AHashSet<PosId>>,
        gender: Option<u8>,
    ) -> Result<Vec<OneGram>> {
        let buckets = self.gender_buckets(gender);

        let mut indices = match (token_ids, pos_ids) {
            (Some(tids), Some(pids)) => {
                let token_total = postings_len(&self.by_gender_token, &buckets, tids);
                let pos_total = postings_len(&self.by_gender_pos, &buckets, pids);
                if token_total <= pos_total {
                    let mut indices = collect_postings(&self.by_gender_token, &buckets, tids);
                    indices.retain(|&i| pids.contains(&self.records[i as usize].pos_id));
                    indices
                } else {
                    let mut indices = collect_postings(&self.by_gender_pos, &buckets, pids);
                    indices.retain(|&i| tids.contains(&self.records[i as usize].token_id));
                    indices
                }
            }
            (Some(tids), None) => collect_postings(&self.by_gender_token, &buckets, tids),
            (None, Some(pids)) => collect_postings(&self.by_gender_pos, &buckets, pids),
            (None, None) => {
                return Err(ConcordError::invalid_query(
                    "one-gram lookup needs a word or tag constraint",
                ));
            }
        };

        // Postings from different buckets and ids are disjoint, so a
        // sort alone restores corpus order.
        indices.sort_unstable();
        Ok(indices
            .into_iter()
            .map(|i| self.records[i as usize])
            .collect())
    }

    fn gender_buckets(&self, gender: Option<u8>) -> Vec<Option<u8>> {
        match gender {
            Some(g) => vec![Some(g)],
            None => self.gender_texts.iter().map(|&(g, _)| g).collect(),
        }
    }
}

fn postings_len(
    map: &AHashMap<(Option<u8>, u32), Vec<u32>>,
    buckets: &[Option<u8>],
    ids: &AHashSet<u32>,
) -> usize {
    let mut total = 0;
    for &bucket in buckets {
        for &id in ids {
            if let Some(postings) = map.get(&(bucket, id)) {
                total += postings.len();
            }
        }
    }
    total
}

fn collect_postings(
    map: &AHashMap<(Option<u8>, u32), Vec<u32>>,
    buckets: &[Option<u8>],
    ids: &AHashSet<u32>,
) -> Vec<u32> {
    let mut out = Vec::new();
    for &bucket in buckets {
        for &id in ids {
            if let Some(postings) = map.get(&(bucket, id)) {
                out.extend_from_slice(postings);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Text, Token};

    fn sentence(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs.iter().map(|(w, t)| Token::new(*w, *t)).collect()
    }

    fn sample_index() -> PositionalIndex {
        let mut corpus = Corpus::new();
        // text 0, female
        corpus.add_text(Text::with_gender(
            vec![
                sentence(&[("他們", "Nh"), ("打", "VC"), ("球", "Na")]),
                sentence(&[("我", "Nh"), ("吃", "VC"), ("飯", "Na")]),
            ],
            0,
        ));
        // text 1, male
        corpus.add_text(Text::with_gender(
            vec![sentence(&[("他們", "Nh"), ("吃", "VC"), ("飯", "Na")])],
            1,
        ));
        // text 2, no metadata
        corpus.add_text(Text::new(vec![sentence(&[("打", "VC")])]));
        PositionalIndex::build(&corpus)
    }

    fn id_set(ids: &[u32]) -> AHashSet<u32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_build_counts() {
        let index = sample_index();
        let stats = index.stats();

        assert_eq!(stats.texts, 3);
        assert_eq!(stats.sentences, 4);
        assert_eq!(stats.tokens, 10);
        // 他們, 打, 球, 我, 吃, 飯
        assert_eq!(stats.distinct_words, 6);
        // Nh, VC, Na
        assert_eq!(stats.distinct_tags, 3);

        let counts: Vec<_> = stats
            .texts_by_gender
            .iter()
            .map(|g| (g.gender, g.texts))
            .collect();
        assert_eq!(counts, vec![(None, 1), (Some(0), 1), (Some(1), 1)]);
    }

    #[test]
    fn test_lookup_by_token() {
        let index = sample_index();
        let tid = index.vocabulary().word_id("打").unwrap();

        let hits = index
            .lookup_one_gram(Some(&id_set(&[tid])), None, None)
            .unwrap();
        let positions: Vec<_> = hits.iter().map(|g| g.position).collect();
        assert_eq!(
            positions,
            vec![Position::new(0, 0, 1), Position::new(2, 0, 0)]
        );
    }

    #[test]
    fn test_lookup_by_tag() {
        let index = sample_index();
        let pid = index.vocabulary().tag_id("Nh").unwrap();

        let hits = index
            .lookup_one_gram(None, Some(&id_set(&[pid])), None)
            .unwrap();
        assert_eq!(hits.len(), 3);
        // corpus order
        assert!(hits.windows(2).all(|w| w[0].position < w[1].position));
    }

    #[test]
    fn test_lookup_both_sides_agree() {
        let index = sample_index();
        let tid = index.vocabulary().word_id("吃").unwrap();
        let pid = index.vocabulary().tag_id("VC").unwrap();

        let hits = index
            .lookup_one_gram(Some(&id_set(&[tid])), Some(&id_set(&[pid])), None)
            .unwrap();
        let positions: Vec<_> = hits.iter().map(|g| g.position).collect();
        assert_eq!(
            positions,
            vec![Position::new(0, 1, 1), Position::new(1, 0, 1)]
        );
    }

    #[test]
    fn test_gender_filter() {
        let index = sample_index();
        let tid = index.vocabulary().word_id("打").unwrap();

        let hits = index
            .lookup_one_gram(Some(&id_set(&[tid])), None, Some(0))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, Position::new(0, 0, 1));
        assert_eq!(hits[0].gender, Some(0));

        // records from texts without metadata are only reachable unfiltered
        let hits = index
            .lookup_one_gram(Some(&id_set(&[tid])), None, Some(1))
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_unconstrained_lookup_is_invalid() {
        let index = sample_index();
        let err = index.lookup_one_gram(None, None, None).unwrap_err();
        assert!(matches!(err, ConcordError::InvalidQuery(_)));
    }

    #[test]
    fn test_empty_id_set_matches_nothing() {
        let index = sample_index();
        let hits = index
            .lookup_one_gram(Some(&id_set(&[])), None, None)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_sentence_ids_window() {
        let index = sample_index();
        let ids = index.sentence_ids(0, 0).unwrap();
        assert_eq!(ids.len(), 3);

        let tid = index.vocabulary().word_id("他們").unwrap();
        let pid = index.vocabulary().tag_id("Nh").unwrap();
        assert_eq!(ids[0], (tid, pid));

        assert!(index.sentence_ids(0, 2).is_none());
        assert!(index.sentence_ids(9, 0).is_none());
    }
}
