//! Dense id mappings for words and POS tags.

use ahash::AHashMap;

/// Dense id of a distinct word in the corpus vocabulary.
pub type TokenId = u32;

/// Dense id of a distinct POS tag in the corpus vocabulary.
pub type PosId = u32;

/// Bidirectional word/tag id mappings, fixed at index build time.
///
/// Ids are handed out in first-occurrence order and are stable for the
/// lifetime of the index that owns this vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    tags: Vec<String>,
    word_ids: AHashMap<String, TokenId>,
    tag_ids: AHashMap<String, PosId>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Return the id of `word`, assigning a fresh one on first sight.
    pub fn intern_word(&mut self, word: &str) -> TokenId {
        if let Some(&id) = self.word_ids.get(word) {
            return id;
        }
        let id = self.words.len() as TokenId;
        self.words.push(word.to_string());
        self.word_ids.insert(word.to_string(), id);
        id
    }

    /// Return the id of `tag`, assigning a fresh one on first sight.
    pub fn intern_tag(&mut self, tag: &str) -> PosId {
        if let Some(&id) = self.tag_ids.get(tag) {
            return id;
        }
        let id = self.tags.len() as PosId;
        self.tags.push(tag.to_string());
        self.tag_ids.insert(tag.to_string(), id);
        id
    }

    /// Look up the id of a word already in the vocabulary.
    pub fn word_id(&self, word: &str) -> Option<TokenId> {
        self.word_ids.get(word).copied()
    }

    /// Look up the id of a tag already in the vocabulary.
    pub fn tag_id(&self, tag: &str) -> Option<PosId> {
        self.tag_ids.get(tag).copied()
    }

    /// The word behind an id.
    pub fn word(&self, id: TokenId) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    /// The tag behind an id.
    pub fn tag(&self, id: PosId) -> Option<&str> {
        self.tags.get(id as usize).map(String::as_str)
    }

    /// Iterate all (id, word) pairs in id order.
    pub fn words(&self) -> impl Iterator<Item = (TokenId, &str)> {
        self.words
            .iter()
            .enumerate()
            .map(|(id, w)| (id as TokenId, w.as_str()))
    }

    /// Iterate all (id, tag) pairs in id order.
    pub fn tags(&self) -> impl Iterator<Item = (PosId, &str)> {
        self.tags
            .iter()
            .enumerate()
            .map(|(id, t)| (id as PosId, t.as_str()))
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of distinct tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_idempotent() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern_word("打");
        let b = vocab.intern_word("球");
        let a2 = vocab.intern_word("打");

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(vocab.word_count(), 2);
    }

    #[test]
    fn test_ids_round_trip() {
        let mut vocab = Vocabulary::new();
        let id = vocab.intern_word("他們");
        let tag_id = vocab.intern_tag("Nh");

        assert_eq!(vocab.word(id), Some("他們"));
        assert_eq!(vocab.word_id("他們"), Some(id));
        assert_eq!(vocab.tag(tag_id), Some("Nh"));
        assert_eq!(vocab.tag_id("Nh"), Some(tag_id));
        assert_eq!(vocab.word_id("沒有"), None);
        assert_eq!(vocab.word(99), None);
    }

    #[test]
    fn test_words_and_tags_are_separate_spaces() {
        let mut vocab = Vocabulary::new();
        let word_id = vocab.intern_word("V");
        let tag_id = vocab.intern_tag("V");

        assert_eq!(word_id, 0);
        assert_eq!(tag_id, 0);
        assert_eq!(vocab.word_count(), 1);
        assert_eq!(vocab.tag_count(), 1);
    }

    #[test]
    fn test_iteration_order_matches_ids() {
        let mut vocab = Vocabulary::new();
        vocab.intern_tag("Nh");
        vocab.intern_tag("VC");
        vocab.intern_tag("Na");

        let tags: Vec<_> = vocab.tags().collect();
        assert_eq!(tags, vec![(0, "Nh"), (1, "VC"), (2, "Na")]);
    }
}
