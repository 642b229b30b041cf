//! In-memory corpus storage.

use serde::{Deserialize, Serialize};

/// A single POS-tagged token.
///
/// Serializes as a two-element array `["word", "tag"]`, the shape used
/// by corpus files and query responses alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Token {
    /// Surface form.
    pub word: String,
    /// Part-of-speech tag.
    pub tag: String,
}

impl Token {
    /// Create a new token from a surface form and a POS tag.
    pub fn new<W: Into<String>, T: Into<String>>(word: W, tag: T) -> Self {
        Token {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

impl From<(String, String)> for Token {
    fn from((word, tag): (String, String)) -> Self {
        Token { word, tag }
    }
}

impl From<Token> for (String, String) {
    fn from(token: Token) -> Self {
        (token.word, token.tag)
    }
}

/// An ordered sequence of tokens.
pub type Sentence = Vec<Token>;

/// A single text: its sentences plus optional speaker metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    /// Speaker gender, when the corpus records one.
    pub gender: Option<u8>,
    /// Sentences in document order.
    pub sentences: Vec<Sentence>,
}

impl Text {
    /// Create a text with no metadata.
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Text {
            gender: None,
            sentences,
        }
    }

    /// Create a text with speaker gender metadata.
    pub fn with_gender(sentences: Vec<Sentence>, gender: u8) -> Self {
        Text {
            gender: Some(gender),
            sentences,
        }
    }

    /// Total number of tokens across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.len()).sum()
    }
}

/// An in-memory corpus of texts.
///
/// Text ids are dense: the id of a text is its insertion position.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    texts: Vec<Text>,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Corpus { texts: Vec::new() }
    }

    /// Append a text and return its id.
    pub fn add_text(&mut self, text: Text) -> u32 {
        let id = self.texts.len() as u32;
        self.texts.push(text);
        id
    }

    /// All texts in id order.
    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    /// Look up a text by id.
    pub fn text(&self, text_id: u32) -> Option<&Text> {
        self.texts.get(text_id as usize)
    }

    /// Look up a sentence by text id and sentence id.
    pub fn sentence(&self, text_id: u32, sent_id: u32) -> Option<&Sentence> {
        self.text(text_id)
            .and_then(|t| t.sentences.get(sent_id as usize))
    }

    /// Number of texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the corpus holds no texts.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Total number of sentences across all texts.
    pub fn sentence_count(&self) -> usize {
        self.texts.iter().map(|t| t.sentences.len()).sum()
    }

    /// Total number of tokens across all texts.
    pub fn token_count(&self) -> usize {
        self.texts.iter().map(|t| t.token_count()).sum()
    }
}
