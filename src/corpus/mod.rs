//! Corpus data model and loading.
//!
//! A corpus is an ordered collection of texts. Each text is an ordered
//! sequence of sentences, and each sentence an ordered sequence of
//! POS-tagged tokens. Texts may carry speaker metadata used for
//! filtering at query time.

pub mod loader;
pub mod store;

pub use loader::load_jsonl;
pub use store::{Corpus, Sentence, Text, Token};
