//! JSONL corpus loading.
//!
//! A corpus file holds one text per line. A line is either a bare array
//! of sentences or an object carrying the sentences and metadata:
//!
//! ```text
//! [[["他們","Nh"],["打","VC"],["球","Na"]]]
//! {"text": [[["我","Nh"],["吃","VC"],["飯","Na"]]], "gender": 1}
//! ```
//!
//! Each sentence is an array of `["word", "tag"]` pairs.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::corpus::store::{Corpus, Sentence, Text};
use crate::error::{ConcordError, Result};

/// One line of a corpus file.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextRecord {
    Tagged {
        text: Vec<Sentence>,
        #[serde(default)]
        gender: Option<u8>,
    },
    Bare(Vec<Sentence>),
}

impl From<TextRecord> for Text {
    fn from(record: TextRecord) -> Self {
        match record {
            TextRecord::Tagged { text, gender } => Text {
                gender,
                sentences: text,
            },
            TextRecord::Bare(sentences) => Text::new(sentences),
        }
    }
}

/// Load a corpus from a JSONL file at `path`.
pub fn load_jsonl<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let file = File::open(path.as_ref())?;
    load_jsonl_from(BufReader::new(file))
}

/// Load a corpus from any buffered reader of JSONL lines.
///
/// Blank lines are skipped. A malformed line aborts the load with an
/// error naming the 1-based line number.
pub fn load_jsonl_from<R: Read>(reader: BufReader<R>) -> Result<Corpus> {
    let mut corpus = Corpus::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: TextRecord = serde_json::from_str(trimmed)
            .map_err(|e| ConcordError::index_build(format!("line {}: {}", line_no + 1, e)))?;
        corpus.add_text(record.into());
    }

    Ok(corpus)
}
