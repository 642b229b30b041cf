//! Criterion benchmarks for the concordance engine:
//! - index construction over synthetic corpora
//! - one-gram lookups
//! - seed-and-verify n-gram queries
//! - end-to-end concordance extraction

use std::hint::black_box;

use concord::corpus::{Corpus, Text, Token};
use concord::index::PositionalIndex;
use concord::query::{TokenSpec, parse_query};
use concord::search::ConcordanceEngine;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TAGS: [&str; 12] = [
    "Na", "Nb", "Nh", "VC", "VE", "VH", "D", "Di", "P", "T", "Caa", "DE",
];

/// Two-character CJK word, unique per id below 2500.
fn word(id: usize) -> String {
    let a = char::from_u32(0x4E00 + (id / 50) as u32).unwrap();
    let b = char::from_u32(0x4E00 + (id % 50) as u32).unwrap();
    format!("{a}{b}")
}

/// Deterministic synthetic corpus: `texts` texts of ten 20-token
/// sentences drawn from a 2000-word vocabulary.
fn generate_corpus(texts: usize) -> Corpus {
    let mut rng = StdRng::seed_from_u64(42);
    let mut corpus = Corpus::new();

    for i in 0..texts {
        let mut sentences = Vec::with_capacity(10);
        for _ in 0..10 {
            let sentence: Vec<Token> = (0..20)
                .map(|_| {
                    let w = word(rng.random_range(0..2000));
                    let t = TAGS[rng.random_range(0..TAGS.len())];
                    Token::new(w, t)
                })
                .collect();
            sentences.push(sentence);
        }
        let text = match i % 3 {
            0 => Text::with_gender(sentences, 0),
            1 => Text::with_gender(sentences, 1),
            _ => Text::new(sentences),
        };
        corpus.add_text(text);
    }

    corpus
}

/// Benchmark positional index construction.
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);

    for texts in [100, 500] {
        let corpus = generate_corpus(texts);
        group.throughput(Throughput::Elements(corpus.token_count() as u64));
        group.bench_with_input(format!("{texts}_texts"), &corpus, |b, corpus| {
            b.iter(|| {
                let index = PositionalIndex::build(black_box(corpus));
                black_box(index)
            })
        });
    }

    group.finish();
}

/// Benchmark query execution against a fixed engine.
fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    group.sample_size(50);

    let engine = ConcordanceEngine::new(generate_corpus(500)).unwrap();

    let one_word = vec![TokenSpec::exact_word(word(42))];
    group.bench_function("one_gram_word", |b| {
        b.iter(|| {
            let matches = engine.run_query(black_box(&one_word), None).unwrap();
            black_box(matches)
        })
    });

    let one_tag = vec![TokenSpec::new().with_pos("Na")];
    group.bench_function("one_gram_tag", |b| {
        b.iter(|| {
            let matches = engine.run_query(black_box(&one_tag), None).unwrap();
            black_box(matches)
        })
    });

    let two_token = parse_query(&format!(r#"[word="{}"][pos="Na"]"#, word(42))).unwrap();
    group.bench_function("two_token_verify", |b| {
        b.iter(|| {
            let matches = engine.run_query(black_box(&two_token), None).unwrap();
            black_box(matches)
        })
    });

    let three_token = parse_query(&format!(
        r#"[pos="Nh"][word="{}"][pos="Na"]"#,
        word(42)
    ))
    .unwrap();
    group.bench_function("three_token_verify", |b| {
        b.iter(|| {
            let matches = engine.run_query(black_box(&three_token), None).unwrap();
            black_box(matches)
        })
    });

    // recompiles the pattern and rescans the vocabulary every run
    let regex_word = parse_query(r#"[word.regex="[一-丁]."]"#).unwrap();
    group.bench_function("regex_word_scan", |b| {
        b.iter(|| {
            let matches = engine.run_query(black_box(&regex_word), None).unwrap();
            black_box(matches)
        })
    });

    let filtered = parse_query(&format!(r#"[word="{}"][pos="Na"]"#, word(42))).unwrap();
    group.bench_function("two_token_gender_filtered", |b| {
        b.iter(|| {
            let matches = engine.run_query(black_box(&filtered), Some(1)).unwrap();
            black_box(matches)
        })
    });

    group.finish();
}

/// Benchmark parse, match, and context extraction end to end.
fn bench_concordance(c: &mut Criterion) {
    let mut group = c.benchmark_group("concordance");
    group.sample_size(50);

    let engine = ConcordanceEngine::new(generate_corpus(500)).unwrap();
    let pattern = format!(r#"[word="{}"][pos="Na"]"#, word(42));

    group.bench_function("full_query", |b| {
        b.iter(|| {
            let results = engine
                .concordance_query(black_box(&pattern), None, 10, 10)
                .unwrap();
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_queries, bench_concordance);
criterion_main!(benches);
