//! Command implementations for the concord CLI.

use std::path::Path;
use std::time::Instant;

use crate::api;
use crate::cli::args::{Command, ConcordArgs, OutputFormat, QueryArgs, ServeArgs, StatsArgs};
use crate::corpus::Token;
use crate::error::Result;
use crate::export::{self, ExportOptions};
use crate::search::{ConcordanceEngine, EngineConfig, ResultSet};

/// Execute a CLI command.
pub async fn execute_command(args: ConcordArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args.clone(), &args).await,
        Command::Query(query_args) => run_query(query_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Load a corpus, build the index, and serve it over HTTP.
async fn serve(args: ServeArgs, cli_args: &ConcordArgs) -> Result<()> {
    let engine = load_engine(&args.corpus, args.threads, cli_args)?;

    if cli_args.verbosity() > 0 {
        eprintln!("Serving at http://{}:{}", args.host, args.port);
    }
    api::serve(engine, &args.host, args.port).await
}

/// Run a one-shot query and print the matches to stdout.
fn run_query(args: QueryArgs, cli_args: &ConcordArgs) -> Result<()> {
    let engine = load_engine(&args.corpus, args.threads, cli_args)?;

    let start = Instant::now();
    let results = engine.concordance_query(&args.pattern, args.gender, args.left, args.right)?;
    if cli_args.verbosity() > 1 {
        eprintln!("{} matches in {:.2?}", results.len(), start.elapsed());
    }

    match args.format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&results)?
            } else {
                serde_json::to_string(&results)?
            };
            println!("{json}");
        }
        OutputFormat::Tsv => {
            let options = ExportOptions {
                kwtag: args.kwtag,
                ctxtag: args.ctxtag,
            };
            print!("{}", export::to_tsv(&results, options));
        }
    }

    Ok(())
}

/// Print corpus and index statistics.
fn show_stats(args: StatsArgs, cli_args: &ConcordArgs) -> Result<()> {
    let engine = load_engine(&args.corpus, Some(1), cli_args)?;
    let stats = engine.stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("texts:          {}", stats.texts);
    println!("sentences:      {}", stats.sentences);
    println!("tokens:         {}", stats.tokens);
    println!("distinct words: {}", stats.distinct_words);
    println!("distinct tags:  {}", stats.distinct_tags);
    for entry in &stats.texts_by_gender {
        match entry.gender {
            Some(g) => println!("texts with gender {}: {}", g, entry.texts),
            None => println!("texts without gender: {}", entry.texts),
        }
    }

    Ok(())
}

/// Load the corpus file and build an engine over it. Progress goes to
/// stderr so stdout stays machine-readable.
fn load_engine(
    corpus: &Path,
    threads: Option<usize>,
    cli_args: &ConcordArgs,
) -> Result<ConcordanceEngine> {
    if cli_args.verbosity() > 0 {
        eprintln!("Loading corpus from: {}", corpus.display());
    }

    let start = Instant::now();
    let config = EngineConfig {
        num_threads: threads,
        ..EngineConfig::default()
    };
    let engine = ConcordanceEngine::open(corpus, config)?;

    if cli_args.verbosity() > 0 {
        let stats = engine.stats();
        eprintln!(
            "Indexed {} tokens in {} texts ({:.2?})",
            stats.tokens,
            stats.texts,
            start.elapsed()
        );
    }

    Ok(engine)
}

/// One aligned line per match, keyword bracketed.
fn print_text(results: &ResultSet) {
    println!("{} matches for {}", results.len(), results.pattern);
    for entry in &results.entries {
        println!(
            "{} [{}] {}",
            join_words(&entry.concordance.left),
            join_words(&entry.concordance.keyword),
            join_words(&entry.concordance.right)
        );
    }
}

fn join_words(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
