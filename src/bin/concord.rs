//! Concord CLI binary.

use clap::Parser;
use concord::cli::{args::*, commands::*};
use std::process;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() {
    let args = ConcordArgs::parse();

    // Map verbosity to a default filter; RUST_LOG still takes precedence.
    let default_filter = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
