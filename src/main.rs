// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use searchlight::memory::{load_corpus, CorpusStats};
use searchlight::{render_html, Result, SearchConfig, SearchError};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{display, headless, Cli, Commands, OutputFormat};

fn main() {
    init_logging();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Search {
            corpus,
            query,
            page,
            per_page,
            format,
            config,
        } => run_search(&corpus, &query, &page, per_page, format, config.as_deref()),
        Commands::Check { corpus } => run_check(&corpus),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--format html` output stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_env("SEARCHLIGHT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>, per_page: Option<usize>) -> Result<SearchConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| SearchError::Config(format!("{}: {}", path, e)))?;
            SearchConfig::from_json(&json)?
        }
        None => SearchConfig::default(),
    };
    if let Some(per_page) = per_page {
        config.results_per_page = per_page;
    }
    config.validate()
}

fn run_search(
    corpus: &str,
    query: &str,
    page: &str,
    per_page: Option<usize>,
    format: OutputFormat,
    config: Option<&str>,
) -> Result<()> {
    let config = load_config(config, per_page)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| SearchError::Load(format!("could not start runtime: {}", e)))?;
    let local = tokio::task::LocalSet::new();
    let view = local.block_on(
        &runtime,
        headless::search(Path::new(corpus), query, page, &config),
    )?;

    match format {
        OutputFormat::Text => display::print_results(query, view.as_ref()),
        OutputFormat::Html => {
            if let Some(view) = &view {
                println!("{}", render_html(view));
            }
        }
    }
    Ok(())
}

fn run_check(corpus: &str) -> Result<()> {
    let pages = load_corpus(Path::new(corpus))?;
    display::print_check(corpus, &CorpusStats::of(&pages));
    Ok(())
}
