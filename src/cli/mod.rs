// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the searchlight command-line interface.
//!
//! Two subcommands: `search` runs the full widget pipeline headlessly over a
//! JSON corpus and prints one page of results, and `check` validates a corpus
//! before it is shipped.

pub mod display;
pub mod headless;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "searchlight",
    about = "Lazy, debounced, paginated search results for static sites",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// How `search` prints the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Boxed terminal output
    Text,
    /// The results panel as static HTML
    Html,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a corpus and display one page of results
    Search {
        /// Path to the corpus JSON file
        corpus: String,

        /// Search query
        query: String,

        /// Page to display (clamped to the available pages)
        #[arg(short, long, default_value = "1")]
        page: String,

        /// Results per page (overrides the config file)
        #[arg(long)]
        per_page: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Path to a JSON widget config (camelCase keys)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Validate a corpus and print its page and section counts
    Check {
        /// Path to the corpus JSON file
        corpus: String,
    },
}
