// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the vitrine command-line interface.
//!
//! Three subcommands: `index` builds `search-index.json` from a site directory,
//! `search` runs a query against a built index and prints the results (boxed
//! for a terminal, or as JSON/HTML for scripts), and `inspect` summarizes what
//! an index contains.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vitrine",
    about = "Search index builder and query engine for galleries and content pages",
    version
)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML); VITRINE_* environment variables override it
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search index from a site directory
    Index {
        /// Site root containing content/, pages/ and data/
        #[arg(short, long)]
        input: String,

        /// Output directory for the index file
        #[arg(short, long)]
        output: String,
    },

    /// Inspect a built index
    Inspect {
        /// Path to search-index.json
        file: String,
    },

    /// Search a built index and display results
    Search {
        /// Path to search-index.json
        file: String,

        /// Search query
        query: String,

        /// Page of image results (1-based)
        #[arg(long)]
        page: Option<String>,

        /// Image results per page
        #[arg(long)]
        per: Option<String>,

        /// Print results as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Print the rendered results markup
        #[arg(long)]
        html: bool,
    },
}

/// How `search` prints its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Boxed terminal output
    Pretty,
    Json,
    Html,
}

impl OutputFormat {
    pub fn from_flags(json: bool, html: bool) -> Self {
        match (json, html) {
            (true, _) => OutputFormat::Json,
            (_, true) => OutputFormat::Html,
            _ => OutputFormat::Pretty,
        }
    }
}
