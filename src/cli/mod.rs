// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the tabula command-line interface.
//!
//! Four subcommands: `query` runs the full pipeline over a JSON file, `explain`
//! shows which ladder rung a term hits on one value, `similarity` prints the
//! edit-distance score of two strings, and `schema` dumps an entity preset as
//! JSON to start a custom table from.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tabula::search::{DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_WORD_LEN};
use tabula::MatchConfig;

#[derive(Parser)]
#[command(
    name = "tabula",
    about = "Filter, fuzzy-search, sort, paginate and export JSON record lists",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query a JSON array of records
    Query(QueryArgs),

    /// Show which match strategy a term hits on one value
    Explain {
        /// Field value to search in
        text: String,

        /// Search term as the user would type it
        term: String,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Print the normalized similarity and edit distance of two strings
    Similarity { a: String, b: String },

    /// Print an entity preset as JSON
    Schema {
        /// drivers, aspirants or complaints
        entity: String,
    },
}

#[derive(Args)]
pub struct QueryArgs {
    /// JSON file with an array of records, or `-` for stdin
    #[arg(short, long)]
    pub input: String,

    /// Entity preset: drivers, aspirants or complaints
    #[arg(short, long, conflicts_with = "schema")]
    pub entity: Option<String>,

    /// Custom entity schema (JSON file)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Skip the entity's default filters and sort
    #[arg(long)]
    pub no_defaults: bool,

    /// Query descriptor as JSON, or `@path` to read it from a file
    ///
    /// Flags below are applied on top of it.
    #[arg(short, long)]
    pub descriptor: Option<String>,

    /// Free-text search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field to search (repeatable); defaults to the entity's searchable fields
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Filter expression (repeatable): `f=v`, `f:in=a,b`, `f:from=YYYY-MM-DD`,
    /// `f:to=YYYY-MM-DD`, `f:contains=t`
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Sort key, optionally with direction: `fecha:desc`
    #[arg(long)]
    pub sort: Option<String>,

    /// Page to show (1-indexed)
    #[arg(short, long)]
    pub page: Option<i64>,

    /// Records per page; 0 shows everything
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Output every matching record instead of one page
    #[arg(long)]
    pub all: bool,

    /// Write csv/tsv output here; a directory gets the conventional file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Tsv,
}

/// Fuzzy-rung tuning shared by `query` and `explain`.
#[derive(Args, Debug, Clone, Copy)]
pub struct MatchArgs {
    /// Similarity a fuzzy match must reach (0.0 to 1.0)
    #[arg(long, env = "TABULA_FUZZY_THRESHOLD", default_value_t = DEFAULT_FUZZY_THRESHOLD)]
    pub threshold: f64,

    /// Shortest word considered by the per-word fuzzy rung
    #[arg(long, env = "TABULA_MIN_WORD_LEN", default_value_t = DEFAULT_MIN_WORD_LEN)]
    pub min_word_len: usize,
}

impl MatchArgs {
    pub fn config(&self) -> MatchConfig {
        MatchConfig::default()
            .with_threshold(self.threshold.clamp(0.0, 1.0))
            .with_min_word_len(self.min_word_len)
    }
}
