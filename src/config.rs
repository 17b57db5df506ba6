// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Layered configuration for index building and querying.
//!
//! Figment merges built-in defaults, an optional `vitrine.toml`, and
//! `VITRINE_`-prefixed environment variables (later wins). Nested keys use a
//! double underscore: `VITRINE_QUERY__PER_PAGE=24`.

use crate::error::{Error, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "vitrine.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VITRINE_";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub query: QueryConfig,
}

/// Settings for assembling the index from site sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content collections under `content/`, in indexing order.
    pub content_collections: Vec<String>,
    /// Routed pages that never enter the index (the search page itself).
    pub ignore_page_routes: Vec<String>,
    /// Listing file basenames (e.g. `archive.json`) excluded from the index.
    pub ignore_listings: Vec<String>,
    /// Cap on the synthesized image text blob, in characters.
    pub max_text_len: usize,
    /// File name of the written index.
    pub output_file: String,
    /// Cache directive the publishing step should serve the index with.
    pub cache_control: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_collections: vec!["projects".to_string(), "sections".to_string()],
            ignore_page_routes: vec!["/search".to_string()],
            ignore_listings: Vec::new(),
            max_text_len: 8000,
            output_file: "search-index.json".to_string(),
            cache_control: "public, max-age=3600, immutable".to_string(),
        }
    }
}

/// Field weights for the fuzzy stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyWeights {
    pub title: f64,
    pub text: f64,
    pub keywords: f64,
}

impl Default for FuzzyWeights {
    fn default() -> Self {
        Self {
            title: 0.6,
            text: 0.4,
            keywords: 0.3,
        }
    }
}

/// Settings for the query engine and result rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub per_page: usize,
    pub max_per_page: usize,
    /// Characters of context on each side of a snippet match.
    pub snippet_margin: usize,
    /// Queries shorter than this skip the fuzzy stage.
    pub fuzzy_min_query_len: usize,
    /// Per-field similarity threshold (errors / query length).
    pub fuzzy_threshold: f64,
    /// Ceiling on the combined fuzzy score for a hit to be kept.
    pub fuzzy_score_ceiling: f64,
    pub fuzzy_weights: FuzzyWeights,
    /// Route the pager links point at.
    pub search_route: String,
    /// Listing route preferred first in "appears on" lists.
    pub primary_route: String,
    /// Listing route always pushed last in "appears on" lists.
    pub archive_route: String,
    pub thumb_root: String,
    pub thumb_widths: Vec<u32>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            per_page: 48,
            max_per_page: 96,
            snippet_margin: 60,
            fuzzy_min_query_len: 4,
            fuzzy_threshold: 0.28,
            fuzzy_score_ceiling: 0.4,
            fuzzy_weights: FuzzyWeights::default(),
            search_route: "/search".to_string(),
            primary_route: "/paintings".to_string(),
            archive_route: "/archive".to_string(),
            thumb_root: "/thumbs".to_string(),
            thumb_widths: vec![320, 480, 720, 960],
        }
    }
}

impl QueryConfig {
    /// Page size for a requested `per`, clamped to `[1, max_per_page]`.
    pub fn clamp_per(&self, per: Option<usize>) -> usize {
        per.unwrap_or(self.per_page).clamp(1, self.max_per_page.max(1))
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With `path = None`, `vitrine.toml` in the working directory is used if
    /// present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::InvalidInput(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Parse configuration from a TOML string layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::extract(
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml)),
        )
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().map_err(Box::new)?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
