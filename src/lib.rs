// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build-time search index and query engine for image galleries and content pages.
//!
//! A site's pages, content collections and gallery listings are normalized
//! once into a flat JSON array of documents. Queries run three independent
//! match stages over that array and fold the results into one ranked list.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────────────────┐
//! │    build     │────▶│    index     │────▶│            search            │
//! │ (normalize,  │     │ (IndexStore, │     │ exact ─┐                     │
//! │  markup,     │     │  JSON)       │     │ substr ├─▶ fusion ─▶ ranking │
//! │  parallel)   │     │              │     │ fuzzy ─┘                     │
//! └──────────────┘     └──────────────┘     └──────────────┬───────────────┘
//!                                                          │
//!                              ┌───────────────────────────┼──────────────┐
//!                              ▼                           ▼              ▼
//!                        ┌──────────┐              ┌────────────┐   ┌──────────┐
//!                        │ snippet  │              │  paginate  │   │  render  │
//!                        └──────────┘              └────────────┘   └──────────┘
//! ```
//!
//! # Tiers
//!
//! | Stage     | Matches                                   | Base score |
//! |-----------|-------------------------------------------|------------|
//! | exact     | whole word, optional `s`/`es` plural      | 100        |
//! | substring | literal anywhere, case-insensitive        | 70         |
//! | fuzzy     | approximate, typo tolerant (≥ 4 chars)    | 50         |
//!
//! A document found by several stages ranks in its best tier.
//!
//! # Usage
//!
//! ```
//! use vitrine::config::QueryConfig;
//! use vitrine::index::IndexStore;
//! use vitrine::search::search;
//!
//! let store = IndexStore::parse_or_empty(
//!     r#"[{"type":"pages","title":"About","url":"/about","text":"a studio by the sea"}]"#,
//! );
//! let outcome = search(&store, "studio", &QueryConfig::default());
//! let set = outcome.results().unwrap();
//! assert_eq!(set.summary(), "1 result for “studio”");
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod paginate;
pub mod render;
pub mod scoring;
pub mod search;
pub mod snippet;
pub mod types;

pub mod testing;

pub use config::{BuildConfig, Config, QueryConfig};
pub use error::{Error, Result};
pub use index::IndexStore;
pub use search::{search, RankedHit, ResultSet, SearchOutcome};
pub use types::{DocKind, ImageDoc, MatchField, MatchLocation, SearchDoc, TextDoc};
