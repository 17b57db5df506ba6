// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query engine: stages → fusion → ranking.
//!
//! Three independent stages (exact whole-word, substring, fuzzy) each scan the
//! whole index. Their hit lists are folded into one entry per document and
//! sorted by tier, year, score and title. Everything past that point
//! (partitioning, pagination, snippets, markup) reads the [`ResultSet`].
//!
//! A query never mutates the store and holds no shared state, so any number of
//! queries may run at once against clones of the same [`IndexStore`]. With the
//! `parallel` feature the stages themselves run concurrently.

pub mod fusion;
pub mod pattern;
pub mod stages;

use crate::config::QueryConfig;
use crate::index::IndexStore;
use crate::paginate::{partition, Partition};
use crate::scoring::ranking::rank;
use crate::snippet::{self, Snippet};
use crate::types::SearchDoc;

pub use fusion::{FusedHit, Sources};
pub use pattern::QueryPatterns;
pub use stages::{Stage, StageHit};

/// A fused hit in final rank order.
pub type RankedHit = FusedHit;

/// Result of running a query.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Empty or whitespace-only query; no stage ran.
    NoQuery,
    Results(ResultSet),
}

impl SearchOutcome {
    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            SearchOutcome::NoQuery => None,
            SearchOutcome::Results(set) => Some(set),
        }
    }

    pub fn into_results(self) -> Option<ResultSet> {
        match self {
            SearchOutcome::NoQuery => None,
            SearchOutcome::Results(set) => Some(set),
        }
    }
}

/// Ranked hits for one query, together with the store they point into.
#[derive(Debug, Clone)]
pub struct ResultSet {
    query: String,
    /// `None` only if the query could not be compiled; the set is then empty.
    patterns: Option<QueryPatterns>,
    store: IndexStore,
    hits: Vec<RankedHit>,
    snippet_margin: usize,
}

impl ResultSet {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn patterns(&self) -> Option<&QueryPatterns> {
        self.patterns.as_ref()
    }

    pub fn hits(&self) -> &[RankedHit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The document a hit refers to.
    pub fn doc(&self, hit: &RankedHit) -> Option<&SearchDoc> {
        self.store.get(hit.doc_idx)
    }

    /// Ranked documents, paired with their hits.
    pub fn iter(&self) -> impl Iterator<Item = (&RankedHit, &SearchDoc)> {
        self.hits
            .iter()
            .filter_map(|hit| self.store.get(hit.doc_idx).map(|doc| (hit, doc)))
    }

    /// Split into textual and image hits, each in rank order.
    pub fn partition(&self) -> Partition<&RankedHit> {
        partition(self.hits.iter(), |hit| {
            self.store
                .get(hit.doc_idx)
                .map(SearchDoc::kind)
                .unwrap_or(crate::types::DocKind::Text)
        })
    }

    /// Snippet for one hit, or `None` when nothing can be located.
    pub fn snippet(&self, hit: &RankedHit) -> Option<Snippet> {
        let patterns = self.patterns.as_ref()?;
        let doc = self.doc(hit)?;
        snippet::extract(doc, patterns, hit.fuzzy_location.as_ref(), self.snippet_margin)
    }

    /// `N result(s) for “q”`.
    pub fn summary(&self) -> String {
        let n = self.hits.len();
        format!(
            "{} result{} for “{}”",
            n,
            if n == 1 { "" } else { "s" },
            self.query
        )
    }
}

fn run_stages(
    docs: &[SearchDoc],
    patterns: &QueryPatterns,
    config: &QueryConfig,
) -> (Vec<StageHit>, Vec<StageHit>, Vec<StageHit>) {
    #[cfg(feature = "parallel")]
    {
        let (exact, (substring, fuzzy)) = rayon::join(
            || stages::exact_stage(docs, patterns),
            || {
                rayon::join(
                    || stages::substring_stage(docs, patterns),
                    || stages::fuzzy_stage(docs, patterns.query(), config),
                )
            },
        );
        (exact, substring, fuzzy)
    }
    #[cfg(not(feature = "parallel"))]
    {
        (
            stages::exact_stage(docs, patterns),
            stages::substring_stage(docs, patterns),
            stages::fuzzy_stage(docs, patterns.query(), config),
        )
    }
}

/// Run a query against the store.
///
/// The query is trimmed first; an empty query short-circuits to
/// [`SearchOutcome::NoQuery`] without touching the index.
pub fn search(store: &IndexStore, query: &str, config: &QueryConfig) -> SearchOutcome {
    let query = query.trim();
    if query.is_empty() {
        return SearchOutcome::NoQuery;
    }

    let mut set = ResultSet {
        query: query.to_string(),
        patterns: None,
        store: store.clone(),
        hits: Vec::new(),
        snippet_margin: config.snippet_margin,
    };

    let patterns = match QueryPatterns::new(query) {
        Ok(patterns) => patterns,
        Err(e) => {
            tracing::warn!(error = %e, "query could not be compiled; returning no results");
            return SearchOutcome::Results(set);
        }
    };

    let docs = store.docs();
    let (exact, substring, fuzzy) = run_stages(docs, &patterns, config);
    tracing::debug!(
        query,
        exact = exact.len(),
        substring = substring.len(),
        fuzzy = fuzzy.len(),
        "stages complete"
    );

    let mut hits = fusion::fuse(docs, exact, substring, fuzzy);
    rank(&mut hits, docs);

    set.patterns = Some(patterns);
    set.hits = hits;
    SearchOutcome::Results(set)
}
