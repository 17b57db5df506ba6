// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Score fusion: one entry per document identity.
//!
//! A document can come out of all three stages. `HitMerger` folds the stage
//! lists into one entry per identity, keyed by the document's identity string
//! (url, else stem/slug, else title) so two index entries describing the same
//! thing cannot both reach the results.
//!
//! Per identity the merger keeps:
//! - the union of contributing stages,
//! - the maximum score seen,
//! - the first location, where stages are folded exact → substring → fuzzy,
//!   so an exact location always wins over a fuzzy one.

use std::collections::HashMap;
use std::fmt;

use crate::types::{MatchLocation, SearchDoc};

use super::stages::{Stage, StageHit};

/// Set of stages that matched a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Sources(u8);

impl Sources {
    fn bit(stage: Stage) -> u8 {
        1 << stage as u8
    }

    pub fn single(stage: Stage) -> Self {
        Self(Self::bit(stage))
    }

    pub fn insert(&mut self, stage: Stage) {
        self.0 |= Self::bit(stage);
    }

    pub fn contains(self, stage: Stage) -> bool {
        self.0 & Self::bit(stage) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The best stage present; this is the hit's ranking tier.
    pub fn tier(self) -> Stage {
        Stage::ALL
            .into_iter()
            .find(|&s| self.contains(s))
            .unwrap_or(Stage::Fuzzy)
    }

    pub fn iter(self) -> impl Iterator<Item = Stage> {
        Stage::ALL.into_iter().filter(move |&s| self.contains(s))
    }
}

impl fmt::Display for Sources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.iter().map(Stage::as_str).collect();
        f.write_str(&tags.join("+"))
    }
}

/// A document after fusion, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedHit {
    /// Position of the first index entry seen for this identity.
    pub doc_idx: usize,
    pub sources: Sources,
    pub score: f64,
    /// First location any stage reported.
    pub location: Option<MatchLocation>,
    /// Span found by the fuzzy stage, if it matched.
    pub fuzzy_location: Option<MatchLocation>,
}

impl FusedHit {
    pub fn tier(&self) -> Stage {
        self.sources.tier()
    }
}

/// Folds stage hits into one [`FusedHit`] per document identity.
pub struct HitMerger<'a> {
    docs: &'a [SearchDoc],
    by_identity: HashMap<&'a str, usize>,
    hits: Vec<FusedHit>,
}

impl<'a> HitMerger<'a> {
    pub fn new(docs: &'a [SearchDoc]) -> Self {
        Self {
            docs,
            by_identity: HashMap::new(),
            hits: Vec::new(),
        }
    }

    /// Merge one stage hit.
    pub fn merge(&mut self, hit: StageHit) {
        let Some(doc) = self.docs.get(hit.doc_idx) else {
            return;
        };
        match self.by_identity.get(doc.identity()) {
            Some(&slot) => {
                let entry = &mut self.hits[slot];
                entry.sources.insert(hit.stage);
                entry.score = entry.score.max(hit.score);
                if entry.location.is_none() {
                    entry.location = hit.location;
                }
                if hit.stage == Stage::Fuzzy && entry.fuzzy_location.is_none() {
                    entry.fuzzy_location = hit.location;
                }
            }
            None => {
                self.by_identity.insert(doc.identity(), self.hits.len());
                self.hits.push(FusedHit {
                    doc_idx: hit.doc_idx,
                    sources: Sources::single(hit.stage),
                    score: hit.score,
                    location: hit.location,
                    fuzzy_location: hit.location.filter(|_| hit.stage == Stage::Fuzzy),
                });
            }
        }
    }

    pub fn merge_all(&mut self, hits: impl IntoIterator<Item = StageHit>) {
        for hit in hits {
            self.merge(hit);
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Fused hits in first-seen order.
    pub fn into_hits(self) -> Vec<FusedHit> {
        self.hits
    }
}

/// Fuse three stage lists, folding exact first so its locations win.
pub fn fuse(
    docs: &[SearchDoc],
    exact: Vec<StageHit>,
    substring: Vec<StageHit>,
    fuzzy: Vec<StageHit>,
) -> Vec<FusedHit> {
    let mut merger = HitMerger::new(docs);
    merger.merge_all(exact);
    merger.merge_all(substring);
    merger.merge_all(fuzzy);
    merger.into_hits()
}
