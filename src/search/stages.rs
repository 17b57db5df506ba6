// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The three match stages.
//!
//! Each stage reads the whole index and returns its own hit list in index
//! order (fuzzy: by similarity). Stages never see each other's output; fusion
//! happens afterwards in [`super::fusion`].
//!
//! | Stage     | Test                                   | Base score        |
//! |-----------|----------------------------------------|-------------------|
//! | exact     | `\bq(?:s\|es)?\b` in any field          | 100               |
//! | substring | `q` anywhere in any field              | 70 − i×0.01       |
//! | fuzzy     | weighted similarity, `\|q\| ≥ 4`         | 50 − i×0.01       |

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::QueryConfig;
use crate::fuzzy::{DocMatch, FuzzyMatcher};
use crate::types::{MatchField, MatchLocation, SearchDoc};

use super::pattern::QueryPatterns;

/// Which stage produced a hit. Declaration order is tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Exact,
    Substring,
    Fuzzy,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Exact, Stage::Substring, Stage::Fuzzy];

    /// Source tag as shown to callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Exact => "exact",
            Stage::Substring => "substr",
            Stage::Fuzzy => "fuzzy",
        }
    }

    /// Score of the first hit of this stage.
    pub fn base_score(self) -> f64 {
        match self {
            Stage::Exact => 100.0,
            Stage::Substring => 70.0,
            Stage::Fuzzy => 50.0,
        }
    }

    /// Score of the hit at position `idx` in this stage's list.
    ///
    /// The small positional decay keeps the stage's own order stable once
    /// hits from different stages are merged.
    pub fn score_at(self, idx: usize) -> f64 {
        match self {
            Stage::Exact => self.base_score(),
            _ => self.base_score() - idx as f64 * 0.01,
        }
    }
}

/// One document matched by one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageHit {
    pub doc_idx: usize,
    pub stage: Stage,
    pub score: f64,
    pub location: Option<MatchLocation>,
}

/// Fields in the order the exact and substring stages probe them.
const PROBE_FIELDS: [MatchField; 4] = [
    MatchField::Title,
    MatchField::Description,
    MatchField::Text,
    MatchField::Keywords,
];

/// Whole-word, plural-aware match against title, description, text or any keyword.
pub fn exact_stage(docs: &[SearchDoc], patterns: &QueryPatterns) -> Vec<StageHit> {
    docs.iter()
        .enumerate()
        .filter_map(|(doc_idx, doc)| {
            let location = exact_location(doc, patterns)?;
            Some(StageHit {
                doc_idx,
                stage: Stage::Exact,
                score: Stage::Exact.score_at(0),
                location: Some(location),
            })
        })
        .collect()
}

fn exact_location(doc: &SearchDoc, patterns: &QueryPatterns) -> Option<MatchLocation> {
    for field in PROBE_FIELDS {
        if field == MatchField::Keywords {
            // Each keyword is tested alone; the span lands in the joined list.
            let mut offset = 0;
            for keyword in doc.keywords() {
                if let Some((start, end)) = patterns.find_word(keyword) {
                    return Some(MatchLocation {
                        field,
                        start: offset + start,
                        end: offset + end,
                    });
                }
                offset += keyword.chars().count() + 1;
            }
            continue;
        }
        if let Some((start, end)) = patterns.find_word(&doc.field(field)) {
            return Some(MatchLocation { field, start, end });
        }
    }
    None
}

/// Case-insensitive literal containment in title, description, text or joined keywords.
pub fn substring_stage(docs: &[SearchDoc], patterns: &QueryPatterns) -> Vec<StageHit> {
    docs.iter()
        .enumerate()
        .filter_map(|(doc_idx, doc)| {
            PROBE_FIELDS.iter().find_map(|&field| {
                let (start, end) = patterns.find_literal(&doc.field(field))?;
                Some((doc_idx, MatchLocation { field, start, end }))
            })
        })
        .enumerate()
        .map(|(i, (doc_idx, location))| StageHit {
            doc_idx,
            stage: Stage::Substring,
            score: Stage::Substring.score_at(i),
            location: Some(location),
        })
        .collect()
}

/// Minimum run the best field must show for a fuzzy hit to survive.
pub fn min_contiguous(query_len: usize) -> usize {
    ((query_len as f64 * 0.6).ceil() as usize).max(3)
}

fn raw_fuzzy_matches(docs: &[SearchDoc], matcher: &FuzzyMatcher) -> Vec<(usize, DocMatch)> {
    #[cfg(feature = "parallel")]
    {
        docs.par_iter()
            .enumerate()
            .filter_map(|(i, doc)| matcher.match_doc(doc).map(|m| (i, m)))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        docs.iter()
            .enumerate()
            .filter_map(|(i, doc)| matcher.match_doc(doc).map(|m| (i, m)))
            .collect()
    }
}

/// Weighted similarity search, post-filtered for a solid contiguous span.
///
/// Skipped entirely for queries shorter than `fuzzy_min_query_len` characters.
pub fn fuzzy_stage(docs: &[SearchDoc], query: &str, config: &QueryConfig) -> Vec<StageHit> {
    let query_len = query.chars().count();
    if query_len < config.fuzzy_min_query_len {
        return Vec::new();
    }

    let matcher = FuzzyMatcher::new(query, config);
    let mut raw = raw_fuzzy_matches(docs, &matcher);
    // Stable: equal scores keep index order.
    raw.sort_by(|a, b| a.1.score.total_cmp(&b.1.score));

    let floor = min_contiguous(query_len);
    raw.into_iter()
        .filter_map(|(doc_idx, m)| {
            let best = m.best_field()?;
            (best.span_len() >= floor && m.score <= config.fuzzy_score_ceiling)
                .then_some((doc_idx, best.location))
        })
        .enumerate()
        .map(|(i, (doc_idx, location))| StageHit {
            doc_idx,
            stage: Stage::Fuzzy,
            score: Stage::Fuzzy.score_at(i),
            location: Some(location),
        })
        .collect()
}
