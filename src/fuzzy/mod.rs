// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy similarity over weighted document fields.
//!
//! Each field (title, text, every keyword) is aligned against the query with
//! [`alignment::align`]. Inside the aligned occurrence, a *run* is a stretch of
//! consecutive characters that all occur somewhere in the query. A field counts
//! when its error ratio is within the threshold and it has a run at least
//! `max(4, min(|q|, 8))` long, which keeps two-letter coincidences out.
//!
//! Field scores combine as a weighted geometric product:
//!
//! ```text
//! total = Π  max(score_f, ε) ^ (weight_f / Σweights · norm_f)
//! norm_f = round3(1 / sqrt(tokens in field))
//! ```
//!
//! so a perfect title hit drives the total toward zero, while a loose match in
//! a long body barely moves it. Lower is better throughout.

pub mod alignment;

pub use alignment::{align, Alignment};

use crate::config::{FuzzyWeights, QueryConfig};
use crate::types::{MatchField, MatchLocation, SearchDoc};

/// Patterns are capped at this many characters, beyond which bit-parallel
/// matchers lose precision and long queries are better served by substring search.
pub const MAX_PATTERN_CHARS: usize = 32;

/// A field that passed the per-field threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: MatchField,
    /// Error ratio for this field.
    pub score: f64,
    /// Longest run, as a location in the field text.
    pub location: MatchLocation,
}

impl FieldMatch {
    pub fn span_len(&self) -> usize {
        self.location.end - self.location.start
    }
}

/// Every matching field of one document and the combined score.
#[derive(Debug, Clone, PartialEq)]
pub struct DocMatch {
    pub score: f64,
    pub fields: Vec<FieldMatch>,
}

impl DocMatch {
    /// The field with the longest run; earlier fields win ties.
    pub fn best_field(&self) -> Option<&FieldMatch> {
        self.fields.iter().fold(None, |best: Option<&FieldMatch>, f| match best {
            Some(b) if b.span_len() >= f.span_len() => Some(b),
            _ => Some(f),
        })
    }
}

#[inline]
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Longest stretch of `text[start..end]` made of characters found in `pattern`.
fn longest_run(pattern: &[char], text: &[char], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut run_start = start;
    for pos in start..=end {
        let inside = pos < end && pattern.contains(&text[pos]);
        if inside {
            continue;
        }
        if pos > run_start && best.map_or(true, |(s, e)| pos - run_start > e - s) {
            best = Some((run_start, pos));
        }
        run_start = pos + 1;
    }
    best
}

fn field_norm(value: &str) -> f64 {
    let tokens = value.split(' ').count().max(1);
    ((1.0 / (tokens as f64).sqrt()) * 1000.0).round() / 1000.0
}

/// Query compiled for fuzzy matching against documents.
pub struct FuzzyMatcher {
    pattern: Vec<char>,
    threshold: f64,
    max_errors: usize,
    min_run: usize,
    weights: FuzzyWeights,
}

impl FuzzyMatcher {
    pub fn new(query: &str, config: &QueryConfig) -> Self {
        let pattern: Vec<char> = query
            .chars()
            .take(MAX_PATTERN_CHARS)
            .map(fold_char)
            .collect();
        let m = pattern.len();
        let total = config.fuzzy_weights.title
            + config.fuzzy_weights.text
            + config.fuzzy_weights.keywords;
        let total = if total > 0.0 { total } else { 1.0 };

        Self {
            max_errors: (config.fuzzy_threshold * m as f64).floor() as usize,
            threshold: config.fuzzy_threshold,
            min_run: m.clamp(4, 8),
            weights: FuzzyWeights {
                title: config.fuzzy_weights.title / total,
                text: config.fuzzy_weights.text / total,
                keywords: config.fuzzy_weights.keywords / total,
            },
            pattern,
        }
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Align against one field value; `None` if it does not qualify.
    ///
    /// Returns the error ratio and the longest run.
    pub fn match_value(&self, value: &str) -> Option<(f64, (usize, usize))> {
        if value.is_empty() {
            return None;
        }
        let text: Vec<char> = value.chars().map(fold_char).collect();
        let alignment = align(&self.pattern, &text, self.max_errors)?;
        let score = alignment.score(self.pattern.len());
        if score > self.threshold {
            return None;
        }
        let run = longest_run(&self.pattern, &text, alignment.start, alignment.end)?;
        (run.1 - run.0 >= self.min_run).then_some((score, run))
    }

    /// Match a document's title, text and keywords.
    pub fn match_doc(&self, doc: &SearchDoc) -> Option<DocMatch> {
        let mut fields: Vec<FieldMatch> = Vec::new();
        let mut total = 1.0f64;

        for (field, value, weight) in [
            (MatchField::Title, doc.title(), self.weights.title),
            (MatchField::Text, doc.text(), self.weights.text),
        ] {
            if let Some((score, run)) = self.match_value(value) {
                total *= weighted(score, weight, field_norm(value));
                fields.push(FieldMatch {
                    field,
                    score,
                    location: MatchLocation {
                        field,
                        start: run.0,
                        end: run.1,
                    },
                });
            }
        }

        // Keywords: best single keyword, located within the space-joined list.
        let mut offset = 0;
        let mut best_keyword: Option<(f64, FieldMatch, f64)> = None;
        for keyword in doc.keywords() {
            if let Some((score, run)) = self.match_value(keyword) {
                if best_keyword.as_ref().map_or(true, |(s, _, _)| score < *s) {
                    let found = FieldMatch {
                        field: MatchField::Keywords,
                        score,
                        location: MatchLocation {
                            field: MatchField::Keywords,
                            start: offset + run.0,
                            end: offset + run.1,
                        },
                    };
                    best_keyword = Some((score, found, field_norm(keyword)));
                }
            }
            offset += keyword.chars().count() + 1;
        }
        if let Some((score, found, norm)) = best_keyword {
            total *= weighted(score, self.weights.keywords, norm);
            fields.push(found);
        }

        (!fields.is_empty()).then_some(DocMatch {
            score: total,
            fields,
        })
    }
}

fn weighted(score: f64, weight: f64, norm: f64) -> f64 {
    let base = if score == 0.0 { f64::EPSILON } else { score };
    base.powf(weight * norm)
}
