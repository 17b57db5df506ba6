// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: a total order over fused hits.

use std::cmp::Ordering;

use crate::search::fusion::FusedHit;
use crate::types::SearchDoc;

/// Compare two fused hits for ranking.
///
/// Sort order:
/// 1. **Tier** - exact, then substring, then fuzzy-only
/// 2. **Year** - newest first; missing or unparseable years count as 0
/// 3. **Score** - higher wins
/// 4. **Title** - case-insensitive, alphabetical
/// 5. **Url**, then **index position** - so the order is total and repeatable
pub fn compare_hits(a: &FusedHit, b: &FusedHit, docs: &[SearchDoc]) -> Ordering {
    let doc_a = docs.get(a.doc_idx);
    let doc_b = docs.get(b.doc_idx);

    a.tier()
        .cmp(&b.tier())
        .then_with(|| year_of(doc_b).cmp(&year_of(doc_a)))
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| sort_title(doc_a).cmp(&sort_title(doc_b)))
        .then_with(|| url_of(doc_a).cmp(url_of(doc_b)))
        .then_with(|| a.doc_idx.cmp(&b.doc_idx))
}

fn year_of(doc: Option<&SearchDoc>) -> i64 {
    doc.map(SearchDoc::year_value).unwrap_or(0)
}

fn sort_title(doc: Option<&SearchDoc>) -> String {
    doc.map(|d| d.title().to_lowercase()).unwrap_or_default()
}

fn url_of(doc: Option<&SearchDoc>) -> &str {
    doc.map(SearchDoc::url).unwrap_or("")
}

/// Sort fused hits in place into final result order.
pub fn rank(hits: &mut [FusedHit], docs: &[SearchDoc]) {
    hits.sort_by(|a, b| compare_hits(a, b, docs));
}
