// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result partitioning and pagination.
//!
//! Ranked results split by kind: textual hits are shown in full, image hits
//! are sliced into pages. Out-of-range input is clamped rather than rejected,
//! so any `page`/`per` pair from a URL produces a valid (possibly empty) page.

use crate::config::QueryConfig;
use crate::types::DocKind;

/// Ranked items split by document kind, each side keeping rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    pub text: Vec<T>,
    pub images: Vec<T>,
}

/// Split `items` into textual and image subsequences.
pub fn partition<T>(items: impl IntoIterator<Item = T>, kind: impl Fn(&T) -> DocKind) -> Partition<T> {
    let (images, text): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| kind(item) == DocKind::Image);
    Partition { text, images }
}

/// A validated page request: `page ≥ 1`, `1 ≤ per ≤ max_per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per: usize,
}

impl PageRequest {
    pub fn new(page: Option<usize>, per: Option<usize>, config: &QueryConfig) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per: config.clamp_per(per),
        }
    }

    /// Build from raw query-string values. Unparseable values fall back to defaults.
    pub fn from_params(page: Option<&str>, per: Option<&str>, config: &QueryConfig) -> Self {
        let page = page.and_then(parse_count);
        let per = per.and_then(parse_count);
        Self::new(page, per, config)
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per)
    }
}

/// Lenient non-negative integer parse; negatives clamp to zero.
fn parse_count(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(n) => Some(n.max(0) as usize),
        Err(_) => raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.max(0.0) as usize),
    }
}

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub per: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// The request pointed past the last page; `items` is empty.
    pub beyond_last: bool,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `[ (page-1)·per, min(page·per, len) )` out of `items`.
pub fn paginate<T>(items: &[T], request: PageRequest) -> Page<'_, T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(request.per).max(1);
    let start = request.offset().min(total_items);
    let end = start.saturating_add(request.per).min(total_items);

    Page {
        items: &items[start..end],
        page: request.page,
        per: request.per,
        total_items,
        total_pages,
        beyond_last: request.page > total_pages,
    }
}

/// Previous/next navigation for a page of image results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// `None` when inert (first page).
    pub prev: Option<String>,
    /// `None` when inert (last page or beyond).
    pub next: Option<String>,
    pub label: String,
    /// Single-page results show no pager.
    pub visible: bool,
}

impl Pager {
    pub const PREV_TEXT: &'static str = "« Prev";
    pub const NEXT_TEXT: &'static str = "Next »";

    pub fn new<T>(page: &Page<'_, T>, query: &str, search_route: &str) -> Self {
        let link = |n: usize| page_url(search_route, query, n, page.per);
        Self {
            prev: page.has_prev().then(|| link(page.page - 1)),
            next: page.has_next().then(|| link(page.page + 1)),
            label: format!("Page {} of {}", page.page, page.total_pages),
            visible: page.total_pages > 1,
        }
    }
}

/// `<route>?q=<q>&page=<n>&per=<per>` with the query percent-encoded.
pub fn page_url(search_route: &str, query: &str, page: usize, per: usize) -> String {
    format!(
        "{}?q={}&page={}&per={}",
        search_route,
        urlencoding::encode(query),
        page,
        per
    )
}
