// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction: a short window of a matched field with the query marked.
//!
//! Three attempts, first success wins:
//!
//! 1. whole-word match in text, description, then title;
//! 2. case-insensitive literal match, same field order;
//! 3. the span the fuzzy stage located, if any.
//!
//! The window runs `margin` characters before the match start and
//! `margin + |q|` after it, clipped to the field. An ellipsis marks each side
//! that was clipped. Snippets are kept as segments and only escaped when
//! rendered, so a `<` in the source never turns into markup.

use std::fmt::Write as _;

use crate::render::escape_html;
use crate::search::pattern::QueryPatterns;
use crate::types::{MatchField, MatchLocation, SearchDoc};

/// Field order snippets are taken from.
const SNIPPET_FIELDS: [MatchField; 3] = [MatchField::Text, MatchField::Description, MatchField::Title];

pub const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Mark(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub field: MatchField,
    pub leading_ellipsis: bool,
    pub segments: Vec<Segment>,
    pub trailing_ellipsis: bool,
}

impl Snippet {
    /// Escaped HTML with `<mark>` around matches.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.leading_ellipsis {
            out.push_str(ELLIPSIS);
        }
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(&escape_html(t)),
                Segment::Mark(m) => {
                    let _ = write!(out, "<mark>{}</mark>", escape_html(m));
                }
            }
        }
        if self.trailing_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out
    }

    /// Plain text with ellipses and no markup.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        if self.leading_ellipsis {
            out.push_str(ELLIPSIS);
        }
        for segment in &self.segments {
            match segment {
                Segment::Text(t) | Segment::Mark(t) => out.push_str(t),
            }
        }
        if self.trailing_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out
    }

    /// The marked substrings, in order.
    pub fn marks(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Mark(m) => Some(m.as_str()),
            Segment::Text(_) => None,
        })
    }
}

/// A clipped window of a field, in characters.
struct Window<'a> {
    chunk: &'a str,
    clipped_start: bool,
    clipped_end: bool,
}

/// Byte offset of the `n`th character of `s` (or `s.len()`).
fn byte_at(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(b, _)| b).unwrap_or(s.len())
}

fn window(s: &str, start: usize, end: usize) -> Window<'_> {
    let len = s.chars().count();
    let end = end.min(len);
    let chunk = &s[byte_at(s, start)..byte_at(s, end)];
    Window {
        chunk,
        clipped_start: start > 0,
        clipped_end: end < len,
    }
}

/// Split `chunk` into text and mark segments at the given byte ranges.
fn segments(chunk: &str, marks: impl IntoIterator<Item = (usize, usize)>) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut pos = 0;
    for (start, end) in marks {
        if start < pos || start >= end {
            continue;
        }
        if start > pos {
            out.push(Segment::Text(chunk[pos..start].to_string()));
        }
        out.push(Segment::Mark(chunk[start..end].to_string()));
        pos = end;
    }
    if pos < chunk.len() {
        out.push(Segment::Text(chunk[pos..].to_string()));
    }
    out
}

fn snippet_from(field: MatchField, w: Window<'_>, segments: Vec<Segment>) -> Snippet {
    Snippet {
        field,
        leading_ellipsis: w.clipped_start,
        segments,
        trailing_ellipsis: w.clipped_end,
    }
}

/// Build the snippet for a document, or `None` if nothing can be located.
pub fn extract(
    doc: &SearchDoc,
    patterns: &QueryPatterns,
    fuzzy_location: Option<&MatchLocation>,
    margin: usize,
) -> Option<Snippet> {
    let q_len = patterns.char_len();

    for field in SNIPPET_FIELDS {
        let value = doc.field(field);
        if let Some((start, _)) = patterns.find_word(&value) {
            let w = window(&value, start.saturating_sub(margin), start + q_len + margin);
            let segs = segments(w.chunk, patterns.highlights(w.chunk));
            return Some(snippet_from(field, w, segs));
        }
    }

    for field in SNIPPET_FIELDS {
        let value = doc.field(field);
        if let Some((start, _)) = patterns.find_literal(&value) {
            let w = window(&value, start.saturating_sub(margin), start + q_len + margin);
            let segs = segments(w.chunk, patterns.literals(w.chunk));
            return Some(snippet_from(field, w, segs));
        }
    }

    let loc = fuzzy_location?;
    let value = doc.field(loc.field);
    if loc.start >= loc.end || loc.end > value.chars().count() {
        return None;
    }
    let win_start = loc.start.saturating_sub(margin);
    let w = window(&value, win_start, loc.end + margin);
    let mark = (
        byte_at(w.chunk, loc.start - win_start),
        byte_at(w.chunk, loc.end - win_start),
    );
    let segs = segments(w.chunk, [mark]);
    Some(snippet_from(loc.field, w, segs))
}
