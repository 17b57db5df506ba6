// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query patterns compiled once per query.
//!
//! The query is escaped before it reaches the regex engine, so punctuation in
//! a query ("c++", "a.b") is always literal. Word boundaries are Unicode-aware:
//! "café" is a whole word in "le café noir".

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Optional plural suffix accepted after a whole-word match ("print" → "prints").
const PLURAL_SUFFIX: &str = "(?:s|es)?";

/// The compiled forms of one query string.
#[derive(Debug, Clone)]
pub struct QueryPatterns {
    query: String,
    char_len: usize,
    /// `\bq(?:s|es)?\b`, case-insensitive.
    word: Regex,
    /// `q` anywhere, case-insensitive.
    literal: Regex,
    /// `q(?:s|es)?` anywhere; used to highlight inside titles and windows.
    highlight: Regex,
}

fn build(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Convert a byte span of `s` into a character span.
pub(crate) fn char_span(s: &str, start: usize, end: usize) -> (usize, usize) {
    let start_chars = s[..start].chars().count();
    (start_chars, start_chars + s[start..end].chars().count())
}

impl QueryPatterns {
    pub fn new(query: &str) -> Result<Self> {
        let escaped = regex::escape(query);
        Ok(Self {
            query: query.to_string(),
            char_len: query.chars().count(),
            word: build(&format!(r"\b{}{}\b", escaped, PLURAL_SUFFIX))?,
            literal: build(&escaped)?,
            highlight: build(&format!("{}{}", escaped, PLURAL_SUFFIX))?,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_word_match(&self, s: &str) -> bool {
        self.word.is_match(s)
    }

    pub fn is_literal_match(&self, s: &str) -> bool {
        self.literal.is_match(s)
    }

    /// First whole-word occurrence as a character span.
    pub fn find_word(&self, s: &str) -> Option<(usize, usize)> {
        self.word.find(s).map(|m| char_span(s, m.start(), m.end()))
    }

    /// First literal occurrence as a character span.
    pub fn find_literal(&self, s: &str) -> Option<(usize, usize)> {
        self.literal.find(s).map(|m| char_span(s, m.start(), m.end()))
    }

    /// Every highlightable occurrence, as byte ranges.
    pub fn highlights<'s>(&'s self, s: &'s str) -> impl Iterator<Item = (usize, usize)> + 's {
        self.highlight.find_iter(s).map(|m| (m.start(), m.end()))
    }

    /// Every literal occurrence, as byte ranges.
    pub fn literals<'s>(&'s self, s: &'s str) -> impl Iterator<Item = (usize, usize)> + 's {
        self.literal.find_iter(s).map(|m| (m.start(), m.end()))
    }
}
