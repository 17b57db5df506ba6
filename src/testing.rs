// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical document builders so tests don't hand-roll JSON.

#![doc(hidden)]

use crate::types::{ImageDoc, SearchDoc, TextDoc, Year};

/// Create a routed page document.
pub fn make_page(url: &str, title: &str, text: &str) -> SearchDoc {
    make_text_doc("pages", url, title, text)
}

/// Create a textual document of any collection type.
pub fn make_text_doc(kind: &str, url: &str, title: &str, text: &str) -> SearchDoc {
    SearchDoc::Text(TextDoc {
        kind: kind.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        text: text.to_string(),
        keywords: vec![],
        description: String::new(),
    })
}

/// Create an image document listed on the given routes.
///
/// The section is the first route without its slash, the url is
/// `/{section}/{slug}`, and the text is synthesized from title, year and section
/// the way the normalizer would.
pub fn make_image(slug: &str, title: &str, year: &str, appears_on: &[&str]) -> SearchDoc {
    let section = appears_on
        .first()
        .map(|r| r.trim_start_matches('/').to_string())
        .unwrap_or_default();
    let text = [title, year, section.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    SearchDoc::Image(ImageDoc {
        title: title.to_string(),
        url: format!("/{}/{}", section, slug),
        text,
        year: (!year.is_empty()).then(|| Year::Text(year.to_string())),
        slug: Some(slug.to_string()),
        stem: Some(slug.to_string()),
        thumb: Some(format!("/thumbs/{}/{}-w480.jpg", section, slug)),
        appears_on: appears_on.iter().map(|r| r.to_string()).collect(),
        section,
        ..ImageDoc::default()
    })
}
