// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markdown/MDX to searchable plain text, plus route and title derivation.
//!
//! Stripping is deliberately shallow: it removes the structure that would
//! pollute matches (frontmatter, MDX import/export lines, code, tags, link
//! targets) and keeps the prose. Order matters: frontmatter goes first so its
//! `---` fences are never mistaken for anything else, and code fences go before
//! inline code so a fence is not read as three inline spans.

use regex::Regex;
use std::sync::LazyLock;

static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---[\s\S]*?---\s*").expect("static regex"));
static MDX_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*import\s+[^;\n]+;?[ \t]*$").expect("static regex"));
static MDX_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*export\s+[^;\n]+;?[ \t]*$").expect("static regex"));
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```").expect("static regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("static regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("static regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*title:[ \t]*["']?(.+?)["']?[ \t]*$"#).expect("static regex")
});
static H1_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#[ \t]+(.+?)[ \t]*$").expect("static regex"));

/// Reduce markdown/MDX to single-spaced plain text.
pub fn strip_markup(raw: &str) -> String {
    let text = FRONTMATTER.replacen(raw, 1, " ");
    let text = MDX_IMPORT.replace_all(&text, " ");
    let text = MDX_EXPORT.replace_all(&text, " ");
    let text = CODE_FENCE.replace_all(&text, " ");
    let text = INLINE_CODE.replace_all(&text, " ");
    let text = TAG.replace_all(&text, " ");
    let text = LINK.replace_all(&text, "$1");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Title from a `title:` line, else the first `# ` heading, else `fallback`.
pub fn infer_title(raw: &str, fallback: &str) -> String {
    if let Some(title) = TITLE_LINE.captures(raw).and_then(|c| c.get(1)) {
        let title = title.as_str().trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }
    if let Some(h1) = H1_LINE.captures(raw).and_then(|c| c.get(1)) {
        let h1 = h1.as_str().trim();
        if !h1.is_empty() {
            return h1.to_string();
        }
    }
    fallback.to_string()
}

/// Label used when a routed page has neither frontmatter title nor heading.
pub fn route_label(route: &str) -> String {
    let label = route.replace('/', " ");
    let label = label.trim();
    if label.is_empty() {
        "Page".to_string()
    } else {
        label.to_string()
    }
}

fn strip_markdown_ext(path: &str) -> Option<&str> {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".mdx") {
        Some(&path[..path.len() - 4])
    } else if lower.ends_with(".md") {
        Some(&path[..path.len() - 3])
    } else {
        None
    }
}

/// Route of a markdown file relative to the pages directory.
///
/// `about.mdx` → `/about`, `docs/index.md` → `/docs`, `index.md` → `/`.
/// Returns `None` for anything that is not `.md`/`.mdx`.
pub fn page_route(relative: &str) -> Option<String> {
    let normalized = relative.replace('\\', "/");
    let stem = strip_markdown_ext(normalized.trim_start_matches('/'))?;
    let stem = if stem == "index" {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };
    Some(format!("/{}", stem))
}

/// Slug of a content entry relative to its collection directory.
///
/// Lowercased, whitespace turned into `-`, trailing `/index` dropped.
pub fn content_slug(relative: &str) -> Option<String> {
    let route = page_route(relative)?;
    let slug = route.trim_start_matches('/').to_lowercase();
    Some(WHITESPACE.replace_all(&slug, "-").into_owned())
}

/// Listing route for a section file: `prints.json` → `/prints`.
pub fn section_route(basename: &str) -> String {
    format!("/{}", strip_json_ext(basename))
}

/// Listing route for a themed collection: (`prints`, `systems.json`) → `/prints/systems`.
pub fn collection_route(section: &str, basename: &str) -> String {
    format!("/{}/{}", section, strip_json_ext(basename))
}

fn strip_json_ext(name: &str) -> &str {
    if name.to_ascii_lowercase().ends_with(".json") {
        &name[..name.len() - 5]
    } else {
        name
    }
}
