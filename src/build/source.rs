// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shapes produced by the collaborators upstream of the index.
//!
//! The manifest builder writes gallery listings (`data/sections/*.json`,
//! `data/collections/<section>/*.json`); the content layer gives us markdown
//! with a frontmatter block. Everything here is lenient: listings may be a bare
//! array or `{ items: [...] }`, and a single malformed item is dropped without
//! taking the rest of the file with it.

use crate::types::{Sale, Year};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Metadata fields that fail to parse become `None` instead of failing the item.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keywords arrive as a list or, from some EXIF writers, a single string.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(untagged)]
pub enum Keywords {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl Keywords {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Keywords::None => Vec::new(),
            Keywords::One(k) if k.trim().is_empty() => Vec::new(),
            Keywords::One(k) => vec![k],
            Keywords::Many(ks) => ks,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Exif {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub keywords: Keywords,
}

/// One image record from a gallery listing.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(default)]
    pub section: Option<String>,
    /// Raw image path, used as the representative thumbnail.
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub stem: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<Year>,
    /// Explicit detail url; derived from section + slug when absent.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub ar: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rows: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub exif: Option<Exif>,
    #[serde(default, deserialize_with = "lenient")]
    pub sale: Option<Sale>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl GalleryItem {
    /// Identity key: case-folded slug, else stem. Empty when neither exists.
    pub fn identity_key(&self) -> String {
        non_empty(self.slug.as_deref())
            .or(non_empty(self.stem.as_deref()))
            .unwrap_or("")
            .to_lowercase()
    }

    /// Canonical detail url: explicit `url`, else `/<section>/<slug-or-stem>`.
    pub fn detail_url(&self) -> String {
        if let Some(url) = non_empty(self.url.as_deref()) {
            return url.to_string();
        }
        let name = non_empty(self.slug.as_deref()).or(non_empty(self.stem.as_deref()));
        match (non_empty(self.section.as_deref()), name) {
            (Some(section), Some(name)) => format!("/{}/{}", section, name),
            _ => String::new(),
        }
    }

    pub fn artist(&self) -> &str {
        self.exif
            .as_ref()
            .and_then(|e| e.artist.as_deref())
            .unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.exif
            .as_ref()
            .and_then(|e| e.description.as_deref())
            .unwrap_or("")
    }

    pub fn keywords(&self) -> Vec<String> {
        self.exif
            .as_ref()
            .map(|e| e.keywords.clone().into_vec())
            .unwrap_or_default()
    }
}

/// Items of a listing file, tolerating both file shapes and bad records.
pub fn listing_items(value: Value) -> Vec<GalleryItem> {
    let raw = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    raw.into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<GalleryItem>(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(position = i, error = %e, "skipping malformed gallery item");
                None
            }
        })
        .collect()
}

/// A listing page and the images it shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// Route of the listing page (`/prints`, `/prints/systems`).
    pub route: String,
    /// Source file basename, matched against the ignore list.
    pub basename: String,
    pub items: Vec<GalleryItem>,
}

/// A content collection entry before normalization.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContentEntry {
    /// Collection name; becomes the document type tag.
    pub collection: String,
    /// Slug relative to the collection (`hypocenter`, `notes/field-trip`).
    pub slug: String,
    /// Raw markdown including any frontmatter.
    pub raw: String,
}

/// A routed markdown page before normalization.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RoutedPage {
    pub route: String,
    pub raw: String,
}

/// Metadata from a leading `---` block.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    for q in ['"', '\''] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}

fn inline_list(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|k| unquote(k).to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Parse the frontmatter block of a markdown document.
///
/// Only flat `key: value` pairs are understood, plus `keywords` as either
/// `[a, b]` or a `- item` block list. Anything else is ignored.
pub fn parse_frontmatter(raw: &str) -> Frontmatter {
    let mut fm = Frontmatter::default();
    let body = raw.trim_start_matches('\u{feff}');
    let Some(rest) = body.strip_prefix("---") else {
        return fm;
    };
    let Some(end) = rest.find("\n---") else {
        return fm;
    };

    let mut in_keywords = false;
    for line in rest[..end].lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if in_keywords {
            if let Some(item) = trimmed.strip_prefix("- ") {
                let item = unquote(item);
                if !item.is_empty() {
                    fm.keywords.push(item.to_string());
                }
                continue;
            }
            in_keywords = false;
        }
        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "title" if !value.is_empty() => fm.title = Some(unquote(value).to_string()),
            "description" if !value.is_empty() => {
                fm.description = Some(unquote(value).to_string());
            }
            "keywords" => {
                if value.is_empty() {
                    in_keywords = true;
                } else {
                    fm.keywords = inline_list(value);
                }
            }
            _ => {}
        }
    }
    fm
}
