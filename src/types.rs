// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types for the search index.
//!
//! One flat list of documents, two shapes. Textual documents come from content
//! collections and routed pages; image documents come from gallery listings and
//! are merged by identity so an image shown on three listing pages is one
//! document with three `appearsOn` routes.
//!
//! The JSON shape is the wire format the presentation layer fetches, so field
//! names follow it (`type` tag, camelCase `appearsOn`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Tag value carried by every image document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageTag {
    #[default]
    #[serde(rename = "image")]
    Image,
}

/// Year as it appears in source metadata: a string ("2021"), a number, or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl Year {
    /// Leading integer of the year, the way a lenient parser reads it.
    ///
    /// `"2019"` → 2019, `" 2021-ish"` → 2021, `"c. 1990"` → None.
    pub fn value(&self) -> Option<i64> {
        match self {
            Year::Number(n) => Some(*n),
            Year::Text(s) => parse_leading_int(s),
        }
    }

    /// True when the year carries nothing worth indexing.
    pub fn is_blank(&self) -> bool {
        match self {
            Year::Number(n) => *n == 0,
            Year::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// `null` reads as the field's default.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Any value that does not fit reads as absent.
fn lenient_option<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(de)?;
    Ok(serde_json::from_value(value).ok())
}

/// Sale / contact classification of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sale {
    A,
    W,
    #[default]
    #[serde(rename = "PRIVATE")]
    Private,
}

impl Sale {
    pub fn as_str(self) -> &'static str {
        match self {
            Sale::A => "A",
            Sale::W => "W",
            Sale::Private => "PRIVATE",
        }
    }
}

/// A content entry or routed page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextDoc {
    /// Collection name (`projects`, `sections`) or `pages`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Markup-stripped body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub keywords: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
}

/// An image merged across every listing that references it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDoc {
    #[serde(rename = "type")]
    pub tag: ImageTag,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Synthesized blob: title, description, artist, keywords, year, section.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub year: Option<Year>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub appears_on: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale: Option<Sale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

impl ImageDoc {
    /// Stem used for anchors and thumbnail paths (stem, else slug).
    pub fn anchor_stem(&self) -> &str {
        self.stem
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.slug.as_deref())
            .unwrap_or("")
    }
}

/// Coarse document kind used to partition results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Text,
    Image,
}

/// A searchable field of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Title,
    Description,
    Text,
    /// Keywords joined with single spaces.
    Keywords,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Description => "description",
            MatchField::Text => "text",
            MatchField::Keywords => "keywords",
        }
    }
}

/// Where a query matched: a field and a character span `[start, end)` in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLocation {
    pub field: MatchField,
    pub start: usize,
    pub end: usize,
}

/// One unit in the search index.
///
/// Image documents are tried first when deserializing: their `type` must be
/// exactly `"image"`, anything else falls through to a textual document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchDoc {
    Image(ImageDoc),
    Text(TextDoc),
}

impl SearchDoc {
    /// Decode one index element, dispatching on its `type` tag.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("type").and_then(Value::as_str) == Some("image") {
            serde_json::from_value(value).map(SearchDoc::Image)
        } else {
            serde_json::from_value(value).map(SearchDoc::Text)
        }
    }

    pub fn kind(&self) -> DocKind {
        match self {
            SearchDoc::Image(_) => DocKind::Image,
            SearchDoc::Text(_) => DocKind::Text,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, SearchDoc::Image(_))
    }

    /// Wire value of the `type` tag.
    pub fn type_tag(&self) -> &str {
        match self {
            SearchDoc::Image(_) => "image",
            SearchDoc::Text(doc) => &doc.kind,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SearchDoc::Image(doc) => &doc.title,
            SearchDoc::Text(doc) => &doc.title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            SearchDoc::Image(doc) => &doc.url,
            SearchDoc::Text(doc) => &doc.url,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SearchDoc::Image(doc) => &doc.text,
            SearchDoc::Text(doc) => &doc.text,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            SearchDoc::Image(doc) => &doc.description,
            SearchDoc::Text(doc) => &doc.description,
        }
    }

    pub fn keywords(&self) -> &[String] {
        match self {
            SearchDoc::Image(doc) => &doc.keywords,
            SearchDoc::Text(doc) => &doc.keywords,
        }
    }

    /// Field contents as matched against; keywords are space-joined.
    pub fn field(&self, field: MatchField) -> Cow<'_, str> {
        match field {
            MatchField::Title => Cow::Borrowed(self.title()),
            MatchField::Description => Cow::Borrowed(self.description()),
            MatchField::Text => Cow::Borrowed(self.text()),
            MatchField::Keywords => Cow::Owned(self.keywords().join(" ")),
        }
    }

    /// Numeric year for ranking; missing or unparseable years rank as 0.
    pub fn year_value(&self) -> i64 {
        match self {
            SearchDoc::Image(doc) => doc.year.as_ref().and_then(Year::value).unwrap_or(0),
            SearchDoc::Text(_) => 0,
        }
    }

    /// Key used to merge stage hits: url, else slug/stem, else title.
    pub fn identity(&self) -> &str {
        if !self.url().is_empty() {
            return self.url();
        }
        if let SearchDoc::Image(doc) = self {
            let stem = doc.anchor_stem();
            if !stem.is_empty() {
                return stem;
            }
        }
        self.title()
    }
}
