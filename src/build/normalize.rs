// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document normalization: heterogeneous sources in, one flat document list out.
//!
//! Text sources map 1:1 to documents. Images are keyed by identity (case-folded
//! slug, else stem) because the same image shows up in a section listing, the
//! archive, and any themed collection that selects it. The first listing to
//! mention an identity creates the document; later ones only fill blanks and
//! extend `appearsOn`.
//!
//! **Invariant**: one image document per identity key, and `appearsOn` never
//! holds the same route twice.
//!
//! Insertion order is preserved (a `Vec` plus a key → position map) so the same
//! inputs in the same order always serialize to the same bytes.

use std::collections::{HashMap, HashSet};

use crate::build::markup::{content_slug, infer_title, route_label, strip_markup};
use crate::build::source::{parse_frontmatter, ContentEntry, GalleryItem, Listing, RoutedPage};
use crate::config::BuildConfig;
use crate::index::IndexStore;
use crate::types::{ImageDoc, ImageTag, SearchDoc, TextDoc};

/// Counters reported after a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub text_docs: usize,
    pub image_docs: usize,
    /// Image records folded into an existing document.
    pub merged_records: usize,
    /// Image records without slug or stem.
    pub skipped_records: usize,
    pub ignored_listings: usize,
    pub ignored_pages: usize,
}

/// Accumulates documents during a build; `finish` freezes them into an [`IndexStore`].
pub struct IndexBuilder {
    max_text_len: usize,
    ignore_page_routes: HashSet<String>,
    ignore_listings: HashSet<String>,
    texts: Vec<TextDoc>,
    images: Vec<ImageDoc>,
    image_positions: HashMap<String, usize>,
    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            max_text_len: config.max_text_len,
            ignore_page_routes: config.ignore_page_routes.iter().cloned().collect(),
            ignore_listings: config.ignore_listings.iter().cloned().collect(),
            texts: Vec::new(),
            images: Vec::new(),
            image_positions: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Add a content collection entry (type tag = collection name).
    pub fn add_content(&mut self, entry: &ContentEntry) {
        let fm = parse_frontmatter(&entry.raw);
        let slug = content_slug(&entry.slug).unwrap_or_else(|| entry.slug.clone());
        let title = fm
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| slug.clone());

        self.texts.push(TextDoc {
            kind: entry.collection.clone(),
            title,
            url: format!("/{}", slug),
            text: strip_markup(&entry.raw),
            keywords: fm.keywords,
            description: fm.description.unwrap_or_default(),
        });
    }

    /// Add a routed markdown page unless its route is ignored.
    pub fn add_page(&mut self, page: &RoutedPage) {
        if self.ignore_page_routes.contains(&page.route) {
            tracing::debug!(route = %page.route, "page route ignored");
            self.stats.ignored_pages += 1;
            return;
        }

        self.texts.push(TextDoc {
            kind: "pages".to_string(),
            title: infer_title(&page.raw, &route_label(&page.route)),
            url: page.route.clone(),
            text: strip_markup(&page.raw),
            keywords: Vec::new(),
            description: String::new(),
        });
    }

    /// Add every image of a listing, merging by identity.
    pub fn add_listing(&mut self, listing: &Listing) {
        if self.ignore_listings.contains(&listing.basename) {
            tracing::debug!(listing = %listing.basename, "listing ignored");
            self.stats.ignored_listings += 1;
            return;
        }

        for item in &listing.items {
            self.add_image(item, &listing.route);
        }
    }

    /// Add one image record seen on `route`.
    pub fn add_image(&mut self, item: &GalleryItem, route: &str) {
        let key = item.identity_key();
        if key.is_empty() {
            tracing::debug!(route, title = ?item.title, "image record has no slug or stem");
            self.stats.skipped_records += 1;
            return;
        }

        match self.image_positions.get(&key) {
            Some(&pos) => {
                merge_into(&mut self.images[pos], item, route);
                self.stats.merged_records += 1;
            }
            None => {
                let doc = self.new_image(item, &key, route);
                self.image_positions.insert(key, self.images.len());
                self.images.push(doc);
            }
        }
    }

    fn new_image(&self, item: &GalleryItem, key: &str, route: &str) -> ImageDoc {
        let title = [item.title.as_deref(), item.stem.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .unwrap_or(key)
            .to_string();

        ImageDoc {
            tag: ImageTag::Image,
            title,
            url: item.detail_url(),
            text: self.synthesize_text(item),
            keywords: item.keywords(),
            year: item.year.clone(),
            artist: item.artist().to_string(),
            section: item.section.clone().unwrap_or_default(),
            slug: item.slug.clone(),
            stem: item.stem.clone(),
            thumb: item.src.clone(),
            appears_on: vec![route.to_string()],
            description: item.description().to_string(),
            sale: item.sale,
            width: item.width,
            height: item.height,
            ar: item.ar,
            rows: item.rows,
        }
    }

    /// Searchable blob: title, description, artist, keywords, year, section.
    fn synthesize_text(&self, item: &GalleryItem) -> String {
        let keywords = item.keywords().join(" ");
        let year = item
            .year
            .as_ref()
            .filter(|y| !y.is_blank())
            .map(ToString::to_string)
            .unwrap_or_default();

        let parts = [
            item.title.as_deref().unwrap_or(""),
            item.description(),
            item.artist(),
            keywords.as_str(),
            year.as_str(),
            item.section.as_deref().unwrap_or(""),
        ];
        let joined = parts
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        match joined.char_indices().nth(self.max_text_len) {
            Some((cut, _)) => joined[..cut].to_string(),
            None => joined,
        }
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Freeze: text documents first, then images, both in insertion order.
    pub fn finish(self) -> (IndexStore, BuildStats) {
        let mut stats = self.stats;
        stats.text_docs = self.texts.len();
        stats.image_docs = self.images.len();

        let docs: Vec<SearchDoc> = self
            .texts
            .into_iter()
            .map(SearchDoc::Text)
            .chain(self.images.into_iter().map(SearchDoc::Image))
            .collect();

        (IndexStore::new(docs), stats)
    }
}

/// Backfill empty fields of an existing image and record the route.
fn merge_into(existing: &mut ImageDoc, item: &GalleryItem, route: &str) {
    if existing.thumb.as_deref().unwrap_or("").is_empty() {
        if let Some(src) = item.src.as_ref().filter(|s| !s.is_empty()) {
            existing.thumb = Some(src.clone());
        }
    }
    if existing.url.is_empty() {
        existing.url = item.detail_url();
    }
    if existing.section.is_empty() {
        if let Some(section) = item.section.as_ref() {
            existing.section = section.clone();
        }
    }
    if existing.title.is_empty() {
        if let Some(title) = item.title.as_ref() {
            existing.title = title.clone();
        }
    }
    if !existing.appears_on.iter().any(|r| r == route) {
        existing.appears_on.push(route.to_string());
    }
}
