// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading site sources from disk, in parallel where it is safe.
//!
//! Reading and parsing files is embarrassingly parallel; merging is not,
//! because the order images are first seen decides which listing route leads
//! their `appearsOn`. So paths are collected and sorted first, files are read
//! with an order-preserving `par_iter`, and the builder consumes the results
//! sequentially in that sorted order. Output is identical with or without the
//! `parallel` feature.
//!
//! Expected layout under the site root:
//!
//! ```text
//! content/<collection>/**/*.md|mdx
//! pages/**/*.md|mdx
//! data/sections/*.json               → /<basename>
//! data/collections/<section>/*.json  → /<section>/<basename>
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::build::markup::{collection_route, page_route, section_route};
use crate::build::source::{listing_items, ContentEntry, Listing, RoutedPage};
use crate::error::{Error, Result};

pub const CONTENT_DIR: &str = "content";
pub const PAGES_DIR: &str = "pages";
pub const SECTIONS_DIR: &str = "data/sections";
pub const COLLECTIONS_DIR: &str = "data/collections";

/// Everything read from a site directory, in deterministic order.
#[derive(Debug, Clone, Default)]
pub struct SiteSources {
    pub content: Vec<ContentEntry>,
    pub pages: Vec<RoutedPage>,
    pub listings: Vec<Listing>,
}

/// Map `f` over `items`, in parallel when enabled, preserving order.
fn map_ordered<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        items.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(f).collect()
    }
}

fn has_ext(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Files under `dir` (recursively) with the given extension, sorted by path.
///
/// A missing directory yields an empty list.
pub fn collect_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    if dir.is_dir() {
        walk(dir, ext, &mut out)?;
    }
    out.sort();
    Ok(out)
}

fn walk(dir: &Path, ext: &str, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_dir() {
            walk(&path, ext, out)?;
        } else if has_ext(&path, ext) {
            out.push(path);
        }
    }
    Ok(())
}

fn relative_str(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Read a source file as text.
///
/// Bytes that are not UTF-8 are replaced rather than failing the build, and a
/// file that cannot be read at all is logged and skipped.
fn read_source(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), "source is not valid UTF-8; decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable source skipped");
            None
        }
    }
}

fn read_all(paths: &[PathBuf]) -> Vec<(PathBuf, String)> {
    let contents = map_ordered(paths, |path| read_source(path));
    paths
        .iter()
        .zip(contents)
        .filter_map(|(path, raw)| Some((path.clone(), raw?)))
        .collect()
}

/// Markdown files under `dir`: `.md` first, then `.mdx`, each sorted by path.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = collect_files(dir, "md")?;
    paths.extend(collect_files(dir, "mdx")?);
    Ok(paths)
}

/// Content entries for each collection, in configured collection order.
pub fn load_content(site: &Path, collections: &[String]) -> Result<Vec<ContentEntry>> {
    let mut entries = Vec::new();
    for collection in collections {
        let dir = site.join(CONTENT_DIR).join(collection);
        for (path, raw) in read_all(&markdown_files(&dir)?) {
            entries.push(ContentEntry {
                collection: collection.clone(),
                slug: relative_str(&path, &dir),
                raw,
            });
        }
    }
    Ok(entries)
}

/// Routed pages with their derived routes.
pub fn load_pages(site: &Path) -> Result<Vec<RoutedPage>> {
    let dir = site.join(PAGES_DIR);
    let pages = read_all(&markdown_files(&dir)?)
        .into_iter()
        .filter_map(|(path, raw)| {
            let route = page_route(&relative_str(&path, &dir))?;
            Some(RoutedPage { route, raw })
        })
        .collect();
    Ok(pages)
}

/// A listing file and the route it is shown on.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFile {
    pub path: PathBuf,
    pub route: String,
    pub basename: String,
}

/// Listing files: sections sorted by file name, then collections sorted by path.
pub fn listing_files(site: &Path) -> Result<Vec<ListingFile>> {
    let file_name = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let mut files = Vec::new();

    let sections_dir = site.join(SECTIONS_DIR);
    let mut sections: Vec<PathBuf> = collect_files(&sections_dir, "json")?
        .into_iter()
        .filter(|p| p.parent() == Some(sections_dir.as_path()))
        .collect();
    sections.sort_by_key(|p| file_name(p));
    for path in sections {
        let basename = file_name(&path);
        files.push(ListingFile {
            route: section_route(&basename),
            basename,
            path,
        });
    }

    let collections_dir = site.join(COLLECTIONS_DIR);
    for path in collect_files(&collections_dir, "json")? {
        let Some(section) = path
            .parent()
            .filter(|p| p.parent() == Some(collections_dir.as_path()))
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
        else {
            tracing::debug!(path = %path.display(), "listing outside a section folder skipped");
            continue;
        };
        let basename = file_name(&path);
        files.push(ListingFile {
            route: collection_route(&section, &basename),
            basename,
            path,
        });
    }

    Ok(files)
}

/// Read one listing. Unreadable files and unparseable JSON are logged and yield `None`.
fn read_listing(file: &ListingFile) -> Option<Listing> {
    let raw = read_source(&file.path)?;
    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(path = %file.path.display(), error = %e, "listing is not valid JSON; skipped");
            return None;
        }
    };
    Some(Listing {
        route: file.route.clone(),
        basename: file.basename.clone(),
        items: listing_items(value),
    })
}

/// Read every listing file in deterministic order.
pub fn load_listings(site: &Path) -> Result<Vec<Listing>> {
    let files = listing_files(site)?;
    Ok(map_ordered(&files, read_listing).into_iter().flatten().collect())
}

/// Read every listing file, advancing `progress` once per file.
#[cfg(feature = "parallel")]
pub fn load_listings_with_progress(site: &Path, progress: &ProgressBar) -> Result<Vec<Listing>> {
    let files = listing_files(site)?;
    progress.set_length(files.len() as u64);
    let results = map_ordered(&files, |file| {
        let result = read_listing(file);
        progress.inc(1);
        result
    });
    Ok(results.into_iter().flatten().collect())
}

/// Read all site sources.
pub fn load_site(site: &Path, collections: &[String]) -> Result<SiteSources> {
    Ok(SiteSources {
        content: load_content(site, collections)?,
        pages: load_pages(site)?,
        listings: load_listings(site)?,
    })
}
