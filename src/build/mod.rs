// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index build pipeline: site sources in, one `search-index.json` out.
//!
//! ```text
//! content/ pages/ data/ ──load──▶ IndexBuilder ──finish──▶ IndexStore ──▶ JSON
//!                       (parallel)   (sequential,           (text docs,
//!                                     sorted order)          then images)
//! ```

pub mod markup;
pub mod normalize;
pub mod parallel;
pub mod source;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::index::IndexStore;
use crate::types::DocKind;

pub use normalize::{BuildStats, IndexBuilder};
pub use parallel::{load_site, SiteSources};

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Size and integrity figures for a serialized index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub bytes: usize,
    pub brotli_bytes: usize,
    pub crc32: u32,
}

impl ArtifactInfo {
    pub fn of(data: &[u8]) -> Self {
        Self {
            bytes: data.len(),
            brotli_bytes: brotli_size(data),
            crc32: compute_crc32(data),
        }
    }
}

pub fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Size of `data` after brotli at maximum quality (what a CDN would serve).
pub fn brotli_size(data: &[u8]) -> usize {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        if encoder.write_all(data).is_err() {
            return data.len();
        }
    }
    compressed.len()
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub text_docs: usize,
    pub image_docs: usize,
    pub stats: BuildStats,
    pub artifact: ArtifactInfo,
    /// Cache directive the index should be served with.
    pub cache_control: String,
}

/// Normalize loaded sources into an index.
///
/// Content entries, then pages, then listings, each in the order given.
pub fn assemble(sources: &SiteSources, config: &BuildConfig) -> (IndexStore, BuildStats) {
    let mut builder = IndexBuilder::new(config);
    for entry in &sources.content {
        builder.add_content(entry);
    }
    for page in &sources.pages {
        builder.add_page(page);
    }
    for listing in &sources.listings {
        builder.add_listing(listing);
    }
    builder.finish()
}

#[cfg(feature = "parallel")]
fn load_with_progress(input: &Path, config: &BuildConfig) -> Result<SiteSources> {
    let multi = MultiProgress::new();
    let pb = multi.add(ProgressBar::new(0));
    pb.set_style(create_progress_style());
    pb.set_prefix("Loading");
    pb.set_message("listings...");

    let content = parallel::load_content(input, &config.content_collections)?;
    let pages = parallel::load_pages(input)?;
    let listings = parallel::load_listings_with_progress(input, &pb)?;
    pb.finish_with_message(format!("loaded {} listings", listings.len()));

    Ok(SiteSources {
        content,
        pages,
        listings,
    })
}

#[cfg(not(feature = "parallel"))]
fn load_with_progress(input: &Path, config: &BuildConfig) -> Result<SiteSources> {
    load_site(input, &config.content_collections)
}

/// Build the index for the site at `input_dir` and write it into `output_dir`.
pub fn run_build(input_dir: &Path, output_dir: &Path, config: &BuildConfig) -> Result<BuildReport> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "site directory {} does not exist",
            input_dir.display()
        )));
    }

    let sources = load_with_progress(input_dir, config)?;
    tracing::info!(
        content = sources.content.len(),
        pages = sources.pages.len(),
        listings = sources.listings.len(),
        "sources loaded"
    );

    let (store, stats) = assemble(&sources, config);
    if store.is_empty() {
        tracing::warn!("no documents found; writing an empty index");
    }

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let output = output_dir.join(&config.output_file);
    let json = store.to_json()?;
    fs::write(&output, json.as_bytes()).map_err(|e| Error::io(&output, e))?;

    let report = BuildReport {
        text_docs: store.count(DocKind::Text),
        image_docs: store.count(DocKind::Image),
        artifact: ArtifactInfo::of(json.as_bytes()),
        cache_control: config.cache_control.clone(),
        stats,
        output,
    };
    tracing::info!(
        path = %report.output.display(),
        text = report.text_docs,
        images = report.image_docs,
        merged = report.stats.merged_records,
        bytes = report.artifact.bytes,
        "index written"
    );
    Ok(report)
}

pub fn format_bytes(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
