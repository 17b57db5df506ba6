// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use vitrine::build::{format_bytes, run_build, ArtifactInfo, BuildReport};
use vitrine::config::{Config, QueryConfig};
use vitrine::index::IndexStore;
use vitrine::paginate::{paginate, PageRequest, Pager};
use vitrine::render::{render_results, sort_appears_on, NO_IMAGES};
use vitrine::search::{search, ResultSet, SearchOutcome};
use vitrine::types::{DocKind, SearchDoc};
use vitrine::{Error, Result};

mod cli;
use cli::display::*;
use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so `search --json` output stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "vitrine=debug" } else { "vitrine=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref().map(Path::new))?;

    match cli.command {
        Commands::Index { input, output } => {
            let start = Instant::now();
            let report = run_build(Path::new(&input), Path::new(&output), &config.build)?;
            print_build_report(&report);
            eprintln!(
                "✅ Build complete in {:.2}s",
                start.elapsed().as_secs_f64()
            );
        }
        Commands::Inspect { file } => inspect_index(Path::new(&file))?,
        Commands::Search {
            file,
            query,
            page,
            per,
            json,
            html,
        } => {
            let store = IndexStore::load_or_empty(Path::new(&file));
            let request = PageRequest::from_params(page.as_deref(), per.as_deref(), &config.query);

            let start = Instant::now();
            let outcome = search(&store, &query, &config.query);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            match OutputFormat::from_flags(json, html) {
                OutputFormat::Json => {
                    let value = search_json(&outcome, request, &config.query);
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Html => {
                    if let Some(set) = outcome.results() {
                        println!("{}", render_results(set, request, &config.query).to_html());
                    }
                }
                OutputFormat::Pretty => match outcome.results() {
                    Some(set) => print_results(set, request, &config.query, elapsed_ms),
                    None => println!("Type something to search."),
                },
            }
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX
// ═══════════════════════════════════════════════════════════════════════════

fn print_build_report(report: &BuildReport) {
    let stats = &report.stats;
    println!();
    title("VITRINE INDEX");
    section_top("DOCUMENTS");
    row(&format!("  Text documents    {}", report.text_docs));
    row(&format!("  Image documents   {}", report.image_docs));
    row(&format!("  Merged duplicates {}", stats.merged_records));
    row(&format!("  Skipped records   {}", stats.skipped_records));
    if stats.ignored_listings + stats.ignored_pages > 0 {
        row(&dim(&format!(
            "  Ignored: {} listing(s), {} page(s)",
            stats.ignored_listings, stats.ignored_pages
        )));
    }
    section_mid("ARTIFACT");
    row(&format!(
        "  {}",
        truncate(&report.output.display().to_string(), BOX_WIDTH - 4)
    ));
    print_artifact_rows(&report.artifact);
    row(&format!("  Cache-Control {}", report.cache_control));
    section_bot();
}

fn print_artifact_rows(artifact: &ArtifactInfo) {
    row(&format!("  Size          {}", format_bytes(artifact.bytes)));
    row(&format!(
        "  Brotli        {} {}",
        pad_right(&format_bytes(artifact.brotli_bytes), 10),
        savings_colored(artifact.bytes, artifact.brotli_bytes)
    ));
    row(&format!("  CRC32         {:08x}", artifact.crc32));
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn inspect_index(path: &Path) -> Result<()> {
    let raw = fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let json = String::from_utf8_lossy(&raw);
    let store = IndexStore::from_json_str(&json).map_err(|e| Error::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in store.docs() {
        *by_type.entry(doc.type_tag()).or_default() += 1;
    }
    let images = store.docs().iter().filter_map(|doc| match doc {
        SearchDoc::Image(img) => Some(img),
        SearchDoc::Text(_) => None,
    });
    let (mut multi_listing, mut undated) = (0usize, 0usize);
    for img in images {
        if img.appears_on.len() > 1 {
            multi_listing += 1;
        }
        if img.year.as_ref().and_then(|y| y.value()).is_none() {
            undated += 1;
        }
    }

    println!();
    title("VITRINE INSPECT");
    section_top("DOCUMENTS");
    row(&format!("  Total             {}", store.len()));
    row(&format!("  Text              {}", store.count(DocKind::Text)));
    row(&format!("  Image             {}", store.count(DocKind::Image)));
    for (tag, count) in &by_type {
        row(&format!("    {} {}", kind_label(tag), count));
    }
    section_mid("IMAGES");
    row(&format!("  On several listings {}", multi_listing));
    row(&format!("  Without a year      {}", undated));
    section_mid("SIZE");
    print_artifact_rows(&ArtifactInfo::of(&raw));
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn print_results(set: &ResultSet, request: PageRequest, config: &QueryConfig, elapsed_ms: f64) {
    let parts = set.partition();
    let page = paginate(&parts.images, request);
    let pager = Pager::new(&page, set.query(), &config.search_route);

    println!();
    title("VITRINE SEARCH");
    section_top("QUERY");
    row(&format!("  {}", set.summary()));
    row(&format!("  {}", timing_ms(elapsed_ms)));

    if !parts.text.is_empty() {
        section_mid("PAGES");
        for hit in &parts.text {
            let Some(doc) = set.doc(hit) else { continue };
            row(&format!(
                "  {} {} {} {}",
                score_value(hit.score),
                stage_badge(&hit.sources.to_string()),
                kind_label(doc.type_tag()),
                truncate(doc.title(), 40)
            ));
            row(&format!("    {}", dim(&truncate(doc.url(), BOX_WIDTH - 6))));
            if let Some(snippet) = set.snippet(hit) {
                row(&format!("    {}", truncate(&snippet.plain(), BOX_WIDTH - 6)));
            }
        }
    }

    section_mid(&format!("IMAGES · {}", pager.label));
    if parts.images.is_empty() {
        row(&format!("  {}", NO_IMAGES));
    } else if page.beyond_last {
        row(&dim("  No images on this page."));
    }
    for hit in page.items {
        let Some(SearchDoc::Image(img)) = set.doc(hit) else { continue };
        let year = img.year.as_ref().map(ToString::to_string).unwrap_or_default();
        row(&format!(
            "  {} {} {} {}",
            score_value(hit.score),
            stage_badge(&hit.sources.to_string()),
            truncate(&img.title, 40),
            dim(&year)
        ));
        let appears = sort_appears_on(&img.appears_on, config);
        if !appears.is_empty() {
            row(&format!(
                "    {}",
                dim(&truncate(&appears.join(", "), BOX_WIDTH - 6))
            ));
        }
    }
    if pager.visible {
        section_mid("PAGER");
        for (label, link) in [(Pager::PREV_TEXT, &pager.prev), (Pager::NEXT_TEXT, &pager.next)] {
            if let Some(link) = link {
                row(&format!("  {} {}", label, dim(link)));
            }
        }
    }
    section_bot();
}

fn search_json(outcome: &SearchOutcome, request: PageRequest, config: &QueryConfig) -> serde_json::Value {
    let Some(set) = outcome.results() else {
        return serde_json::json!({ "noQuery": true });
    };
    let parts = set.partition();

    let text: Vec<_> = parts
        .text
        .iter()
        .filter_map(|hit| {
            let doc = set.doc(hit)?;
            Some(serde_json::json!({
                "type": doc.type_tag(),
                "title": doc.title(),
                "url": doc.url(),
                "sources": hit.sources.to_string(),
                "score": hit.score,
                "snippet": set.snippet(hit).map(|s| s.plain()),
            }))
        })
        .collect();

    let page = paginate(&parts.images, request);
    let pager = Pager::new(&page, set.query(), &config.search_route);
    let images: Vec<_> = page
        .items
        .iter()
        .filter_map(|hit| match set.doc(hit)? {
            SearchDoc::Image(img) => Some(serde_json::json!({
                "title": img.title,
                "url": img.url,
                "year": img.year,
                "stem": img.anchor_stem(),
                "appearsOn": sort_appears_on(&img.appears_on, config),
                "sources": hit.sources.to_string(),
                "score": hit.score,
                "snippet": set.snippet(hit).map(|s| s.plain()),
            })),
            SearchDoc::Text(_) => None,
        })
        .collect();

    serde_json::json!({
        "query": set.query(),
        "summary": set.summary(),
        "text": text,
        "images": {
            "page": page.page,
            "per": page.per,
            "totalItems": page.total_items,
            "totalPages": page.total_pages,
            "beyondLast": page.beyond_last,
            "prev": pager.prev,
            "next": pager.next,
            "items": images,
        },
    })
}
