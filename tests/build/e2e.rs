//! End-to-end tests for the build workflow.

use super::common::{run, urls, write_file};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vitrine::build::{compute_crc32, run_build};
use vitrine::config::BuildConfig;
use vitrine::search::Stage;
use vitrine::{IndexStore, SearchDoc};

fn write_site(root: &Path) {
    write_file(
        root,
        "content/projects/harbor-study.md",
        "---\ntitle: Harbor Study\nkeywords: [boats, night]\n---\nStudies of the north pier.",
    );
    write_file(root, "pages/about.md", "# About\n\nA ravenous appetite for paint.");
    write_file(root, "pages/index.md", "# Welcome\n\nPaintings and prints.");
    write_file(root, "pages/search.mdx", "# Search");
    write_file(
        root,
        "data/sections/prints.json",
        r#"[
            {"slug": "raven", "stem": "2020_raven", "section": "prints", "title": "Raven",
             "year": 2020, "src": "/img/prints/raven.jpg",
             "exif": {"artist": "M. Vale", "keywords": ["bird", "black"]}},
            {"title": "no identity"}
        ]"#,
    );
    write_file(
        root,
        "data/sections/archive.json",
        r#"{"items": [
            {"slug": "Raven", "stem": "2020_raven", "section": "prints", "title": "Raven", "year": 2020},
            {"slug": "harbor-lights", "section": "paintings", "title": "Harbor Lights", "year": "2022"}
        ]}"#,
    );
    write_file(
        root,
        "data/collections/prints/birds.json",
        r#"[{"slug": "raven", "section": "prints"}]"#,
    );
    write_file(root, "data/sections/broken.json", "{ not json");
}

#[test]
fn test_run_build_e2e_basic() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_site(site.path());

    let report = run_build(site.path(), &out.path().join("dist"), &BuildConfig::default());
    assert!(report.is_ok(), "Build should succeed: {:?}", report.err());
    let report = report.unwrap();

    assert_eq!(report.output, out.path().join("dist").join("search-index.json"));
    assert!(report.output.exists(), "search-index.json should be created");
    assert_eq!(report.text_docs, 3);
    assert_eq!(report.image_docs, 2);
    assert_eq!(report.stats.merged_records, 2);
    assert_eq!(report.stats.skipped_records, 1);
    assert_eq!(report.stats.ignored_pages, 1);
    assert_eq!(report.cache_control, "public, max-age=3600, immutable");
}

#[test]
fn test_output_order_and_merge() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_site(site.path());
    let report = run_build(site.path(), out.path(), &BuildConfig::default()).unwrap();

    let store = IndexStore::load(&report.output).unwrap();
    let order: Vec<&str> = store.docs().iter().map(|d| d.url()).collect();
    assert_eq!(
        order,
        vec!["/harbor-study", "/about", "/", "/prints/raven", "/paintings/harbor-lights"]
    );

    let SearchDoc::Image(raven) = &store.docs()[3] else {
        panic!("expected an image");
    };
    // archive.json sorts before prints.json, collections come last
    assert_eq!(raven.appears_on, vec!["/archive", "/prints", "/prints/birds"]);
    assert_eq!(raven.thumb.as_deref(), Some("/img/prints/raven.jpg"));
}

#[test]
fn test_artifact_report_matches_file() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_site(site.path());
    let report = run_build(site.path(), out.path(), &BuildConfig::default()).unwrap();

    let bytes = fs::read(&report.output).unwrap();
    assert_eq!(report.artifact.bytes, bytes.len());
    assert_eq!(report.artifact.crc32, compute_crc32(&bytes));
    assert!(report.artifact.brotli_bytes < bytes.len());

    let json: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json[0]["type"], "projects");
    assert_eq!(json[1]["type"], "pages");
    assert_eq!(json[3]["type"], "image");
    assert!(json[3]["appearsOn"].is_array());
}

#[test]
fn test_built_index_is_searchable() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_site(site.path());
    let report = run_build(site.path(), out.path(), &BuildConfig::default()).unwrap();
    let store = IndexStore::load_or_empty(&report.output);

    let set = run(&store, "raven");
    assert_eq!(urls(&set), vec!["/prints/raven", "/about"]);
    assert_eq!(set.hits()[0].tier(), Stage::Exact);

    let set = run(&store, "boats");
    assert_eq!(urls(&set), vec!["/harbor-study"]);
}

#[test]
fn test_ignored_listing_is_left_out() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_site(site.path());
    let config = BuildConfig {
        ignore_listings: vec!["archive.json".to_string()],
        ..BuildConfig::default()
    };
    let report = run_build(site.path(), out.path(), &config).unwrap();
    assert_eq!(report.image_docs, 1);
    assert_eq!(report.stats.ignored_listings, 1);
}

#[test]
fn test_missing_index_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::load_or_empty(&dir.path().join("nope.json"));
    assert!(store.is_empty());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ nope").unwrap();
    assert!(IndexStore::load_or_empty(&broken).is_empty());
    assert!(IndexStore::load(&broken).is_err());
}

#[test]
fn test_latin1_page_does_not_abort_build() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(site.path(), "pages/about.md", "# About\n\nStudio notes.");
    write_file(
        site.path(),
        "data/sections/prints.json",
        r#"[{"slug": "raven", "section": "prints", "title": "Raven", "year": 2020}]"#,
    );
    fs::write(site.path().join("pages/cafe.md"), b"# Caf\xe9\n\nOpen late on Fridays.").unwrap();

    let report = run_build(site.path(), out.path(), &BuildConfig::default()).unwrap();
    assert_eq!(report.text_docs, 2);
    assert_eq!(report.image_docs, 1);

    let store = IndexStore::load(&report.output).unwrap();
    assert_eq!(urls(&run(&store, "fridays")), vec!["/cafe"]);
    assert_eq!(urls(&run(&store, "raven")), vec!["/prints/raven"]);
}
