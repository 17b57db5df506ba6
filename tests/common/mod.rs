//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use vitrine::config::QueryConfig;
use vitrine::search::{search, ResultSet, SearchOutcome};
use vitrine::{IndexStore, SearchDoc};

// Re-export canonical test utilities from vitrine::testing
pub use vitrine::testing::{make_image, make_page, make_text_doc};

/// Run `query` with default settings and expect a result set.
pub fn run(store: &IndexStore, query: &str) -> ResultSet {
    match search(store, query, &QueryConfig::default()) {
        SearchOutcome::Results(set) => set,
        SearchOutcome::NoQuery => panic!("query {:?} was treated as empty", query),
    }
}

/// Urls of all hits in rank order.
pub fn urls(set: &ResultSet) -> Vec<String> {
    set.iter().map(|(_, doc)| doc.url().to_string()).collect()
}

/// Urls of image hits in rank order.
pub fn image_urls(set: &ResultSet) -> Vec<String> {
    set.partition()
        .images
        .iter()
        .filter_map(|hit| set.doc(hit).map(|d| d.url().to_string()))
        .collect()
}

/// Image with an explicit year and description blob appended to its text.
pub fn make_image_with_text(slug: &str, title: &str, year: &str, route: &str, extra: &str) -> SearchDoc {
    let mut doc = make_image(slug, title, year, &[route]);
    if let SearchDoc::Image(img) = &mut doc {
        img.text = format!("{} {}", img.text, extra);
    }
    doc
}

/// A small gallery: two paintings, a print shown on two listings, and pages.
pub fn gallery() -> IndexStore {
    IndexStore::new(vec![
        make_page("/about", "About", "Studio notes and a ravenous appetite for paint."),
        make_page("/contact", "Contact", "Write to the studio."),
        make_page("/night", "Night Sky", "Paintings of the night sky over the harbor."),
        make_image("raven", "Raven", "2020", &["/prints", "/archive"]),
        make_image("harbor-lights", "Harbor Lights", "2022", &["/paintings"]),
        make_image("two-ravens", "Two Ravens", "2018", &["/paintings", "/archive"]),
    ])
}

/// Write `body` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("relative path has a parent")).unwrap();
    fs::write(path, body).unwrap();
}
