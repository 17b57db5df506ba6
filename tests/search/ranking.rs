//! Final ordering: tier, then year, then score, then title.

use super::common::{image_urls, make_image, make_page, run, urls};
use vitrine::IndexStore;

#[test]
fn test_newer_images_first_within_tier() {
    let store = IndexStore::new(vec![
        make_image("old-harbor", "Harbor 1999", "1999", &["/paintings"]),
        make_image("undated-harbor", "Harbor Undated", "", &["/paintings"]),
        make_image("new-harbor", "Harbor 2023", "2023", &["/paintings"]),
        make_image("mid-harbor", "Harbor 2010", "2010", &["/paintings"]),
    ]);
    let set = run(&store, "harbor");
    assert_eq!(
        image_urls(&set),
        vec![
            "/paintings/new-harbor",
            "/paintings/mid-harbor",
            "/paintings/old-harbor",
            "/paintings/undated-harbor",
        ]
    );
}

#[test]
fn test_title_breaks_year_ties_case_insensitively() {
    let store = IndexStore::new(vec![
        make_image("c", "crows", "2020", &["/prints"]),
        make_image("a", "Birds", "2020", &["/prints"]),
        make_image("b", "ashes", "2020", &["/prints"]),
    ]);
    let set = run(&store, "2020");
    assert_eq!(
        image_urls(&set),
        vec!["/prints/b", "/prints/a", "/prints/c"]
    );
}

#[test]
fn test_old_exact_beats_new_substring() {
    let store = IndexStore::new(vec![
        make_image("gulls", "Gulls", "2024", &["/prints"]),
        make_image("gull", "Gull", "1980", &["/prints"]),
    ]);
    // Both exact (one via plural): year decides.
    let set = run(&store, "gull");
    assert_eq!(image_urls(&set), vec!["/prints/gulls", "/prints/gull"]);

    let store = IndexStore::new(vec![
        make_image("seagulls", "Seagulls", "2024", &["/prints"]),
        make_image("gull", "Gull", "1980", &["/prints"]),
    ]);
    let set = run(&store, "gull");
    assert_eq!(image_urls(&set), vec!["/prints/gull", "/prints/seagulls"]);
}

#[test]
fn test_order_is_deterministic() {
    let store = IndexStore::new(vec![
        make_page("/a", "Same", "studio"),
        make_page("/b", "Same", "studio"),
        make_page("/c", "same", "studio"),
    ]);
    let first = urls(&run(&store, "studio"));
    assert_eq!(first, vec!["/a", "/b", "/c"]);
    for _ in 0..5 {
        assert_eq!(urls(&run(&store, "studio")), first);
    }
}
