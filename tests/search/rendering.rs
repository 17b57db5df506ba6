//! Rendered result markup.

use super::common::{gallery, make_page, run};
use vitrine::config::QueryConfig;
use vitrine::paginate::PageRequest;
use vitrine::render::{render_results, NO_IMAGES};
use vitrine::IndexStore;

fn first_page() -> PageRequest {
    PageRequest::new(None, None, &QueryConfig::default())
}

#[test]
fn test_text_only_results_say_no_images() {
    let store = IndexStore::new(vec![make_page("/contact", "Contact", "write to the studio")]);
    let set = run(&store, "studio");
    let rendered = render_results(&set, first_page(), &QueryConfig::default());
    assert_eq!(rendered.text_items.len(), 1);
    assert!(rendered.image_cards.is_empty());
    assert!(!rendered.pager.visible);

    let html = rendered.to_html();
    assert!(html.contains(NO_IMAGES));
    assert!(html.contains("1 result for “studio”"));
    assert!(!html.contains("class=\"pager\""));
}

#[test]
fn test_image_cards_link_to_primary_listing() {
    let set = run(&gallery(), "raven");
    let rendered = render_results(&set, first_page(), &QueryConfig::default());
    assert_eq!(rendered.image_cards.len(), 2);

    // Raven is on /prints and /archive: the archive is never the anchor.
    let raven = &rendered.image_cards[0];
    assert!(raven.contains("href=\"/prints#raven\""));
    assert!(raven.contains("Appears on: <a href=\"/prints\">/prints</a>, <a href=\"/archive\">/archive</a>"));
    assert!(raven.contains("data-sale=\"PRIVATE\""));
    assert!(raven.contains("loading=\"eager\" fetchpriority=\"high\""));

    // Two Ravens is on /paintings first.
    let two = &rendered.image_cards[1];
    assert!(two.contains("href=\"/paintings#two-ravens\""));
    assert!(two.contains("loading=\"lazy\""));
    assert!(two.contains("Two <mark>Ravens</mark>"));
}

#[test]
fn test_text_item_highlights_title() {
    let store = IndexStore::new(vec![make_page("/crows", "Crows & Ravens", "")]);
    let set = run(&store, "raven");
    let rendered = render_results(&set, first_page(), &QueryConfig::default());
    assert!(rendered.text_items[0].contains("Crows &amp; <mark>Ravens</mark>"));
    assert!(rendered.text_items[0].contains("href=\"/crows\""));
}
