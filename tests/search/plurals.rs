//! Plural-aware whole-word matching.

use super::common::{make_page, run, urls};
use vitrine::search::Stage;
use vitrine::IndexStore;

fn store() -> IndexStore {
    IndexStore::new(vec![
        make_page("/print", "Print", "a single print"),
        make_page("/prints", "Prints", "new prints every month"),
        make_page("/printer", "Printer", "the printer is broken"),
        make_page("/sprint", "Sprint", "a short sprint"),
        make_page("/boxes", "Boxes", "boxes of letters"),
    ])
}

fn tier_of(query: &str, url: &str) -> Option<Stage> {
    let set = run(&store(), query);
    let tier = set
        .iter()
        .find(|(_, doc)| doc.url() == url)
        .map(|(hit, _)| hit.tier());
    tier
}

#[test]
fn test_s_plural_is_exact() {
    assert_eq!(tier_of("print", "/print"), Some(Stage::Exact));
    assert_eq!(tier_of("print", "/prints"), Some(Stage::Exact));
}

#[test]
fn test_longer_word_is_substring_only() {
    assert_eq!(tier_of("print", "/printer"), Some(Stage::Substring));
    assert_eq!(tier_of("print", "/sprint"), Some(Stage::Substring));
}

#[test]
fn test_es_plural_is_exact() {
    assert_eq!(tier_of("box", "/boxes"), Some(Stage::Exact));
}

#[test]
fn test_plural_query_does_not_match_singular_exactly() {
    assert_eq!(tier_of("prints", "/prints"), Some(Stage::Exact));
    assert_ne!(tier_of("prints", "/print"), Some(Stage::Exact));
}

#[test]
fn test_exact_hits_lead() {
    let set = run(&store(), "print");
    let found = urls(&set);
    assert_eq!(&found[..2], &["/print".to_string(), "/prints".to_string()]);
}
