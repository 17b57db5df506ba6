//! Snippets through the public result set.

use super::common::{gallery, make_image, make_page, run};
use vitrine::search::Stage;
use vitrine::{IndexStore, MatchField, SearchDoc};

#[test]
fn test_text_hit_snippet_highlights_literal() {
    let set = run(&gallery(), "raven");
    let parts = set.partition();
    let about = parts.text[0];
    let snippet = set.snippet(about).unwrap();
    assert_eq!(snippet.field, MatchField::Text);
    assert_eq!(
        snippet.to_html(),
        "Studio notes and a <mark>raven</mark>ous appetite for paint."
    );
}

#[test]
fn test_long_text_is_windowed() {
    let text = format!(
        "{} the raven flew over {}",
        "lorem ipsum ".repeat(20),
        "dolor sit amet ".repeat(20)
    );
    let store = IndexStore::new(vec![make_page("/long", "Long", &text)]);
    let set = run(&store, "raven");
    let snippet = set.snippet(&set.hits()[0]).unwrap();

    assert!(snippet.leading_ellipsis);
    assert!(snippet.trailing_ellipsis);
    // 60 before, the match, 60 after, plus two ellipses
    assert_eq!(snippet.plain().chars().count(), 60 + 5 + 60 + 2);
    assert!(snippet.to_html().starts_with('…'));
    assert!(snippet.to_html().ends_with('…'));
}

#[test]
fn test_every_occurrence_in_window_is_marked() {
    let store = IndexStore::new(vec![make_page("/x", "X", "raven, ravens and a raven")]);
    let set = run(&store, "raven");
    let snippet = set.snippet(&set.hits()[0]).unwrap();
    assert_eq!(
        snippet.marks().collect::<Vec<_>>(),
        vec!["raven", "ravens", "raven"]
    );
}

#[test]
fn test_title_only_match_snippets_the_title() {
    let store = IndexStore::new(vec![make_page("/crows", "Crows at Dusk", "")]);
    let set = run(&store, "crows");
    let snippet = set.snippet(&set.hits()[0]).unwrap();
    assert_eq!(snippet.field, MatchField::Title);
    assert_eq!(snippet.to_html(), "<mark>Crows</mark> at Dusk");
}

#[test]
fn test_snippet_escapes_markup() {
    let store = IndexStore::new(vec![make_page("/x", "X", "<em>raven</em> & \"friends\"")]);
    let set = run(&store, "raven");
    let html = set.snippet(&set.hits()[0]).unwrap().to_html();
    assert_eq!(
        html,
        "&lt;em&gt;<mark>raven</mark>&lt;/em&gt; &amp; &quot;friends&quot;"
    );
}

#[test]
fn test_keyword_only_exact_hit_has_no_snippet() {
    // Three characters: no fuzzy stage, so there is no fuzzy span to fall back on.
    let mut doc = make_image("night-study", "Untitled", "2019", &["/drawings"]);
    if let SearchDoc::Image(img) = &mut doc {
        img.keywords = vec!["owls".into(), "night".into()];
    }
    let store = IndexStore::new(vec![doc]);
    let set = run(&store, "owl");
    assert_eq!(set.hits()[0].tier(), Stage::Exact);
    assert!(set.snippet(&set.hits()[0]).is_none());
}

#[test]
fn test_keyword_hit_falls_back_to_fuzzy_span() {
    let mut doc = make_image("night-study", "Untitled", "2019", &["/drawings"]);
    if let SearchDoc::Image(img) = &mut doc {
        img.keywords = vec!["harbor".into(), "lanterns".into()];
    }
    let store = IndexStore::new(vec![doc]);
    let set = run(&store, "lantern");
    let hit = &set.hits()[0];
    assert!(hit.sources.contains(Stage::Fuzzy));
    let snippet = set.snippet(hit).unwrap();
    assert_eq!(snippet.field, MatchField::Keywords);
    assert_eq!(snippet.marks().collect::<Vec<_>>(), vec!["lantern"]);
}
