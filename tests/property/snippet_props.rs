//! Snippets stay within `margin` characters of the match on each side.

use super::common::make_page;
use proptest::prelude::*;
use vitrine::search::QueryPatterns;
use vitrine::snippet::extract;

fn filler() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["sea", "gull", "dusk", "pier", "é", "mast"]), 0..60)
        .prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn prop_snippet_window_is_bounded(
        before in filler(),
        after in filler(),
        margin in 0usize..80,
        plural in any::<bool>(),
    ) {
        let word = if plural { "ravens" } else { "raven" };
        let text = format!("{} {} {}", before, word, after);
        let doc = make_page("/x", "X", &text);
        let patterns = QueryPatterns::new("raven").unwrap();

        let snippet = extract(&doc, &patterns, None, margin).unwrap();
        let plain = snippet.plain();
        // Window is query length plus a margin each side, plus two ellipses.
        prop_assert!(plain.chars().count() <= 5 + 2 * margin + 2);
        prop_assert!(snippet.marks().count() >= 1);
        for mark in snippet.marks() {
            prop_assert!(mark.to_lowercase().starts_with("raven"));
        }
        prop_assert_eq!(snippet.leading_ellipsis, plain.starts_with('…'));
    }

    #[test]
    fn prop_snippet_html_has_no_stray_markup(before in filler(), margin in 0usize..40) {
        let text = format!("<b>{}</b> raven & co", before);
        let doc = make_page("/x", "X", &text);
        let patterns = QueryPatterns::new("raven").unwrap();
        let html = extract(&doc, &patterns, None, margin).unwrap().to_html();
        let stripped = html.replace("<mark>", "").replace("</mark>", "");
        prop_assert!(!stripped.contains('<'));
        prop_assert!(!stripped.contains('>'));
    }
}
