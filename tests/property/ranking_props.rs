//! Ranking is a total, repeatable order.

use super::common::{make_image, make_page};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use vitrine::config::QueryConfig;
use vitrine::scoring::compare_hits;
use vitrine::search::{search, Sources, Stage};
use vitrine::search::fusion::FusedHit;
use vitrine::{IndexStore, SearchDoc};

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "raven", "ravens", "harbor", "night", "sky", "paint", "print", "prints", "studio", "gull",
    ])
    .prop_map(str::to_string)
}

fn doc_strategy() -> impl Strategy<Value = SearchDoc> {
    let title = prop::collection::vec(word_strategy(), 1..3).prop_map(|w| w.join(" "));
    let text = prop::collection::vec(word_strategy(), 0..6).prop_map(|w| w.join(" "));
    let year = prop::sample::select(vec!["", "1999", "2010", "2020", "2024"]);
    (any::<bool>(), title, text, year, 0usize..1000).prop_map(|(image, title, text, year, id)| {
        if image {
            make_image(&format!("img-{}", id), &title, year, &["/prints"])
        } else {
            make_page(&format!("/page-{}", id), &title, &text)
        }
    })
}

fn corpus_strategy() -> impl Strategy<Value = Vec<SearchDoc>> {
    prop::collection::vec(doc_strategy(), 0..25)
}

fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::ALL.to_vec())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_comparator_is_antisymmetric(
        docs in prop::collection::vec(doc_strategy(), 2..8),
        stages in prop::collection::vec(stage_strategy(), 8),
        scores in prop::collection::vec(0.0f64..100.0, 8),
    ) {
        let hits: Vec<FusedHit> = (0..docs.len())
            .map(|i| FusedHit {
                doc_idx: i,
                sources: Sources::single(stages[i]),
                score: scores[i],
                location: None,
                fuzzy_location: None,
            })
            .collect();
        for a in &hits {
            for b in &hits {
                let ab = compare_hits(a, b, &docs);
                let ba = compare_hits(b, a, &docs);
                prop_assert_eq!(ab, ba.reverse());
                if a.doc_idx != b.doc_idx {
                    prop_assert_ne!(ab, Ordering::Equal);
                }
            }
        }
    }

    #[test]
    fn prop_results_are_sorted_and_unique(docs in corpus_strategy(), query in word_strategy()) {
        let store = IndexStore::new(docs);
        let outcome = search(&store, &query, &QueryConfig::default());
        let set = outcome.results().unwrap();

        let mut seen = HashSet::new();
        for (_, doc) in set.iter() {
            prop_assert!(seen.insert(doc.identity().to_string()));
        }
        for pair in set.hits().windows(2) {
            prop_assert_ne!(
                compare_hits(&pair[0], &pair[1], store.docs()),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn prop_search_is_repeatable(docs in corpus_strategy(), query in word_strategy()) {
        let store = IndexStore::new(docs);
        let config = QueryConfig::default();
        let a = search(&store, &query, &config).into_results().unwrap();
        let b = search(&store, &query, &config).into_results().unwrap();
        prop_assert_eq!(a.hits(), b.hits());
    }
}
