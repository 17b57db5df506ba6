//! Fusion folds stage hits into one entry per identity, and folding twice changes nothing.

use super::common::{make_image, make_page};
use proptest::prelude::*;
use std::collections::HashSet;
use vitrine::config::QueryConfig;
use vitrine::search::fusion::{fuse, HitMerger};
use vitrine::search::stages::{exact_stage, fuzzy_stage, substring_stage};
use vitrine::search::QueryPatterns;
use vitrine::SearchDoc;

fn corpus_strategy() -> impl Strategy<Value = Vec<SearchDoc>> {
    let word = prop::sample::select(vec!["raven", "ravens", "ravne", "harbor", "gull", "paint"]);
    let doc = (any::<bool>(), prop::collection::vec(word, 1..4), 0usize..6).prop_map(
        |(image, words, id)| {
            let title = words.join(" ");
            if image {
                // Small id space so identities collide across records.
                make_image(&format!("img-{}", id), &title, "2020", &["/prints"])
            } else {
                make_page(&format!("/p{}", id), &title, &title)
            }
        },
    );
    prop::collection::vec(doc, 0..20)
}

proptest! {
    #[test]
    fn prop_merge_is_idempotent(docs in corpus_strategy()) {
        let patterns = QueryPatterns::new("raven").unwrap();
        let config = QueryConfig::default();
        let exact = exact_stage(&docs, &patterns);
        let substring = substring_stage(&docs, &patterns);
        let fuzzy = fuzzy_stage(&docs, "raven", &config);

        let once = fuse(&docs, exact.clone(), substring.clone(), fuzzy.clone());

        let mut merger = HitMerger::new(&docs);
        for _ in 0..2 {
            merger.merge_all(exact.clone());
            merger.merge_all(substring.clone());
            merger.merge_all(fuzzy.clone());
        }
        prop_assert_eq!(merger.into_hits(), once);
    }

    #[test]
    fn prop_one_entry_per_identity(docs in corpus_strategy()) {
        let patterns = QueryPatterns::new("raven").unwrap();
        let fused = fuse(
            &docs,
            exact_stage(&docs, &patterns),
            substring_stage(&docs, &patterns),
            fuzzy_stage(&docs, "raven", &QueryConfig::default()),
        );
        let mut seen = HashSet::new();
        for hit in &fused {
            prop_assert!(seen.insert(docs[hit.doc_idx].identity().to_string()));
            prop_assert!(!hit.sources.is_empty());
            prop_assert!(hit.score > 0.0 && hit.score <= hit.tier().base_score().max(100.0));
        }
    }

    #[test]
    fn prop_exact_hits_are_substring_hits(docs in corpus_strategy()) {
        // Anything matching as a whole word also matches literally.
        let patterns = QueryPatterns::new("raven").unwrap();
        let exact: HashSet<usize> = exact_stage(&docs, &patterns).iter().map(|h| h.doc_idx).collect();
        let substring: HashSet<usize> =
            substring_stage(&docs, &patterns).iter().map(|h| h.doc_idx).collect();
        prop_assert!(exact.is_subset(&substring));
    }
}
