//! Concurrent queries against shared index clones.

use super::common::{gallery, run, urls};
use std::thread;

#[test]
fn test_parallel_queries_match_sequential() {
    let store = gallery();
    let queries = ["raven", "harbor", "studio", "paint", "night sky", "ravne"];
    let expected: Vec<Vec<String>> = queries.iter().map(|q| urls(&run(&store, q))).collect();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                queries
                    .iter()
                    .cycle()
                    .skip(t)
                    .take(queries.len() * 4)
                    .map(|q| (q.to_string(), urls(&run(&store, q))))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (query, got) in handle.join().unwrap() {
            let i = queries.iter().position(|q| *q == query).unwrap();
            assert_eq!(got, expected[i], "query {}", query);
        }
    }
}
