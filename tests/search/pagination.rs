//! Partitioning and paging of image results.

use super::common::{make_image, make_page, run};
use std::collections::HashSet;
use vitrine::config::QueryConfig;
use vitrine::paginate::{paginate, PageRequest, Pager};
use vitrine::{IndexStore, ResultSet};

fn harbor_store(images: usize, pages: usize) -> IndexStore {
    let mut docs = Vec::new();
    for i in 0..pages {
        docs.push(make_page(&format!("/notes/{}", i), &format!("Harbor note {}", i), ""));
    }
    for i in 0..images {
        docs.push(make_image(
            &format!("harbor-{:03}", i),
            &format!("Harbor {:03}", i),
            "2020",
            &["/paintings"],
        ));
    }
    IndexStore::new(docs)
}

fn page_urls(set: &ResultSet, page: usize, per: usize) -> (Vec<String>, bool) {
    let parts = set.partition();
    let request = PageRequest::new(Some(page), Some(per), &QueryConfig::default());
    let page = paginate(&parts.images, request);
    let urls = page
        .items
        .iter()
        .map(|hit| set.doc(hit).unwrap().url().to_string())
        .collect();
    (urls, page.beyond_last)
}

#[test]
fn test_partition_keeps_text_whole() {
    let set = run(&harbor_store(130, 3), "harbor");
    let parts = set.partition();
    assert_eq!(parts.text.len(), 3);
    assert_eq!(parts.images.len(), 130);
}

#[test]
fn test_pages_cover_every_image_once() {
    let set = run(&harbor_store(130, 0), "harbor");
    let mut seen = HashSet::new();
    let mut sizes = Vec::new();
    for page in 1..=3 {
        let (urls, beyond) = page_urls(&set, page, 48);
        assert!(!beyond);
        sizes.push(urls.len());
        for url in urls {
            assert!(seen.insert(url));
        }
    }
    assert_eq!(sizes, vec![48, 48, 34]);
    assert_eq!(seen.len(), 130);
}

#[test]
fn test_page_beyond_last_is_empty() {
    let set = run(&harbor_store(130, 0), "harbor");
    let (urls, beyond) = page_urls(&set, 4, 48);
    assert!(urls.is_empty());
    assert!(beyond);
}

#[test]
fn test_first_page_follows_rank_order() {
    let set = run(&harbor_store(10, 0), "harbor");
    let (urls, _) = page_urls(&set, 1, 4);
    assert_eq!(
        urls,
        vec![
            "/paintings/harbor-000",
            "/paintings/harbor-001",
            "/paintings/harbor-002",
            "/paintings/harbor-003",
        ]
    );
}

#[test]
fn test_request_parsing_clamps() {
    let config = QueryConfig::default();
    let req = PageRequest::from_params(Some("0"), Some("1000"), &config);
    assert_eq!((req.page, req.per), (1, 96));
    let req = PageRequest::from_params(None, None, &config);
    assert_eq!((req.page, req.per), (1, 48));
}

#[test]
fn test_pager_for_middle_page() {
    let set = run(&harbor_store(130, 0), "harbor");
    let parts = set.partition();
    let request = PageRequest::new(Some(2), Some(48), &QueryConfig::default());
    let page = paginate(&parts.images, request);
    let pager = Pager::new(&page, set.query(), "/search");

    assert!(pager.visible);
    assert_eq!(pager.label, "Page 2 of 3");
    assert_eq!(pager.prev.as_deref(), Some("/search?q=harbor&page=1&per=48"));
    assert_eq!(pager.next.as_deref(), Some("/search?q=harbor&page=3&per=48"));
}
