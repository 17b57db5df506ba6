//! Markdown stripping, title inference and route derivation.

use vitrine::build::markup::{
    collection_route, content_slug, infer_title, page_route, route_label, section_route,
    strip_markup,
};
use vitrine::build::source::parse_frontmatter;

#[test]
fn test_strip_removes_structure_keeps_prose() {
    let raw = r#"---
title: Harbor Study
---
import Gallery from '../components/Gallery.astro';

# Harbor Study

Painted from the [north pier](https://example.com/pier) at <strong>dusk</strong>.

```js
const boats = 3;
```

Use `oil` on linen."#;
    assert_eq!(
        strip_markup(raw),
        "# Harbor Study Painted from the north pier at dusk . Use on linen."
    );
}

#[test]
fn test_title_inference_order() {
    assert_eq!(infer_title("---\ntitle: \"Studio\"\n---\n# Other", "fallback"), "Studio");
    assert_eq!(infer_title("intro\n# Heading One\n", "fallback"), "Heading One");
    assert_eq!(infer_title("no heading here", "fallback"), "fallback");
}

#[test]
fn test_route_labels() {
    assert_eq!(route_label("/docs/setup"), "docs setup");
    assert_eq!(route_label("/"), "Page");
}

#[test]
fn test_page_routes() {
    assert_eq!(page_route("about.mdx").as_deref(), Some("/about"));
    assert_eq!(page_route("docs/index.md").as_deref(), Some("/docs"));
    assert_eq!(page_route("index.md").as_deref(), Some("/"));
    assert_eq!(page_route("notes.txt"), None);
}

#[test]
fn test_content_slugs() {
    assert_eq!(content_slug("Harbor Study.md").as_deref(), Some("harbor-study"));
    assert_eq!(content_slug("series/index.mdx").as_deref(), Some("series"));
}

#[test]
fn test_listing_routes() {
    assert_eq!(section_route("prints.json"), "/prints");
    assert_eq!(collection_route("prints", "systems.json"), "/prints/systems");
}

#[test]
fn test_frontmatter_keyword_forms() {
    let inline = parse_frontmatter("---\nkeywords: [boats, 'night']\n---\nbody");
    assert_eq!(inline.keywords, vec!["boats", "night"]);

    let block = parse_frontmatter("---\nkeywords:\n  - boats\n  - night\ndescription: Piers\n---\n");
    assert_eq!(block.keywords, vec!["boats", "night"]);
    assert_eq!(block.description.as_deref(), Some("Piers"));

    let unterminated = parse_frontmatter("---\ntitle: Lost\nbody without a fence");
    assert_eq!(unterminated.title, None);
}
