// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTML fragments for a page of results.
//!
//! Textual hits render as a flat list of links with snippets. Image hits
//! render as gallery cards: a responsive `<picture>`, data attributes the
//! lightbox reads, and an "Appears on" list ordered so the primary listing
//! comes first and the archive last.
//!
//! Every interpolated value is escaped; `<mark>` is the only markup that
//! originates from the query.

use std::fmt::Write as _;

use crate::config::QueryConfig;
use crate::paginate::{paginate, PageRequest, Pager};
use crate::search::{QueryPatterns, RankedHit, ResultSet};
use crate::types::{ImageDoc, Sale, SearchDoc};

/// `sizes` attribute shared by every thumbnail, matching the gallery grid breakpoints.
pub const THUMB_SIZES: &str = "(max-width: 520px) calc(100vw - 2.5rem), \
(max-width: 900px) calc((100vw - 2.5rem - 10px) / 2), \
(max-width: 1151px) calc((min(100vw, 1200px) - 2.5rem - 3*10px) / 4), \
(max-width: 1200px) calc((min(100vw, 1200px) - 2.5rem - 4*10px) / 5), \
calc((min(100vw, 1200px) - 2.5rem - 4*10px) / 5)";

/// Aspect ratio assumed for images without one.
pub const DEFAULT_AR: f64 = 0.75;

/// Fallback thumbnail width.
const FALLBACK_WIDTH: u32 = 480;

pub const NO_IMAGES: &str = "No images matched your query.";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a title and wrap every query occurrence (plural suffix included) in `<mark>`.
pub fn highlight_title(title: &str, patterns: Option<&QueryPatterns>) -> String {
    let Some(patterns) = patterns else {
        return escape_html(title);
    };
    let mut out = String::new();
    let mut pos = 0;
    for (start, end) in patterns.highlights(title) {
        out.push_str(&escape_html(&title[pos..start]));
        let _ = write!(out, "<mark>{}</mark>", escape_html(&title[start..end]));
        pos = end;
    }
    out.push_str(&escape_html(&title[pos..]));
    out
}

fn route_priority(route: &str, config: &QueryConfig) -> u8 {
    let route = route.to_lowercase();
    if route.contains(&config.archive_route.to_lowercase()) {
        99
    } else if route.starts_with(&config.primary_route.to_lowercase()) {
        0
    } else {
        10
    }
}

/// Deduplicate listing routes and order them primary first, archive last.
///
/// Routes of equal priority keep their insertion order.
pub fn sort_appears_on(routes: &[String], config: &QueryConfig) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(routes.len());
    for route in routes {
        if !unique.contains(route) {
            unique.push(route.clone());
        }
    }
    unique.sort_by_key(|r| route_priority(r, config));
    unique
}

fn srcset(section: &str, stem: &str, ext: &str, config: &QueryConfig) -> String {
    config
        .thumb_widths
        .iter()
        .map(|w| format!("{}/{}/{}-w{}.{} {}w", config.thumb_root, section, stem, w, ext, w))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Responsive `<picture>`: avif and webp sources over a jpg `<img>`.
pub fn picture_html(img: &ImageDoc, priority: bool, config: &QueryConfig) -> String {
    let section = escape_html(&img.section);
    let stem = escape_html(img.anchor_stem());
    let fallback_width = if config.thumb_widths.contains(&FALLBACK_WIDTH) {
        FALLBACK_WIDTH
    } else {
        config.thumb_widths.first().copied().unwrap_or(FALLBACK_WIDTH)
    };

    let mut out = String::from("<picture>\n");
    for (mime, ext) in [("image/avif", "avif"), ("image/webp", "webp")] {
        let _ = writeln!(
            out,
            "  <source type=\"{}\" srcset=\"{}\" sizes=\"{}\">",
            mime,
            srcset(&section, &stem, ext, config),
            THUMB_SIZES
        );
    }
    let _ = write!(
        out,
        "  <img src=\"{root}/{section}/{stem}-w{fw}.jpg\" srcset=\"{jpg}\" sizes=\"{sizes}\" alt=\"{alt}\"",
        root = config.thumb_root,
        fw = fallback_width,
        jpg = srcset(&section, &stem, "jpg", config),
        sizes = THUMB_SIZES,
        alt = escape_html(&img.title),
    );
    if let Some(w) = img.width {
        let _ = write!(out, " width=\"{}\"", w);
    }
    if let Some(h) = img.height {
        let _ = write!(out, " height=\"{}\"", h);
    }
    let (loading, fetch) = if priority { ("eager", "high") } else { ("lazy", "auto") };
    let _ = write!(
        out,
        " loading=\"{}\" fetchpriority=\"{}\" decoding=\"async\">\n</picture>",
        loading, fetch
    );
    out
}

/// A textual hit: link with highlighted title and optional snippet.
pub fn render_text_hit(set: &ResultSet, hit: &RankedHit, doc: &SearchDoc) -> String {
    let mut out = format!(
        "<li class=\"page-item\"><a class=\"page-link\" href=\"{}\">{}</a>",
        escape_html(doc.url()),
        highlight_title(doc.title(), set.patterns())
    );
    if let Some(snippet) = set.snippet(hit) {
        let _ = write!(out, "<p class=\"snippet\">{}</p>", snippet.to_html());
    }
    out.push_str("</li>");
    out
}

/// An image hit as a gallery card. `index` is the card's position on the page.
pub fn render_image_card(
    set: &ResultSet,
    hit: &RankedHit,
    img: &ImageDoc,
    index: usize,
    config: &QueryConfig,
) -> String {
    let appears = sort_appears_on(&img.appears_on, config);
    let anchor_section = appears
        .first()
        .cloned()
        .unwrap_or_else(|| format!("/{}", img.section));
    let anchor_section = anchor_section.trim_start_matches('/');
    let stem = img.anchor_stem();
    let href = format!("/{}#{}", anchor_section, stem);
    let ar = img.ar.unwrap_or(DEFAULT_AR);
    let rows = img.rows.unwrap_or(1).max(1);
    let year = img.year.as_ref().map(ToString::to_string).unwrap_or_default();

    let mut out = String::from("<div class=\"card-wrap\">\n");
    let _ = writeln!(
        out,
        "<a id=\"{stem}\" class=\"card\" style=\"grid-row-end: span {rows}; --ar:{ar};\" \
data-index=\"{index}\" data-ar=\"{ar}\" href=\"{href}\" rel=\"noopener\" \
data-title=\"{title}\" data-year=\"{year}\" data-artist=\"{artist}\" data-desc=\"{desc}\" \
data-sale=\"{sale}\" data-section=\"{section}\" data-stem=\"{stem}\">",
        stem = escape_html(stem),
        rows = rows,
        ar = ar,
        index = index,
        href = escape_html(&href),
        title = escape_html(&img.title),
        year = escape_html(&year),
        artist = escape_html(&img.artist),
        desc = escape_html(&img.description),
        sale = img.sale.unwrap_or(Sale::Private).as_str(),
        section = escape_html(anchor_section),
    );
    out.push_str(&picture_html(img, index == 0, config));
    let _ = write!(
        out,
        "\n<div class=\"overlay\" aria-hidden=\"true\"><div><div class=\"title\">{}</div>",
        escape_html(&img.title)
    );
    if !year.is_empty() {
        let _ = write!(out, "<div class=\"sub\">{}</div>", escape_html(&year));
    }
    out.push_str("</div></div>\n</a>\n");

    let _ = write!(
        out,
        "<div class=\"card-body\"><a class=\"title\" href=\"{}\">{}</a><div class=\"chips\">",
        escape_html(&href),
        highlight_title(&img.title, set.patterns())
    );
    if !img.artist.is_empty() {
        let _ = write!(out, "<span class=\"chip\">{}</span>", escape_html(&img.artist));
    }
    out.push_str("</div>");
    if let Some(snippet) = set.snippet(hit) {
        let _ = write!(out, "<p class=\"snippet\">{}</p>", snippet.to_html());
    }
    if !appears.is_empty() {
        let links: Vec<String> = appears
            .iter()
            .map(|r| {
                let r = escape_html(r);
                format!("<a href=\"{}\">{}</a>", r, r)
            })
            .collect();
        let _ = write!(out, "<p class=\"also-on\">Appears on: {}</p>", links.join(", "));
    }
    out.push_str("</div>\n</div>");
    out
}

/// Prev/next links and the page label; empty when the pager is hidden.
pub fn render_pager(pager: &Pager) -> String {
    if !pager.visible {
        return String::new();
    }
    let link = |href: &Option<String>, text: &str, class: &str| match href {
        Some(h) => format!("<a class=\"{}\" href=\"{}\">{}</a>", class, escape_html(h), text),
        None => format!("<a class=\"{} disabled\" href=\"#\">{}</a>", class, text),
    };
    format!(
        "<nav class=\"pager\">{}<span class=\"page-info\">{}</span>{}</nav>",
        link(&pager.prev, Pager::PREV_TEXT, "prev"),
        escape_html(&pager.label),
        link(&pager.next, Pager::NEXT_TEXT, "next")
    )
}

/// Everything a results page shows for one query and page request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub summary: String,
    /// One `<li>` per textual hit; all of them, unpaginated.
    pub text_items: Vec<String>,
    /// Cards for the requested page of image hits.
    pub image_cards: Vec<String>,
    pub pager: Pager,
    pub total_images: usize,
    pub beyond_last: bool,
}

impl RenderedResults {
    pub fn to_html(&self) -> String {
        let mut out = format!("<p id=\"search-meta\">{}</p>\n", escape_html(&self.summary));
        if !self.text_items.is_empty() {
            let _ = writeln!(
                out,
                "<section id=\"results-pages\"><ul class=\"page-list\">\n{}\n</ul></section>",
                self.text_items.join("\n")
            );
        }
        out.push_str("<section id=\"results-images\">\n");
        if self.total_images == 0 {
            let _ = writeln!(out, "<p>{}</p>", NO_IMAGES);
        } else {
            let _ = writeln!(out, "<div id=\"image-grid\">\n{}\n</div>", self.image_cards.join("\n"));
            out.push_str(&render_pager(&self.pager));
        }
        out.push_str("</section>");
        out
    }
}

/// Render one page of a result set.
pub fn render_results(set: &ResultSet, request: PageRequest, config: &QueryConfig) -> RenderedResults {
    let parts = set.partition();

    let text_items = parts
        .text
        .iter()
        .filter_map(|hit| set.doc(hit).map(|doc| render_text_hit(set, hit, doc)))
        .collect();

    let page = paginate(&parts.images, request);
    let image_cards = page
        .items
        .iter()
        .enumerate()
        .filter_map(|(i, hit)| match set.doc(hit)? {
            SearchDoc::Image(img) => Some(render_image_card(set, hit, img, i, config)),
            SearchDoc::Text(_) => None,
        })
        .collect();

    RenderedResults {
        summary: set.summary(),
        text_items,
        image_cards,
        pager: Pager::new(&page, set.query(), &config.search_route),
        total_images: page.total_items,
        beyond_last: page.beyond_last,
    }
}
