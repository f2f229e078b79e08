//! HTML extraction for SEO analysis.
//!
//! Extracts the page elements the SEO score looks at:
//! - Canonical URL (`Link` header or `<link rel="canonical">`)
//! - Meta robots, meta description
//! - Hreflang alternates
//! - Title and first H1
//! - Structured data markers

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::types::HreflangLink;
use crate::config::HEADER_LINK;
use crate::fetch::headers::non_empty;

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";
const H1_SELECTOR_STR: &str = "h1";
const META_NAMED_SELECTOR_STR: &str = "meta[name][content]";
const LINK_REL_SELECTOR_STR: &str = "link[rel][href]";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(TITLE_SELECTOR_STR, "TITLE_SELECTOR"));
static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(H1_SELECTOR_STR, "H1_SELECTOR"));
static META_NAMED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(META_NAMED_SELECTOR_STR, "META_NAMED_SELECTOR"));
static LINK_REL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(LINK_REL_SELECTOR_STR, "LINK_REL_SELECTOR"));

static LINK_HEADER_CANONICAL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)<([^>]+)>\s*;\s*rel=["']?canonical["']?"#)
        .map_err(|e| log::error!("Failed to compile Link header pattern: {e}"))
        .ok()
});

/// Parses a static selector, falling back to one that matches nothing.
fn parse_selector(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").unwrap_or_else(|_| unreachable!("fallback selector is valid"))
    })
}

/// Elements extracted from the terminal page.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PageSignals {
    pub canonical: Option<String>,
    pub meta_robots: Option<String>,
    pub hreflang: Vec<HreflangLink>,
    pub has_structured_data: bool,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
}

impl PageSignals {
    /// Extracts signals from the response headers and (optional) body.
    pub fn extract(headers: &BTreeMap<String, String>, body: Option<&str>) -> Self {
        let header_canonical = canonical_from_link_header(headers);

        let Some(body) = body else {
            return Self {
                canonical: header_canonical,
                ..Self::default()
            };
        };

        let document = Html::parse_document(body);

        Self {
            canonical: header_canonical.or_else(|| link_href(&document, "canonical")),
            meta_robots: meta_content(&document, "robots"),
            hreflang: extract_hreflang(&document),
            has_structured_data: detect_structured_data(body),
            title: first_text(&document, &TITLE_SELECTOR),
            meta_description: meta_content(&document, "description"),
            h1: first_text(&document, &H1_SELECTOR),
        }
    }
}

fn canonical_from_link_header(headers: &BTreeMap<String, String>) -> Option<String> {
    let link = non_empty(headers, HEADER_LINK)?;
    let re = LINK_HEADER_CANONICAL_RE.as_ref()?;
    re.captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn has_rel(element: &ElementRef<'_>, rel: &str) -> bool {
    element
        .value()
        .attr("rel")
        .is_some_and(|value| value.split_whitespace().any(|t| t.eq_ignore_ascii_case(rel)))
}

fn link_href(document: &Html, rel: &str) -> Option<String> {
    document
        .select(&LINK_REL_SELECTOR)
        .filter(|el| has_rel(el, rel))
        .find_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

fn meta_content(document: &Html, name: &str) -> Option<String> {
    document
        .select(&META_NAMED_SELECTOR)
        .filter(|el| {
            el.value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
        })
        .find_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn extract_hreflang(document: &Html) -> Vec<HreflangLink> {
    document
        .select(&LINK_REL_SELECTOR)
        .filter(|el| has_rel(el, "alternate"))
        .filter_map(|el| {
            let lang = el.value().attr("hreflang")?.trim();
            let url = el.value().attr("href")?.trim();
            (!lang.is_empty() && !url.is_empty()).then(|| HreflangLink {
                lang: lang.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// JSON-LD or microdata markers anywhere in the body.
pub(crate) fn detect_structured_data(body: &str) -> bool {
    body.contains("application/ld+json") || body.contains("itemscope") || body.contains("itemtype")
}
