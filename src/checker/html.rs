// src/checker/html.rs
// =============================================================================
// This module reads the SEO signals and links out of one HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup still parses
//
// Signals collected per page:
// - number of <h1> elements
// - whether a JSON-LD structured data block is present
// - whether a breadcrumb element is present (pluggable rule, see below)
// - every <a href> in document order
// =============================================================================

use scraper::{ElementRef, Html, Selector};

/// A yes/no rule over a single element.
///
/// Breadcrumb detection is heuristic, so the rule is a value that can be
/// swapped (a closure works too) instead of a hard-coded string match.
pub trait ElementPredicate {
    fn matches(&self, element: ElementRef<'_>) -> bool;
}

impl<F> ElementPredicate for F
where
    F: Fn(ElementRef<'_>) -> bool,
{
    fn matches(&self, element: ElementRef<'_>) -> bool {
        self(element)
    }
}

/// Default breadcrumb rule: an `aria-label` or `class` attribute containing
/// "breadcrumb", ignoring case.
pub fn is_breadcrumb(element: ElementRef<'_>) -> bool {
    ["aria-label", "class"].iter().any(|name| {
        element
            .value()
            .attr(name)
            .is_some_and(|value| value.to_ascii_lowercase().contains("breadcrumb"))
    })
}

/// Everything the audit needs to know about one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub h1_count: usize,
    pub has_schema: bool,
    pub has_breadcrumb: bool,
    /// Trimmed href values, in document order, duplicates kept
    pub links: Vec<String>,
}

// Parses a page and collects its signals
//
// Parameters:
//   html: the page content
//   breadcrumb: the rule that decides whether an element is a breadcrumb
//
// Example:
//   html = "<h1>Hi</h1><a href=' /docs '>Docs</a>"
//   result = PageSignals { h1_count: 1, links: ["/docs"], .. }
pub fn extract_page_signals(html: &str, breadcrumb: &dyn ElementPredicate) -> PageSignals {
    let document = Html::parse_document(html);

    // These selectors are constants and known to be valid
    let h1 = Selector::parse("h1").unwrap();
    let schema = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let any = Selector::parse("*").unwrap();
    let anchors = Selector::parse("a[href]").unwrap();

    let links = document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect();

    PageSignals {
        h1_count: document.select(&h1).count(),
        has_schema: document.select(&schema).next().is_some(),
        has_breadcrumb: document.select(&any).any(|element| breadcrumb.matches(element)),
        links,
    }
}
