// src/extract/html.rs
// =============================================================================
// This module extracts link targets from HTML pages and normalizes them
// into the URL keys the crawl engine deduplicates on.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative hrefs against the page's own URL
// - Normalize every result into one canonical string form, so the same
//   page reached via different spellings maps to one dedup key
//
// Rust concepts:
// - Option<T>: For hrefs that can't be turned into a usable URL
// - Iterators: For processing collections
// - Closures: Anonymous functions (|x| ...)
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts all crawlable link targets from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page itself (for resolving relative links)
//
// Returns: Vec<String> of normalized absolute URLs, in the order the links
// appear on the page. Duplicates are KEPT on purpose - the crawl engine
// counts every occurrence of a link target, so deduplicating here would
// corrupt occurrence counts.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create a CSS selector to find all <a> tags
    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the base URL once
    // We'll use this to resolve relative links
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => {
            // If base URL is invalid, we can't resolve relative links
            eprintln!("Warning: Invalid base URL: {}", base_url);
            return links;
        }
    };

    // Select all <a> elements with href attributes
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // Malformed or non-HTTP hrefs come back as None and are dropped
            // silently - a dead link, not an error
            if let Some(key) = resolve_url_key(&base, href) {
                links.push(key);
            }
        }
    }

    links
}

// Resolves a possibly-relative href into the normalized URL key used for
// deduplication
//
// Parameters:
//   base: the URL of the page the href appeared on
//   href: the raw href value (might be relative, absolute, or garbage)
//
// Returns: Some(key) or None if the href can't become a crawlable URL
//
// The key is the `url` crate's serialized form of the parsed URL, so
// different spellings of the same address produce the same key:
//   "https://example.com" and "https://example.com/" -> "https://example.com/"
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "mailto:hi@example.com" -> None (not crawlable)
pub fn resolve_url_key(base: &Url, href: &str) -> Option<String> {
    // Try to parse href as a URL on its own
    // If it's already absolute (has a scheme), this works
    // If it's relative, this fails, so we join it with base
    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => base.join(href).ok()?,
    };

    // Only http/https targets are crawlable; everything else (mailto:,
    // javascript:, data:, ...) is dropped. This also guarantees every key
    // that reaches the memo store has a host for domain grouping.
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved.to_string())
    } else {
        None
    }
}

// Normalizes a seed URL given on the command line into the same key form
// that extracted links use
//
// Without this, a seed "https://example.com" and a link to
// "https://example.com/" would count as two different pages.
pub fn normalize_seed(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if url.scheme() == "http" || url.scheme() == "https" {
        Some(url.to_string())
    } else {
        None
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelector)
//    - "a[href]" means "all <a> tags that have an href attribute"
//
// 2. What is the url crate?
//    - Handles URL parsing and manipulation
//    - url.join() resolves relative URLs the way a browser does
//    - Example: "https://example.com/a/" + "../b" = "https://example.com/b"
//
// 3. Why is the serialized Url the dedup key?
//    - Url::parse normalizes as it parses (lowercases the host, adds the
//      root path, resolves dot segments)
//    - Serializing it back gives one canonical spelling per address
//    - Canonical spelling = stable HashMap key = one fetch per page
//
// 4. What is the ? operator doing on ok()?
//    - base.join(href).ok() turns a Result into an Option
//    - ? then returns None early if joining failed
//    - So "unresolvable href" flows out as None with no error machinery
//
// 5. Why keep duplicate links?
//    - The engine increments a page's occurrence count per reference
//    - A page linked three times should count three occurrences
//    - Deduplicating here would silently lose that signal
// -----------------------------------------------------------------------------
