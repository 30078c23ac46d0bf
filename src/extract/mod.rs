// src/extract/mod.rs
// =============================================================================
// This module contains the content-extraction collaborators the crawl
// engine calls into.
//
// Submodules:
// - html: Extracts link targets from HTML and normalizes them into URL keys
// - emails: Extracts email-shaped substrings from page content
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers write `extract::extract_html_links()` instead of reaching into
// submodules.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod emails;
mod html;

// Re-export public items from submodules
pub use emails::extract_emails;
pub use html::{extract_html_links, normalize_seed, resolve_url_key};
