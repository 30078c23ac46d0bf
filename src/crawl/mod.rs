// src/crawl/mod.rs
// =============================================================================
// This module contains the crawl engine.
//
// Submodules:
// - session: Shared per-crawl state (page arena, memo store, domain map)
// - engine: The orchestrator that fetches pages and recurses into links
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod engine;
mod session;

// Re-export public items from submodules
// This lets users write `crawl::Crawler` instead of `crawl::engine::Crawler`
pub use engine::{Crawler, Fetcher, HttpFetcher};
pub use session::{CrawlOutcome, CrawlSession, PageId, PageRecord, PageState};
