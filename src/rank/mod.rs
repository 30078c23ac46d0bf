// src/rank/mod.rs
// =============================================================================
// This module ranks crawled pages within each domain.
//
// Submodules:
// - score: Picks the most significant page per domain
//
// This file (mod.rs) is the module root - it re-exports the public API.
// =============================================================================

mod score;

pub use score::{rank_domains, DomainChampion};
