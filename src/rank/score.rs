// src/rank/score.rs
// =============================================================================
// This module picks, for each domain, the "most significant" page.
//
// The significance score of a page is:
//
//   strength = number of emails + number of outgoing links + occurrences
//
// (computed by PageRecord::strength). Within a domain we keep the page with
// the strictly greatest strength. Ties go to whichever page was discovered
// first: the comparison is `>`, not `>=`, so an equal later page never
// displaces the incumbent. That makes results reproducible even though
// fetches finish in arbitrary order - discovery order is deterministic for
// a given site, completion order is not.
//
// Rust concepts:
// - Slices and iteration over borrowed data (no cloning of records)
// - serde derive: DomainChampion serializes straight to JSON for --json
// =============================================================================

use serde::Serialize;

use crate::crawl::CrawlOutcome;

// The winning page of one domain, ready for reporting
#[derive(Debug, Clone, Serialize)]
pub struct DomainChampion {
    /// The host the ranking ran over
    pub domain: String,
    /// URL of the strongest page on that host
    pub url: String,
    /// That page's significance score
    pub strength: usize,
}

// Ranks every domain in a finished crawl
//
// Returns one champion per domain, in the order the domains were first
// encountered. Domains are never empty - a host only exists in the map
// because at least one page was registered under it.
pub fn rank_domains(outcome: &CrawlOutcome) -> Vec<DomainChampion> {
    outcome
        .domains()
        .iter()
        .map(|(host, members)| {
            // members is in discovery order, so starting from the front and
            // only replacing on strictly-greater gives the tie-break we want
            let mut best = members[0];
            for &id in &members[1..] {
                if outcome.record(id).strength() > outcome.record(best).strength() {
                    best = id;
                }
            }

            let record = outcome.record(best);
            DomainChampion {
                domain: host.clone(),
                url: record.url.clone(),
                strength: record.strength(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::{CrawlOutcome, CrawlSession, PageId};

    // Builds a finished crawl directly through the session, skipping the
    // network entirely
    fn outcome(setup: impl FnOnce(&CrawlSession)) -> CrawlOutcome {
        let session = CrawlSession::new();
        setup(&session);
        session.finish()
    }

    fn resolved(
        session: &CrawlSession,
        url: &str,
        emails: &[&str],
        links: Vec<PageId>,
    ) -> PageId {
        let (id, _) = session.acquire(url);
        session.resolve(id, emails.iter().map(|e| e.to_string()).collect(), links);
        id
    }

    #[test]
    fn test_strongest_page_wins() {
        let outcome = outcome(|s| {
            let weak = resolved(s, "https://example.com/weak", &[], vec![]);
            resolved(s, "https://example.com/strong", &["a@b.com", "c@d.com"], vec![weak]);
        });

        let champions = rank_domains(&outcome);
        assert_eq!(champions.len(), 1);
        assert_eq!(champions[0].domain, "example.com");
        assert_eq!(champions[0].url, "https://example.com/strong");
        // 2 emails + 1 link + 1 occurrence
        assert_eq!(champions[0].strength, 4);
    }

    #[test]
    fn test_ties_keep_the_earlier_page() {
        let outcome = outcome(|s| {
            // Both pages end up with strength 2 (one email, one occurrence)
            resolved(s, "https://example.com/first", &["a@b.com"], vec![]);
            resolved(s, "https://example.com/second", &["c@d.com"], vec![]);
        });

        let champions = rank_domains(&outcome);
        assert_eq!(champions[0].url, "https://example.com/first");
        assert_eq!(champions[0].strength, 2);
    }

    #[test]
    fn test_occurrences_break_the_tie_the_other_way() {
        let outcome = outcome(|s| {
            resolved(s, "https://example.com/first", &["a@b.com"], vec![]);
            resolved(s, "https://example.com/second", &["c@d.com"], vec![]);
            // one extra reference to /second: strength 2 vs 3
            s.acquire("https://example.com/second");
        });

        let champions = rank_domains(&outcome);
        assert_eq!(champions[0].url, "https://example.com/second");
        assert_eq!(champions[0].strength, 3);
    }

    #[test]
    fn test_one_champion_per_domain_in_first_seen_order() {
        let outcome = outcome(|s| {
            resolved(s, "https://bbb.org/", &[], vec![]);
            resolved(s, "https://aaa.org/", &["x@y.com"], vec![]);
        });

        let champions = rank_domains(&outcome);
        assert_eq!(champions.len(), 2);
        assert_eq!(champions[0].domain, "bbb.org");
        assert_eq!(champions[1].domain, "aaa.org");
    }
}
