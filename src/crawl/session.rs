// src/crawl/session.rs
// =============================================================================
// This module holds all shared state for one crawl session.
//
// A CrawlSession owns:
// - The page arena: every PageRecord ever created, in discovery order
// - The memo store: a map from normalized URL to its arena slot, so each
//   URL gets exactly one record and exactly one fetch
// - The domain map: per-host sets of pages, used for ranking at the end
//
// Why an arena with indices instead of records pointing at each other?
// - Pages link to each other freely, including cycles and self-links
// - Owning pointers can't represent cycles without leaking or unsafe code
// - With an arena, a "link" is just a PageId (an index), which is Copy,
//   cheap, and trivially allowed to point anywhere, including back at
//   an ancestor or at the page itself
//
// Rust concepts:
// - Mutex: Protects shared state mutated by many concurrent tasks
// - Newtype pattern: PageId wraps a usize so indices can't be mixed up
// - HashMap: O(1) lookup for the memo store and domain map
// =============================================================================

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use url::Url;

// Identifies one page record inside the session's arena
//
// Deriving Copy makes links cheap to pass around - a PageId is just a usize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(usize);

// The lifecycle of a page record
//
// Every record starts Pending (an empty placeholder registered before the
// fetch) and transitions exactly once, to Fetched or Failed. The placeholder
// stage is what makes cyclic link graphs safe: a link back to an in-progress
// page finds the placeholder in the memo store instead of re-entering the
// fetch and recursing forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Placeholder registered, fetch not finished yet
    Pending,
    /// Fetch succeeded and emails/links are populated
    Fetched,
    /// Fetch failed; emails and links stay empty
    Failed,
}

// The canonical per-URL crawl result
//
// There is exactly one PageRecord per normalized URL for the lifetime of a
// session. Everything else (child links, domain sets) refers to it by PageId.
#[derive(Debug)]
pub struct PageRecord {
    /// The normalized URL, which is also the record's identity
    pub url: String,
    /// Email-shaped strings matched in the page body (duplicates kept)
    pub emails: Vec<String>,
    /// Pages this page links to, in link-discovery order (may repeat, may
    /// include this page itself)
    pub links: Vec<PageId>,
    /// How many times any page (or a seed) referenced this URL
    pub occurrences: usize,
    /// Where the record is in its lifecycle
    pub state: PageState,
}

impl PageRecord {
    fn placeholder(url: String) -> Self {
        PageRecord {
            url,
            emails: Vec::new(),
            links: Vec::new(),
            occurrences: 1, // the discovery that created us counts as one
            state: PageState::Pending,
        }
    }

    // The significance score used for ranking pages within a domain
    //
    // score = number of emails + number of outgoing links + occurrence count
    // A failed page scores only its occurrences (emails and links are empty)
    pub fn strength(&self) -> usize {
        self.emails.len() + self.links.len() + self.occurrences
    }
}

// Everything behind the session's mutex
//
// One lock covers the arena, the memo store and the domain map. That keeps
// acquire() trivially atomic: check the map, maybe push a record, maybe
// register a domain, all under a single lock acquisition.
struct SessionInner {
    /// Arena of records, in discovery order; PageId indexes into this
    pages: Vec<PageRecord>,
    /// Memo store: normalized URL -> arena slot
    by_url: HashMap<String, PageId>,
    /// Domain map: host -> pages on that host, in discovery order
    /// (a Vec works as a set here because each URL is registered exactly once)
    domains: HashMap<String, Vec<PageId>>,
    /// Hosts in first-seen order, so report output is stable
    domain_order: Vec<String>,
}

// Shared state for one crawl, created per run and independent of any other
// session (no globals - tests can run many sessions concurrently)
pub struct CrawlSession {
    inner: Mutex<SessionInner>,
}

impl CrawlSession {
    pub fn new() -> Self {
        CrawlSession {
            inner: Mutex::new(SessionInner {
                pages: Vec::new(),
                by_url: HashMap::new(),
                domains: HashMap::new(),
                domain_order: Vec::new(),
            }),
        }
    }

    // Atomically looks up or creates the record for a URL
    //
    // Returns (id, is_new):
    // - Unseen URL: registers an empty Pending placeholder with
    //   occurrences = 1, adds it to its host's domain set, returns
    //   (id, true) - the caller is now responsible for fetching it
    // - Seen URL: bumps the occurrence count and returns (id, false) -
    //   the caller must NOT fetch, someone else already is (or did)
    //
    // The whole check-and-insert happens under one lock, so two tasks
    // discovering the same new URL concurrently can never both get
    // is_new = true. That would mean a duplicate fetch and a corrupted
    // occurrence count.
    pub fn acquire(&self, url: &str) -> (PageId, bool) {
        let mut guard = self.inner.lock().expect("session lock poisoned");
        // Reborrow through the guard so the borrow checker can see that
        // pages, by_url and the domain fields are disjoint
        let inner = &mut *guard;

        if let Some(&id) = inner.by_url.get(url) {
            inner.pages[id.0].occurrences += 1;
            return (id, false);
        }

        let id = PageId(inner.pages.len());
        inner.pages.push(PageRecord::placeholder(url.to_string()));
        inner.by_url.insert(url.to_string(), id);

        // Register the page into its host's domain set right away.
        // Because a URL is only ever inserted once, discovery order doubles
        // as the set's iteration order and membership is automatic.
        if let Some(host) = host_of(url) {
            match inner.domains.entry(host) {
                Entry::Occupied(mut members) => members.get_mut().push(id),
                Entry::Vacant(slot) => {
                    inner.domain_order.push(slot.key().clone());
                    slot.insert(vec![id]);
                }
            }
        }

        (id, true)
    }

    // Finalizes a record after a successful fetch
    //
    // Called exactly once, by the task that got is_new = true for this id,
    // after all of its children have resolved. Child order in `links` is the
    // order the links appeared on the page.
    pub fn resolve(&self, id: PageId, emails: Vec<String>, links: Vec<PageId>) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        let record = &mut inner.pages[id.0];
        record.emails = emails;
        record.links = links;
        record.state = PageState::Fetched;
    }

    // Finalizes a record after a failed fetch
    //
    // The record keeps its empty emails/links. It stays a real record that
    // parents link to - a failed fetch must never turn into a missing entry
    // in someone's link list.
    pub fn resolve_failed(&self, id: PageId) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.pages[id.0].state = PageState::Failed;
    }

    // Consumes the session once crawling is done
    //
    // After the last task finishes nothing mutates the session anymore, so
    // we unwrap the mutex and hand out plain owned data the ranking code
    // can read without locking.
    pub fn finish(self) -> CrawlOutcome {
        let SessionInner {
            pages,
            by_url: _,
            mut domains,
            domain_order,
        } = self.inner.into_inner().expect("session lock poisoned");

        let domains = domain_order
            .into_iter()
            .map(|host| {
                let members = domains.remove(&host).unwrap_or_default();
                (host, members)
            })
            .collect();

        CrawlOutcome { pages, domains }
    }
}

// The finished crawl: every record ever created plus the domain grouping
//
// No mutex anymore - the crawl is over and this is read-only data.
pub struct CrawlOutcome {
    pages: Vec<PageRecord>,
    /// (host, members) pairs; hosts in first-seen order, members in
    /// discovery order within each host
    domains: Vec<(String, Vec<PageId>)>,
}

impl CrawlOutcome {
    pub fn record(&self, id: PageId) -> &PageRecord {
        &self.pages[id.0]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    // Every record, in discovery order
    pub fn records(&self) -> &[PageRecord] {
        &self.pages
    }

    // Looks a record up by its normalized URL (linear scan; the arena is
    // small by the time anyone reads results, and this keeps the outcome a
    // plain data holder)
    pub fn find(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.url == url)
    }

    pub fn domains(&self) -> &[(String, Vec<PageId>)] {
        &self.domains
    }
}

// Extracts the host component used as the domain key
//
// Returns None for URLs without a host; those pages simply don't take part
// in domain ranking. (In practice every URL that reaches the session is
// http/https and has a host.)
fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Mutex and not RwLock?
//    - Almost every access mutates (acquire bumps counters, resolve writes)
//    - The critical sections are tiny (map lookup, vector push)
//    - A plain Mutex is simpler and contention is negligible here
//
// 2. Why is it safe to use std::sync::Mutex in async code?
//    - We never hold the lock across an .await point
//    - Each method locks, does a few map/vector operations, and unlocks
//    - tokio's docs recommend exactly this for short critical sections
//
// 3. What is the newtype pattern?
//    - PageId(usize) is a struct wrapping a usize
//    - It costs nothing at runtime but the compiler now stops us from
//      passing some random index where a page id is expected
//
// 4. Why does acquire() also register domains?
//    - Registration must happen exactly once per URL
//    - acquire() is the only place that knows whether a URL is new
//    - Doing both under the same lock means no separate synchronization
//      is needed for the domain map
//
// 5. What does into_inner() do on a Mutex?
//    - Consumes the Mutex and returns the data inside
//    - Only possible when we own the Mutex (no one else can be locking)
//    - Perfect for the end of the crawl: lock-free read-only results
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_new_url() {
        let session = CrawlSession::new();
        let (id, is_new) = session.acquire("https://example.com/");
        assert!(is_new);

        let outcome = session.finish();
        let record = outcome.record(id);
        assert_eq!(record.url, "https://example.com/");
        assert_eq!(record.occurrences, 1);
        assert_eq!(record.state, PageState::Pending);
        assert!(record.emails.is_empty());
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_acquire_counts_every_call() {
        let session = CrawlSession::new();
        let (first, is_new) = session.acquire("https://example.com/page");
        assert!(is_new);

        // Every repeated acquire returns the same id and bumps the count
        for _ in 0..4 {
            let (id, is_new) = session.acquire("https://example.com/page");
            assert_eq!(id, first);
            assert!(!is_new);
        }

        let outcome = session.finish();
        assert_eq!(outcome.record(first).occurrences, 5);
        assert_eq!(outcome.page_count(), 1);
    }

    #[test]
    fn test_resolve_populates_record() {
        let session = CrawlSession::new();
        let (parent, _) = session.acquire("https://example.com/");
        let (child, _) = session.acquire("https://example.com/about");

        session.resolve(
            parent,
            vec!["a@b.com".to_string()],
            vec![child, parent], // self-links are fine
        );
        session.resolve_failed(child);

        let outcome = session.finish();
        let record = outcome.record(parent);
        assert_eq!(record.state, PageState::Fetched);
        assert_eq!(record.emails, vec!["a@b.com"]);
        assert_eq!(record.links, vec![child, parent]);

        let failed = outcome.record(child);
        assert_eq!(failed.state, PageState::Failed);
        assert!(failed.emails.is_empty());
        assert!(failed.links.is_empty());
    }

    #[test]
    fn test_domains_group_by_host() {
        let session = CrawlSession::new();
        let (a, _) = session.acquire("https://example.com/");
        let (b, _) = session.acquire("https://example.com/contact");
        let (c, _) = session.acquire("https://other.org/");

        // Re-acquiring must not re-register into the domain set
        session.acquire("https://example.com/contact");

        let outcome = session.finish();
        let domains = outcome.domains();
        assert_eq!(domains.len(), 2);
        assert_eq!(domains[0].0, "example.com");
        assert_eq!(domains[0].1, vec![a, b]);
        assert_eq!(domains[1].0, "other.org");
        assert_eq!(domains[1].1, vec![c]);
    }

    #[test]
    fn test_strength_sums_fields() {
        let session = CrawlSession::new();
        let (a, _) = session.acquire("https://example.com/");
        let (b, _) = session.acquire("https://example.com/team");
        session.acquire("https://example.com/"); // second occurrence

        session.resolve(a, vec!["x@y.com".to_string(), "x@y.com".to_string()], vec![b]);

        let outcome = session.finish();
        // 2 emails + 1 link + 2 occurrences
        assert_eq!(outcome.record(a).strength(), 5);
        // placeholder: 0 + 0 + 1
        assert_eq!(outcome.record(b).strength(), 1);
    }
}
