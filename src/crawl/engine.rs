// src/crawl/engine.rs
// =============================================================================
// This module is the crawl orchestrator: it drives the recursive
// fetch -> extract -> fan-out -> join cycle for every page.
//
// How one page is crawled:
// 1. Ask the session for the URL's record (acquire)
// 2. If someone already has it, stop - return their record's id
// 3. Otherwise fetch the page (bounded by a semaphore, with a timeout)
// 4. On failure: finalize the record as Failed, stop (non-fatal)
// 5. On success: extract emails and link targets, then crawl every target
//    concurrently and wait for ALL of them to finish
// 6. Finalize the record with the emails and the children's ids
//
// Step 2 is what terminates recursion on cyclic link graphs: a page that
// links back to an ancestor just picks up the ancestor's placeholder.
//
// Rust concepts:
// - async recursion: An async fn can't call itself directly (its future
//   would have infinite size), so crawl_page returns a boxed future
// - Traits: The Fetcher trait lets tests swap the network for a HashMap
// - Semaphore: Caps how many fetches are in flight at once
// =============================================================================

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::crawl::session::{CrawlOutcome, CrawlSession, PageId};
use crate::extract::{extract_emails, extract_html_links, normalize_seed};

// Abstracts "GET this URL, give me the body" so the engine doesn't care
// whether the bytes come from the network or from a test fixture
//
// Ok(body) means a successful response; Err covers everything else
// (non-2xx status, timeout, DNS failure, connection refused, ...). The
// engine treats all failures the same way: the page resolves as Failed.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

// The production fetcher: a reqwest client with a per-request timeout
//
// A stalled fetch would otherwise stall its whole ancestor chain, since a
// parent's record isn't finalized until every child resolves. The timeout
// turns a hang into an ordinary fetch failure.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        let body = response.text().await?;
        Ok(body)
    }
}

// The crawl engine for one run
//
// Owns the session (shared state), the fetcher, and the concurrency limiter.
// Created fresh per run; consumed by run().
pub struct Crawler<F: Fetcher> {
    session: CrawlSession,
    fetcher: F,
    limiter: Semaphore,
}

impl<F: Fetcher> Crawler<F> {
    // Parameters:
    //   fetcher: where page bodies come from
    //   max_concurrency: how many fetches may be in flight at once
    pub fn new(fetcher: F, max_concurrency: usize) -> Self {
        Crawler {
            session: CrawlSession::new(),
            fetcher,
            limiter: Semaphore::new(max_concurrency),
        }
    }

    // Crawls every seed to completion and returns the finished session
    //
    // Seeds are normalized through the same path as extracted links, so a
    // seed "https://example.com" and a link to "https://example.com/" are
    // the same page. An unparseable seed is a startup error (unlike a bad
    // href found mid-crawl, which is silently dropped - the user typed the
    // seed, so they should hear about it).
    pub async fn run(self, seeds: &[String]) -> Result<CrawlOutcome> {
        let mut keys = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let key = normalize_seed(seed)
                .ok_or_else(|| anyhow!("Invalid seed URL: '{}'", seed))?;
            keys.push(key);
        }

        // Crawl all seeds concurrently and wait for every branch to finish
        future::join_all(keys.into_iter().map(|key| self.crawl_page(key))).await;

        Ok(self.session.finish())
    }

    // Crawls one page, recursively
    //
    // Always returns a real record id - a failed fetch still produced a
    // (Failed) record, so a parent's link list never has holes in it.
    //
    // Why BoxFuture instead of async fn? crawl_page awaits more calls to
    // crawl_page, so the compiler can't size its future; boxing breaks the
    // cycle. The recursion itself is bounded by the memo store: each URL
    // passes the acquire gate as "new" at most once per session.
    fn crawl_page(&self, url: String) -> BoxFuture<'_, PageId> {
        Box::pin(async move {
            // One atomic gate decides who fetches. Everyone else (including
            // a cycle pointing back at an in-progress page) gets the
            // existing record and goes no further.
            let (id, is_new) = self.session.acquire(&url);
            if !is_new {
                return id;
            }

            println!("  Fetching: {}", url);

            // The permit covers only the network fetch. Holding it across
            // the recursive join below would deadlock once the tree is
            // deeper than the pool: parents would sit on permits while
            // waiting for children that can't get one.
            let body = {
                let _permit = self
                    .limiter
                    .acquire()
                    .await
                    .expect("limiter is never closed");
                self.fetcher.fetch(&url).await
            };

            let html = match body {
                Ok(html) => html,
                Err(e) => {
                    // Non-fatal: this branch is done, the rest of the crawl
                    // carries on. The record stays empty but real.
                    eprintln!("  Warning: Failed to fetch {}: {}", url, e);
                    self.session.resolve_failed(id);
                    return id;
                }
            };

            let emails = extract_emails(&html);
            let targets = extract_html_links(&html, &url);

            // Fan out into every link target at once, then join. join_all
            // completes when ALL children have resolved, and hands back
            // results in input order - so `links` preserves the order the
            // links appeared on the page even though the fetches finish in
            // whatever order the network decides.
            let links =
                future::join_all(targets.into_iter().map(|target| self.crawl_page(target)))
                    .await;

            self.session.resolve(id, emails, links);
            id
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why can't an async fn recurse?
//    - An async fn compiles into a state machine struct
//    - A recursive call would embed that struct inside itself: infinite size
//    - Box::pin puts the inner future on the heap, so the outer one only
//      stores a pointer
//
// 2. What is a Semaphore?
//    - A counter of permits; acquire() waits until one is free
//    - With N permits, at most N fetches run at once
//    - Dropping the permit (end of the block) releases it
//
// 3. What guarantees exactly one fetch per URL?
//    - acquire() does its check-and-insert under one lock
//    - Only the caller that inserted the placeholder sees is_new = true
//    - Everyone else returns early with the existing id
//
// 4. What is #[async_trait] for?
//    - Traits can't (portably) have async methods on their own
//    - The macro rewrites them to return boxed futures under the hood
//    - This is what lets tests implement Fetcher over a HashMap
//
// 5. Why join_all and not buffer_unordered?
//    - We need results back in input order (links keep page order)
//    - And we need ALL of them before the parent can finalize
//    - join_all does exactly that; concurrency is still real because all
//      the child futures make progress together
// -----------------------------------------------------------------------------
