// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// email-scout takes one or more seed URLs and a handful of knobs, so a
// single flat struct is enough - no subcommands needed.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "email-scout",
    version = "0.1.0",
    about = "Crawls websites from seed URLs, harvests email addresses, and reports the most significant page per domain",
    long_about = "email-scout recursively follows hyperlinks from the given seed URLs, \
                  extracts email addresses from every page it reaches, and ranks the pages \
                  of each domain by significance (emails found + outgoing links + how often \
                  the page was linked to)."
)]
pub struct Cli {
    /// Seed URLs to start crawling from (e.g. https://example.com)
    ///
    /// At least one is required; each seed's crawl runs concurrently with
    /// the others, and pages shared between seeds are fetched only once
    #[arg(required = true)]
    pub seeds: Vec<String>,

    /// Output results in JSON format instead of plain lines
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    ///
    /// A fetch that exceeds this is treated like any other failed fetch:
    /// the page gets an empty record and the crawl moves on. Without a
    /// timeout, one stalled server could hang the whole run.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of fetches in flight at once
    ///
    /// Balance between crawl speed and being a polite network citizen
    #[arg(long, default_value_t = 50)]
    pub max_concurrency: usize,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How do positional Vec<String> arguments work?
//    - A Vec field without a flag attribute collects every free argument
//    - #[arg(required = true)] makes "no seeds at all" a usage error
//
// 2. What does default_value_t do?
//    - Supplies a default when the flag isn't given
//    - The _t suffix means "typed": the default is a real u64/usize, not
//      a string that gets parsed later
//
// 3. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - CLI arguments outlive the parsing call, so the struct must own them
// -----------------------------------------------------------------------------
