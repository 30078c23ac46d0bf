// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Crawl every seed URL to completion (the crawl engine does the work)
// 3. Rank each domain's pages by significance
// 4. Print one line per domain (or JSON with --json)
// 5. Exit with proper code (0 = success, 2 = error)
//
// Note that individual fetch failures never reach this file: the engine
// confines them to their own branch of the crawl. The only errors that
// surface here are startup problems (bad seed URL, client build failure).
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - crawl engine (session + orchestrator)
mod extract;       // src/extract/ - link and email extraction
mod rank;          // src/rank/ - per-domain significance ranking

// Import items we need from our modules
use cli::Cli;
use clap::Parser;  // Parser trait enables the parse() method
use crawl::{Crawler, HttpFetcher, PageState};
use rank::{rank_domains, DomainChampion};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed
//   Err = startup error (invalid seed, client build failure)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let args = Cli::parse();

    println!("🔍 Crawling {} seed(s)...", args.seeds.len());

    // Build the engine: real HTTP fetcher plus the concurrency cap
    let fetcher = HttpFetcher::new(args.timeout)?;
    let crawler = Crawler::new(fetcher, args.max_concurrency);

    // Crawl everything; this returns once every branch has resolved
    let outcome = crawler.run(&args.seeds).await?;

    println!(
        "📄 Visited {} page(s) across {} domain(s)",
        outcome.page_count(),
        outcome.domains().len()
    );

    // Fetch failures were confined to their branches; summarize them here
    let failed = outcome
        .records()
        .iter()
        .filter(|r| r.state == PageState::Failed)
        .count();
    if failed > 0 {
        println!("⚠️  {} page(s) failed to fetch", failed);
    }
    println!();

    // Rank each domain and report the winners
    let champions = rank_domains(&outcome);
    print_report(&champions, args.json)?;

    Ok(0)
}

// Prints the per-domain report either as plain lines or JSON
//
// Parameters:
//   champions: one winner per domain, in first-seen order
//   json: whether to output JSON format
fn print_report(champions: &[DomainChampion], json: bool) -> Result<()> {
    if json {
        // Serialize results to JSON and print
        let json_output = serde_json::to_string_pretty(champions)?;
        println!("{}", json_output);
    } else {
        for champion in champions {
            println!(
                "most significant url {} with strength {}",
                champion.url, champion.strength
            );
        }
    }
    Ok(())
}
