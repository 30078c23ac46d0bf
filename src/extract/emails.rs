// src/extract/emails.rs
// =============================================================================
// This module finds email-shaped substrings in page content.
//
// We use the `regex` crate with a deliberately simple pattern:
//
//   [\w.+-]+@[\w-]+\.[\w.-]+
//
// i.e. word-ish characters, an @, word-ish characters, a dot, word-ish
// characters. This is NOT RFC 5322 compliance - full address-spec parsing
// is a rabbit hole and harvested addresses get eyeballed by a human anyway.
//
// Rust concepts:
// - Regex compilation: Regex::new builds a matcher from a pattern string
// - Iterators: find_iter yields every non-overlapping match
// =============================================================================

use regex::Regex;

// Extracts every email-shaped match from a block of text
//
// Parameters:
//   text: the text to scan (usually a whole HTML document)
//
// Returns: Vec<String> of matches in the order they appear.
// Duplicates are NOT removed - an address mentioned five times comes back
// five times, and that repetition feeds into the page's significance score.
pub fn extract_emails(text: &str) -> Vec<String> {
    // Our pattern is a constant and known to be valid, so .expect() here
    // can only fire on a programmer error (same reasoning as unwrapping a
    // constant CSS selector)
    let pattern = Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+")
        .expect("email pattern is valid");

    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does the pattern mean?
//    - [\w.+-]+  one or more word chars, dots, pluses or hyphens (local part)
//    - @         a literal at sign
//    - [\w-]+    one or more word chars or hyphens (first domain label)
//    - \.        a literal dot
//    - [\w.-]+   the rest of the domain, dots allowed
//
// 2. Why scan the raw HTML instead of the visible text?
//    - Addresses hide in attributes, comments and scripts too
//    - For harvesting, a match anywhere in the document counts
//
// 3. What is find_iter?
//    - Returns an iterator over every non-overlapping match
//    - Each match knows its position and its matched text (as_str())
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_plain_address() {
        let emails = extract_emails("contact us at hello@example.com today");
        assert_eq!(emails, vec!["hello@example.com"]);
    }

    #[test]
    fn test_finds_addresses_in_html() {
        let html = r#"<a href="mailto:sales@shop.co.uk">Sales</a>
                      <p>or support+tickets@shop.co.uk</p>"#;
        let emails = extract_emails(html);
        assert_eq!(
            emails,
            vec!["sales@shop.co.uk", "support+tickets@shop.co.uk"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let emails = extract_emails("a@b.com ... a@b.com");
        assert_eq!(emails.len(), 2);
    }

    #[test]
    fn test_no_match_means_empty() {
        let emails = extract_emails("<p>nothing to see here</p>");
        assert!(emails.is_empty());
    }
}
