//! Main module for lexc checking functionality

pub mod config;
pub mod diagnostics;
pub mod elision;
pub mod error;
pub mod escapes;
pub mod exclusions;
pub mod flags;
pub mod multichars;
pub mod scraping;

pub use diagnostics::{Diagnostic, DiagnosticKind, MulticharReport, Severity};
pub use error::{Error, Result};
pub use exclusions::ExclusionFilter;
pub use multichars::{scan_multichars, scan_multichars_from_reader, MulticharScanner};
pub use scraping::{scrape_lemmas, scrape_lemmas_from_reader};

/// Whether `line` opens with `keyword` as a whole word.
pub(crate) fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    match line.strip_prefix(keyword) {
        Some(rest) => rest.chars().next().map_or(true, char::is_whitespace),
        None => false,
    }
}
