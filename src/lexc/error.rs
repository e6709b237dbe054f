//! Errors raised by lexc-check.
//!
//! lexc content itself never fails a pass: malformed lines are skipped by the
//! scraper and reported as diagnostics by the scanner. What can fail is
//! everything the caller hands in: exclusion patterns, configuration files and
//! the line source.

use config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An exclusion pattern did not compile as a regular expression.
    #[error("invalid exclusion pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read lexc source: {0}")]
    Io(#[from] std::io::Error),
}
