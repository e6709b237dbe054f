//! Entry Exclusion Filter
//!
//! Some entries are deliberately left out of lemma testing: compound-only
//! stems, roots, spelling-only forms, prefixes. Lexicon authors mark them with
//! continuation classes or comments following shared conventions. The filter
//! holds the regexes for those conventions (loaded from the configuration
//! table, see [`config`](super::config)) plus whatever patterns the caller adds.
//!
//! A pattern excludes a line if it matches anywhere in the raw line.
use super::config::{self, ExclusionConfig};
use super::error::{Error, Result};
use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    caller: Vec<Regex>,
    builtin: Vec<Regex>,
}

fn compile<I, S>(patterns: I) -> Result<Vec<Regex>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}

impl ExclusionFilter {
    /// A filter that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A filter over the configured built-in and extra patterns.
    pub fn from_config(config: &ExclusionConfig) -> Result<Self> {
        Ok(Self {
            caller: Vec::new(),
            builtin: compile(config.patterns())?,
        })
    }

    /// A filter over the embedded default table.
    pub fn with_defaults() -> Result<Self> {
        let config = config::load_defaults()?;
        Self::from_config(&config.exclusions)
    }

    /// Adds caller-supplied patterns, checked before the configured ones.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.caller.extend(compile(patterns)?);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.caller.len() + self.builtin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the first pattern found in `line`, if any.
    pub fn matching_pattern(&self, line: &str) -> Option<&str> {
        self.caller
            .iter()
            .chain(self.builtin.iter())
            .find(|regex| regex.is_match(line))
            .map(Regex::as_str)
    }

    pub fn is_excluded(&self, line: &str) -> bool {
        self.matching_pattern(line).is_some()
    }
}
