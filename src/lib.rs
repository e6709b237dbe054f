//! # lexc-check
//!
//! Source-level checks for lexc lexicons, the input format of finite-state
//! morphology compilers.
//!
//! Two passes are provided, both line oriented and independent of each other:
//!
//! - [lemma scraping](lexc::scraping): collect the citation forms of every entry,
//!   so a harness can feed them to a generator and look for coverage gaps.
//! - [multichar scanning](lexc::multichars): collect the `Multichar_Symbols`
//!   declarations and report every tag used in a `LEXICON` entry that was never
//!   declared, along with structural problems in the file.
//!
//! Neither pass fails on odd lexc. Lines the scraper cannot make sense of are
//! skipped, and the scanner reports problems as [diagnostics](lexc::diagnostics)
//! rather than errors.

pub mod lexc;
