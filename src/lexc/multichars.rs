//! Multichar Section Scanner
//!
//! A lexc file declares its multi-character symbols once, in a
//! `Multichar_Symbols` block, before the first `LEXICON`. Any tag used in an
//! entry that is missing from that block gets silently compiled into a run of
//! single characters, which is never what the author meant. The scanner reads
//! the file once, collects the declarations, then checks every tag of every
//! entry against them.
//!
//! ## States
//!
//! The scan moves through three states and never goes back:
//!
//! ```text
//! Preamble --Multichar_Symbols--> Multichars --LEXICON--> Lexicons
//!     \------------------------LEXICON----------------------^
//! ```
//!
//! Each state has its own transition function taking one line and returning
//! the next state. Problems are pushed to the report as diagnostics and the
//! scan carries on.
//!
//! ## Entries
//!
//! In the `Lexicons` state only lines containing a `;` are looked at. After
//! comments, glosses and ranges are elided, the two fields before the `;` are
//! the pair string and the continuation class:
//!
//! ```text
//! kala+N+Sg:kala   N_KALA   ;
//! ^ pair string    ^ cont.  ^ terminator
//! ```
//!
//! Tags are read from the analysis side of the pair string (before `:`). A tag
//! ending in a non-letter is also accepted when it is declared without that
//! last character, so `+Foo,` passes when `+Foo` is declared.
use super::diagnostics::{Diagnostic, DiagnosticKind, MulticharReport};
use super::elision::{elide_glosses, elide_ranges, strip_comment};
use super::error::Result;
use super::escapes::{hide_escapes, unhide, Restore};
use super::starts_with_keyword;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::io::BufRead;
use tracing::{debug, trace};

const MULTICHAR_KEYWORD: &str = "Multichar_Symbols";
const LEXICON_KEYWORD: &str = "LEXICON";

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+[A-Za-z0-9_-][^+@#]*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Before any section header.
    Preamble,
    /// Inside the `Multichar_Symbols` block.
    Multichars,
    /// Past the first `LEXICON` header.
    Lexicons,
}

/// Streaming scanner; feed it lines in order, then [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct MulticharScanner {
    state: ScanState,
    report: MulticharReport,
}

impl Default for MulticharScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MulticharScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Preamble,
            report: MulticharReport::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn declared(&self) -> &BTreeSet<String> {
        &self.report.declared
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.report.diagnostics
    }

    /// Processes the next line of the source.
    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\n', '\r']);
        self.report.lines += 1;
        let number = self.report.lines;
        let next = match self.state {
            ScanState::Preamble => self.preamble_line(number, line),
            ScanState::Multichars => self.multichars_line(number, line),
            ScanState::Lexicons => self.lexicons_line(number, line),
        };
        if next != self.state {
            debug!(line = number, from = ?self.state, to = ?next, "section change");
            self.state = next;
        }
    }

    pub fn finish(self) -> MulticharReport {
        self.report
    }

    fn preamble_line(&mut self, number: usize, line: &str) -> ScanState {
        if starts_with_keyword(line, MULTICHAR_KEYWORD) {
            let hidden = hide_escapes(&line[MULTICHAR_KEYWORD.len()..]);
            let rest = strip_comment(&hidden).trim();
            if !rest.is_empty() {
                let rubbish = unhide(rest, Restore::Escaped);
                self.push(
                    Diagnostic::new(DiagnosticKind::TrailingRubbish, number, line)
                        .with_detail(rubbish),
                );
                self.declare(rest);
            }
            return ScanState::Multichars;
        }
        if starts_with_keyword(line, LEXICON_KEYWORD) {
            self.push(Diagnostic::new(
                DiagnosticKind::LexiconsBeforeMultichars,
                number,
                line,
            ));
            return ScanState::Lexicons;
        }
        ScanState::Preamble
    }

    fn multichars_line(&mut self, _number: usize, line: &str) -> ScanState {
        if starts_with_keyword(line, LEXICON_KEYWORD) {
            return ScanState::Lexicons;
        }
        let hidden = hide_escapes(line);
        self.declare(strip_comment(&hidden));
        ScanState::Multichars
    }

    fn lexicons_line(&mut self, number: usize, line: &str) -> ScanState {
        if starts_with_keyword(line, MULTICHAR_KEYWORD) {
            self.push(Diagnostic::new(
                DiagnosticKind::MulticharsAfterLexicons,
                number,
                line,
            ));
            return ScanState::Lexicons;
        }
        if !line.contains(';') {
            return ScanState::Lexicons;
        }

        let hidden = hide_escapes(line);
        let code = elide_glosses(strip_comment(&hidden));
        let ranges = elide_ranges(&code);
        if ranges.unmatched_close {
            self.push(Diagnostic::new(
                DiagnosticKind::UnmatchedRangeClose,
                number,
                line,
            ));
        }
        let code = ranges.text;
        if code.matches(';').count() > 1 {
            self.push(Diagnostic::new(
                DiagnosticKind::TooManySemicolons,
                number,
                line,
            ));
            return ScanState::Lexicons;
        }

        // a terminator glued to the continuation class is still a field
        let code = code.replace(';', " ; ");
        let fields: Vec<&str> = code.split_whitespace().collect();
        let Some(terminator) = fields.iter().position(|field| *field == ";") else {
            return ScanState::Lexicons;
        };
        self.report.entries += 1;

        if terminator >= 3 {
            if starts_with_keyword(line, LEXICON_KEYWORD) {
                self.push(Diagnostic::new(
                    DiagnosticKind::EntriesOnLexiconLine,
                    number,
                    line,
                ));
            } else {
                self.push(Diagnostic::new(DiagnosticKind::TooManyFields, number, line));
                return ScanState::Lexicons;
            }
        }
        if terminator >= 2 {
            self.check_tags(number, line, fields[terminator - 2]);
        }
        ScanState::Lexicons
    }

    /// Adds every whitespace separated token of hidden text to the declarations.
    ///
    /// A closing `;`, alone or glued to the last symbol, is not a symbol.
    fn declare(&mut self, hidden: &str) {
        for token in hidden.split_whitespace() {
            let token = token.trim_end_matches(';');
            if token.is_empty() {
                continue;
            }
            let symbol = unhide(token, Restore::Escaped);
            trace!(%symbol, "declared");
            self.report.declared.insert(symbol);
        }
    }

    fn check_tags(&mut self, number: usize, line: &str, pair: &str) {
        let analysis = pair.split_once(':').map_or(pair, |(analysis, _)| analysis);
        let analysis = unhide(analysis, Restore::Escaped);
        let undeclared: Vec<String> = TAG_REGEX
            .find_iter(&analysis)
            .map(|tag| tag.as_str())
            .filter(|tag| !self.is_declared(tag))
            .map(str::to_string)
            .collect();
        for tag in undeclared {
            self.push(
                Diagnostic::new(DiagnosticKind::UndeclaredTag, number, line).with_detail(tag),
            );
        }
    }

    /// Exact match, or a match once a trailing non-letter is dropped.
    fn is_declared(&self, tag: &str) -> bool {
        if self.report.declared.contains(tag) {
            return true;
        }
        let mut chars = tag.chars();
        match chars.next_back() {
            Some(last) if !last.is_alphabetic() => self.report.declared.contains(chars.as_str()),
            _ => false,
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        debug!(%diagnostic, "diagnostic");
        self.report.diagnostics.push(diagnostic);
    }
}

/// Scans a sequence of lexc lines.
pub fn scan_multichars<I, S>(lines: I) -> MulticharReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = MulticharScanner::new();
    for line in lines {
        scanner.feed_line(line.as_ref());
    }
    scanner.finish()
}

/// Like [`scan_multichars`], reading lines from `reader`.
pub fn scan_multichars_from_reader<R: BufRead>(reader: R) -> Result<MulticharReport> {
    let mut scanner = MulticharScanner::new();
    for line in reader.lines() {
        scanner.feed_line(&line?);
    }
    Ok(scanner.finish())
}
