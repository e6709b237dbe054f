//! Diagnostics produced by the multichar scanner
//!
//! Nothing the scanner finds in a lexc file aborts the scan. Each problem is
//! recorded as a [`Diagnostic`] carrying its kind, the 1-based line number and
//! the offending line, and the full list is handed back in a
//! [`MulticharReport`]. Deciding what to do with it (exit codes, thresholds) is
//! up to the caller; [`MulticharReport::failures`] counts the diagnostics of
//! [`Severity::Error`], which is what the bundled CLI fails on.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A `LEXICON` header before any `Multichar_Symbols`.
    LexiconsBeforeMultichars,
    /// Text after the `Multichar_Symbols` keyword on the same line.
    TrailingRubbish,
    /// A `Multichar_Symbols` header after the lexicons have started.
    MulticharsAfterLexicons,
    /// More than one unescaped `;` on an entry line.
    TooManySemicolons,
    /// Three or more fields before the `;` of an entry.
    TooManyFields,
    /// An entry written on a `LEXICON` header line.
    EntriesOnLexiconLine,
    /// A `>` with no `<` to open the range.
    UnmatchedRangeClose,
    /// A tag missing from `Multichar_Symbols`.
    UndeclaredTag,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::EntriesOnLexiconLine => Severity::Info,
            DiagnosticKind::UnmatchedRangeClose => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable identifier, also used in JSON output.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::LexiconsBeforeMultichars => "lexicons-before-multichars",
            DiagnosticKind::TrailingRubbish => "trailing-rubbish",
            DiagnosticKind::MulticharsAfterLexicons => "multichars-after-lexicons",
            DiagnosticKind::TooManySemicolons => "too-many-semicolons",
            DiagnosticKind::TooManyFields => "too-many-fields",
            DiagnosticKind::EntriesOnLexiconLine => "entries-on-lexicon-line",
            DiagnosticKind::UnmatchedRangeClose => "unmatched-range-close",
            DiagnosticKind::UndeclaredTag => "undeclared-tag",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// 1-based line number in the lexc source.
    pub line: usize,
    /// The offending source line, without its line terminator.
    pub text: String,
    /// The undeclared tag, or the rubbish after `Multichar_Symbols`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            line,
            text: text.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn message(&self) -> String {
        let detail = self.detail.as_deref().unwrap_or_default();
        match self.kind {
            DiagnosticKind::LexiconsBeforeMultichars => "found lexicons before multichars".into(),
            DiagnosticKind::TrailingRubbish => {
                format!("trailing rubbish after multichar syms: {}", detail)
            }
            DiagnosticKind::MulticharsAfterLexicons => {
                "multichars declared after a LEXICON block".into()
            }
            DiagnosticKind::TooManySemicolons => "too many semicolons".into(),
            DiagnosticKind::TooManyFields => "too many spaces? could not parse entry".into(),
            DiagnosticKind::EntriesOnLexiconLine => {
                "entries on LEXICON line are not supported".into()
            }
            DiagnosticKind::UnmatchedRangeClose => "`>` without matching `<`".into(),
            DiagnosticKind::UndeclaredTag => format!(
                "{} seems like a multichar but is missing from the Multichar_Symbols section",
                detail
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} on line {}: {}",
            self.severity,
            self.kind,
            self.message(),
            self.line,
            self.text.trim()
        )
    }
}

/// Everything a multichar scan found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MulticharReport {
    pub declared: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Lines read, blank ones included.
    pub lines: usize,
    /// Entry lines inside lexicons, i.e. lines where a `;` field was found.
    pub entries: usize,
}

impl MulticharReport {
    /// Number of error-level diagnostics.
    pub fn failures(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.kind == kind)
    }
}
