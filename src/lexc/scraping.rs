//! Lemma Scraper
//!
//! Walks a lexc source line by line and collects the lemma of every entry, that
//! is the analysis side up to its first tag:
//!
//! ```text
//! talo+N+Sg:talo   N_TALO ;     ->  talo
//! juosta           V_JUOSTA ;   ->  juosta
//! ```
//!
//! The scraper is deliberately forgiving. It knows nothing of lexc grammar
//! beyond one line at a time, and anything it cannot read as a complete entry
//! is skipped rather than reported; see [`SkipReason`] for the rules. Every
//! accepted lemma is logged at `debug` level, every skipped line at `trace`.
use super::elision::strip_comment;
use super::error::Result;
use super::escapes::{self, Restore, RANGE_MARKER};
use super::exclusions::ExclusionFilter;
use super::flags::strip_flag_diacritics;
use super::starts_with_keyword;
use std::collections::BTreeSet;
use std::io::BufRead;
use tracing::{debug, trace};

/// Lemmas that only ever stand for placeholder entries.
const PLACEHOLDER_LEMMAS: [&str; 3] = ["", "#", "#;"];

/// Why a line did not yield a lemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Only whitespace.
    Blank,
    /// Matched an exclusion pattern.
    Excluded,
    /// A `LEXICON` or `Multichar_Symbols` header.
    SectionHeader,
    /// Nothing left once comments and flag diacritics are gone.
    Empty,
    /// No `;`, so not a complete entry.
    Unterminated,
    /// An `+Err` analysis, i.e. a deliberately misspelled form.
    ErrorAnalysis,
    /// Two fields or fewer: a bare continuation without lemma content.
    TooFewFields,
    /// The lemma position holds a `<...>` regular expression.
    RegexEntry,
    /// The lemma came out as one of the placeholder forms.
    Placeholder,
}

/// What a single line contributes to the lemma set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Lemma(String),
    Skipped(SkipReason),
}

/// Cuts hidden text before its first unescaped `+`.
fn before_first_tag(hidden: &str) -> &str {
    let mut chars = hidden.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '%' => {
                chars.next();
            }
            '+' => return &hidden[..idx],
            _ => {}
        }
    }
    hidden
}

/// Classifies one raw source line.
pub fn classify_line(line: &str, filter: &ExclusionFilter) -> LineClass {
    use LineClass::Skipped;

    if line.trim().is_empty() {
        return Skipped(SkipReason::Blank);
    }
    if filter.is_excluded(line) {
        return Skipped(SkipReason::Excluded);
    }
    let hidden = escapes::hide(line);
    let entry = strip_flag_diacritics(strip_comment(&hidden).trim());
    let entry: &str = &entry;

    if starts_with_keyword(entry, "LEXICON") || starts_with_keyword(entry, "Multichar_Symbols") {
        return Skipped(SkipReason::SectionHeader);
    }
    if entry.is_empty() {
        return Skipped(SkipReason::Empty);
    }
    if !entry.contains(';') {
        return Skipped(SkipReason::Unterminated);
    }
    if entry.contains("+Err") {
        return Skipped(SkipReason::ErrorAnalysis);
    }
    if entry.split_whitespace().count() <= 2 {
        return Skipped(SkipReason::TooFewFields);
    }

    let source = match entry.split_once(':') {
        Some((analysis, _)) => analysis,
        None => entry.split_whitespace().next().unwrap_or_default(),
    };
    if source.contains(RANGE_MARKER) {
        return Skipped(SkipReason::RegexEntry);
    }
    let lemma = escapes::unhide(before_first_tag(source), Restore::Literal);
    if PLACEHOLDER_LEMMAS.contains(&lemma.as_str()) {
        return Skipped(SkipReason::Placeholder);
    }
    LineClass::Lemma(lemma)
}

/// The lemma of one raw source line, if it has one.
pub fn lemma_of_line(line: &str, filter: &ExclusionFilter) -> Option<String> {
    match classify_line(line, filter) {
        LineClass::Lemma(lemma) => Some(lemma),
        LineClass::Skipped(_) => None,
    }
}

/// Collects the unique lemmas of a sequence of lexc lines.
pub fn scrape_lemmas<I, S>(lines: I, filter: &ExclusionFilter) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lemmas = BTreeSet::new();
    for (idx, line) in lines.into_iter().enumerate() {
        match classify_line(line.as_ref(), filter) {
            LineClass::Lemma(lemma) => {
                debug!(line = idx + 1, %lemma, "lemma");
                lemmas.insert(lemma);
            }
            LineClass::Skipped(reason) => {
                trace!(line = idx + 1, ?reason, "skipped");
            }
        }
    }
    lemmas
}

/// Like [`scrape_lemmas`], reading lines from `reader`.
pub fn scrape_lemmas_from_reader<R: BufRead>(
    reader: R,
    filter: &ExclusionFilter,
) -> Result<BTreeSet<String>> {
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    Ok(scrape_lemmas(lines, filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> LineClass {
        classify_line(line, &ExclusionFilter::empty())
    }

    fn lemma(line: &str) -> Option<String> {
        lemma_of_line(line, &ExclusionFilter::empty())
    }

    #[test]
    fn test_pair_lemma() {
        assert_eq!(lemma("cat:cats N ;").as_deref(), Some("cat"));
        assert_eq!(lemma("cat+N+Sg:cats N ;").as_deref(), Some("cat"));
    }

    #[test]
    fn test_bare_lemma() {
        assert_eq!(lemma("juosta V_JUOSTA ;").as_deref(), Some("juosta"));
        assert_eq!(lemma("  talo+N N ; ! house").as_deref(), Some("talo"));
    }

    #[test]
    fn test_escapes_are_unescaped() {
        assert_eq!(lemma("wow%!+Interj:wow%! ADV ;").as_deref(), Some("wow!"));
        assert_eq!(lemma("a%:b+N:a%:b N ;").as_deref(), Some("a:b"));
        assert_eq!(lemma("New% York+N:New% York N ;").as_deref(), Some("New York"));
        assert_eq!(lemma("C%+%++N:C%+%+ N ;").as_deref(), Some("C++"));
    }

    #[test]
    fn test_flag_diacritics_are_dropped() {
        assert_eq!(
            lemma("@P.Cmp.Yes@talo+N:@P.Cmp.Yes@talo N ;").as_deref(),
            Some("talo")
        );
    }

    #[test]
    fn test_gloss_does_not_leak_into_fields() {
        assert_eq!(lemma("talo:talo \"house\" ;"), None);
        assert_eq!(lemma("talo:talo N \"house\" ;").as_deref(), Some("talo"));
    }

    #[test]
    fn test_skip_reasons() {
        let cases = [
            ("   ", SkipReason::Blank),
            ("LEXICON Root", SkipReason::SectionHeader),
            ("Multichar_Symbols +N ;", SkipReason::SectionHeader),
            ("! just a comment", SkipReason::Empty),
            ("talo+N:talo N", SkipReason::Unterminated),
            ("kissa+N+Err/Orth:kisa N ;", SkipReason::ErrorAnalysis),
            ("N_TALO ;", SkipReason::TooFewFields),
            ("< a b > N ;", SkipReason::RegexEntry),
            ("# N ;", SkipReason::Placeholder),
            ("+N:x N ;", SkipReason::Placeholder),
        ];
        for (line, reason) in cases {
            assert_eq!(classify(line), LineClass::Skipped(reason), "{line:?}");
        }
    }

    #[test]
    fn test_excluded_lines() {
        let filter = ExclusionFilter::empty().with_patterns(["NOLEMMA"]).unwrap();
        assert_eq!(
            classify_line("talo:talo N ; ! NOLEMMA", &filter),
            LineClass::Skipped(SkipReason::Excluded)
        );
    }

    #[test]
    fn test_scrape_deduplicates() {
        let lemmas = scrape_lemmas(
            ["talo+N+Sg:talo N ;", "talo+N+Pl:talo N ;", "kala:kala N ;"],
            &ExclusionFilter::empty(),
        );
        assert_eq!(
            lemmas.into_iter().collect::<Vec<_>>(),
            vec!["kala".to_string(), "talo".to_string()]
        );
    }

    #[test]
    fn test_scrape_from_reader() {
        let source = "LEXICON Root\ntalo:talo N ;\n\nkala N ;\n";
        let lemmas =
            scrape_lemmas_from_reader(source.as_bytes(), &ExclusionFilter::empty()).unwrap();
        assert_eq!(lemmas.len(), 2);
        assert!(lemmas.contains("talo"));
        assert!(lemmas.contains("kala"));
    }
}
