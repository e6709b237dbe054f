//! Property-based tests for the escape codec and both line passes
//!
//! These tests ensure that hiding is reversible over the escape alphabet and
//! that arbitrary input never breaks the scraper or the scanner.

use lexc_check::lexc::escapes::{hide, unhide, Restore, ESCAPES};
use lexc_check::lexc::multichars::{MulticharScanner, ScanState};
use lexc_check::lexc::{scrape_lemmas, ExclusionFilter};
use proptest::prelude::*;

/// One piece of lexc text as (source, literal) forms
fn piece_strategy() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        // Plain text, no reserved characters
        "[a-zA-Z0-9 +_]{0,6}".prop_map(|text| (text.clone(), text)),
        // One of the five escapes every lexc dialect knows
        prop::sample::select(vec!["%!", "%:", "%<", "% ", "%\""])
            .prop_map(|escaped| (escaped.to_string(), escaped[1..].to_string())),
    ]
}

fn escaped_text_strategy() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(piece_strategy(), 0..12).prop_map(|pieces| {
        pieces
            .into_iter()
            .fold((String::new(), String::new()), |(mut source, mut literal), (s, l)| {
                source.push_str(&s);
                literal.push_str(&l);
                (source, literal)
            })
    })
}

/// Lines that look like lexc often enough to reach every state
fn lexc_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Multichar_Symbols".to_string()),
        Just("LEXICON Root".to_string()),
        "[a-z]{1,5}(\\+[A-Z][a-z]{0,3}){0,3}:[a-z]{1,5} [A-Z_]{1,5} ;",
        "[ -~]{0,30}",
        "\\PC{0,30}",
    ]
}

fn rank(state: ScanState) -> u8 {
    match state {
        ScanState::Preamble => 0,
        ScanState::Multichars => 1,
        ScanState::Lexicons => 2,
    }
}

proptest! {
    #[test]
    fn hide_then_unhide_escaped_is_identity((source, _) in escaped_text_strategy()) {
        prop_assert_eq!(unhide(&hide(&source), Restore::Escaped), source);
    }

    #[test]
    fn hide_then_unhide_literal_restores_characters((source, literal) in escaped_text_strategy()) {
        prop_assert_eq!(unhide(&hide(&source), Restore::Literal), literal);
    }

    #[test]
    fn hidden_text_has_no_escapes((source, _) in escaped_text_strategy()) {
        let hidden = hide(&source);
        for escape in &ESCAPES {
            prop_assert!(!hidden.contains(escape.escaped));
        }
    }

    #[test]
    fn scraper_never_returns_placeholders(lines in prop::collection::vec(lexc_line_strategy(), 0..20)) {
        let lemmas = scrape_lemmas(&lines, &ExclusionFilter::empty());
        for placeholder in ["", "#", "#;"] {
            prop_assert!(!lemmas.contains(placeholder));
        }
    }

    #[test]
    fn scraping_a_line_twice_is_idempotent(line in lexc_line_strategy()) {
        let filter = ExclusionFilter::empty();
        let once = scrape_lemmas([&line], &filter);
        let twice = scrape_lemmas([&line, &line], &filter);
        prop_assert!(once.len() <= 1);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn scanner_states_are_monotonic(lines in prop::collection::vec(lexc_line_strategy(), 0..30)) {
        let mut scanner = MulticharScanner::new();
        let mut previous = rank(scanner.state());
        for line in &lines {
            scanner.feed_line(line);
            let current = rank(scanner.state());
            prop_assert!(current >= previous);
            previous = current;
        }
        let report = scanner.finish();
        prop_assert_eq!(report.lines, lines.len());
        prop_assert!(report.entries <= lines.len());
        for diagnostic in &report.diagnostics {
            prop_assert!(diagnostic.line >= 1 && diagnostic.line <= lines.len());
        }
    }
}
