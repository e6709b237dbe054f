//! Comment, gloss and range elision
//!
//! All functions here expect text that has already been through
//! [`hide_escapes`](super::escapes::hide_escapes); escaped delimiters are
//! placeholders by then and cannot be mistaken for the real thing.
use super::escapes::{RANGE_MARKER, UNMATCHED_RANGE_MARKER};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static GLOSS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#" "[^"]*""#).unwrap());
static RANGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static UNMATCHED_CLOSE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^>]*>").unwrap());

/// Result of [`elide_ranges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeElision<'a> {
    pub text: Cow<'a, str>,
    /// A `>` was found with no `<` anywhere on the line.
    pub unmatched_close: bool,
}

/// Cuts a line at its first `!`.
pub fn strip_comment(hidden: &str) -> &str {
    match hidden.find('!') {
        Some(idx) => &hidden[..idx],
        None => hidden,
    }
}

/// Removes every ` "..."` gloss.
pub fn elide_glosses(hidden: &str) -> Cow<'_, str> {
    GLOSS_REGEX.replace_all(hidden, "")
}

/// Replaces every `<...>` range with a single marker.
pub fn elide_balanced_ranges(hidden: &str) -> Cow<'_, str> {
    RANGE_REGEX.replace_all(hidden, RANGE_MARKER.to_string())
}

/// Elides ranges the way entry lines need it.
///
/// If the line has any `<`, balanced ranges are elided. Otherwise a stray `>`
/// takes everything before it down with it, and the elision is flagged so
/// callers can report it.
pub fn elide_ranges(hidden: &str) -> RangeElision<'_> {
    if hidden.contains('<') {
        return RangeElision {
            text: elide_balanced_ranges(hidden),
            unmatched_close: false,
        };
    }
    if hidden.contains('>') {
        return RangeElision {
            text: UNMATCHED_CLOSE_REGEX.replace(hidden, UNMATCHED_RANGE_MARKER.to_string()),
            unmatched_close: true,
        };
    }
    RangeElision {
        text: Cow::Borrowed(hidden),
        unmatched_close: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexc::escapes::hide_escapes;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("talo N ; ! house"), "talo N ; ");
        assert_eq!(strip_comment("talo N ;"), "talo N ;");
        assert_eq!(strip_comment("! whole line"), "");
    }

    #[test]
    fn test_strip_comment_keeps_escaped_bang() {
        let hidden = hide_escapes("wow%! Interj ; ! exclamation");
        let stripped = strip_comment(&hidden);
        assert!(stripped.starts_with("wow"));
        assert!(stripped.ends_with("Interj ; "));
    }

    #[test]
    fn test_elide_glosses_takes_shortest_span() {
        assert_eq!(
            elide_glosses(r#"a:b N "one" ; "two""#),
            "a:b N ;"
        );
    }

    #[test]
    fn test_gloss_needs_leading_space() {
        assert_eq!(elide_glosses(r#"a"b"c N ;"#), r#"a"b"c N ;"#);
    }

    #[test]
    fn test_elide_ranges_balanced() {
        let elided = elide_ranges("< a b c > N ;");
        assert!(!elided.unmatched_close);
        assert_eq!(elided.text, format!("{} N ;", RANGE_MARKER));
    }

    #[test]
    fn test_elide_ranges_unmatched_close() {
        let elided = elide_ranges("a b > c+N N ;");
        assert!(elided.unmatched_close);
        assert_eq!(elided.text, format!("{} c+N N ;", UNMATCHED_RANGE_MARKER));
    }

    #[test]
    fn test_elide_ranges_without_brackets_borrows() {
        let elided = elide_ranges("talo N ;");
        assert!(matches!(elided.text, Cow::Borrowed(_)));
        assert!(!elided.unmatched_close);
    }
}
