//! Escape Codec
//!
//! lexc escapes its reserved characters with a leading `%`. Most of the checks
//! in this crate split lines on those very characters (`!` starts a comment,
//! `:` separates the analysis from the surface side, `;` ends an entry, ...),
//! so escaped occurrences are first swapped for placeholder code points that
//! no split will ever touch, and swapped back once the interesting part of the
//! line has been cut out.
//!
//! The swap is driven by a single table, [`ESCAPES`]. Each row pairs an escape
//! sequence with the literal character it stands for and the placeholder used
//! while the text is hidden. Placeholders are taken from Supplementary Private
//! Use Area-A (`U+F0000` plus the literal's code point); text that already
//! contains those code points is outside the codec's domain.
//!
//! `%%` is an escaped percent sign. It is kept verbatim in hidden text and the
//! character following it is never treated as escaped.

use super::elision;

/// One row of the substitution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escape {
    /// The escape as written in lexc source, e.g. `%!`.
    pub escaped: &'static str,
    /// The character the escape stands for.
    pub literal: char,
    /// The code point used in hidden text.
    pub placeholder: char,
}

/// Reserved lexc characters protected while a line is being taken apart.
pub const ESCAPES: [Escape; 7] = [
    Escape {
        escaped: "%!",
        literal: '!',
        placeholder: '\u{F0021}',
    },
    Escape {
        escaped: "%:",
        literal: ':',
        placeholder: '\u{F003A}',
    },
    Escape {
        escaped: "%<",
        literal: '<',
        placeholder: '\u{F003C}',
    },
    Escape {
        escaped: "%>",
        literal: '>',
        placeholder: '\u{F003E}',
    },
    Escape {
        escaped: "% ",
        literal: ' ',
        placeholder: '\u{F0020}',
    },
    Escape {
        escaped: "%\"",
        literal: '"',
        placeholder: '\u{F0022}',
    },
    Escape {
        escaped: "%;",
        literal: ';',
        placeholder: '\u{F003B}',
    },
];

/// Stands in for an elided `<...>` range.
pub const RANGE_MARKER: char = '\u{F0100}';

/// Stands in for the text up to a `>` that has no opening `<`.
pub const UNMATCHED_RANGE_MARKER: char = '\u{F0101}';

/// How [`unhide`] writes escaped characters back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restore {
    /// As the bare character, for surface strings such as lemmas.
    Literal,
    /// In `%`-escaped form, for text that must stay valid lexc.
    Escaped,
}

fn by_literal(c: char) -> Option<&'static Escape> {
    ESCAPES.iter().find(|escape| escape.literal == c)
}

fn by_placeholder(c: char) -> Option<&'static Escape> {
    ESCAPES.iter().find(|escape| escape.placeholder == c)
}

fn is_elision_marker(c: char) -> bool {
    c == RANGE_MARKER || c == UNMATCHED_RANGE_MARKER
}

/// Replaces every escape in the table with its placeholder and nothing else.
pub fn hide_escapes(s: &str) -> String {
    let mut hidden = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            hidden.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => match by_literal(next) {
                Some(escape) => hidden.push(escape.placeholder),
                None => {
                    // `%%` and escapes outside the table pass through as a pair
                    hidden.push('%');
                    hidden.push(next);
                }
            },
            None => hidden.push('%'),
        }
    }
    hidden
}

/// Hides escapes, then elides `<...>` ranges and ` "..."` glosses.
///
/// Elision runs on the hidden text, so `%<`, `%>` and `%"` are never taken
/// for delimiters.
pub fn hide(s: &str) -> String {
    let hidden = hide_escapes(s);
    let hidden = if hidden.contains('<') && hidden.contains('>') {
        elision::elide_balanced_ranges(&hidden).into_owned()
    } else {
        hidden
    };
    if hidden.contains('"') {
        elision::elide_glosses(&hidden).into_owned()
    } else {
        hidden
    }
}

/// Turns placeholders back into characters and drops elision markers.
///
/// With [`Restore::Literal`] any remaining `%c` escape is resolved to `c` as
/// well, so `%%` becomes `%`.
pub fn unhide(s: &str, restore: Restore) -> String {
    let mut restored = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if is_elision_marker(c) {
            continue;
        }
        if let Some(escape) = by_placeholder(c) {
            match restore {
                Restore::Literal => restored.push(escape.literal),
                Restore::Escaped => restored.push_str(escape.escaped),
            }
            continue;
        }
        if c == '%' && restore == Restore::Literal {
            match chars.next() {
                Some(next) => match by_placeholder(next) {
                    Some(escape) => restored.push(escape.literal),
                    None => restored.push(next),
                },
                None => restored.push('%'),
            }
            continue;
        }
        restored.push(c);
    }
    restored
}
