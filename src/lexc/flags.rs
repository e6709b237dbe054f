//! Flag diacritics
//!
//! Flag diacritics (`@P.CASE.NOM@`, `@U.Cap.Obl@`, ...) constrain paths through
//! the compiled network but never reach a surface form, so they are dropped
//! before a lemma is cut out of an entry.
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// `@`, an operator from `CRDPNU`, any separator, the rest up to the closing `@`.
static FLAG_DIACRITIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[CRDPNU].[^@]*@").unwrap());

pub fn strip_flag_diacritics(s: &str) -> Cow<'_, str> {
    if !s.contains('@') {
        return Cow::Borrowed(s);
    }
    FLAG_DIACRITIC_REGEX.replace_all(s, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_every_operator() {
        for op in ["C", "R", "D", "P", "N", "U"] {
            let entry = format!("@{}.Feat.Val@talo+N:talo N ;", op);
            assert_eq!(strip_flag_diacritics(&entry), "talo+N:talo N ;");
        }
    }

    #[test]
    fn test_strips_several_flags() {
        assert_eq!(
            strip_flag_diacritics("@P.Pmo.Yes@talo@D.Cmp.Bound@+N"),
            "talo+N"
        );
    }

    #[test]
    fn test_leaves_other_at_signs() {
        assert_eq!(strip_flag_diacritics("user@X.host@ N ;"), "user@X.host@ N ;");
        assert_eq!(strip_flag_diacritics("@ N ;"), "@ N ;");
    }

    #[test]
    fn test_borrows_without_at_sign() {
        assert!(matches!(strip_flag_diacritics("talo N ;"), Cow::Borrowed(_)));
    }
}
