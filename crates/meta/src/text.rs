//! Unicode normalization and accent folding.
//!
//! Every string that reaches an index key position goes through NFC first so
//! that composed and decomposed spellings of the same text collide. Folding
//! additionally strips accents and case for the unaccented match tier:
//! decompose, drop combining marks, lowercase, map Greek final sigma to the
//! medial form, recompose.

use std::borrow::Cow;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::{UnicodeNormalization, is_nfc};

/// Returns `true` if the text is already in NFC form.
pub fn is_normalized(text: &str) -> bool {
    is_nfc(text)
}

/// NFC-normalize, borrowing when the input already is.
pub fn nfc(text: &str) -> Cow<'_, str> {
    if is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}

/// Accent- and case-fold text into the unaccented index key form.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .map(|ch| if ch == 'ς' { 'σ' } else { ch })
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn nfc_borrows_when_already_normalized() {
        assert!(matches!(nfc("ἄρτος"), Cow::Borrowed(_)));
    }

    #[test]
    fn nfc_recomposes_decomposed_text() {
        // U+03B1 GREEK SMALL LETTER ALPHA + U+0313 + U+0301 composes to ἄ.
        let decomposed = "\u{3b1}\u{313}\u{301}ρτος";
        assert!(!is_normalized(decomposed));
        assert_eq!(nfc(decomposed), "ἄρτος");
    }

    #[rstest]
    #[case("ἄρτος", "αρτοσ")]
    #[case("ΑΡΤΟΣ", "αρτοσ")]
    #[case("Κύριε", "κυριε")]
    #[case("café", "cafe")]
    #[case("plain", "plain")]
    fn folding(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fold(input), expected);
    }

    #[test]
    fn folding_unifies_sigma_forms() {
        assert_eq!(fold("ἄρτος"), fold("ΑΡΤΟΣ"));
        assert_eq!(fold("νόστος"), fold("νοστοσ"));
    }
}
