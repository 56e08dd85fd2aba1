//! Text folding shared by deduplication and fuzzy matching.
//!
//! Folding makes comparisons insensitive to case, punctuation, width variants
//! and Latin diacritics, so that `"Café  Müller!"` and `"cafe muller"` compare
//! equal.
//!
//! # Examples
//! ```
//! use waypost_core::text::fold;
//!
//! assert_eq!(fold("Café  Müller!"), "cafe muller");
//! assert_eq!(fold("Man-Mo Temple"), "man mo temple");
//! ```

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Fold `text` into a lowercase, accent-free, punctuation-free form with
/// single spaces between words.
///
/// Combining marks are only removed after non-CJK base characters so kana
/// voicing marks survive the round trip through decomposition.
#[must_use]
pub fn fold(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut previous_is_cjk = false;
    for ch in text.nfkd() {
        if is_combining_mark(ch) {
            if previous_is_cjk {
                stripped.push(ch);
            }
            continue;
        }
        previous_is_cjk = is_cjk(ch);
        stripped.push(ch);
    }

    let mut folded = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for ch in stripped.nfc() {
        if ch.is_alphanumeric() {
            if pending_space && !folded.is_empty() {
                folded.push(' ');
            }
            pending_space = false;
            folded.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    folded
}

/// Build the deduplication key for a POI from its name and optional address.
///
/// # Examples
/// ```
/// use waypost_core::text::dedup_key;
///
/// assert_eq!(
///     dedup_key("Man Mo Temple", Some("124-126 Hollywood Rd")),
///     dedup_key("MAN MO TEMPLE ", Some("124–126 Hollywood Rd."))
/// );
/// ```
#[must_use]
pub fn dedup_key(name: &str, address: Option<&str>) -> String {
    let mut key = fold(name);
    key.push('|');
    key.push_str(&fold(address.unwrap_or_default()));
    key
}

/// Report whether `ch` belongs to a CJK script (Han, kana, Hangul).
#[must_use]
pub const fn is_cjk(ch: char) -> bool {
    matches!(
        ch,
        '\u{3040}'..='\u{309F}'   // Hiragana
            | '\u{30A0}'..='\u{30FF}' // Katakana
            | '\u{3400}'..='\u{4DBF}' // CJK Extension A
            | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
            | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
            | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
            | '\u{1100}'..='\u{11FF}' // Hangul jamo
            | '\u{20000}'..='\u{2A6DF}'
    )
}

/// Report whether `text` contains any CJK character.
#[must_use]
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Café", "cafe")]
    #[case("  St. Paul's   Cathedral ", "st paul s cathedral")]
    #[case("ＡＢＣ", "abc")]
    #[case("文武廟", "文武廟")]
    #[case("がっこう", "がっこう")]
    #[case("서울", "서울")]
    #[case("!!!", "")]
    fn folds_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fold(input), expected);
    }

    #[rstest]
    fn dedup_key_separates_name_and_address() {
        assert_ne!(dedup_key("a b", None), dedup_key("a", Some("b")));
    }

    #[rstest]
    #[case("Man Mo Temple", false)]
    #[case("文武廟 Temple", true)]
    #[case("Москва", false)]
    fn detects_cjk(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(contains_cjk(input), expected);
    }
}
