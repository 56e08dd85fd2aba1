//! Tokenised views of names and titles.
//!
//! A [`TextProfile`] is computed once per string and reused by every
//! similarity signal: the folded form feeds edit distance and trigrams, the
//! content tokens feed token overlap, and the compact character sequence
//! feeds the bigram path for CJK text.

use waypost_core::text::{contains_cjk, fold};

/// Languages with a stop-word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopLanguage {
    /// English; also the fallback on ties.
    English,
    /// French.
    French,
    /// Spanish.
    Spanish,
    /// German.
    German,
    /// Italian.
    Italian,
}

impl StopLanguage {
    /// Detection order; earlier entries win ties.
    pub const ALL: [Self; 5] = [
        Self::English,
        Self::French,
        Self::Spanish,
        Self::German,
        Self::Italian,
    ];

    /// Function words ignored when comparing names.
    #[must_use]
    pub const fn stop_words(self) -> &'static [&'static str] {
        match self {
            Self::English => &[
                "the", "of", "a", "an", "and", "in", "at", "on", "for", "to", "by", "with", "from",
            ],
            Self::French => &[
                "le", "la", "les", "de", "des", "du", "d", "l", "et", "en", "au", "aux", "un",
                "une", "sur",
            ],
            Self::Spanish => &[
                "el", "la", "los", "las", "de", "del", "y", "en", "un", "una", "al", "por",
            ],
            Self::German => &[
                "der", "die", "das", "den", "dem", "des", "und", "im", "am", "zum", "zur", "von",
                "ein", "eine",
            ],
            Self::Italian => &[
                "il", "lo", "la", "i", "gli", "le", "di", "del", "della", "dei", "e", "in", "al",
                "un", "una",
            ],
        }
    }

    fn is_stop_word(self, word: &str) -> bool {
        self.stop_words().contains(&word)
    }

    /// Pick the list with the most hits among `words`.
    #[must_use]
    pub fn detect(words: &[&str]) -> Self {
        let mut best = Self::English;
        let mut best_hits = 0_usize;
        for language in Self::ALL {
            let hits = words.iter().filter(|w| language.is_stop_word(w)).count();
            if hits > best_hits {
                best = language;
                best_hits = hits;
            }
        }
        best
    }
}

/// Words that qualify a query rather than name the place.
pub const MODIFIER_WORDS: &[&str] = &[
    "near",
    "nearby",
    "around",
    "close",
    "closest",
    "nearest",
    "exact",
    "exactly",
    "specific",
    "specifically",
    "here",
];

/// Normalised tokens and derived views of one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextProfile {
    folded: String,
    words: Vec<String>,
    tokens: Vec<String>,
    compact: Vec<char>,
    cjk: bool,
    language: StopLanguage,
}

impl TextProfile {
    /// Fold and tokenise `text`.
    ///
    /// Content tokens exclude stop words for the detected language and
    /// query modifiers. When nothing survives the filter the plain words are
    /// kept, so a name made only of function words still compares.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let folded = fold(text);
        let words: Vec<String> = folded
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        let borrowed: Vec<&str> = words.iter().map(String::as_str).collect();
        let language = StopLanguage::detect(&borrowed);
        let mut tokens: Vec<String> = words
            .iter()
            .filter(|word| !language.is_stop_word(word) && !MODIFIER_WORDS.contains(&word.as_str()))
            .cloned()
            .collect();
        if tokens.is_empty() {
            tokens.clone_from(&words);
        }
        let cjk = contains_cjk(&folded);
        let compact = folded.chars().filter(|ch| *ch != ' ').collect();
        Self {
            folded,
            words,
            tokens,
            compact,
            cjk,
            language,
        }
    }

    /// Folded form of the whole string.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Every folded word, including stop words and modifiers.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Content tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Characters of the folded form without spaces.
    #[must_use]
    pub fn compact(&self) -> &[char] {
        &self.compact
    }

    /// Report whether the string contains CJK characters.
    #[must_use]
    pub const fn is_cjk(&self) -> bool {
        self.cjk
    }

    /// Language whose stop words were removed.
    #[must_use]
    pub const fn language(&self) -> StopLanguage {
        self.language
    }

    /// Character bigrams of the compact form; a single character is its own
    /// bigram.
    #[must_use]
    pub fn bigrams(&self) -> Vec<(char, char)> {
        match self.compact.as_slice() {
            [] => Vec::new(),
            [only] => vec![(*only, *only)],
            chars => chars
                .windows(2)
                .filter_map(|pair| match pair {
                    [a, b] => Some((*a, *b)),
                    _ => None,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("The Church of the Holy Sepulchre", &["church", "holy", "sepulchre"])]
    #[case("Musée du Louvre", &["musee", "louvre"])]
    #[case("Museo del Prado", &["museo", "prado"])]
    #[case("Temples near Kyoto", &["temples", "kyoto"])]
    #[case("The The", &["the", "the"])]
    fn extracts_content_tokens(#[case] text: &str, #[case] expected: &[&str]) {
        let profile = TextProfile::new(text);
        assert_eq!(profile.tokens(), expected);
    }

    #[rstest]
    #[case("Musée de la Ville", StopLanguage::French)]
    #[case("Museo de los Niños", StopLanguage::Spanish)]
    #[case("Haus der Kunst und der Musik", StopLanguage::German)]
    #[case("Galleria degli Uffizi della città", StopLanguage::Italian)]
    #[case("Louvre", StopLanguage::English)]
    fn detects_stop_language(#[case] text: &str, #[case] expected: StopLanguage) {
        assert_eq!(TextProfile::new(text).language(), expected);
    }

    #[rstest]
    fn cjk_profile_builds_bigrams() {
        let profile = TextProfile::new("文武 廟");
        assert!(profile.is_cjk());
        assert_eq!(profile.bigrams(), vec![('文', '武'), ('武', '廟')]);
    }

    #[rstest]
    fn single_character_is_its_own_bigram() {
        assert_eq!(TextProfile::new("寺").bigrams(), vec![('寺', '寺')]);
    }
}
