//! Script-driven language ordering.

/// Broad-coverage order used after any script-specific languages.
pub const DEFAULT_LANGUAGES: [&str; 8] = ["en", "fr", "de", "es", "it", "pt", "ja", "zh"];

/// Fallback language order appended to every priority list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePriority {
    fallback: Vec<String>,
}

impl LanguagePriority {
    /// Use `languages`, in order, as the fallback list.
    ///
    /// Blank codes are dropped and codes are lowercased.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fallback = languages
            .into_iter()
            .map(|code| code.as_ref().trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();
        Self { fallback }
    }

    /// The fallback language codes.
    #[must_use]
    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }
}

impl Default for LanguagePriority {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES)
    }
}

const fn is_kana(ch: char) -> bool {
    matches!(ch, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

const fn is_hangul(ch: char) -> bool {
    matches!(ch, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

const fn is_han(ch: char) -> bool {
    matches!(
        ch,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' | '\u{20000}'..='\u{2A6DF}'
    )
}

const fn is_cyrillic(ch: char) -> bool {
    matches!(ch, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}')
}

const fn is_arabic(ch: char) -> bool {
    matches!(ch, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}')
}

const fn is_hebrew(ch: char) -> bool {
    matches!(ch, '\u{0590}'..='\u{05FF}')
}

const fn is_thai(ch: char) -> bool {
    matches!(ch, '\u{0E00}'..='\u{0E7F}')
}

/// Order the languages to try for `text`.
///
/// Script-specific languages come first: kana puts Japanese first, Hangul
/// Korean, Han without kana Chinese then Japanese, and Cyrillic, Arabic,
/// Hebrew and Thai their usual languages. The fallback list follows.
/// Duplicates keep their first position.
///
/// # Examples
/// ```
/// use waypost_resolver::{LanguagePriority, language_priority};
///
/// let order = language_priority("文武廟", &LanguagePriority::default());
/// assert_eq!(&order[..3], ["zh", "ja", "en"]);
///
/// let order = language_priority("Man Mo Temple", &LanguagePriority::default());
/// assert_eq!(order.first().map(String::as_str), Some("en"));
/// ```
#[must_use]
pub fn language_priority(text: &str, priority: &LanguagePriority) -> Vec<String> {
    let has = |script: fn(char) -> bool| text.chars().any(script);
    let kana = has(is_kana);

    let mut scripted: Vec<&str> = Vec::new();
    if kana {
        scripted.push("ja");
    }
    if has(is_hangul) {
        scripted.push("ko");
    }
    if has(is_han) && !kana {
        scripted.extend(["zh", "ja"]);
    }
    for (script, language) in [
        (is_cyrillic as fn(char) -> bool, "ru"),
        (is_arabic, "ar"),
        (is_hebrew, "he"),
        (is_thai, "th"),
    ] {
        if has(script) {
            scripted.push(language);
        }
    }

    let mut ordered: Vec<String> = Vec::new();
    for language in scripted
        .into_iter()
        .chain(priority.fallback().iter().map(String::as_str))
    {
        if !ordered.iter().any(|seen| seen == language) {
            ordered.push(language.to_owned());
        }
    }
    ordered
}
