//! POI-type synonym groups consulted when matching query tokens.

/// Groups of folded words that name the same kind of place.
const GROUPS: &[&[&str]] = &[
    &["temple", "buddhist", "templo", "tempio", "tempel"],
    &["church", "cathedral", "chapel", "basilica", "eglise", "iglesia", "chiesa", "kirche"],
    &["mosque", "masjid", "mosquee", "mezquita", "moschee"],
    &["synagogue", "congregation", "shul", "sinagoga", "synagoge"],
    &["mount", "mt", "mountain", "mont", "monte", "berg"],
    &["saint", "st", "san", "santa", "sankt", "sainte", "ste"],
    &["museum", "museo", "musee", "museu"],
    &["castle", "chateau", "castillo", "castello", "schloss", "burg"],
    &["palace", "palais", "palacio", "palazzo", "palast"],
    &["fort", "fortress", "fortaleza", "fortezza", "festung"],
    &["park", "parc", "parque", "parco"],
    &["garden", "gardens", "jardin", "giardino", "garten"],
    &["lake", "lac", "lago"],
    &["bridge", "pont", "puente", "ponte", "brucke"],
    &["tower", "tour", "torre", "turm"],
    &["market", "marche", "mercado", "mercato", "markt"],
    &["shrine", "jinja"],
];

/// Report whether `a` and `b` are distinct words from the same group.
///
/// ```
/// use waypost_scorer::synonyms::are_synonyms;
///
/// assert!(are_synonyms("church", "cathedral"));
/// assert!(!are_synonyms("church", "church"));
/// assert!(!are_synonyms("church", "mosque"));
/// ```
#[must_use]
pub fn are_synonyms(a: &str, b: &str) -> bool {
    a != b
        && GROUPS
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("buddhist", "temple")]
    #[case("synagogue", "congregation")]
    #[case("shul", "synagogue")]
    #[case("mt", "mount")]
    #[case("st", "saint")]
    #[case("musee", "museum")]
    fn pairs_are_symmetric(#[case] a: &str, #[case] b: &str) {
        assert!(are_synonyms(a, b));
        assert!(are_synonyms(b, a));
    }

    #[rstest]
    fn unknown_words_have_no_synonyms() {
        assert!(!are_synonyms("louvre", "museum"));
    }
}
