//! Overpass QL construction.

use waypost_core::{KeywordSearchRequest, text::fold};

/// Tag filters for keywords naming a kind of place.
const KEYWORD_FILTERS: &[(&str, &[&str])] = &[
    ("tourist attraction", &[r#"["tourism"="attraction"]"#]),
    ("attraction", &[r#"["tourism"="attraction"]"#]),
    ("museum", &[r#"["tourism"="museum"]"#]),
    ("gallery", &[r#"["tourism"="gallery"]"#]),
    ("viewpoint", &[r#"["tourism"="viewpoint"]"#]),
    (
        "temple",
        &[r#"["amenity"="place_of_worship"]["religion"~"^(buddhist|hindu|taoist|jain|sikh)$"]"#],
    ),
    ("shrine", &[r#"["amenity"="place_of_worship"]["religion"="shinto"]"#]),
    ("church", &[r#"["amenity"="place_of_worship"]["religion"="christian"]"#]),
    ("mosque", &[r#"["amenity"="place_of_worship"]["religion"="muslim"]"#]),
    ("synagogue", &[r#"["amenity"="place_of_worship"]["religion"="jewish"]"#]),
    ("place of worship", &[r#"["amenity"="place_of_worship"]"#]),
    ("park", &[r#"["leisure"="park"]"#]),
    ("garden", &[r#"["leisure"="garden"]"#]),
    ("monument", &[r#"["historic"="monument"]"#, r#"["historic"="memorial"]"#]),
    ("historic site", &[r#"["historic"]"#]),
    ("castle", &[r#"["historic"="castle"]"#]),
    ("beach", &[r#"["natural"="beach"]"#]),
    ("market", &[r#"["amenity"="marketplace"]"#]),
];

/// Build the Overpass QL query for one keyword search.
///
/// `server_timeout_secs` is passed to Overpass as the server-side budget.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use waypost_core::KeywordSearchRequest;
/// use waypost_data::overpass::build_query;
///
/// let request = KeywordSearchRequest {
///     keyword: "museum".to_owned(),
///     center: Coord { x: 114.15, y: 22.284 },
///     radius_metres: 500.0,
///     limit: 20,
/// };
/// let query = build_query(&request, 25);
/// assert!(query.contains(r#"nwr["tourism"="museum"](around:500,22.284000,114.150000);"#));
/// assert!(query.ends_with("out center tags 20;"));
/// ```
#[must_use]
pub fn build_query(request: &KeywordSearchRequest, server_timeout_secs: u64) -> String {
    let around = format!(
        "(around:{:.0},{:.6},{:.6})",
        request.radius_metres, request.center.y, request.center.x
    );
    let folded = fold(&request.keyword);
    let statements: Vec<String> = KEYWORD_FILTERS
        .iter()
        .find(|(keyword, _)| *keyword == folded)
        .map_or_else(
            || vec![format!(r#"["name"~"{}",i]"#, escape_regex(request.keyword.trim()))],
            |(_, filters)| filters.iter().map(|filter| (*filter).to_owned()).collect(),
        )
        .into_iter()
        .map(|filter| format!("  nwr{filter}{around};"))
        .collect();
    format!(
        "[out:json][timeout:{server_timeout_secs}];\n(\n{}\n);\nout center tags {};",
        statements.join("\n"),
        request.limit
    )
}

/// Escape `text` for use as a literal inside a quoted QL regex.
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\\\\\"),
            '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' => {
                escaped.push_str("\\\\");
                escaped.push(ch);
            }
            '\n' | '\r' | '\t' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    fn request(keyword: &str) -> KeywordSearchRequest {
        KeywordSearchRequest {
            keyword: keyword.to_owned(),
            center: Coord {
                x: 114.15,
                y: 22.284,
            },
            radius_metres: 750.4,
            limit: 15,
        }
    }

    #[rstest]
    fn known_keywords_use_tag_filters() {
        let query = build_query(&request("Temple"), 25);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains(r#"nwr["amenity"="place_of_worship"]["religion"~"#));
        assert!(query.contains("(around:750,22.284000,114.150000);"));
        assert!(query.ends_with("out center tags 15;"));
        assert!(!query.contains(r#"["name""#));
    }

    #[rstest]
    fn multi_filter_keywords_emit_one_statement_each() {
        let query = build_query(&request("monument"), 25);
        assert_eq!(query.matches("nwr[").count(), 2);
        assert!(query.contains(r#"["historic"="memorial"]"#));
    }

    #[rstest]
    fn other_keywords_match_names_case_insensitively() {
        let query = build_query(&request("  Man Mo "), 25);
        assert!(query.contains(r#"nwr["name"~"Man Mo",i](around:750"#));
    }

    #[rstest]
    #[case("St. Paul's", r#"St\\. Paul's"#)]
    #[case(r#"The "Peak""#, r#"The \"Peak\""#)]
    #[case("a(b)|c", r#"a\\(b\\)\\|c"#)]
    #[case(r"AC\DC", r"AC\\\\DC")]
    fn name_patterns_are_escaped(#[case] keyword: &str, #[case] expected: &str) {
        assert_eq!(escape_regex(keyword), expected);
    }
}
