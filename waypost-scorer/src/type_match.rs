//! Category agreement.

use waypost_core::{Category, CategoryFamily};

/// Score for a query that names no type.
pub const NEUTRAL: f64 = 0.5;
/// Score when the candidate's category cannot be determined.
pub const UNKNOWN_CANDIDATE: f64 = 0.3;
/// Score for categories in the same or a related family.
pub const RELATED: f64 = 0.6;
/// Score for unrelated categories.
pub const UNRELATED: f64 = 0.1;

/// Family pairs treated as related in either direction.
const RELATED_FAMILIES: &[(CategoryFamily, CategoryFamily)] = &[
    (CategoryFamily::Religious, CategoryFamily::Historical),
    (CategoryFamily::Cultural, CategoryFamily::Historical),
    (CategoryFamily::Structure, CategoryFamily::Historical),
    (CategoryFamily::Nature, CategoryFamily::Structure),
];

/// Report whether two distinct categories are related.
#[must_use]
pub fn are_related(a: Category, b: Category) -> bool {
    let (fa, fb) = (a.family(), b.family());
    if fa == CategoryFamily::Other || fb == CategoryFamily::Other {
        return false;
    }
    fa == fb
        || RELATED_FAMILIES
            .iter()
            .any(|&(x, y)| (x == fa && y == fb) || (x == fb && y == fa))
}

/// Score how well a candidate's category agrees with the query's.
///
/// [`Category::Other`] counts as unknown on either side.
///
/// ```
/// use waypost_core::Category;
/// use waypost_scorer::type_match::type_score;
///
/// assert_eq!(type_score(Some(Category::Temple), Some(Category::Temple)), 1.0);
/// assert_eq!(type_score(None, Some(Category::Temple)), 0.5);
/// assert_eq!(type_score(Some(Category::Commercial), Some(Category::Temple)), 0.1);
/// ```
#[must_use]
pub fn type_score(query: Option<Category>, candidate: Option<Category>) -> f64 {
    let known = |category: Option<Category>| category.filter(|c| *c != Category::Other);
    match (known(query), known(candidate)) {
        (None, _) => NEUTRAL,
        (Some(_), None) => UNKNOWN_CANDIDATE,
        (Some(q), Some(c)) if q == c => 1.0,
        (Some(q), Some(c)) if are_related(q, c) => RELATED,
        (Some(_), Some(_)) => UNRELATED,
    }
}
