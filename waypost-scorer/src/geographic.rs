//! Distance similarity.

use waypost_core::Category;

/// Distance, in metres, beyond which the score decays exponentially.
pub const DECAY_START_METRES: f64 = 10_000.0;

/// How far, relative to a point-like place, a category may sprawl.
///
/// Large areas such as national parks are matched against a hint kilometres
/// from their nominal coordinate, so distances are divided by this factor
/// before scoring.
#[must_use]
pub const fn tolerance_factor(category: Category) -> f64 {
    match category {
        Category::NationalPark => 20.0,
        Category::Mountain => 10.0,
        Category::Lake => 5.0,
        Category::Park | Category::Garden | Category::Beach => 3.0,
        Category::Castle | Category::Market => 1.5,
        _ => 1.0,
    }
}

/// Score the distance between a hint and a candidate.
///
/// Non-finite or negative distances score zero.
///
/// ```
/// use waypost_core::Category;
/// use waypost_scorer::geographic::geographic_score;
///
/// assert_eq!(geographic_score(80.0, Category::Temple), 1.0);
/// assert_eq!(geographic_score(1_500.0, Category::Temple), 0.7);
/// assert_eq!(geographic_score(1_500.0, Category::NationalPark), 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance scaling and exponential decay are floating-point maths"
)]
pub fn geographic_score(distance_metres: f64, category: Category) -> f64 {
    if !distance_metres.is_finite() || distance_metres < 0.0 {
        return 0.0;
    }
    let scaled = distance_metres / tolerance_factor(category);
    match scaled {
        d if d <= 100.0 => 1.0,
        d if d <= 500.0 => 0.95,
        d if d <= 1_000.0 => 0.85,
        d if d <= 2_000.0 => 0.7,
        d if d <= 5_000.0 => 0.5,
        d if d <= DECAY_START_METRES => 0.3,
        d => 0.3 * (-(d - DECAY_START_METRES) / DECAY_START_METRES).exp(),
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(100.0, 1.0)]
    #[case(400.0, 0.95)]
    #[case(900.0, 0.85)]
    #[case(2_000.0, 0.7)]
    #[case(4_000.0, 0.5)]
    #[case(10_000.0, 0.3)]
    fn follows_the_step_function(#[case] distance: f64, #[case] expected: f64) {
        let score = geographic_score(distance, Category::Temple);
        assert!((score - expected).abs() < 1e-12, "{distance} m scored {score}");
    }

    #[rstest]
    fn decays_beyond_ten_kilometres() {
        let at_twenty = geographic_score(20_000.0, Category::Museum);
        assert!((at_twenty - 0.3 * (-1.0_f64).exp()).abs() < 1e-12);
        assert!(geographic_score(100_000.0, Category::Museum) < at_twenty);
    }

    #[rstest]
    fn sprawling_categories_tolerate_distance() {
        assert!(
            geographic_score(8_000.0, Category::Mountain)
                > geographic_score(8_000.0, Category::Viewpoint)
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-1.0)]
    fn invalid_distances_score_zero(#[case] distance: f64) {
        assert!(geographic_score(distance, Category::Other).abs() < f64::EPSILON);
    }
}
