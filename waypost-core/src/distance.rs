//! Great-circle distances between WGS84 coordinates.

use geo::{Coord, Distance, Haversine, Point};

/// Haversine distance in metres between two coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypost_core::distance_metres;
///
/// let a = Coord { x: 114.1504, y: 22.2839 };
/// assert_eq!(distance_metres(a, a), 0.0);
/// ```
#[must_use]
pub fn distance_metres(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Report whether `location` is a finite coordinate within WGS84 bounds.
#[must_use]
pub fn is_valid_location(location: Coord<f64>) -> bool {
    location.x.is_finite()
        && location.y.is_finite()
        && (-180.0..=180.0).contains(&location.x)
        && (-90.0..=90.0).contains(&location.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_metres(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((110_000.0..112_500.0).contains(&d), "unexpected distance {d}");
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 0.0 }, true)]
    #[case(Coord { x: 180.0, y: -90.0 }, true)]
    #[case(Coord { x: 181.0, y: 0.0 }, false)]
    #[case(Coord { x: 0.0, y: f64::NAN }, false)]
    fn validates_locations(#[case] location: Coord<f64>, #[case] expected: bool) {
        assert_eq!(is_valid_location(location), expected);
    }
}
