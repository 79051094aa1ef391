//! Flat-earth distance score used to order listings by proximity.
//!
//! A degree of latitude counts as 69.1 miles; a degree of longitude counts as
//! 69.1 miles scaled by the cosine of the office's latitude, with 57.3
//! standing in for 180/π. The result only orders offices and is never shown
//! to clients. There is no correction near the poles or across the
//! antimeridian.
//!
//! The SQL adapter renders the same expression through [`SQL_DISTANCE_SCORE`]
//! so both adapters rank offices identically.

use super::Coordinates;

/// Miles per degree of latitude.
pub const MILES_PER_DEGREE: f64 = 69.1;

/// Approximation of 180/π used to turn degrees into radians.
pub const DEGREES_PER_RADIAN: f64 = 57.3;

/// SQL rendering of [`distance_score`] over the `offices` table. The two
/// placeholders are the query latitude and longitude, in that order.
pub const SQL_DISTANCE_SCORE: [&str; 3] = [
    "SQRT(POW(69.1 * (offices.latitude::double precision - ",
    "), 2) + POW(69.1 * (",
    " - offices.longitude::double precision) * COS(offices.latitude::double precision / 57.3), 2))",
];

/// Distance score between `origin` and an office at `office`. Larger means
/// further away.
///
/// # Examples
/// ```
/// use office_listings::domain::{Coordinates, distance_score};
///
/// let here = Coordinates::from_degrees(23.7, 90.4).expect("finite");
/// let near = Coordinates::from_degrees(23.8, 90.4).expect("finite");
/// let far = Coordinates::from_degrees(24.4, 88.6).expect("finite");
/// assert!(distance_score(&here, &near) < distance_score(&here, &far));
/// ```
pub fn distance_score(origin: &Coordinates, office: &Coordinates) -> f64 {
    let (origin_lat, origin_lon) = origin.degrees();
    let (office_lat, office_lon) = office.degrees();
    let north = MILES_PER_DEGREE * (office_lat - origin_lat);
    let east = MILES_PER_DEGREE * (origin_lon - office_lon) * (office_lat / DEGREES_PER_RADIAN).cos();
    (north.powi(2) + east.powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::from_degrees(latitude, longitude).expect("finite coordinates")
    }

    #[rstest]
    fn same_point_scores_zero() {
        let here = point(51.5, -0.12);
        assert!(distance_score(&here, &here).abs() < 1e-9);
    }

    #[rstest]
    fn one_degree_north_is_sixty_nine_miles() {
        let score = distance_score(&point(0.0, 0.0), &point(1.0, 0.0));
        assert!((score - 69.1).abs() < 1e-9);
    }

    #[rstest]
    fn longitude_shrinks_with_office_latitude() {
        let at_equator = distance_score(&point(0.0, 0.0), &point(0.0, 1.0));
        let at_sixty = distance_score(&point(60.0, 0.0), &point(60.0, 1.0));
        assert!(at_sixty < at_equator);
    }

    #[rstest]
    fn ranks_the_closer_city_first() {
        let query = point(23.739_775_820_649_81, 90.382_699_769_147_96);
        let rajshahi = point(23.739_775_820_649_81, 90.382_699_769_147_96);
        let dhaka = point(24.361_316_828_718_3, 88.606_889_928_249_39);
        assert!(distance_score(&query, &rajshahi) < distance_score(&query, &dhaka));
    }
}
