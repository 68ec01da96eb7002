//! Great-circle distance in statute miles
//!
//! Spherical law of cosines, converted through nautical miles. This exact
//! formula is shared by the reward proximity check and the nearby-attraction
//! ranking, so both see identical distances.

use crate::domain::types::Position;

pub const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.15077945;

/// Nautical miles per degree of arc on a great circle
const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;

/// Distance between two positions in statute miles
pub fn distance_miles(a: Position, b: Position) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    // Clamp guards the acos domain: rounding can push the cosine of the
    // central angle just above 1.0 for coincident points.
    let central = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos())
        .clamp(-1.0, 1.0)
        .acos();

    let nautical_miles = NAUTICAL_MILES_PER_DEGREE * central.to_degrees();
    STATUTE_MILES_PER_NAUTICAL_MILE * nautical_miles
}
