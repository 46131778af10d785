//! Great-circle distance between coordinates.

use std::fmt;

/// Mean Earth radius used for all distance calculations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Haversine distance between two coordinates in kilometres, rounded to
/// two decimal places.
///
/// Inputs are not range-checked. This is a diagnostic measure only; routed
/// distances always come from the rail graph.
///
/// # Examples
///
/// ```
/// use route_server::domain::{Coordinate, distance};
///
/// let p = Coordinate::new(22.99, 113.26);
/// assert_eq!(distance(p, p), 0.0);
/// ```
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let delta_latitude = (b.latitude - a.latitude).to_radians();
    let delta_longitude = (b.longitude - a.longitude).to_radians();

    let h = (delta_latitude / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (delta_longitude / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_km(EARTH_RADIUS_KM * central_angle)
}

/// Round a kilometre value to two decimal places.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
