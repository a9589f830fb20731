//! Geographic coordinate type and distance helpers.
//!
//! All coordinates are WGS84 decimal degrees. Distances are great-circle
//! (Haversine) metres, which is accurate to well under a percent at city
//! scale and is the one distance metric used throughout the planner.

use std::fmt;

/// Mean Earth radius in metres, as used by the Haversine formula.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Error returned for a coordinate outside WGS84 bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinate {
    /// The offending latitude.
    pub lat: f64,
    /// The offending longitude.
    pub lon: f64,
    reason: &'static str,
}

/// A WGS84 geographic point.
///
/// Valid by construction: latitude is within [-90, 90] and longitude within
/// [-180, 180], and neither component is NaN.
///
/// # Examples
///
/// ```
/// use transit_planner::geo::Point;
///
/// let p = Point::new(23.7808, 90.4166).unwrap();
/// assert!(Point::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    lat: f64,
    lon: f64,
}

impl Point {
    /// Creates a point, validating WGS84 bounds.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if lat.is_nan() || lon.is_nan() {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "coordinate must not be NaN",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Point { lat, lon })
    }

    /// Returns the latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Haversine great-circle distance to another point, in metres.
    pub fn distance_m(&self, other: Point) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
