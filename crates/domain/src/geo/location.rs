//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::InvalidCoordinates;

/// A geographic position in provider order: longitude first, then latitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

impl Location {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if longitude is not in [-180, 180]
    /// or latitude is not in [-90, 90]
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        if !is_valid_longitude(longitude) || !is_valid_latitude(latitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }
}

pub(super) fn is_valid_longitude(longitude: f64) -> bool {
    (-180.0..=180.0).contains(&longitude)
}

pub(super) fn is_valid_latitude(latitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude)
}

/// Formats as `longitude,latitude` with the shortest exact float representation,
/// which is the form the geocoding and directions APIs expect.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

impl TryFrom<[f64; 2]> for Location {
    type Error = InvalidCoordinates;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(longitude, latitude)
    }
}

impl std::str::FromStr for Location {
    type Err = InvalidCoordinates;

    /// Parse `"lon,lat"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s.split_once(',').ok_or(InvalidCoordinates)?;
        let longitude: f64 = lon.trim().parse().map_err(|_| InvalidCoordinates)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| InvalidCoordinates)?;
        Self::new(longitude, latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = Location::new(-77.036_556, 38.897_708).expect("valid coordinates");
        assert!((loc.longitude() + 77.036_556).abs() < f64::EPSILON);
        assert!((loc.latitude() - 38.897_708).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(Location::new(180.0, 90.0).is_ok());
        assert!(Location::new(-180.0, -90.0).is_ok());
        assert!(Location::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(Location::new(0.0, 91.0).is_err());
        assert!(Location::new(0.0, -91.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(Location::new(181.0, 0.0).is_err());
        assert!(Location::new(-181.0, 0.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Location::new(f64::NAN, 0.0).is_err());
        assert!(Location::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_display_is_lon_lat() {
        let loc = Location::new(-73.968_285, 40.785_091).expect("valid");
        assert_eq!(loc.to_string(), "-73.968285,40.785091");
    }

    #[test]
    fn test_from_array() {
        let loc = Location::try_from([72.438_939, 34.074_122]).expect("valid");
        assert!((loc.longitude() - 72.438_939).abs() < f64::EPSILON);
        assert!(Location::try_from([200.0, 0.0]).is_err());
    }

    #[test]
    fn test_parse() {
        let loc: Location = "-122.42, 37.78".parse().expect("valid");
        assert!((loc.longitude() + 122.42).abs() < f64::EPSILON);
        assert!((loc.latitude() - 37.78).abs() < f64::EPSILON);

        assert!("-122.42".parse::<Location>().is_err());
        assert!("abc,def".parse::<Location>().is_err());
        assert!("0,95".parse::<Location>().is_err());
    }

    #[test]
    fn test_serialization() {
        let loc = Location::new(13.405, 52.52).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("\"longitude\":13.405"));

        let deserialized: Location = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, deserialized);
    }
}
