//! Bounding box value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::InvalidCoordinates;
use super::location::{is_valid_latitude, is_valid_longitude};

/// A rectangular area given by its west, south, east and north edges in degrees
///
/// `west` may be greater than `east` for boxes crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl BoundingBox {
    /// Create a new bounding box with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if any edge is out of range or `south > north`.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, InvalidCoordinates> {
        let in_range = is_valid_longitude(west)
            && is_valid_longitude(east)
            && is_valid_latitude(south)
            && is_valid_latitude(north);
        if !in_range || south > north {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }

    #[must_use]
    pub const fn west(&self) -> f64 {
        self.west
    }

    #[must_use]
    pub const fn south(&self) -> f64 {
        self.south
    }

    #[must_use]
    pub const fn east(&self) -> f64 {
        self.east
    }

    #[must_use]
    pub const fn north(&self) -> f64 {
        self.north
    }

    /// The edges as `[west, south, east, north]`
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = InvalidCoordinates;

    fn try_from([west, south, east, north]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(west, south, east, north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bbox() {
        let bbox = BoundingBox::new(-77.1, 38.8, -76.9, 39.0).expect("valid");
        assert_eq!(bbox.to_array(), [-77.1, 38.8, -76.9, 39.0]);
    }

    #[test]
    fn test_south_above_north_rejected() {
        assert!(BoundingBox::new(-77.1, 39.0, -76.9, 38.8).is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(BoundingBox::new(-181.0, 0.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, -91.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_antimeridian_allowed() {
        assert!(BoundingBox::new(170.0, -10.0, -170.0, 10.0).is_ok());
    }

    #[test]
    fn test_display() {
        let bbox = BoundingBox::try_from([-74.26, 40.49, -73.7, 40.92]).expect("valid");
        assert_eq!(bbox.to_string(), "-74.26,40.49,-73.7,40.92");
    }
}
