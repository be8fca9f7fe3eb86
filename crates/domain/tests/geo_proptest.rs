//! Property-based tests for geographic value objects

use domain::{BoundingBox, Location};
use proptest::prelude::*;

proptest! {
    #[test]
    fn valid_coordinates_create_location(
        lon in -180.0f64..=180.0f64,
        lat in -90.0f64..=90.0f64
    ) {
        let loc = Location::new(lon, lat);
        prop_assert!(loc.is_ok());

        let loc = loc.unwrap();
        prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_latitude_rejected(
        lon in -180.0f64..=180.0f64,
        lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)]
    ) {
        prop_assert!(Location::new(lon, lat).is_err());
    }

    #[test]
    fn invalid_longitude_rejected(
        lon in prop_oneof![(-1000.0f64..-180.1f64), (180.1f64..1000.0f64)],
        lat in -90.0f64..=90.0f64
    ) {
        prop_assert!(Location::new(lon, lat).is_err());
    }

    #[test]
    fn display_parses_back(
        lon in -180.0f64..=180.0f64,
        lat in -90.0f64..=90.0f64
    ) {
        let loc = Location::new(lon, lat).unwrap();
        let parsed: Location = loc.to_string().parse().unwrap();
        prop_assert_eq!(loc, parsed);
    }

    #[test]
    fn bbox_display_has_four_parts(
        west in -180.0f64..=180.0f64,
        east in -180.0f64..=180.0f64,
        a in -90.0f64..=90.0f64,
        b in -90.0f64..=90.0f64
    ) {
        let bbox = BoundingBox::new(west, a.min(b), east, a.max(b)).unwrap();
        prop_assert_eq!(bbox.to_string().split(',').count(), 4);
    }
}
