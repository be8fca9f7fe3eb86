//! Domain layer for the Mapbox client
//!
//! Value objects shared by the integration and presentation crates.
//! This layer performs no I/O.

pub mod geo;

pub use geo::{BoundingBox, InvalidCoordinates, Location};
