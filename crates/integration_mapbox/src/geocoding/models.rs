//! Geocoding response models
//!
//! GeoJSON-shaped types as returned by the v6 geocoding endpoints. Feature
//! properties are kept as a raw JSON map; the accessors below read the
//! commonly used ones into typed values.

use domain::Location;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::options::FeatureType;

/// The `type` tag of a feature collection
pub const FEATURE_COLLECTION_TYPE: &str = "FeatureCollection";

/// An ordered collection of geocoding results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Results in the order the API ranked them
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl FeatureCollection {
    /// Whether the `type` tag is `"FeatureCollection"`
    #[must_use]
    pub fn is_feature_collection(&self) -> bool {
        self.kind == FEATURE_COLLECTION_TYPE
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The best-ranked result
    #[must_use]
    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }
}

/// A single geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    fn str_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    fn typed_property<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.properties
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Feature name, e.g. the street address or place name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_property("name")
    }

    /// Formatted context below the name, e.g. `"Washington, District of Columbia 20500, United States"`
    #[must_use]
    pub fn place_formatted(&self) -> Option<&str> {
        self.str_property("place_formatted")
    }

    #[must_use]
    pub fn full_address(&self) -> Option<&str> {
        self.str_property("full_address")
    }

    #[must_use]
    pub fn mapbox_id(&self) -> Option<&str> {
        self.str_property("mapbox_id")
    }

    /// The feature type; `None` if missing or not a known type
    #[must_use]
    pub fn feature_type(&self) -> Option<FeatureType> {
        self.typed_property("feature_type")
    }

    /// Detailed coordinate information from the properties
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.typed_property("coordinates")
    }

    /// Smart address match details (structured input only)
    #[must_use]
    pub fn match_code(&self) -> Option<MatchCode> {
        self.typed_property("match_code")
    }

    /// The point geometry as a location
    #[must_use]
    pub fn point(&self) -> Option<Location> {
        match self.geometry.coordinates.as_slice() {
            [longitude, latitude, ..] => Location::new(*longitude, *latitude).ok(),
            _ => None,
        }
    }
}

/// GeoJSON point geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// Coordinate details of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
    /// Point accuracy for address features, e.g. `rooftop`, `parcel`, `interpolated`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routable_points: Vec<RoutablePoint>,
}

/// A point suitable for routing to a feature, such as a driveway entrance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutablePoint {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// How well each address component matched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Overall confidence: `exact`, `high`, `medium` or `low`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

/// Body of a batch response
#[derive(Debug, Deserialize)]
pub(crate) struct BatchResponse {
    pub batch: Vec<FeatureCollection>,
}
