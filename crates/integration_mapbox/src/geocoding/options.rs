//! Geocoding request options
//!
//! Every field is optional. Unset fields never reach the query string, so
//! `ForwardOptions::default()` asks the API for its own defaults.

use std::fmt;
use std::str::FromStr;

use domain::{BoundingBox, Location};
use serde::{Deserialize, Serialize};

/// Feature types used to filter geocoding results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Country,
    Region,
    Postcode,
    District,
    Place,
    Locality,
    Neighborhood,
    Street,
    /// Japanese block-level addresses
    Block,
    Address,
    /// Units within an address (US only)
    SecondaryAddress,
}

impl FeatureType {
    /// All feature types, from coarsest to finest
    pub const ALL: [Self; 11] = [
        Self::Country,
        Self::Region,
        Self::Postcode,
        Self::District,
        Self::Place,
        Self::Locality,
        Self::Neighborhood,
        Self::Street,
        Self::Block,
        Self::Address,
        Self::SecondaryAddress,
    ];

    /// The name the API uses for this type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Region => "region",
            Self::Postcode => "postcode",
            Self::District => "district",
            Self::Place => "place",
            Self::Locality => "locality",
            Self::Neighborhood => "neighborhood",
            Self::Street => "street",
            Self::Block => "block",
            Self::Address => "address",
            Self::SecondaryAddress => "secondary_address",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown feature type: {s}"))
    }
}

/// Join feature types into the comma-separated `types` parameter
///
/// `[Address, Place]` becomes `"address,place"`.
#[must_use]
pub fn types_to_string(types: &[FeatureType]) -> String {
    types
        .iter()
        .map(FeatureType::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a location as the `proximity` parameter (`lon,lat`)
#[must_use]
pub fn proximity_to_string(location: Location) -> String {
    location.to_string()
}

/// Format a bounding box as the `bbox` parameter (`w,s,e,n`)
#[must_use]
pub fn bbox_to_string(bbox: BoundingBox) -> String {
    bbox.to_string()
}

const fn is_false(value: &bool) -> bool {
    !*value
}

/// Options for free-text forward geocoding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardOptions {
    /// Comma-separated ISO 3166 alpha-2 country codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Bias results towards `lon,lat` (or `ip`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity: Option<String>,
    /// Comma-separated feature types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
    /// `w,s,e,n`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,
    /// Maximum number of results (API maximum is 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// IETF language tags, comma-separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worldview: Option<String>,
    /// `geojson` (default) or `v5`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Request results that may be stored permanently
    #[serde(default, skip_serializing_if = "is_false")]
    pub permanent: bool,
}

/// Address components for structured forward geocoding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worldview: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub permanent: bool,
}

impl StructuredInput {
    /// Whether at least one address component is set
    #[must_use]
    pub fn has_address(&self) -> bool {
        [
            &self.address_line1,
            &self.address_number,
            &self.street,
            &self.block,
            &self.place,
            &self.region,
            &self.postcode,
            &self.locality,
            &self.neighborhood,
            &self.country,
        ]
        .into_iter()
        .flatten()
        .any(|s| !s.trim().is_empty())
    }
}

/// Options for reverse geocoding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReverseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worldview: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub permanent: bool,
}

/// Query-string options for a batch request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    #[serde(default, skip_serializing_if = "is_false")]
    pub permanent: bool,
}

/// A single query inside a batch request body
///
/// Fill the free-text, structured, or reverse fields; unset fields are left
/// out of the JSON sent to the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchQuery {
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    // Structured input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    // Reverse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worldview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl BatchQuery {
    /// A free-text forward query
    #[must_use]
    pub fn forward(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// A reverse query for `location`
    #[must_use]
    pub fn reverse(location: Location) -> Self {
        Self {
            longitude: Some(location.longitude()),
            latitude: Some(location.latitude()),
            ..Default::default()
        }
    }

    /// Restrict results to the given feature types
    #[must_use]
    pub fn with_types(mut self, types: &[FeatureType]) -> Self {
        if !types.is_empty() {
            self.types = Some(types_to_string(types));
        }
        self
    }
}
