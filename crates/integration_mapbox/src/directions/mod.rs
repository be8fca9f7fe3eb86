//! Mapbox directions (v5) client
//!
//! Routes between two or more locations for a routing profile.
//! See <https://docs.mapbox.com/api/navigation/directions/>.

mod models;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use domain::Location;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::client::MapboxClient;
use crate::error::MapboxError;
use crate::query::to_query_pairs;

pub use models::{
    DirectionsResponse, LineString, ResponseCode, Route, RouteGeometry, RouteLeg, RouteStep,
    StepManeuver, Waypoint,
};

const DIRECTIONS_PATH: &str = "directions/v5/mapbox";

/// Travel mode the route is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    /// Driving with live traffic
    DrivingTraffic,
    Driving,
    Walking,
    Cycling,
}

impl RoutingProfile {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DrivingTraffic => "driving-traffic",
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving-traffic" => Ok(Self::DrivingTraffic),
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "cycling" => Ok(Self::Cycling),
            other => Err(format!("unknown routing profile: {other}")),
        }
    }
}

/// Route geometry encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometries {
    Geojson,
    Polyline,
    Polyline6,
}

/// Level of detail of the route geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overview {
    Full,
    Simplified,
    /// No geometry at all
    False,
}

/// Options for a directions request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsOptions {
    /// Also return alternative routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometries: Option<Geometries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Overview>,
    /// Return turn-by-turn steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_straight: Option<bool>,
    /// Language of step instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Comma-separated annotations, e.g. `duration,distance,speed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<String>,
    /// Semicolon-separated snapping radii, one per location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radiuses: Option<String>,
    /// Comma-separated road classes to avoid, e.g. `toll,ferry`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Semicolon-separated names, one per location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoint_names: Option<String>,
}

/// Join locations into the `lon,lat;lon,lat` path segment
#[must_use]
pub fn coordinates_path(locations: &[Location]) -> String {
    locations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Trait for directions clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Route through `locations` in order
    ///
    /// A response whose code is not `Ok` is returned as is; inspect
    /// [`DirectionsResponse::status`].
    async fn get_directions(
        &self,
        locations: &[Location],
        profile: RoutingProfile,
        options: DirectionsOptions,
    ) -> Result<DirectionsResponse, MapboxError>;
}

/// Directions client backed by the Mapbox API
#[derive(Debug, Clone)]
pub struct MapboxDirections {
    client: MapboxClient,
}

impl MapboxDirections {
    /// Create a directions client sharing the given base client
    #[must_use]
    pub const fn new(client: MapboxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DirectionsClient for MapboxDirections {
    #[instrument(skip(self, locations, profile, options), fields(profile = %profile, waypoints = locations.len()))]
    async fn get_directions(
        &self,
        locations: &[Location],
        profile: RoutingProfile,
        options: DirectionsOptions,
    ) -> Result<DirectionsResponse, MapboxError> {
        if locations.len() < 2 {
            return Err(MapboxError::InvalidRequest(
                "Directions need at least two locations".to_string(),
            ));
        }

        let path = format!(
            "{DIRECTIONS_PATH}/{}/{}",
            profile.as_str(),
            coordinates_path(locations)
        );
        let params = to_query_pairs(&options)?;

        let response: DirectionsResponse = self.client.query(&path, &params).await?;

        match response.status() {
            ResponseCode::Ok => debug!(routes = response.routes.len(), "Directions found"),
            code => warn!(?code, message = ?response.message, "Directions returned no route"),
        }

        Ok(response)
    }
}
