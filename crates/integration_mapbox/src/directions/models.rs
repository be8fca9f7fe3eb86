//! Directions response models

use serde::{Deserialize, Serialize};

/// Provider status code of a directions response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// A route was found
    Ok,
    /// No route connects the given coordinates
    NoRoute,
    /// A coordinate could not be snapped to the road network
    NoSegment,
    /// The profile does not exist
    ProfileNotFound,
    /// The request was malformed
    InvalidInput,
    /// Any code this client does not know about
    Other(String),
}

impl ResponseCode {
    /// Interpret the raw `code` field
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "Ok" => Self::Ok,
            "NoRoute" => Self::NoRoute,
            "NoSegment" => Self::NoSegment,
            "ProfileNotFound" => Self::ProfileNotFound,
            "InvalidInput" => Self::InvalidInput,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Response of a directions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// Raw status code, see [`DirectionsResponse::status`]
    pub code: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Error detail for non-`Ok` codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DirectionsResponse {
    #[must_use]
    pub fn status(&self) -> ResponseCode {
        ResponseCode::from_code(&self.code)
    }

    /// The recommended route, if any
    #[must_use]
    pub fn best_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}

/// A route through all requested waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Distance in meters
    pub distance: f64,
    /// Estimated travel time in seconds
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RouteGeometry>,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

impl Route {
    /// Travel time rounded to whole minutes
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duration_minutes(&self) -> u64 {
        (self.duration / 60.0).round().max(0.0) as u64
    }

    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }
}

/// Route geometry in the format requested via `geometries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteGeometry {
    /// Encoded polyline (`polyline` or `polyline6`)
    Encoded(String),
    /// GeoJSON LineString
    GeoJson(LineString),
}

/// GeoJSON LineString
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

/// The part of a route between two waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Only present when `steps=true` was requested
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// A single maneuver and the road travelled after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: String,
    pub maneuver: StepManeuver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepManeuver {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(default)]
    pub instruction: String,
    /// `[longitude, latitude]`
    pub location: [f64; 2],
}

/// An input coordinate snapped to the road network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(default)]
    pub name: String,
    /// `[longitude, latitude]`
    pub location: [f64; 2],
    /// Distance in meters from the input coordinate to the snapped point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_codes() {
        assert_eq!(ResponseCode::from_code("Ok"), ResponseCode::Ok);
        assert_eq!(ResponseCode::from_code("NoRoute"), ResponseCode::NoRoute);
        assert_eq!(ResponseCode::from_code("NoSegment"), ResponseCode::NoSegment);
        assert_eq!(
            ResponseCode::from_code("ProfileNotFound"),
            ResponseCode::ProfileNotFound
        );
        assert_eq!(ResponseCode::from_code("InvalidInput"), ResponseCode::InvalidInput);
        assert_eq!(
            ResponseCode::from_code("Weird"),
            ResponseCode::Other("Weird".to_string())
        );
        assert!(ResponseCode::Ok.is_ok());
        assert!(!ResponseCode::NoRoute.is_ok());
    }

    #[test]
    fn test_parse_route_with_polyline() {
        let json = r#"{
            "code": "Ok",
            "uuid": "abc",
            "routes": [{
                "distance": 4553.2,
                "duration": 1030.4,
                "weight": 1120.9,
                "weight_name": "cyclability",
                "geometry": "ucwqFdrwjV",
                "legs": [{ "distance": 4553.2, "duration": 1030.4, "summary": "Market Street" }]
            }],
            "waypoints": [
                { "name": "Market Street", "location": [-122.42, 37.78], "distance": 3.1 },
                { "name": "", "location": [-122.41, 37.77] }
            ]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert!(response.status().is_ok());
        assert_eq!(response.waypoints.len(), 2);

        let route = response.best_route().unwrap();
        assert_eq!(route.duration_minutes(), 17);
        assert!((route.distance_km() - 4.5532).abs() < 1e-9);
        assert_eq!(
            route.geometry,
            Some(RouteGeometry::Encoded("ucwqFdrwjV".to_string()))
        );
        assert_eq!(route.legs[0].summary.as_deref(), Some("Market Street"));
        assert!(route.legs[0].steps.is_empty());
    }

    #[test]
    fn test_parse_route_with_geojson_and_steps() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 120.0,
                "duration": 30.0,
                "geometry": { "type": "LineString", "coordinates": [[-122.42, 37.78], [-122.41, 37.78]] },
                "legs": [{
                    "distance": 120.0,
                    "duration": 30.0,
                    "steps": [{
                        "distance": 120.0,
                        "duration": 30.0,
                        "name": "Market Street",
                        "mode": "cycling",
                        "maneuver": {
                            "type": "depart",
                            "instruction": "Head east on Market Street",
                            "location": [-122.42, 37.78]
                        }
                    }]
                }]
            }],
            "waypoints": []
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = response.best_route().unwrap();
        let Some(RouteGeometry::GeoJson(line)) = &route.geometry else {
            unreachable!("expected GeoJSON geometry");
        };
        assert_eq!(line.coordinates.len(), 2);

        let step = &route.legs[0].steps[0];
        assert_eq!(step.maneuver.kind, "depart");
        assert!(step.maneuver.modifier.is_none());
        assert_eq!(step.maneuver.instruction, "Head east on Market Street");
    }

    #[test]
    fn test_parse_no_route() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"code":"NoRoute","message":"No route found"}"#).unwrap();
        assert_eq!(response.status(), ResponseCode::NoRoute);
        assert!(response.best_route().is_none());
        assert_eq!(response.message.as_deref(), Some("No route found"));
    }
}
