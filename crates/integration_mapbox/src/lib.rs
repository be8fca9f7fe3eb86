//! Mapbox API client
//!
//! Thin async bindings for the Mapbox [geocoding v6](https://docs.mapbox.com/api/search/geocoding/)
//! and [directions v5](https://docs.mapbox.com/api/navigation/directions/) APIs.
//!
//! # Architecture
//!
//! [`MapboxClient`] owns the access token and an [`HttpTransport`]; it builds
//! request URLs, maps provider status codes to [`MapboxError`] and decodes JSON.
//! [`GeocodingClient`] and [`DirectionsClient`] define the API surface and are
//! implemented by [`MapboxGeocoder`] and [`MapboxDirections`], which share one
//! base client. Every call is a single request with no caching or retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_mapbox::{ForwardOptions, GeocodingClient, MapboxClient, MapboxConfig, MapboxGeocoder};
//!
//! let client = MapboxClient::new(std::env::var("MAPBOX_TOKEN")?, &MapboxConfig::default())?;
//! let geocoder = MapboxGeocoder::new(client);
//!
//! let opts = ForwardOptions { limit: Some(1), ..Default::default() };
//! let results = geocoder.forward("2 Lincoln Memorial Circle NW", opts).await?;
//! if let Some(feature) = results.first() {
//!     println!("{:?} at {:?}", feature.name(), feature.point());
//! }
//! ```

mod client;
mod config;
pub mod directions;
mod error;
pub mod geocoding;
mod query;
mod transport;

pub use client::MapboxClient;
pub use config::MapboxConfig;
pub use directions::{
    DirectionsClient, DirectionsOptions, DirectionsResponse, MapboxDirections, ResponseCode,
    Route, RoutingProfile,
};
pub use error::MapboxError;
pub use geocoding::{
    BatchOptions, BatchQuery, Feature, FeatureCollection, FeatureType, ForwardOptions,
    GeocodingClient, MapboxGeocoder, ReverseOptions, StructuredInput,
};
pub use query::{QueryParams, to_query_pairs};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

pub use domain::{BoundingBox, InvalidCoordinates, Location};
