//! Mapbox geocoding (v6) client
//!
//! Forward, structured, reverse and batch geocoding against
//! `search/geocode/v6`. See <https://docs.mapbox.com/api/search/geocoding/>.

mod models;
mod options;

use async_trait::async_trait;
use domain::{BoundingBox, Location};
use tracing::{debug, instrument};

use crate::client::MapboxClient;
use crate::error::MapboxError;
use crate::query::{set_param, to_query_pairs};

pub use models::{
    Coordinates, FEATURE_COLLECTION_TYPE, Feature, FeatureCollection, Geometry, MatchCode,
    RoutablePoint,
};
pub use options::{
    BatchOptions, BatchQuery, FeatureType, ForwardOptions, ReverseOptions, StructuredInput,
    bbox_to_string, proximity_to_string, types_to_string,
};

use models::BatchResponse;

const FORWARD_PATH: &str = "search/geocode/v6/forward";
const REVERSE_PATH: &str = "search/geocode/v6/reverse";
const BATCH_PATH: &str = "search/geocode/v6/batch";

/// Trait for geocoding clients
///
/// The `*_with_*` methods are conveniences that convert typed arguments into
/// the string-valued option fields and delegate to the primitive calls.
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Find places matching free text
    async fn forward(
        &self,
        place: &str,
        options: ForwardOptions,
    ) -> Result<FeatureCollection, MapboxError>;

    /// Find places from discrete address components
    async fn forward_structured(
        &self,
        input: StructuredInput,
    ) -> Result<FeatureCollection, MapboxError>;

    /// Find places at a location
    async fn reverse(
        &self,
        location: Location,
        options: ReverseOptions,
    ) -> Result<FeatureCollection, MapboxError>;

    /// Run several forward/reverse queries in one request
    ///
    /// One collection per query, in query order. The API caps the number of
    /// queries per request; the cap is not checked locally.
    async fn batch(
        &self,
        queries: &[BatchQuery],
        options: BatchOptions,
    ) -> Result<Vec<FeatureCollection>, MapboxError>;

    /// Forward geocode restricted to `types` (ignored when empty)
    async fn forward_with_types(
        &self,
        place: &str,
        types: &[FeatureType],
        mut options: ForwardOptions,
    ) -> Result<FeatureCollection, MapboxError> {
        if !types.is_empty() {
            options.types = Some(types_to_string(types));
        }
        self.forward(place, options).await
    }

    /// Forward geocode biased towards `proximity`
    async fn forward_with_proximity(
        &self,
        place: &str,
        proximity: Location,
        mut options: ForwardOptions,
    ) -> Result<FeatureCollection, MapboxError> {
        options.proximity = Some(proximity_to_string(proximity));
        self.forward(place, options).await
    }

    /// Forward geocode limited to `bbox`
    async fn forward_with_bbox(
        &self,
        place: &str,
        bbox: BoundingBox,
        mut options: ForwardOptions,
    ) -> Result<FeatureCollection, MapboxError> {
        options.bbox = Some(bbox_to_string(bbox));
        self.forward(place, options).await
    }

    /// Reverse geocode restricted to `types` (ignored when empty)
    async fn reverse_with_types(
        &self,
        location: Location,
        types: &[FeatureType],
        mut options: ReverseOptions,
    ) -> Result<FeatureCollection, MapboxError> {
        if !types.is_empty() {
            options.types = Some(types_to_string(types));
        }
        self.reverse(location, options).await
    }
}

/// Geocoding client backed by the Mapbox API
#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    client: MapboxClient,
}

impl MapboxGeocoder {
    /// Create a geocoder sharing the given base client
    #[must_use]
    pub const fn new(client: MapboxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingClient for MapboxGeocoder {
    #[instrument(skip(self, options))]
    async fn forward(
        &self,
        place: &str,
        options: ForwardOptions,
    ) -> Result<FeatureCollection, MapboxError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(MapboxError::InvalidRequest(
                "Search text must not be empty".to_string(),
            ));
        }

        let mut params = to_query_pairs(&options)?;
        set_param(&mut params, "q", place);

        let result: FeatureCollection = self.client.query(FORWARD_PATH, &params).await?;
        debug!(count = result.len(), "Forward geocoding results");
        Ok(result)
    }

    #[instrument(skip(self, input))]
    async fn forward_structured(
        &self,
        input: StructuredInput,
    ) -> Result<FeatureCollection, MapboxError> {
        if !input.has_address() {
            return Err(MapboxError::InvalidRequest(
                "Structured input needs at least one address component".to_string(),
            ));
        }

        let params = to_query_pairs(&input)?;

        let result: FeatureCollection = self.client.query(FORWARD_PATH, &params).await?;
        debug!(count = result.len(), "Structured geocoding results");
        Ok(result)
    }

    #[instrument(skip(self, location, options), fields(location = %location))]
    async fn reverse(
        &self,
        location: Location,
        options: ReverseOptions,
    ) -> Result<FeatureCollection, MapboxError> {
        let mut params = to_query_pairs(&options)?;
        set_param(&mut params, "longitude", location.longitude().to_string());
        set_param(&mut params, "latitude", location.latitude().to_string());

        let result: FeatureCollection = self.client.query(REVERSE_PATH, &params).await?;
        debug!(count = result.len(), "Reverse geocoding results");
        Ok(result)
    }

    #[instrument(skip(self, queries, options), fields(queries = queries.len()))]
    async fn batch(
        &self,
        queries: &[BatchQuery],
        options: BatchOptions,
    ) -> Result<Vec<FeatureCollection>, MapboxError> {
        let params = to_query_pairs(&options)?;

        let response: BatchResponse = self
            .client
            .query_with_body(BATCH_PATH, &params, queries)
            .await?;

        if response.batch.len() != queries.len() {
            return Err(MapboxError::ParseError(format!(
                "Batch returned {} results for {} queries",
                response.batch.len(),
                queries.len()
            )));
        }

        debug!(results = response.batch.len(), "Batch geocoding results");
        Ok(response.batch)
    }
}
