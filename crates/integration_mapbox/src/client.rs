//! Base Mapbox client
//!
//! Owns the access token and the HTTP transport. Builds request URLs,
//! maps provider status codes to [`MapboxError`] and decodes JSON bodies.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::MapboxConfig;
use crate::error::MapboxError;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Shared base client used by the geocoding and directions clients
#[derive(Clone)]
pub struct MapboxClient {
    transport: Arc<dyn HttpTransport>,
    token: SecretString,
    base_url: Url,
}

impl fmt::Debug for MapboxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl MapboxClient {
    /// Create a client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError::MissingToken`] if `token` is empty, or a
    /// configuration error if `config` is invalid.
    pub fn new(token: impl Into<String>, config: &MapboxConfig) -> Result<Self, MapboxError> {
        let token = validate_token(token.into())?;
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Self::build(token, config, transport)
    }

    /// Create a client with a caller-supplied transport
    ///
    /// # Errors
    ///
    /// Same as [`MapboxClient::new`].
    pub fn with_transport(
        token: impl Into<String>,
        config: &MapboxConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, MapboxError> {
        let token = validate_token(token.into())?;
        Self::build(token, config, transport)
    }

    fn build(
        token: SecretString,
        config: &MapboxConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, MapboxError> {
        config.validate().map_err(MapboxError::ConfigurationError)?;

        // Trailing slash so that `Url::join` appends instead of replacing the last segment
        let base_url = Url::parse(&format!("{}/", config.trimmed_base_url()))
            .map_err(|e| MapboxError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            transport,
            token,
            base_url,
        })
    }

    /// Build the full request URL for `path`, including the access token
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError::InvalidRequest`] if `path` cannot be joined onto the base URL.
    pub fn request_url(&self, path: &str, params: &[(String, String)]) -> Result<Url, MapboxError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| MapboxError::InvalidRequest(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            pairs.append_pair("access_token", self.token.expose_secret());
        }

        Ok(url)
    }

    /// Issue a GET request and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns the mapped provider error, a transport error, or a parse error.
    #[instrument(skip(self, params), fields(params = params.len()))]
    pub async fn query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, MapboxError> {
        let url = self.request_url(path, params)?;
        debug!(%path, "Sending Mapbox GET request");

        let response = self.transport.get(url).await?;
        decode_response(path, response)
    }

    /// Issue a POST request with a JSON body and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns the mapped provider error, a transport error, or a parse error.
    #[instrument(skip(self, params, body), fields(params = params.len()))]
    pub async fn query_with_body<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        params: &[(String, String)],
        body: &B,
    ) -> Result<T, MapboxError> {
        let url = self.request_url(path, params)?;
        let body =
            serde_json::to_string(body).map_err(|e| MapboxError::InvalidRequest(e.to_string()))?;
        debug!(%path, bytes = body.len(), "Sending Mapbox POST request");

        let response = self.transport.post_json(url, body).await?;
        decode_response(path, response)
    }
}

fn validate_token(token: String) -> Result<SecretString, MapboxError> {
    if token.trim().is_empty() {
        return Err(MapboxError::MissingToken);
    }
    Ok(SecretString::from(token))
}

/// Map the HTTP status to an error, or decode the body on success
fn decode_response<T: DeserializeOwned>(path: &str, response: HttpResponse) -> Result<T, MapboxError> {
    match response.status {
        401 => {
            warn!(%path, "Mapbox rejected the access token");
            return Err(MapboxError::Unauthorized);
        },
        429 => {
            warn!(%path, retry_after = ?response.retry_after_secs, "Mapbox rate limit exceeded");
            return Err(MapboxError::RateLimitExceeded {
                retry_after_secs: response.retry_after_secs,
            });
        },
        _ => {},
    }

    if !response.is_success() {
        let status = response.status;
        let message = provider_message(&response.body);
        return Err(MapboxError::request_failed(status, message.as_deref()));
    }

    serde_json::from_str(&response.body).map_err(|e| MapboxError::ParseError(e.to_string()))
}

/// Extract the `message` field of a Mapbox error body
fn provider_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockHttpTransport;

    fn client_with(mock: MockHttpTransport) -> MapboxClient {
        MapboxClient::with_transport("pk.test", &MapboxConfig::for_testing(), Arc::new(mock))
            .unwrap()
    }

    #[derive(Debug, serde::Deserialize)]
    struct Echo {
        ok: bool,
    }

    #[test]
    fn test_empty_token_fails_fast() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().never();
        mock.expect_post_json().never();

        let result =
            MapboxClient::with_transport("", &MapboxConfig::for_testing(), Arc::new(mock));
        assert!(matches!(result, Err(MapboxError::MissingToken)));
    }

    #[test]
    fn test_whitespace_token_fails_fast() {
        let result = MapboxClient::new("   ", &MapboxConfig::for_testing());
        assert!(matches!(result, Err(MapboxError::MissingToken)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MapboxConfig {
            timeout_secs: 0,
            ..MapboxConfig::default()
        };
        let result = MapboxClient::new("pk.test", &config);
        assert!(matches!(result, Err(MapboxError::ConfigurationError(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = MapboxClient::new("pk.secret-value", &MapboxConfig::for_testing()).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_request_url_appends_token_and_params() {
        let client = client_with(MockHttpTransport::new());
        let params = vec![("q".to_string(), "a b&c".to_string())];
        let url = client
            .request_url("search/geocode/v6/forward", &params)
            .unwrap();

        assert_eq!(url.path(), "/search/geocode/v6/forward");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "a b&c".to_string()),
                ("access_token".to_string(), "pk.test".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_url_keeps_base_path() {
        let config = MapboxConfig {
            base_url: "http://localhost:9000/proxy/".to_string(),
            ..MapboxConfig::for_testing()
        };
        let client =
            MapboxClient::with_transport("pk.test", &config, Arc::new(MockHttpTransport::new()))
                .unwrap();
        let url = client.request_url("/directions/v5/x", &[]).unwrap();
        assert_eq!(url.path(), "/proxy/directions/v5/x");
    }

    #[tokio::test]
    async fn test_query_decodes_success() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"ok": true}"#)));

        let echo: Echo = client_with(mock).query("ping", &[]).await.unwrap();
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn test_query_with_body_posts_json() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post_json()
            .withf(|_, body| body == r#"[{"q":"x"}]"#)
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, r#"{"ok": true}"#)));

        let body = serde_json::json!([{ "q": "x" }]);
        let echo: Echo = client_with(mock)
            .query_with_body("batch", &[], &body)
            .await
            .unwrap();
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn test_unauthorized_mapped() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .returning(|_| Ok(HttpResponse::new(401, r#"{"message":"Not Authorized - Invalid Token"}"#)));

        let result: Result<Echo, _> = client_with(mock).query("ping", &[]).await;
        assert!(matches!(result, Err(MapboxError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_rate_limit_mapped() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().returning(|_| {
            Ok(HttpResponse {
                status: 429,
                retry_after_secs: Some(30),
                body: String::new(),
            })
        });

        let result: Result<Echo, _> = client_with(mock).query("ping", &[]).await;
        assert!(matches!(
            result,
            Err(MapboxError::RateLimitExceeded {
                retry_after_secs: Some(30)
            })
        ));
    }

    #[tokio::test]
    async fn test_other_status_includes_provider_message() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .returning(|_| Ok(HttpResponse::new(422, r#"{"message":"Query too long"}"#)));

        let err = client_with(mock)
            .query::<Echo>("ping", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, MapboxError::RequestFailed { status: 422, .. }));
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Request failed: HTTP 422: Query too long");
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .returning(|_| Ok(HttpResponse::new(200, "not json")));

        let result: Result<Echo, _> = client_with(mock).query("ping", &[]).await;
        assert!(matches!(result, Err(MapboxError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .returning(|_| Err(MapboxError::Timeout { timeout_secs: 5 }));

        let result: Result<Echo, _> = client_with(mock).query("ping", &[]).await;
        assert!(matches!(result, Err(MapboxError::Timeout { timeout_secs: 5 })));
    }

    #[test]
    fn test_provider_message() {
        assert_eq!(
            provider_message(r#"{"message":"Not Found"}"#).as_deref(),
            Some("Not Found")
        );
        assert_eq!(provider_message(r#"{"message":""}"#), None);
        assert_eq!(provider_message("<html>"), None);
    }
}
