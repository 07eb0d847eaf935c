//! Location provider contract and built-in implementations.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;

use crate::types::LocationError;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Skycast/0.1.0";

/// Resolver for a best-guess location string from network context.
///
/// Implementations may block on network I/O and must therefore be invoked
/// off the rendering thread. A blank result is a failure
/// ([`LocationError::Unavailable`]), never a success.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn resolve_current_location(&self) -> Result<String, LocationError>;
}

/// Built-in provider returning a fixed location.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationProvider;

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn resolve_current_location(&self) -> Result<String, LocationError> {
        Ok("New York, US".to_string())
    }
}

/// Expected shape of an ip-api style geolocation response.
#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    status: Option<String>,
    city: Option<String>,
    country: Option<String>,
    message: Option<String>,
}

/// IP-based geolocation against an ip-api style JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    client: Client,
    endpoint: String,
}

impl IpLocationProvider {
    /// Create a provider for the given endpoint (e.g. `http://ip-api.com/json`).
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LocationError::Service(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    async fn resolve_current_location(&self) -> Result<String, LocationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| LocationError::Service(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LocationError::Service(format!(
                "geolocation endpoint returned status {}",
                response.status()
            )));
        }

        let body: GeolocationResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Service(e.to_string()))?;

        if body.status.as_deref() == Some("fail") {
            tracing::warn!(
                "Geolocation lookup failed: {}",
                body.message.as_deref().unwrap_or("no detail")
            );
            return Err(LocationError::Unavailable);
        }

        let city = body.city.unwrap_or_default();
        if city.trim().is_empty() {
            return Err(LocationError::Unavailable);
        }

        let location = match body.country {
            Some(country) if !country.trim().is_empty() => format!("{}, {}", city, country),
            _ => city,
        };

        tracing::info!("Detected location: {}", location);
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn static_provider_returns_nonblank_location() {
        let provider = StaticLocationProvider;
        let location = provider.resolve_current_location().await.expect("resolve");
        assert_eq!(location, "New York, US");
        assert!(!location.trim().is_empty());
    }

    #[tokio::test]
    async fn ip_provider_maps_city_and_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "city": "Paris",
                "country": "France"
            })))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::new(server.uri()).expect("client");
        let location = provider.resolve_current_location().await.expect("resolve");
        assert_eq!(location, "Paris, France");
    }

    #[tokio::test]
    async fn ip_provider_city_only_when_country_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "city": "Paris"
            })))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::new(server.uri()).expect("client");
        let location = provider.resolve_current_location().await.expect("resolve");
        assert_eq!(location, "Paris");
    }

    #[tokio::test]
    async fn ip_provider_fail_status_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "message": "private range"
            })))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::new(server.uri()).expect("client");
        let err = provider.resolve_current_location().await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable));
    }

    #[tokio::test]
    async fn ip_provider_blank_city_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "city": "   ",
                "country": "France"
            })))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::new(server.uri()).expect("client");
        let err = provider.resolve_current_location().await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable));
    }

    #[tokio::test]
    async fn ip_provider_server_error_is_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = IpLocationProvider::new(server.uri()).expect("client");
        let err = provider.resolve_current_location().await.unwrap_err();
        assert!(matches!(err, LocationError::Service(_)));
    }
}
