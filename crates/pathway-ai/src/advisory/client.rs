use reqwest::Url;
use tracing::debug;

use super::{Advisory, RecommendationResponse};
use crate::config::ServiceConfig;
use crate::session::request::RecommendationRequest;

/// Transport-layer failures. Each one collapses to a single user-visible
/// submission failure; the session never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("recommendation service unreachable: {0}")]
    Unreachable(String),
    #[error("recommendation request timed out")]
    Timeout,
    #[error("recommendation service returned HTTP {0}")]
    Http(u16),
    #[error("recommendation service reported status '{0}'")]
    ServiceStatus(String),
    #[error("could not decode recommendation response: {0}")]
    Malformed(String),
    #[error("invalid service endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Seam for the outbound recommendation call, so sessions can be exercised
/// against in-memory fakes.
pub trait RecommendationClient: Send + Sync {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Advisory, TransportError>;
}

/// Blocking HTTP client for the external recommendation service.
pub struct HttpRecommendationClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
}

impl HttpRecommendationClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.base_url)
            .map_err(|err| TransportError::InvalidEndpoint(err.to_string()))?;
        let endpoint = base
            .join("/api/recommend")
            .map_err(|err| TransportError::InvalidEndpoint(err.to_string()))?;

        let http = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl RecommendationClient for HttpRecommendationClient {
    fn recommend(&self, request: &RecommendationRequest) -> Result<Advisory, TransportError> {
        debug!(endpoint = %self.endpoint, "dispatching recommendation request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Unreachable(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http(status.as_u16()));
        }

        let body: RecommendationResponse = response.json().map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Malformed(err.to_string())
            }
        })?;

        body.into_advisory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn builds_endpoint_from_base_url() {
        let client = HttpRecommendationClient::new(&service_config("http://localhost:8000"))
            .expect("client builds");
        assert_eq!(client.endpoint(), "http://localhost:8000/api/recommend");

        let client = HttpRecommendationClient::new(&service_config("http://localhost:8000/"))
            .expect("client builds");
        assert_eq!(client.endpoint(), "http://localhost:8000/api/recommend");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        match HttpRecommendationClient::new(&service_config("not a url")) {
            Err(TransportError::InvalidEndpoint(_)) => {}
            Err(other) => panic!("expected invalid endpoint, got {other:?}"),
            Ok(_) => panic!("expected invalid endpoint, got a client"),
        }
    }
}
