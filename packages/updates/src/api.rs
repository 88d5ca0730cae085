// ABOUTME: Client for the Waypoint update API
// ABOUTME: ApiClient trait plus the reqwest-backed HTTP implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;
use waypoint_config::constants::{
    DEFAULT_API_URL, DEFAULT_HTTP_REQUEST_TIMEOUT_SECS, MAX_HTTP_REQUEST_TIMEOUT_SECS,
    WAYPOINT_API_URL, WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS,
};
use waypoint_config::env::env_string_or_default;
use waypoint_config::parse_env_or_default_with_validation;

use crate::error::{ApiError, ApiResult};
use crate::version::DatabaseUpdate;

/// Remote source of database version metadata
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch `/updates/database/{agency}`
    async fn get_database_update(&self, agency: &str) -> ApiResult<DatabaseUpdate>;
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiClientConfig {
    /// Read `WAYPOINT_API_URL` and `WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let timeout_secs = parse_env_or_default_with_validation(
            WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS,
            DEFAULT_HTTP_REQUEST_TIMEOUT_SECS,
            |secs| (1..=MAX_HTTP_REQUEST_TIMEOUT_SECS).contains(&secs),
        );

        Self {
            base_url: env_string_or_default(WAYPOINT_API_URL, DEFAULT_API_URL),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// `ApiClient` speaking JSON over HTTP
#[derive(Clone)]
pub struct HttpApiClient {
    http_client: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(config: ApiClientConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::config(format!("Invalid API URL {}: {}", config.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::config(format!(
                "API URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::config(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build the endpoint URL, encoding the agency as a single path segment
    pub fn database_update_url(&self, agency: &str) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::config("API URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(["updates", "database", agency]);
        Ok(url)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_database_update(&self, agency: &str) -> ApiResult<DatabaseUpdate> {
        let url = self.database_update_url(agency)?;
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<DatabaseUpdate>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| status.to_string());
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(ApiClientConfig {
            base_url: base.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_url() {
        let url = client("https://api.waypoint.app")
            .database_update_url("lirr")
            .unwrap();
        assert_eq!(url.as_str(), "https://api.waypoint.app/updates/database/lirr");
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let url = client("https://example.com/api/v2/")
            .database_update_url("mnr")
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v2/updates/database/mnr");
    }

    #[test]
    fn test_agency_is_encoded_as_one_segment() {
        let url = client("https://api.waypoint.app")
            .database_update_url("a/b c")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.waypoint.app/updates/database/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = HttpApiClient::new(ApiClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ApiError::Configuration(_))));

        let result = HttpApiClient::new(ApiClientConfig {
            base_url: "mailto:ops@waypoint.app".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var(WAYPOINT_API_URL, "http://localhost:4010");
        std::env::set_var(WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS, "5");

        let config = ApiClientConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:4010");
        assert_eq!(config.timeout, Duration::from_secs(5));

        std::env::set_var(WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS, "100000");
        assert_eq!(
            ApiClientConfig::from_env().timeout,
            Duration::from_secs(DEFAULT_HTTP_REQUEST_TIMEOUT_SECS)
        );

        std::env::remove_var(WAYPOINT_API_URL);
        std::env::remove_var(WAYPOINT_HTTP_REQUEST_TIMEOUT_SECS);
    }
}
