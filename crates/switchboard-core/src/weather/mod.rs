//! Weather gateway
//!
//! Thin boundary over the weather provider: one HTTP GET per lookup, no
//! retries. Failures are represented as data inside the report rather
//! than propagated as errors, so a flaky provider still lets the run
//! reach a terminal response.

use crate::config::WeatherConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw weather data for a city, or a caught gateway failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,

    /// Provider JSON passed through unmodified
    #[serde(default)]
    pub payload: Value,

    /// Set when the lookup failed (missing key, HTTP error, transport
    /// error); the payload is Null in that case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl WeatherReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn failure(city: &str, error: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            city: city.to_string(),
            payload: Value::Null,
            error: Some(error.into()),
            status_code,
        }
    }
}

/// Boundary to the weather data source.
///
/// Implementations never return an error: failures are carried inside
/// the report.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, city: &str) -> WeatherReport;
}

/// Gateway to the weather provider
pub struct WeatherGateway {
    http_client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherGateway {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherGateway {
    /// Fetch current weather for a city.
    ///
    /// A missing API key short-circuits without issuing the request.
    async fn fetch(&self, city: &str) -> WeatherReport {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return WeatherReport::failure(city, "API key not configured.", None),
        };

        let request = self.http_client.get(&self.config.base_url).query(&[
            ("q", city),
            ("appid", api_key),
            ("units", self.config.units.as_str()),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(city, error = %e, "weather request failed");
                return WeatherReport::failure(city, format!("An error occurred: {}", e), None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(city, %status, "weather provider returned error status");
            return WeatherReport::failure(
                city,
                format!("HTTP error occurred: {}", status),
                Some(status.as_u16()),
            );
        }

        match response.json::<Value>().await {
            Ok(payload) => WeatherReport {
                city: city.to_string(),
                payload,
                error: None,
                status_code: Some(status.as_u16()),
            },
            Err(e) => WeatherReport::failure(city, format!("An error occurred: {}", e), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_with_key(api_key: Option<&str>) -> WeatherGateway {
        WeatherGateway::new(WeatherConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://127.0.0.1:9/weather".to_string(),
            units: "metric".to_string(),
        })
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let gateway = gateway_with_key(None);
        let report = gateway.fetch("London").await;

        assert!(report.is_error());
        assert_eq!(report.error.as_deref(), Some("API key not configured."));
        assert_eq!(report.status_code, None);
    }

    #[tokio::test]
    async fn test_empty_key_short_circuits() {
        let gateway = gateway_with_key(Some(""));
        let report = gateway.fetch("London").await;
        assert_eq!(report.error.as_deref(), Some("API key not configured."));
    }

    #[tokio::test]
    async fn test_transport_failure_is_data_not_error() {
        // Port 9 (discard) refuses connections; the failure must come
        // back inside the report.
        let gateway = gateway_with_key(Some("some-key"));
        let report = gateway.fetch("London").await;

        assert!(report.is_error());
        assert!(report.error.unwrap().starts_with("An error occurred:"));
        assert_eq!(report.payload, serde_json::Value::Null);
    }

    #[test]
    fn test_report_without_error_is_not_error() {
        let report = WeatherReport {
            city: "Paris".to_string(),
            payload: serde_json::json!({"main": {"temp": 18}}),
            error: None,
            status_code: Some(200),
        };
        assert!(!report.is_error());
    }
}
