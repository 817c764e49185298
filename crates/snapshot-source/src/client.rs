//! HTTP client for the ARSO INCA radar composite.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::descriptor::{parse_timeline, SnapshotDescriptor};
use crate::error::{Result, SnapshotError};
use crate::source::SnapshotSource;

/// Connection settings for [`ArsoClient`].
#[derive(Debug, Clone, Deserialize)]
pub struct ArsoClientConfig {
    /// Scheme and host that image paths are relative to
    #[serde(default = "default_host")]
    pub host: String,
    /// Timeline path (with query) on `host`
    #[serde(default = "default_timeline_path")]
    pub timeline_path: String,
    /// HTTP request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "http://meteo.arso.gov.si".to_string()
}

fn default_timeline_path() -> String {
    "/uploads/probase/www/nowcast/inca/inca_si0zm_data.json?prod=si0zm".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ArsoClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeline_path: default_timeline_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ArsoClientConfig {
    pub fn timeline_url(&self) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.timeline_path.trim_start_matches('/')
        )
    }
}

/// Snapshot source backed by the ARSO nowcasting service.
pub struct ArsoClient {
    client: Client,
    config: ArsoClientConfig,
}

impl ArsoClient {
    pub fn new(config: ArsoClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ArsoClientConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl SnapshotSource for ArsoClient {
    #[instrument(skip(self), fields(host = %self.config.host))]
    async fn list_latest(&self) -> Result<Vec<SnapshotDescriptor>> {
        let url = self.config.timeline_url();
        debug!(url = %url, "Fetching snapshot timeline");

        let body = self.get(&url).await?.text().await?;
        let descriptors = parse_timeline(&body)?;

        info!(count = descriptors.len(), "Fetched snapshot timeline");
        Ok(descriptors)
    }

    #[instrument(skip(self, descriptor), fields(path = %descriptor.image_path))]
    async fn fetch_image_bytes(&self, descriptor: &SnapshotDescriptor) -> Result<Bytes> {
        let url = descriptor.image_url(&self.config.host);
        debug!(url = %url, "Downloading snapshot image");

        let bytes = self.get(&url).await?.bytes().await?;

        info!(
            size = bytes.len(),
            valid_time = ?descriptor.valid_time,
            "Downloaded snapshot image"
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeline_url() {
        let config = ArsoClientConfig::default();
        assert_eq!(
            config.timeline_url(),
            concat!(
                "http://meteo.arso.gov.si",
                "/uploads/probase/www/nowcast/inca/inca_si0zm_data.json?prod=si0zm"
            )
        );
    }

    #[test]
    fn test_timeline_url_joins_slashes() {
        let config = ArsoClientConfig {
            host: "http://localhost:8080/".to_string(),
            timeline_path: "timeline.json".to_string(),
            timeout_secs: 5,
        };
        assert_eq!(config.timeline_url(), "http://localhost:8080/timeline.json");
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: ArsoClientConfig = serde_json::from_str(r#"{"timeout_secs": 3}"#).unwrap();
        assert_eq!(config.host, "http://meteo.arso.gov.si");
        assert_eq!(config.timeout_secs, 3);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = ArsoClient::new(ArsoClientConfig {
            host: "http://127.0.0.1:9".to_string(),
            timeline_path: "/timeline.json".to_string(),
            timeout_secs: 2,
        })
        .unwrap();

        let result = client.list_latest().await;
        assert!(matches!(result, Err(SnapshotError::Http(_))));
    }
}
