//! HTTP-based geocoding client

use super::{GeoLocation, Geocoder};
use crate::config::GeocoderConfig;
use crate::error::{Result, ShopScoutError};
use async_trait::async_trait;
use std::time::Duration;

/// Geocoder backed by an external `(text) -> structured location` service
pub struct HttpGeocoder {
    http_client: reqwest::Client,
    config: GeocoderConfig,
}

impl HttpGeocoder {
    /// Create from configuration
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ShopScoutError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn locate(&self, text: &str) -> Result<GeoLocation> {
        let url = format!("{}/geocode", self.config.url);

        let mut req = self.http_client.get(&url).query(&[("q", text)]);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopScoutError::ExternalService(format!(
                "Geocoder error (HTTP {}): {}",
                status, body
            )));
        }

        let location: GeoLocation = response.json().await?;
        Ok(location)
    }
}
