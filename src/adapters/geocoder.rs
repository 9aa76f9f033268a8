use crate::domain::ports::Geocoder;
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// 反向地理編碼縮放等級 (15 ≈ 街道/鄉鎮)
pub const DEFAULT_ZOOM: u8 = 15;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// OpenStreetMap Nominatim `/reverse` client
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    zoom: u8,
    language: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            zoom: DEFAULT_ZOOM,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let url = self.reverse_url();
        tracing::debug!("Reverse geocoding ({}, {}) via {}", latitude, longitude, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", self.zoom.to_string()),
                ("accept-language", self.language.clone()),
            ])
            .send()
            .await
            .map_err(|e| TrackerError::Geocoding {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Geocoder returned HTTP {}", status);
            return Err(TrackerError::Geocoding {
                message: format!("HTTP {}", status),
            });
        }

        let body: ReverseResponse = response.json().await.map_err(|e| TrackerError::Geocoding {
            message: e.to_string(),
        })?;

        if let Some(error) = body.error {
            // 例如在海面上空：Nominatim 回 "Unable to geocode"
            tracing::debug!("No reverse geocoding result: {}", error);
            return Ok(None);
        }

        Ok(body.display_name)
    }
}
