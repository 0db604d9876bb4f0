//! Geoapify forward-geocoding adapter.
//!
//! Resolves free-text place names to coordinates so callers can build the
//! origin/destination pair for a route fetch. The planner core itself never
//! geocodes anything.

use serde::Deserialize;
use thiserror::Error;

use crate::geo::{GeoError, GeoPoint};

#[derive(Debug, Clone)]
pub struct GeoapifyConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl GeoapifyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.geoapify.com".to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned invalid coordinates: {0}")]
    Coordinates(#[from] GeoError),
}

#[derive(Debug, Clone)]
pub struct GeoapifyClient {
    config: GeoapifyConfig,
    client: reqwest::blocking::Client,
}

impl GeoapifyClient {
    pub fn new(config: GeoapifyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Resolves `query` to the best-matching point, or `Ok(None)` when the
    /// service has no match for it.
    pub fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        let url = format!("{}/v1/geocode/search", self.config.base_url);

        let body = self
            .client
            .get(url)
            .query(&[("text", query), ("apiKey", self.config.api_key.as_str())])
            .send()?
            .error_for_status()?
            .json::<GeocodeResponse>()?;

        match body.features.into_iter().next() {
            Some(feature) => {
                let point = GeoPoint::new(feature.properties.lat, feature.properties.lon)?;
                Ok(Some(point))
            }
            None => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    lat: f64,
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "features": [
                {
                    "properties": {
                        "lat": 48.8588897,
                        "lon": 2.3200410,
                        "formatted": "Paris, France"
                    }
                }
            ]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.features.len(), 1);
        assert!((response.features[0].properties.lat - 48.8588897).abs() < 1e-9);
    }

    #[test]
    fn test_decode_no_match() {
        let response: GeocodeResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert!(response.features.is_empty());
    }
}
