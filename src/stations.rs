//! Open Charge Map HTTP adapter for station lookups.
//!
//! Implements [`StationProvider`] over the Open Charge Map POI endpoint.
//! The service ranks results by proximity; that ordering is passed through
//! untouched. Any transport or decode failure degrades to an empty result,
//! which the planner records as an unreachable point rather than an error.

use serde::Deserialize;
use tracing::warn;

use crate::traits::{Station, StationProvider};

#[derive(Debug, Clone)]
pub struct OcmConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl OcmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openchargemap.io".to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OcmClient {
    config: OcmConfig,
    client: reqwest::blocking::Client,
}

impl OcmClient {
    pub fn new(config: OcmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl StationProvider for OcmClient {
    fn find_stations(&self, lat: f64, lon: f64, max_results: usize) -> Vec<Station> {
        let url = format!(
            "{}/v3/poi/?output=json&latitude={:.6}&longitude={:.6}&maxresults={}&key={}",
            self.config.base_url, lat, lon, max_results, self.config.api_key
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<Poi>>());

        match response {
            Ok(pois) => pois.into_iter().filter_map(Poi::into_station).collect(),
            Err(err) => {
                warn!(%err, lat, lon, "station lookup failed, treating as no candidates");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Poi {
    #[serde(rename = "AddressInfo")]
    address_info: Option<AddressInfo>,
}

#[derive(Debug, Deserialize)]
struct AddressInfo {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
}

impl Poi {
    /// Maps a POI into the domain record, dropping entries that are missing
    /// any of the fields the planner needs.
    fn into_station(self) -> Option<Station> {
        let info = self.address_info?;
        Some(Station {
            latitude: info.latitude?,
            longitude: info.longitude?,
            title: info.title?,
        })
    }
}
