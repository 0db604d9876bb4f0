//! OSRM HTTP adapter for driving-route geometries.
//!
//! Fetches the route polyline the planner traverses, plus OSRM's own
//! distance/duration summary. Unlike station lookups, a failure here is
//! fatal to the caller: without a polyline there is nothing to plan over.

use serde::Deserialize;
use thiserror::Error;

use crate::geo::{GeoError, GeoPoint, RoutePolyline};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum RouteFetchError {
    #[error("route request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no route found between the given points")]
    NoRoute,
    #[error("route geometry invalid: {0}")]
    Geometry(#[from] GeoError),
}

/// A fetched driving route: the geometry plus the service's summary.
#[derive(Debug, Clone)]
pub struct DrivingRoute {
    pub polyline: RoutePolyline,
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetches the driving route from `origin` to `destination`.
    ///
    /// OSRM's GeoJSON geometry lists coordinates as `[lon, lat]`; they are
    /// swapped into [`GeoPoint`]s here, and the metre/second summary is
    /// converted to km/minutes.
    pub fn fetch_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DrivingRoute, RouteFetchError> {
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url,
            self.config.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        let route = body.routes.into_iter().next().ok_or(RouteFetchError::NoRoute)?;

        let points = route
            .geometry
            .coordinates
            .iter()
            .map(|coord| GeoPoint::new(coord[1], coord[0]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DrivingRoute {
            polyline: RoutePolyline::new(points)?,
            distance_km: route.distance / 1000.0,
            duration_min: route.duration / 60.0,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_route_response() {
        let body = r#"{
            "code": "Ok",
            "routes": [
                {
                    "distance": 12345.6,
                    "duration": 987.0,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-115.1728, 36.1147], [-115.1580, 36.1727]]
                    }
                }
            ]
        }"#;

        let response: OsrmRouteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.routes.len(), 1);
        let route = &response.routes[0];
        assert_eq!(route.geometry.coordinates[0], [-115.1728, 36.1147]);
        assert!((route.distance / 1000.0 - 12.3456).abs() < 1e-9);
    }

    #[test]
    fn test_decode_no_routes() {
        let response: OsrmRouteResponse =
            serde_json::from_str(r#"{"code": "NoRoute"}"#).unwrap();
        assert!(response.routes.is_empty());
    }
}
