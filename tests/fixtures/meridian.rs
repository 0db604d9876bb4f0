//! Routes with known segment lengths.
//!
//! Along a fixed meridian the haversine formula reduces to
//! `R * delta_lat_radians`, so latitude steps can be sized to give segments
//! of (to floating precision) exact kilometre lengths. That makes trigger
//! arithmetic in tests easy to reason about.

use ev_stop_planner::geo::{GeoPoint, RoutePolyline};

/// Must match the radius used by `geo::segment_distance`.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Builds a route running due north along longitude `lon`, starting at
/// `start_lat`, with one segment per entry of `segment_kms`.
pub fn meridian_route(start_lat: f64, lon: f64, segment_kms: &[f64]) -> RoutePolyline {
    let mut lat = start_lat;
    let mut points = vec![GeoPoint::new(lat, lon).unwrap()];
    for km in segment_kms {
        lat += km / EARTH_RADIUS_KM * (180.0 / std::f64::consts::PI);
        points.push(GeoPoint::new(lat, lon).unwrap());
    }
    RoutePolyline::new(points).unwrap()
}
