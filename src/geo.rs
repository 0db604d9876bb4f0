//! Geographic value types and great-circle distance.
//!
//! Route points arrive as latitude/longitude pairs, so distances use the
//! haversine formula rather than Euclidean distance on raw degrees (which
//! would be wrong at all but equatorial latitudes).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Invalid geographic input, rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("route polyline needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// A geographic point in decimal degrees. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Validates coordinate ranges. Non-finite values are rejected too.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Haversine great-circle distance between two points, in kilometers.
///
/// Commutative, and zero (within floating tolerance) iff both points
/// coincide.
pub fn segment_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// An ordered driving path from origin to destination.
///
/// Stores decoded latitude/longitude points directly; encoding to and from
/// compact wire formats happens at API boundaries, not here. Construction
/// rejects polylines with fewer than two points. Zero-length segments
/// (repeated points) contribute zero distance and are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePolyline {
    points: Vec<GeoPoint>,
}

impl RoutePolyline {
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, GeoError> {
        if points.len() < 2 {
            return Err(GeoError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    /// Distances of each consecutive segment, in traversal order.
    ///
    /// Segment distances are independent of any lookup outcome, so the map
    /// runs in parallel; the planner's sequential trigger loop consumes the
    /// result in order.
    pub fn segment_distances(&self) -> Vec<f64> {
        self.points
            .par_windows(2)
            .map(|pair| segment_distance(pair[0], pair[1]))
            .collect()
    }

    /// Total polyline length in kilometers.
    pub fn total_km(&self) -> f64 {
        self.segment_distances().iter().sum()
    }
}
