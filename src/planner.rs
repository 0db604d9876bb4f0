//! Charging-stop planner (core traversal).
//!
//! Walks a route polyline accumulating distance since the last charge and
//! asks an injected [`StationProvider`] for a station whenever the remaining
//! range (minus the safety buffer) runs out. The traversal is inherently
//! sequential: whether the accumulator resets after a trigger depends on the
//! lookup outcome, so segment N+1 cannot be evaluated before lookup N
//! finishes.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use crate::geo::{GeoPoint, RoutePolyline};
use crate::traits::{Station, StationProvider};

/// Invalid planner configuration, rejected before traversal starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("max_range_km must be positive and finite, got {0}")]
    InvalidRange(f64),
    #[error("buffer_km must be non-negative and finite, got {0}")]
    InvalidBuffer(f64),
    #[error("max_station_results must be at least 1")]
    ZeroStationResults,
}

/// Range model for one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Maximum distance the vehicle travels on a full charge, in km.
    pub max_range_km: f64,
    /// Safety margin the driver wants left when reaching a station, in km.
    ///
    /// `buffer_km >= max_range_km` is accepted as a degenerate
    /// configuration: the trigger then fires on every nonzero segment.
    pub buffer_km: f64,
    /// Candidate count requested from the station provider per trigger.
    pub max_station_results: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_range_km: 200.0,
            buffer_km: 10.0,
            max_station_results: 5,
        }
    }
}

impl PlannerConfig {
    fn validate(&self) -> Result<(), PlanError> {
        if !self.max_range_km.is_finite() || self.max_range_km <= 0.0 {
            return Err(PlanError::InvalidRange(self.max_range_km));
        }
        if !self.buffer_km.is_finite() || self.buffer_km < 0.0 {
            return Err(PlanError::InvalidBuffer(self.buffer_km));
        }
        if self.max_station_results == 0 {
            return Err(PlanError::ZeroStationResults);
        }
        Ok(())
    }
}

/// A charging stop the planner inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeStop {
    /// Route point where the trigger fired (the first point of the
    /// triggering segment — the lookup anchor).
    pub location: GeoPoint,
    /// First candidate returned by the provider at that anchor.
    pub station: Station,
}

/// Outcome of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Inserted stops, in traversal order.
    pub stops: Vec<ChargeStop>,
    /// Trigger points where the provider returned no candidates, in
    /// traversal order.
    pub unreachable_points: Vec<GeoPoint>,
}

/// Plans charging stops along `route`.
///
/// Per consecutive pair of route points: add the segment's great-circle
/// distance to the running total `d`, and when `d + buffer_km >=
/// max_range_km` (inclusive, to be conservative about range risk) look up
/// stations at the segment's first point. A found station is recorded and
/// resets the accumulator; an empty lookup records the anchor in
/// `unreachable_points` and leaves the accumulator running, since the
/// vehicle has not actually recharged and the deficit carries forward.
/// Leftover accumulated distance at the end of the route is discarded (no
/// stop is required at the destination itself).
///
/// Configuration errors are fatal and reported before traversal; empty
/// lookups never are.
pub fn plan<P>(
    route: &RoutePolyline,
    config: &PlannerConfig,
    stations: &P,
) -> Result<PlanResult, PlanError>
where
    P: StationProvider,
{
    plan_with_cancel(route, config, stations, &AtomicBool::new(false))
}

/// Like [`plan`], checking `cancel` between segments.
///
/// When the flag is set the traversal stops and the stops accumulated so
/// far are returned as a normal, well-formed partial result.
pub fn plan_with_cancel<P>(
    route: &RoutePolyline,
    config: &PlannerConfig,
    stations: &P,
    cancel: &AtomicBool,
) -> Result<PlanResult, PlanError>
where
    P: StationProvider,
{
    config.validate()?;

    let distances = route.segment_distances();
    let points = route.points();

    let mut stops: Vec<ChargeStop> = Vec::new();
    let mut unreachable_points: Vec<GeoPoint> = Vec::new();
    let mut since_last_charge = 0.0;

    for (segment, segment_km) in distances.into_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            debug!(segment, "planning cancelled, returning partial result");
            break;
        }

        since_last_charge += segment_km;

        if since_last_charge + config.buffer_km >= config.max_range_km {
            let anchor = points[segment];
            let candidates = stations.find_stations(
                anchor.latitude,
                anchor.longitude,
                config.max_station_results,
            );

            match candidates.into_iter().next() {
                Some(station) => {
                    debug!(
                        lat = anchor.latitude,
                        lon = anchor.longitude,
                        station = %station.title,
                        km_since_charge = since_last_charge,
                        "charging stop recorded"
                    );
                    stops.push(ChargeStop {
                        location: anchor,
                        station,
                    });
                    since_last_charge = 0.0;
                }
                None => {
                    warn!(
                        lat = anchor.latitude,
                        lon = anchor.longitude,
                        km_since_charge = since_last_charge,
                        "no charging stations found near trigger point"
                    );
                    unreachable_points.push(anchor);
                    // No reset: the deficit keeps accumulating until a
                    // station is found or the route ends.
                }
            }
        }
    }

    Ok(PlanResult {
        stops,
        unreachable_points,
    })
}
