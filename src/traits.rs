//! The station-lookup seam between the planner core and the outside world.
//!
//! The planner never talks to a charging-station service directly; it is
//! handed a provider and calls it at trigger points. Concrete apps plug in
//! an HTTP-backed provider (see `stations`) or an in-process one for tests.

use serde::{Deserialize, Serialize};

/// A charging station as reported by a lookup service.
///
/// Externally sourced and never mutated by the planner. Service-specific
/// field names are mapped to this shape at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
}

/// Looks up charging stations near a point.
///
/// Results are ordered by the provider's own notion of proximity/quality;
/// the planner takes the first candidate and never re-sorts. A provider
/// must return an empty vec, not an error, when nothing is nearby or the
/// backing service is unreachable or times out. The planner treats an empty
/// result as a soft failure and keeps going.
pub trait StationProvider {
    fn find_stations(&self, lat: f64, lon: f64, max_results: usize) -> Vec<Station>;
}
