//! ev-stop-planner core
//!
//! Decides where charging stops must be inserted along a driving route,
//! given a vehicle range limit and a safety buffer, with station lookups
//! injected behind a trait.

pub mod geo;
pub mod geocode;
pub mod osrm;
pub mod osrm_data;
pub mod planner;
pub mod stations;
pub mod traits;
