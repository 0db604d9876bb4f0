//! Shared fixtures for planner integration tests.

pub mod meridian;
