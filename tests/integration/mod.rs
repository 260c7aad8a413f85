//! Integration tests for health-rollup
//!
//! These tests drive the public API with real contributors and groups.

pub mod config_tests;
pub mod endpoint_tests;
pub mod reactive_tests;
