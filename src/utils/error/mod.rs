//! Error handling for the health engine
//!
//! This module defines all error types used throughout the crate.

mod conversions;
mod helpers;
mod types;

// Re-export all public types
pub use types::{HealthError, Result};
