//! Utility modules
//!
//! - **error**: error type and helpers shared by every module

pub mod error;
