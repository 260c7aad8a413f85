//! Mapping from health status to HTTP status code

use super::status::{Status, uniform_code};
use std::collections::HashMap;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// Maps a health status to the HTTP status code reported by the transport
pub trait HttpCodeStatusMapper: Send + Sync {
    fn status_code(&self, status: &Status) -> u16;
}

/// Table-driven mapper
///
/// Unmapped statuses report `200`. The default table maps `DOWN` and
/// `OUT_OF_SERVICE` to `503`.
#[derive(Debug, Clone)]
pub struct SimpleHttpCodeStatusMapper {
    mappings: HashMap<String, u16>,
}

impl SimpleHttpCodeStatusMapper {
    /// Create a mapper from custom mappings; an empty map keeps the defaults
    pub fn new(mappings: HashMap<String, u16>) -> Self {
        if mappings.is_empty() {
            return Self::default();
        }
        let mappings = mappings
            .into_iter()
            .map(|(code, http)| (uniform_code(&code), http))
            .collect();
        Self { mappings }
    }
}

impl Default for SimpleHttpCodeStatusMapper {
    fn default() -> Self {
        let mut mappings = HashMap::new();
        mappings.insert(uniform_code(Status::DOWN.code()), STATUS_SERVICE_UNAVAILABLE);
        mappings.insert(
            uniform_code(Status::OUT_OF_SERVICE.code()),
            STATUS_SERVICE_UNAVAILABLE,
        );
        Self { mappings }
    }
}

impl HttpCodeStatusMapper for SimpleHttpCodeStatusMapper {
    fn status_code(&self, status: &Status) -> u16 {
        self.mappings
            .get(&uniform_code(status.code()))
            .copied()
            .unwrap_or(STATUS_OK)
    }
}
