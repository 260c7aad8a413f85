//! Health values and status aggregation
//!
//! This module provides the status type, the leaf and composite health
//! values produced by contributors and by the endpoint, and the pluggable
//! policies used to fold statuses and map them to HTTP codes.

mod aggregator;
mod http_mapper;
mod status;
mod types;


// Re-export public types
pub use aggregator::{SimpleStatusAggregator, StatusAggregator};
pub use http_mapper::{
    HttpCodeStatusMapper, STATUS_NOT_FOUND, STATUS_OK, STATUS_SERVICE_UNAVAILABLE,
    SimpleHttpCodeStatusMapper,
};
pub use status::Status;
pub use types::{ApiVersion, CompositeHealth, ContributedHealth, Health, HealthBuilder};
