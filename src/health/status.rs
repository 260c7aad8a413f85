//! Health status codes

use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Status of a component or subsystem
///
/// Four well-known codes are provided as constants; any other non-empty code
/// can be created with [`Status::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Status {
    code: Cow<'static, str>,
}

impl Status {
    /// Component or subsystem is functioning as expected
    pub const UP: Status = Status::from_static("UP");
    /// Component or subsystem has suffered an unexpected failure
    pub const DOWN: Status = Status::from_static("DOWN");
    /// Component or subsystem has been taken out of service
    pub const OUT_OF_SERVICE: Status = Status::from_static("OUT_OF_SERVICE");
    /// Component or subsystem is in an unknown state
    pub const UNKNOWN: Status = Status::from_static("UNKNOWN");

    const fn from_static(code: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
        }
    }

    /// Create a custom status
    pub fn new<S: Into<String>>(code: S) -> Result<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(HealthError::invalid_status("status code must not be empty"));
        }
        Ok(Self {
            code: Cow::Owned(code),
        })
    }

    /// The status code
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Status::new(code).map_err(serde::de::Error::custom)
    }
}

/// Case and punctuation insensitive form of a status code
///
/// `OUT_OF_SERVICE`, `out-of-service` and `OutOfService` all map to
/// `outofservice`.
pub(crate) fn uniform_code(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
