//! Slow contributor logging

use std::time::{Duration, Instant};
use tracing::{Level, warn};

/// Logs a warning when a leaf evaluation exceeds a threshold
///
/// Observation only: the evaluation result is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlowIndicatorLogger {
    threshold: Option<Duration>,
}

impl SlowIndicatorLogger {
    pub fn new(threshold: Option<Duration>) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Option<Duration> {
        self.threshold
    }

    /// Start timing an evaluation
    ///
    /// The evaluation is recorded when the returned timer drops, so a leaf
    /// that unwinds is still reported.
    pub fn start(&self, type_name: &'static str, name: impl Into<String>) -> SlowIndicatorTimer {
        SlowIndicatorTimer {
            logger: *self,
            type_name,
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Record an evaluation, returning whether a warning was emitted
    pub fn observe(&self, type_name: &str, name: &str, elapsed: Duration) -> bool {
        let Some(threshold) = self.threshold else {
            return false;
        };
        if elapsed <= threshold || !tracing::enabled!(Level::WARN) {
            return false;
        }
        let identifier = if name.is_empty() {
            type_name.to_string()
        } else {
            format!("{} ({})", type_name, name)
        };
        warn!(
            contributor = %identifier,
            elapsed_ms = elapsed.as_millis() as u64,
            "Health contributor {} took {} to respond",
            identifier,
            format_duration(elapsed)
        );
        true
    }
}

/// In-flight evaluation started by [`SlowIndicatorLogger::start`]
#[derive(Debug)]
pub struct SlowIndicatorTimer {
    logger: SlowIndicatorLogger,
    type_name: &'static str,
    name: String,
    start: Instant,
}

impl Drop for SlowIndicatorTimer {
    fn drop(&mut self) {
        self.logger.observe(self.type_name, &self.name, self.start.elapsed());
    }
}

/// Render a duration as whole milliseconds, e.g. `105ms`
pub fn format_duration(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}
