//! Status aggregation policies

use super::status::{Status, uniform_code};
use std::collections::HashSet;
use std::fmt;

/// Folds the statuses of several components into one overall status
pub trait StatusAggregator: Send + Sync {
    /// Return the aggregate status for the given set of statuses
    fn aggregate_status(&self, statuses: &HashSet<Status>) -> Status;
}

impl<F> StatusAggregator for F
where
    F: Fn(&HashSet<Status>) -> Status + Send + Sync,
{
    fn aggregate_status(&self, statuses: &HashSet<Status>) -> Status {
        self(statuses)
    }
}

/// Order-based aggregator
///
/// The status that appears first in the configured order wins. Statuses whose
/// code is not part of the order are ignored; if nothing remains the result
/// is `UNKNOWN`.
#[derive(Clone)]
pub struct SimpleStatusAggregator {
    /// Uniform codes in priority order
    order: Vec<String>,
}

const DEFAULT_ORDER: [&str; 4] = ["DOWN", "OUT_OF_SERVICE", "UP", "UNKNOWN"];

impl SimpleStatusAggregator {
    /// Create an aggregator using the given status order
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let order: Vec<String> = order
            .into_iter()
            .map(|code| uniform_code(code.as_ref()))
            .collect();
        Self { order }
    }

    /// Priority of a status, `None` when it is not part of the order
    fn rank(&self, status: &Status) -> Option<usize> {
        let code = uniform_code(status.code());
        self.order.iter().position(|candidate| *candidate == code)
    }
}

impl Default for SimpleStatusAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

impl fmt::Debug for SimpleStatusAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleStatusAggregator")
            .field("order", &self.order)
            .finish()
    }
}

impl StatusAggregator for SimpleStatusAggregator {
    fn aggregate_status(&self, statuses: &HashSet<Status>) -> Status {
        statuses
            .iter()
            .filter_map(|status| self.rank(status).map(|rank| (rank, status)))
            .min_by(|(a_rank, a), (b_rank, b)| {
                a_rank.cmp(b_rank).then_with(|| a.code().cmp(b.code()))
            })
            .map(|(_, status)| status.clone())
            .unwrap_or(Status::UNKNOWN)
    }
}
