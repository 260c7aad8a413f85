//! Blocking health contributors

use super::map::{ContributorMap, Contributors};
use crate::health::Health;
use crate::utils::error::Result;
use std::fmt;
use std::sync::Arc;

/// Computes the health of one component on the calling thread
pub trait HealthIndicator: Send + Sync {
    /// Compute the current health
    fn health(&self) -> Result<Health>;

    /// Compute the current health, optionally without details
    fn health_with_details(&self, include_details: bool) -> Result<Health> {
        let health = self.health()?;
        Ok(if include_details {
            health
        } else {
            health.without_details()
        })
    }

    /// Name used to identify this indicator in log output
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> HealthIndicator for F
where
    F: Fn() -> Result<Health> + Send + Sync,
{
    fn health(&self) -> Result<Health> {
        self()
    }
}

/// A node of the blocking contributor tree
#[derive(Clone)]
pub enum HealthContributor {
    /// Leaf that evaluates to a health value
    Indicator(Arc<dyn HealthIndicator>),
    /// Named children
    Composite(Arc<dyn Contributors<HealthContributor>>),
}

impl HealthContributor {
    /// Wrap an indicator
    pub fn indicator<I>(indicator: I) -> Self
    where
        I: HealthIndicator + 'static,
    {
        HealthContributor::Indicator(Arc::new(indicator))
    }

    /// Build a composite from named children
    pub fn composite<I, K>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, HealthContributor)>,
        K: Into<String>,
    {
        ContributorMap::from_entries(children).map(Self::from_map)
    }

    /// Build a composite from an existing map
    pub fn from_map(children: ContributorMap<HealthContributor>) -> Self {
        HealthContributor::Composite(Arc::new(children))
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self, HealthContributor::Composite(_))
    }
}

impl fmt::Debug for HealthContributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthContributor::Indicator(indicator) => f
                .debug_tuple("Indicator")
                .field(&indicator.type_name())
                .finish(),
            HealthContributor::Composite(children) => {
                let names: Vec<String> =
                    children.entries().into_iter().map(|entry| entry.name).collect();
                f.debug_tuple("Composite").field(&names).finish()
            }
        }
    }
}
