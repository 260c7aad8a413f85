//! Non-blocking health contributors

use super::map::{ContributorMap, Contributors};
use crate::health::Health;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Computes the health of one component without blocking the caller
#[async_trait]
pub trait ReactiveHealthIndicator: Send + Sync {
    /// Compute the current health
    async fn health(&self) -> Result<Health>;

    /// Compute the current health, optionally without details
    async fn health_with_details(&self, include_details: bool) -> Result<Health> {
        let health = self.health().await?;
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

#[async_trait]
impl<F, Fut> ReactiveHealthIndicator for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Health>> + Send,
{
    async fn health(&self) -> Result<Health> {
        (self)().await
    }
}

/// A node of the reactive contributor tree
#[derive(Clone)]
pub enum ReactiveHealthContributor {
    /// Leaf that evaluates to a health value
    Indicator(Arc<dyn ReactiveHealthIndicator>),
    /// Named children
    Composite(Arc<dyn Contributors<ReactiveHealthContributor>>),
}

impl ReactiveHealthContributor {
    /// Wrap an indicator
    pub fn indicator<I>(indicator: I) -> Self
    where
        I: ReactiveHealthIndicator + 'static,
    {
        ReactiveHealthContributor::Indicator(Arc::new(indicator))
    }

    /// Build a composite from named children
    pub fn composite<I, K>(children: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, ReactiveHealthContributor)>,
        K: Into<String>,
    {
        ContributorMap::from_entries(children).map(Self::from_map)
    }

    /// Build a composite from an existing map
    pub fn from_map(children: ContributorMap<ReactiveHealthContributor>) -> Self {
        ReactiveHealthContributor::Composite(Arc::new(children))
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self, ReactiveHealthContributor::Composite(_))
    }
}

impl fmt::Debug for ReactiveHealthContributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactiveHealthContributor::Indicator(indicator) => f
                .debug_tuple("Indicator")
                .field(&indicator.type_name())
                .finish(),
            ReactiveHealthContributor::Composite(children) => {
                let names: Vec<String> =
                    children.entries().into_iter().map(|entry| entry.name).collect();
                f.debug_tuple("Composite").field(&names).finish()
            }
        }
    }
}
