//! Adapts blocking contributors to the reactive hierarchy

use super::blocking::{HealthContributor, HealthIndicator};
use super::map::{ContributorEntry, Contributors};
use super::reactive::{ReactiveHealthContributor, ReactiveHealthIndicator};
use crate::health::Health;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

impl ReactiveHealthContributor {
    /// Adapt a blocking contributor tree
    ///
    /// Blocking indicators run on the blocking thread pool so they never
    /// stall the async executor. Composite children are adapted on access.
    pub fn adapt(contributor: HealthContributor) -> Self {
        match contributor {
            HealthContributor::Indicator(indicator) => {
                let adapter = BlockingIndicatorAdapter { indicator };
                ReactiveHealthContributor::Indicator(Arc::new(adapter))
            }
            HealthContributor::Composite(children) => {
                let adapter = BlockingContributorsAdapter { children };
                ReactiveHealthContributor::Composite(Arc::new(adapter))
            }
        }
    }
}

impl From<HealthContributor> for ReactiveHealthContributor {
    fn from(contributor: HealthContributor) -> Self {
        ReactiveHealthContributor::adapt(contributor)
    }
}

struct BlockingIndicatorAdapter {
    indicator: Arc<dyn HealthIndicator>,
}

#[async_trait]
impl ReactiveHealthIndicator for BlockingIndicatorAdapter {
    async fn health(&self) -> Result<Health> {
        self.health_with_details(true).await
    }

    async fn health_with_details(&self, include_details: bool) -> Result<Health> {
        let indicator = Arc::clone(&self.indicator);
        tokio::task::spawn_blocking(move || indicator.health_with_details(include_details)).await?
    }

    fn type_name(&self) -> &'static str {
        self.indicator.type_name()
    }
}

struct BlockingContributorsAdapter {
    children: Arc<dyn Contributors<HealthContributor>>,
}

impl Contributors<ReactiveHealthContributor> for BlockingContributorsAdapter {
    fn contributor(&self, name: &str) -> Option<ReactiveHealthContributor> {
        self.children
            .contributor(name)
            .map(ReactiveHealthContributor::adapt)
    }

    fn entries(&self) -> Vec<ContributorEntry<ReactiveHealthContributor>> {
        self.children
            .entries()
            .into_iter()
            .map(|entry| ContributorEntry {
                name: entry.name,
                contributor: ReactiveHealthContributor::adapt(entry.contributor),
            })
            .collect()
    }
}
