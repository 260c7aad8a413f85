//! Uniform traversal over blocking and reactive contributor trees
//!
//! [`HealthEndpointSupport`](super::HealthEndpointSupport) is written once
//! against [`EndpointContributor`]. The two implementations differ only in
//! what a leaf evaluates to (a value or a future) and in how a composite
//! folds its children (directly, or after awaiting all of them).

use super::slow::SlowIndicatorLogger;
use crate::contributor::{ContributorMap, HealthContributor, ReactiveHealthContributor};
use crate::health::{ApiVersion, CompositeHealth, ContributedHealth, StatusAggregator};
use crate::utils::error::{HealthError, Result};
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Deferred health of a reactive contributor
pub type HealthFuture = BoxFuture<'static, Result<ContributedHealth>>;

/// A named child of a composite
#[derive(Debug, Clone)]
pub struct Child<C> {
    pub name: String,
    pub contributor: C,
}

/// Node of a contributor tree as seen by the health endpoint
pub trait EndpointContributor: Sized + Send + Sync {
    /// What evaluating a node produces
    type Contribution: Send + 'static;

    /// Registry element the tree is built from
    type Source: Clone + Send + Sync + 'static;

    /// Root node over a registry snapshot
    fn root(snapshot: Arc<ContributorMap<Self::Source>>) -> Self;

    fn is_composite(&self) -> bool;

    /// Named child; must only be called on a composite
    fn child(&self, name: &str) -> Option<Self>;

    /// Children in iteration order; must only be called on a composite
    fn children(&self) -> Vec<Child<Self>>;

    /// Evaluate a leaf
    fn health(&self, include_details: bool) -> Result<Self::Contribution>;

    /// Name of the underlying indicator type
    fn type_name(&self) -> &'static str;

    /// Evaluate a leaf, reporting it when it is slow
    ///
    /// The result, including any error, is returned unchanged.
    fn logged_health(
        &self,
        name: &str,
        include_details: bool,
        logger: &SlowIndicatorLogger,
    ) -> Result<Self::Contribution> {
        let _timer = logger.start(self.type_name(), name);
        self.health(include_details)
    }

    /// Fold child contributions into the contribution of their composite
    fn aggregate(
        api_version: ApiVersion,
        contributions: IndexMap<String, Self::Contribution>,
        aggregator: Arc<dyn StatusAggregator>,
        show_components: bool,
        groups: Option<BTreeSet<String>>,
    ) -> Self::Contribution;
}

fn composite_misuse() -> HealthError {
    HealthError::contributor("health requested from a composite contributor")
}

/// Adapter for the blocking contributor tree
#[derive(Debug, Clone)]
pub struct Blocking(HealthContributor);

impl Blocking {
    pub fn new(contributor: HealthContributor) -> Self {
        Blocking(contributor)
    }
}

impl EndpointContributor for Blocking {
    type Contribution = ContributedHealth;
    type Source = HealthContributor;

    fn root(snapshot: Arc<ContributorMap<HealthContributor>>) -> Self {
        Blocking(HealthContributor::Composite(snapshot))
    }

    fn is_composite(&self) -> bool {
        self.0.is_composite()
    }

    fn child(&self, name: &str) -> Option<Self> {
        match &self.0 {
            HealthContributor::Composite(children) => children.contributor(name).map(Blocking),
            HealthContributor::Indicator(_) => None,
        }
    }

    fn children(&self) -> Vec<Child<Self>> {
        match &self.0 {
            HealthContributor::Composite(children) => children
                .entries()
                .into_iter()
                .map(|entry| Child {
                    name: entry.name,
                    contributor: Blocking(entry.contributor),
                })
                .collect(),
            HealthContributor::Indicator(_) => Vec::new(),
        }
    }

    fn health(&self, include_details: bool) -> Result<ContributedHealth> {
        match &self.0 {
            HealthContributor::Indicator(indicator) => indicator
                .health_with_details(include_details)
                .map(ContributedHealth::from),
            HealthContributor::Composite(_) => Err(composite_misuse()),
        }
    }

    fn type_name(&self) -> &'static str {
        match &self.0 {
            HealthContributor::Indicator(indicator) => indicator.type_name(),
            HealthContributor::Composite(_) => "composite",
        }
    }

    fn aggregate(
        api_version: ApiVersion,
        contributions: IndexMap<String, ContributedHealth>,
        aggregator: Arc<dyn StatusAggregator>,
        show_components: bool,
        groups: Option<BTreeSet<String>>,
    ) -> ContributedHealth {
        CompositeHealth::aggregate(
            api_version,
            contributions,
            aggregator.as_ref(),
            show_components,
            groups,
        )
        .into()
    }
}

/// Adapter for the reactive contributor tree
#[derive(Debug, Clone)]
pub struct Reactive(ReactiveHealthContributor);

impl Reactive {
    pub fn new(contributor: ReactiveHealthContributor) -> Self {
        Reactive(contributor)
    }
}

impl EndpointContributor for Reactive {
    type Contribution = HealthFuture;
    type Source = ReactiveHealthContributor;

    fn root(snapshot: Arc<ContributorMap<ReactiveHealthContributor>>) -> Self {
        Reactive(ReactiveHealthContributor::Composite(snapshot))
    }

    fn is_composite(&self) -> bool {
        self.0.is_composite()
    }

    fn child(&self, name: &str) -> Option<Self> {
        match &self.0 {
            ReactiveHealthContributor::Composite(children) => {
                children.contributor(name).map(Reactive)
            }
            ReactiveHealthContributor::Indicator(_) => None,
        }
    }

    fn children(&self) -> Vec<Child<Self>> {
        match &self.0 {
            ReactiveHealthContributor::Composite(children) => children
                .entries()
                .into_iter()
                .map(|entry| Child {
                    name: entry.name,
                    contributor: Reactive(entry.contributor),
                })
                .collect(),
            ReactiveHealthContributor::Indicator(_) => Vec::new(),
        }
    }

    fn health(&self, include_details: bool) -> Result<HealthFuture> {
        match &self.0 {
            ReactiveHealthContributor::Indicator(indicator) => {
                let indicator = Arc::clone(indicator);
                Ok(async move {
                    indicator
                        .health_with_details(include_details)
                        .await
                        .map(ContributedHealth::from)
                }
                .boxed())
            }
            ReactiveHealthContributor::Composite(_) => Err(composite_misuse()),
        }
    }

    fn type_name(&self) -> &'static str {
        match &self.0 {
            ReactiveHealthContributor::Indicator(indicator) => indicator.type_name(),
            ReactiveHealthContributor::Composite(_) => "composite",
        }
    }

    /// Times the evaluation itself, from first poll to completion
    fn logged_health(
        &self,
        name: &str,
        include_details: bool,
        logger: &SlowIndicatorLogger,
    ) -> Result<HealthFuture> {
        let health = self.health(include_details)?;
        let logger = *logger;
        let type_name = self.type_name();
        let name = name.to_string();
        Ok(async move {
            let _timer = logger.start(type_name, name);
            health.await
        }
        .boxed())
    }

    /// Children are awaited concurrently; the result keeps their order
    fn aggregate(
        api_version: ApiVersion,
        contributions: IndexMap<String, HealthFuture>,
        aggregator: Arc<dyn StatusAggregator>,
        show_components: bool,
        groups: Option<BTreeSet<String>>,
    ) -> HealthFuture {
        async move {
            let (names, pending): (Vec<String>, Vec<HealthFuture>) =
                contributions.into_iter().unzip();
            let results = join_all(pending).await;
            let mut resolved = IndexMap::with_capacity(names.len());
            for (name, result) in names.into_iter().zip(results) {
                resolved.insert(name, result?);
            }
            Ok(CompositeHealth::aggregate(
                api_version,
                resolved,
                aggregator.as_ref(),
                show_components,
                groups,
            )
            .into())
        }
        .boxed()
    }
}
