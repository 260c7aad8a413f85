//! Copy-on-write contributor registry

use crate::contributor::{ContributorMap, HealthContributor, ReactiveHealthContributor};
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Extra naming rules applied when contributors are registered
pub trait NameValidator: Send + Sync {
    fn validate(&self, name: &str) -> Result<()>;
}

impl<F> NameValidator for F
where
    F: Fn(&str) -> Result<()> + Send + Sync,
{
    fn validate(&self, name: &str) -> Result<()> {
        self(name)
    }
}

/// Registry of blocking contributors
pub type HealthContributorRegistry = Registry<HealthContributor>;

/// Registry of reactive contributors
pub type ReactiveHealthContributorRegistry = Registry<ReactiveHealthContributor>;

/// Mutable name → contributor store
///
/// Readers take an immutable snapshot that stays consistent for the whole
/// health request. Writers are serialised and publish a fresh map.
pub struct Registry<C> {
    /// Current published contributors
    contributors: ArcSwap<ContributorMap<C>>,
    /// Additional name validators
    validators: Vec<Arc<dyn NameValidator>>,
    /// Serialises writers
    monitor: Mutex<()>,
}

impl<C> Registry<C>
where
    C: Clone + Send + Sync + 'static,
{
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            contributors: ArcSwap::from_pointee(ContributorMap::new()),
            validators: Vec::new(),
            monitor: Mutex::new(()),
        }
    }

    /// Create a registry with initial contributors and extra name validators
    pub fn with_contributors<I, K>(
        contributors: I,
        validators: Vec<Arc<dyn NameValidator>>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
    {
        let mut map = ContributorMap::new();
        for (name, contributor) in contributors {
            let name = name.into();
            verify_name(&validators, &name)?;
            map.insert(name, contributor)?;
        }
        Ok(Self {
            contributors: ArcSwap::from_pointee(map),
            validators,
            monitor: Mutex::new(()),
        })
    }

    /// Register a contributor under a unique name
    pub fn register<S: Into<String>>(&self, name: S, contributor: C) -> Result<()> {
        let name = name.into();
        verify_name(&self.validators, &name)?;
        let _guard = self.monitor.lock();
        let mut contributors = ContributorMap::clone(&self.contributors.load());
        contributors.insert(name.clone(), contributor)?;
        self.contributors.store(Arc::new(contributors));
        debug!("Registered health contributor '{}'", name);
        Ok(())
    }

    /// Remove a contributor, returning it if it was registered
    pub fn unregister(&self, name: &str) -> Option<C> {
        let _guard = self.monitor.lock();
        let current = self.contributors.load_full();
        if !current.contains(name) {
            return None;
        }
        let mut contributors = ContributorMap::clone(&current);
        let removed = contributors.remove(name);
        self.contributors.store(Arc::new(contributors));
        debug!("Unregistered health contributor '{}'", name);
        removed
    }

    /// Look up a registered contributor
    pub fn contributor(&self, name: &str) -> Option<C> {
        self.contributors.load().get(name).cloned()
    }

    /// Immutable view of the registered contributors
    pub fn snapshot(&self) -> Arc<ContributorMap<C>> {
        self.contributors.load_full()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<String> {
        self.contributors.load().names().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.contributors.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.load().is_empty()
    }
}

impl<C> Default for Registry<C>
where
    C: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("contributors", &*self.contributors.load())
            .field("validators", &self.validators.len())
            .finish()
    }
}

fn verify_name(validators: &[Arc<dyn NameValidator>], name: &str) -> Result<()> {
    crate::contributor::validate_name(name)?;
    validators
        .iter()
        .try_for_each(|validator| validator.validate(name))
}
