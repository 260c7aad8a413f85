//! Ordered, validated maps of named contributors

use crate::utils::error::{HealthError, Result};
use indexmap::IndexMap;
use std::fmt;

/// Read access to a set of named child contributors
pub trait Contributors<C>: Send + Sync {
    /// Return the contributor with the given name
    fn contributor(&self, name: &str) -> Option<C>;

    /// Named contributors in their defined iteration order
    fn entries(&self) -> Vec<ContributorEntry<C>>;
}

/// A named contributor
#[derive(Debug, Clone)]
pub struct ContributorEntry<C> {
    pub name: String,
    pub contributor: C,
}

/// Check that a contributor name can be addressed by a path segment
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HealthError::invalid_name("Contributor name must not be empty"));
    }
    if name.contains('/') {
        return Err(HealthError::invalid_name(format!(
            "Contributor name '{}' must not contain a '/'",
            name
        )));
    }
    Ok(())
}

/// Insertion-ordered map of uniquely named contributors
#[derive(Clone)]
pub struct ContributorMap<C> {
    entries: IndexMap<String, C>,
}

impl<C> ContributorMap<C> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Build a map from named contributors, rejecting invalid or repeated names
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
    {
        let mut map = Self::new();
        for (name, contributor) in entries {
            map.insert(name.into(), contributor)?;
        }
        Ok(map)
    }

    /// Add a contributor; the name must be valid and not already present
    pub fn insert(&mut self, name: String, contributor: C) -> Result<()> {
        validate_name(&name)?;
        if self.entries.contains_key(&name) {
            return Err(HealthError::duplicate_contributor(name));
        }
        self.entries.insert(name, contributor);
        Ok(())
    }

    /// Remove a contributor, keeping the order of the others
    pub fn remove(&mut self, name: &str) -> Option<C> {
        self.entries.shift_remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&C> {
        self.entries.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &C)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }
}

impl<C> Default for ContributorMap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ContributorMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

impl<C> Contributors<C> for ContributorMap<C>
where
    C: Clone + Send + Sync,
{
    fn contributor(&self, name: &str) -> Option<C> {
        self.entries.get(name).cloned()
    }

    fn entries(&self) -> Vec<ContributorEntry<C>> {
        self.entries
            .iter()
            .map(|(name, contributor)| ContributorEntry {
                name: name.clone(),
                contributor: contributor.clone(),
            })
            .collect()
    }
}
