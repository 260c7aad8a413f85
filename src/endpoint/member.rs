//! Group membership predicates

use std::collections::HashSet;

/// Decides whether a slash-joined contributor name belongs to a group
pub trait MemberPredicate: Send + Sync {
    fn is_member(&self, name: &str) -> bool;
}

impl<F> MemberPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_member(&self, name: &str) -> bool {
        self(name)
    }
}

/// Membership from include and exclude lists
///
/// `*` matches every name. Any other entry matches the name itself and all
/// names nested below it, so `db` matches `db/primary`. An empty include
/// list includes everything. Exclusion wins.
#[derive(Debug, Clone)]
pub struct IncludeExcludeMemberPredicate {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl IncludeExcludeMemberPredicate {
    /// Include only the given names and everything nested below them
    pub fn including<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            include: clean(include),
            exclude: HashSet::new(),
        }
    }

    /// Include every name
    pub fn all() -> Self {
        Self::including(["*"])
    }

    /// Exclude the given names and everything nested below them
    pub fn excluding<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude.extend(clean(exclude));
        self
    }

    fn is_included(&self, name: &str) -> bool {
        self.include.is_empty() || self.include.contains("*") || matches_entry(&self.include, name)
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains("*") || matches_entry(&self.exclude, name)
    }
}

impl MemberPredicate for IncludeExcludeMemberPredicate {
    fn is_member(&self, name: &str) -> bool {
        let name = name.trim();
        self.is_included(name) && !self.is_excluded(name)
    }
}

fn clean<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// The name or one of its parents appears in `entries`
fn matches_entry(entries: &HashSet<String>, name: &str) -> bool {
    let mut candidate = name;
    loop {
        if entries.contains(candidate) {
            return true;
        }
        match candidate.rfind('/') {
            Some(index) => candidate = &candidate[..index],
            None => return false,
        }
    }
}
