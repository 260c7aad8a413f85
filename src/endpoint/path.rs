//! Path resolution through a contributor tree

use super::contributor::EndpointContributor;

/// Follow `segments` from `root` through composite children
///
/// Returns `None` as soon as a segment addresses a leaf or a missing child.
/// An empty path resolves to the root itself.
pub fn resolve<C, S>(root: C, segments: &[S]) -> Option<C>
where
    C: EndpointContributor,
    S: AsRef<str>,
{
    let mut current = root;
    for segment in segments {
        if !current.is_composite() {
            return None;
        }
        current = current.child(segment.as_ref())?;
    }
    Some(current)
}

/// Slash-joined name used for group membership tests
pub fn group_relative_name<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("/")
}

/// Name of a child below `prefix`
pub(crate) fn child_name(prefix: &str, child: &str) -> String {
    if prefix.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", prefix, child)
    }
}
