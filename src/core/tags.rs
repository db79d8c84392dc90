use std::collections::HashSet;
use crate::models::Tag;

/// Count tag names present in both collections
///
/// Names are compared as stored; canonicalisation happens before tags reach
/// the store.
pub fn count_common_tags(viewer_tags: &[Tag], candidate_tags: &[Tag]) -> usize {
    let names: HashSet<&str> = viewer_tags.iter().map(|tag| tag.name.as_str()).collect();

    candidate_tags
        .iter()
        .filter(|tag| names.contains(tag.name.as_str()))
        .count()
}

/// Canonical stored form of a tag name: lower-cased and `#`-prefixed
pub fn canonical_tag_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    if lowered.starts_with('#') {
        lowered
    } else {
        format!("#{}", lowered)
    }
}

/// Check that every requested tag is carried by the profile
///
/// A requested tag matches with or without its `#` prefix, whichever form
/// the profile stores.
pub fn has_all_tags(profile_tags: &[Tag], requested: &[String]) -> bool {
    let carried: HashSet<&str> = profile_tags
        .iter()
        .map(|tag| strip_prefix(&tag.name))
        .collect();

    requested
        .iter()
        .all(|tag| carried.contains(strip_prefix(tag.trim())))
}

#[inline]
fn strip_prefix(name: &str) -> &str {
    name.strip_prefix('#').unwrap_or(name)
}
