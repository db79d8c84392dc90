use std::cmp::Ordering;
use crate::core::tags::has_all_tags;
use crate::models::{Candidate, SearchFilters, SortKey, SortOrder};

/// Check a scored candidate against explicit search filters
///
/// Applied in order: fame range, distance ceiling, age range, required tags.
/// Unset bounds do not constrain.
pub fn matches_search_filters(candidate: &Candidate, filters: &SearchFilters) -> bool {
    let fame = candidate.profile.fame_rating;
    if filters.min_fame.is_some_and(|min| fame < min) {
        return false;
    }
    if filters.max_fame.is_some_and(|max| fame > max) {
        return false;
    }

    if filters
        .max_distance_km
        .is_some_and(|max| candidate.distance_km > max)
    {
        return false;
    }

    if filters.min_age.is_some_and(|min| candidate.age < min) {
        return false;
    }
    if filters.max_age.is_some_and(|max| candidate.age > max) {
        return false;
    }

    filters.tags.is_empty() || has_all_tags(&candidate.profile.tags, &filters.tags)
}

/// Sort candidates by the chosen key
///
/// The sort is stable, so candidates that tie keep their incoming order.
pub fn sort_candidates(candidates: &mut [Candidate], key: SortKey, order: SortOrder) {
    candidates.sort_by(|a, b| {
        let ordering = compare_by(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &Candidate, b: &Candidate, key: SortKey) -> Ordering {
    match key {
        SortKey::Compatibility => a
            .compatibility_score
            .partial_cmp(&b.compatibility_score)
            .unwrap_or(Ordering::Equal),
        SortKey::Age => a.age.cmp(&b.age),
        SortKey::Distance => a
            .distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal),
        SortKey::Fame => a.profile.fame_rating.cmp(&b.profile.fame_rating),
        SortKey::CommonTags => a.common_tags.cmp(&b.common_tags),
    }
}
