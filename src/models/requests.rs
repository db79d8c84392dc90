use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::tags::canonical_tag_name;
use crate::models::domain::{SearchFilters, SortKey, SortOrder};

/// Query for the suggestions endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestionsQuery {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Query for the search endpoint
///
/// Numeric bounds that are missing or not positive are treated as unset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    #[validate(range(min = 0, max = 150))]
    #[serde(default)]
    pub min_age: Option<i32>,
    #[validate(range(min = 0, max = 150))]
    #[serde(default)]
    pub max_age: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    #[serde(default)]
    pub min_fame: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    #[serde(default)]
    pub max_fame: Option<i32>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub max_distance: Option<f64>,
    /// Comma separated, with or without the `#` prefix; canonicalised before use
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl SearchQuery {
    pub fn to_filters(&self) -> SearchFilters {
        SearchFilters {
            min_age: self.min_age.filter(|v| *v > 0),
            max_age: self.max_age.filter(|v| *v > 0),
            min_fame: self.min_fame.filter(|v| *v > 0),
            max_fame: self.max_fame.filter(|v| *v > 0),
            max_distance_km: self.max_distance.filter(|v| *v > 0.0),
            tags: self
                .tags
                .as_deref()
                .map(split_tags)
                .unwrap_or_default(),
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortKey::parse)
                .unwrap_or_default(),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(canonical_tag_name)
        .collect()
}

/// Resolve caller pagination into a `(limit, offset)` pair
///
/// A missing or non-positive limit becomes `default_limit`; the result is
/// capped at `max_limit`. A missing or negative offset becomes zero.
pub fn resolve_page(
    limit: Option<i64>,
    offset: Option<i64>,
    default_limit: usize,
    max_limit: usize,
) -> (usize, usize) {
    let limit = match limit {
        Some(l) if l > 0 => (l as usize).min(max_limit),
        _ => default_limit,
    };
    let offset = offset.filter(|o| *o >= 0).unwrap_or(0) as usize;
    (limit, offset)
}
