use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender as declared on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    /// Lenient parse of a stored value; anything unknown is unspecified
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }
}

/// Sexual preference as declared on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SexualPreference {
    Heterosexual,
    Homosexual,
    Bisexual,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl SexualPreference {
    /// Lenient parse of a stored value; anything unknown is unspecified
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "heterosexual" => SexualPreference::Heterosexual,
            "homosexual" => SexualPreference::Homosexual,
            "bisexual" => SexualPreference::Bisexual,
            _ => SexualPreference::Unspecified,
        }
    }
}

/// Interest tag. Canonical names are lower-cased and `#`-prefixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "isProfile")]
    pub is_profile: bool,
}

/// Dating profile of a single user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "sexualPreference", default)]
    pub sexual_preference: SexualPreference,
    #[serde(default)]
    pub biography: String,
    #[serde(rename = "birthDate", default)]
    pub birth_date: Option<NaiveDate>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "locationName", default)]
    pub location_name: Option<String>,
    #[serde(rename = "fameRating", default)]
    pub fame_rating: i32,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Profile {
    /// An empty profile, as returned for users who never filled one in
    pub fn empty(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }
}

/// Display identity attached to results. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// A profile evaluated against one viewer for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub profile: Profile,
    pub user: UserIdentity,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "commonTags")]
    pub common_tags: usize,
    pub age: i32,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
}

/// Sort key for ad-hoc search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Compatibility,
    Age,
    Distance,
    Fame,
    CommonTags,
}

impl SortKey {
    /// Unknown or empty keys fall back to compatibility
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "age" => SortKey::Age,
            "distance" => SortKey::Distance,
            "fame" => SortKey::Fame,
            "common_tags" => SortKey::CommonTags,
            _ => SortKey::Compatibility,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than "asc" sorts descending
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// Explicit search filters. `None` bounds mean "no bound".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_fame: Option<i32>,
    pub max_fame: Option<i32>,
    pub max_distance_km: Option<f64>,
    pub tags: Vec<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

/// Weights of the compatibility score terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub distance: f64,
    pub tags: f64,
    pub fame: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 0.5,
            tags: 0.3,
            fame: 0.2,
        }
    }
}
