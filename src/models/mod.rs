// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, Gender, Photo, Profile, ScoringWeights, SearchFilters, SexualPreference, SortKey,
    SortOrder, Tag, UserIdentity,
};
pub use requests::{resolve_page, SearchQuery, SuggestionsQuery};
pub use responses::{ErrorResponse, HealthResponse, SearchResponse, SuggestionsResponse};
