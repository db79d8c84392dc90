//! Matcha Discovery - Profile discovery and compatibility matching for the Matcha dating app
//!
//! This library ranks candidate profiles for a viewer. Candidates pass an
//! exclusion pipeline (completeness, orientation, blocks, likes, matches),
//! are scored on distance, shared interest tags and fame, then ordered by
//! geographic zone. A search layer filters and re-sorts the same ranking.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{DiscoveryEngine, DiscoveryError, GeoZone, calculate_compatibility, distance::haversine_distance};
pub use crate::models::{Candidate, Profile, ScoringWeights, SearchFilters, SortKey, SortOrder};
pub use crate::services::{InMemoryStore, ProfileStore, StoreError, UserStore};
