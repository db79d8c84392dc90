// Core algorithm exports
pub mod age;
pub mod completeness;
pub mod discovery;
pub mod distance;
pub mod filters;
pub mod orientation;
pub mod scoring;
pub mod search;
pub mod tags;
pub mod zones;

pub use age::calculate_age;
pub use completeness::is_profile_complete;
pub use discovery::{paginate, score_candidate, DiscoveryEngine, DiscoveryError, DEFAULT_SEARCH_BATCH_SIZE};
pub use distance::haversine_distance;
pub use filters::{collect_candidates, passes_profile_rules, passes_relationship_rules, AdmittedCandidate};
pub use orientation::is_compatible_orientation;
pub use scoring::calculate_compatibility;
pub use search::{matches_search_filters, sort_candidates};
pub use tags::{canonical_tag_name, count_common_tags, has_all_tags};
pub use zones::{partition_by_zone, GeoZone};
