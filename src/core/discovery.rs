use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use crate::core::{
    age::calculate_age,
    completeness::is_profile_complete,
    distance::haversine_distance,
    filters::{collect_candidates, AdmittedCandidate},
    scoring::calculate_compatibility,
    search::{matches_search_filters, sort_candidates},
    tags::count_common_tags,
    zones::partition_by_zone,
};
use crate::models::{Candidate, Profile, ScoringWeights, SearchFilters};
use crate::services::{ProfileStore, StoreError, UserStore};

/// Number of ranked suggestions a search filters over
pub const DEFAULT_SEARCH_BATCH_SIZE: usize = 1000;

/// Errors that fail a whole discovery or search request
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Profile incomplete: complete your profile to see suggestions")]
    ProfileIncomplete,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Discovery and search orchestrator
///
/// # Pipeline Stages
/// 1. Viewer completeness gate
/// 2. Candidate exclusion (self, incomplete, orientation, block, like, match)
/// 3. Compatibility scoring
/// 4. Geographic zone ordering
/// 5. Search filters and re-sort (search only)
/// 6. Pagination
///
/// Holds no mutable state; every request reads fresh data from the stores.
pub struct DiscoveryEngine<P: ?Sized, U: ?Sized> {
    profiles: Arc<P>,
    users: Arc<U>,
    weights: ScoringWeights,
    search_batch_size: usize,
}

impl<P: ?Sized, U: ?Sized> Clone for DiscoveryEngine<P, U> {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            users: Arc::clone(&self.users),
            weights: self.weights,
            search_batch_size: self.search_batch_size,
        }
    }
}

impl<P, U> DiscoveryEngine<P, U>
where
    P: ProfileStore + ?Sized,
    U: UserStore + ?Sized,
{
    pub fn new(profiles: Arc<P>, users: Arc<U>, weights: ScoringWeights) -> Self {
        Self {
            profiles,
            users,
            weights,
            search_batch_size: DEFAULT_SEARCH_BATCH_SIZE,
        }
    }

    pub fn with_search_batch_size(mut self, search_batch_size: usize) -> Self {
        self.search_batch_size = search_batch_size;
        self
    }

    /// Ranked, paginated suggestions for a viewer
    ///
    /// Fails with [`DiscoveryError::ProfileIncomplete`] before any candidate
    /// is looked at when the viewer's own profile is incomplete. An offset
    /// past the end yields an empty page.
    pub async fn get_suggestions(
        &self,
        viewer_id: i64,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        let viewer = self.load_viewer(viewer_id).await?;
        let ranked = self.ranked_suggestions(&viewer, Utc::now().date_naive()).await?;
        let total = ranked.len();

        let page = paginate(ranked, limit, offset);

        tracing::info!(
            "Returning {} suggestions for user {} (from {} ranked, offset {})",
            page.len(),
            viewer_id,
            total,
            offset
        );

        Ok(page)
    }

    /// Filtered, re-sorted, paginated search over a viewer's suggestions
    ///
    /// Filters a large batch of ranked suggestions independent of `limit`,
    /// then replaces the zone ordering with the requested sort.
    pub async fn search_profiles(
        &self,
        viewer_id: i64,
        filters: &SearchFilters,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        let viewer = self.load_viewer(viewer_id).await?;
        let ranked = self.ranked_suggestions(&viewer, Utc::now().date_naive()).await?;

        let mut results: Vec<Candidate> = paginate(ranked, self.search_batch_size, 0)
            .into_iter()
            .filter(|candidate| matches_search_filters(candidate, filters))
            .collect();

        sort_candidates(&mut results, filters.sort_by, filters.sort_order);

        let total = results.len();
        let page = paginate(results, limit, offset);

        tracing::info!(
            "Returning {} search results for user {} (from {} matching, sort {:?} {:?})",
            page.len(),
            viewer_id,
            total,
            filters.sort_by,
            filters.sort_order
        );

        Ok(page)
    }

    async fn load_viewer(&self, viewer_id: i64) -> Result<Profile, DiscoveryError> {
        let profile = self.profiles.get_profile(viewer_id).await.map_err(|e| {
            tracing::error!("Failed to fetch profile for {}: {}", viewer_id, e);
            e
        })?;

        if !is_profile_complete(&profile) {
            tracing::info!("Profile of user {} is incomplete", viewer_id);
            return Err(DiscoveryError::ProfileIncomplete);
        }

        Ok(profile)
    }

    /// Every admitted candidate, scored and ordered by zone
    async fn ranked_suggestions(
        &self,
        viewer: &Profile,
        today: NaiveDate,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        // The viewer's own user record must resolve
        self.users.get_user(viewer.user_id).await.map_err(|e| {
            tracing::error!("Failed to fetch user {}: {}", viewer.user_id, e);
            e
        })?;

        let profiles = self.profiles.get_all_profiles().await.map_err(|e| {
            tracing::error!("Failed to enumerate profiles: {}", e);
            e
        })?;

        let admitted =
            collect_candidates(viewer, profiles, self.profiles.as_ref(), self.users.as_ref()).await;

        let scored = admitted
            .into_iter()
            .map(|candidate| score_candidate(viewer, candidate, &self.weights, today))
            .collect();

        Ok(partition_by_zone(scored))
    }
}

/// Attach distance, shared tags, age and compatibility to an admitted profile
pub fn score_candidate(
    viewer: &Profile,
    admitted: AdmittedCandidate,
    weights: &ScoringWeights,
    today: NaiveDate,
) -> Candidate {
    let AdmittedCandidate { profile, user } = admitted;

    let distance_km = haversine_distance(
        viewer.latitude,
        viewer.longitude,
        profile.latitude,
        profile.longitude,
    );
    let common_tags = count_common_tags(&viewer.tags, &profile.tags);
    let age = profile
        .birth_date
        .map(|birth| calculate_age(birth, today))
        .unwrap_or(0);
    let compatibility_score =
        calculate_compatibility(distance_km, common_tags, profile.fame_rating, weights);

    Candidate {
        profile,
        user,
        distance_km,
        common_tags,
        age,
        compatibility_score,
    }
}

/// Slice `[offset, offset + limit)` out of `items`, truncating at the end
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Vec<T> {
    if offset >= items.len() {
        return Vec::new();
    }
    items.into_iter().skip(offset).take(limit).collect()
}
