use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::models::{Profile, UserIdentity};
use crate::services::store::{ProfileStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    // Ordered so enumeration is deterministic
    profiles: BTreeMap<i64, Profile>,
    users: HashMap<i64, UserIdentity>,
    likes: HashSet<(i64, i64)>,
    blocks: HashSet<(i64, i64)>,
    failing_profile_lookups: HashSet<i64>,
    failing_user_lookups: HashSet<i64>,
    failing_relationship_checks: HashSet<i64>,
    failing_enumeration: bool,
}

/// In-process profile and user store
///
/// Backs the `memory` storage backend, the test suites and the benchmarks.
/// Lookups for chosen users can be made to fail so callers' error policies
/// can be exercised.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_profile(&self, profile: Profile) {
        self.write().profiles.insert(profile.user_id, profile);
    }

    pub fn insert_user(&self, user: UserIdentity) {
        self.write().users.insert(user.id, user);
    }

    /// Insert a profile together with a generated display identity
    pub fn add_member(&self, profile: Profile) {
        let id = profile.user_id;
        self.insert_user(UserIdentity {
            id,
            username: format!("user{}", id),
            first_name: "User".to_string(),
            last_name: id.to_string(),
        });
        self.insert_profile(profile);
    }

    pub fn like(&self, liker_id: i64, liked_id: i64) {
        self.write().likes.insert((liker_id, liked_id));
    }

    pub fn block(&self, blocker_id: i64, blocked_id: i64) {
        self.write().blocks.insert((blocker_id, blocked_id));
    }

    /// Make `get_profile` fail for this user
    pub fn fail_profile_lookup(&self, user_id: i64) {
        self.write().failing_profile_lookups.insert(user_id);
    }

    /// Make `get_all_profiles` fail
    pub fn fail_enumeration(&self) {
        self.write().failing_enumeration = true;
    }

    /// Make `get_user` fail for this user
    pub fn fail_user_lookup(&self, user_id: i64) {
        self.write().failing_user_lookups.insert(user_id);
    }

    /// Make block/like/match checks involving this user fail
    pub fn fail_relationship_checks(&self, user_id: i64) {
        self.write().failing_relationship_checks.insert(user_id);
    }

    fn check_relationship_faults(state: &MemoryState, a: i64, b: i64) -> Result<(), StoreError> {
        if state.failing_relationship_checks.contains(&a)
            || state.failing_relationship_checks.contains(&b)
        {
            return Err(StoreError::Backend(format!(
                "relationship check failed for {} and {}",
                a, b
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: i64) -> Result<Profile, StoreError> {
        let state = self.read();
        if state.failing_profile_lookups.contains(&user_id) {
            return Err(StoreError::Backend(format!("profile lookup failed for {}", user_id)));
        }
        Ok(state
            .profiles
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Profile::empty(user_id)))
    }

    async fn get_all_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let state = self.read();
        if state.failing_enumeration {
            return Err(StoreError::Backend("profile enumeration failed".to_string()));
        }
        Ok(state.profiles.values().cloned().collect())
    }

    async fn is_blocked(&self, user_a: i64, user_b: i64) -> Result<bool, StoreError> {
        let state = self.read();
        Self::check_relationship_faults(&state, user_a, user_b)?;
        Ok(state.blocks.contains(&(user_a, user_b)) || state.blocks.contains(&(user_b, user_a)))
    }

    async fn has_liked(&self, liker_id: i64, liked_id: i64) -> Result<bool, StoreError> {
        let state = self.read();
        Self::check_relationship_faults(&state, liker_id, liked_id)?;
        Ok(state.likes.contains(&(liker_id, liked_id)))
    }

    async fn is_matched(&self, user_a: i64, user_b: i64) -> Result<bool, StoreError> {
        let state = self.read();
        Self::check_relationship_faults(&state, user_a, user_b)?;
        Ok(state.likes.contains(&(user_a, user_b)) && state.likes.contains(&(user_b, user_a)))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get_user(&self, user_id: i64) -> Result<UserIdentity, StoreError> {
        let state = self.read();
        if state.failing_user_lookups.contains(&user_id) {
            return Err(StoreError::Backend(format!("user lookup failed for {}", user_id)));
        }
        state
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", user_id)))
    }
}
