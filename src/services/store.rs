use async_trait::async_trait;
use thiserror::Error;
use crate::models::{Profile, UserIdentity};

/// Errors surfaced by profile and user stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Read access to profiles and the like/block relations between users
///
/// Implementations return fresh data on every call; the discovery engine
/// never caches what it reads.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile of a user. A user who never filled one in gets an empty profile.
    async fn get_profile(&self, user_id: i64) -> Result<Profile, StoreError>;

    async fn get_all_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// True when either user has blocked the other
    async fn is_blocked(&self, user_a: i64, user_b: i64) -> Result<bool, StoreError>;

    async fn has_liked(&self, liker_id: i64, liked_id: i64) -> Result<bool, StoreError>;

    /// True when both users have liked each other
    async fn is_matched(&self, user_a: i64, user_b: i64) -> Result<bool, StoreError>;
}

/// Read access to user display identities
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, user_id: i64) -> Result<UserIdentity, StoreError>;
}
