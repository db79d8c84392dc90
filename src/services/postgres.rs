use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;
use crate::models::{Gender, Photo, Profile, SexualPreference, Tag, UserIdentity};
use crate::services::store::{ProfileStore, StoreError, UserStore};

const PROFILE_COLUMNS: &str = r#"
    user_id, gender, sexual_preferences, biography, birth_date, fame_rating,
    latitude, longitude, location_name
"#;

/// PostgreSQL-backed profile and user store
///
/// Every call is a fresh round trip; nothing is cached between requests.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    async fn tags_for(&self, user_id: i64) -> Result<Vec<Tag>, StoreError> {
        let query = r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN user_tags ut ON t.id = ut.tag_id
            WHERE ut.user_id = $1
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;
        rows.iter().map(tag_from_row).collect()
    }

    async fn photos_for(&self, user_id: i64) -> Result<Vec<Photo>, StoreError> {
        let query = r#"
            SELECT id, file_path, is_profile
            FROM user_photos
            WHERE user_id = $1
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;
        rows.iter().map(photo_from_row).collect()
    }

    async fn exists(&self, query: &str, a: i64, b: i64) -> Result<bool, StoreError> {
        let row = sqlx::query(query).bind(a).bind(b).fetch_one(&self.pool).await?;
        Ok(row.try_get::<bool, _>(0)?)
    }
}

fn profile_from_row(row: &PgRow) -> Result<Profile, StoreError> {
    let gender: Option<String> = row.try_get("gender")?;
    let preference: Option<String> = row.try_get("sexual_preferences")?;

    Ok(Profile {
        user_id: row.try_get("user_id")?,
        gender: gender.as_deref().map(Gender::parse).unwrap_or_default(),
        sexual_preference: preference
            .as_deref()
            .map(SexualPreference::parse)
            .unwrap_or_default(),
        biography: row.try_get::<Option<String>, _>("biography")?.unwrap_or_default(),
        birth_date: row.try_get("birth_date")?,
        latitude: row.try_get::<Option<f64>, _>("latitude")?.unwrap_or(0.0),
        longitude: row.try_get::<Option<f64>, _>("longitude")?.unwrap_or(0.0),
        location_name: row.try_get("location_name")?,
        fame_rating: row.try_get("fame_rating")?,
        tags: Vec::new(),
        photos: Vec::new(),
    })
}

fn tag_from_row(row: &PgRow) -> Result<Tag, StoreError> {
    Ok(Tag {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn photo_from_row(row: &PgRow) -> Result<Photo, StoreError> {
    Ok(Photo {
        id: row.try_get("id")?,
        file_path: row.try_get("file_path")?,
        is_profile: row.try_get("is_profile")?,
    })
}

#[async_trait]
impl ProfileStore for PostgresClient {
    async fn get_profile(&self, user_id: i64) -> Result<Profile, StoreError> {
        let query = format!("SELECT {} FROM user_profiles WHERE user_id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let mut profile = match row {
            Some(row) => profile_from_row(&row)?,
            // No profile row yet: an empty, incomplete profile
            None => return Ok(Profile::empty(user_id)),
        };

        profile.tags = self.tags_for(user_id).await?;
        profile.photos = self.photos_for(user_id).await?;

        Ok(profile)
    }

    async fn get_all_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let query = format!("SELECT {} FROM user_profiles ORDER BY user_id", PROFILE_COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let mut profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        // One query each for tags and photos instead of two per profile
        let tag_rows = sqlx::query(
            r#"
            SELECT ut.user_id, t.id, t.name
            FROM tags t
            JOIN user_tags ut ON t.id = ut.tag_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_user: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in &tag_rows {
            let user_id: i64 = row.try_get("user_id")?;
            tags_by_user.entry(user_id).or_default().push(tag_from_row(row)?);
        }

        let photo_rows = sqlx::query(
            r#"
            SELECT user_id, id, file_path, is_profile
            FROM user_photos
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut photos_by_user: HashMap<i64, Vec<Photo>> = HashMap::new();
        for row in &photo_rows {
            let user_id: i64 = row.try_get("user_id")?;
            photos_by_user.entry(user_id).or_default().push(photo_from_row(row)?);
        }

        for profile in &mut profiles {
            profile.tags = tags_by_user.remove(&profile.user_id).unwrap_or_default();
            profile.photos = photos_by_user.remove(&profile.user_id).unwrap_or_default();
        }

        tracing::debug!("Loaded {} profiles", profiles.len());

        Ok(profiles)
    }

    async fn is_blocked(&self, user_a: i64, user_b: i64) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM user_blocks
                WHERE (blocker_id = $1 AND blocked_id = $2)
                   OR (blocker_id = $2 AND blocked_id = $1)
            )
        "#;
        self.exists(query, user_a, user_b).await
    }

    async fn has_liked(&self, liker_id: i64, liked_id: i64) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM user_likes
                WHERE liker_id = $1 AND liked_id = $2
            )
        "#;
        self.exists(query, liker_id, liked_id).await
    }

    async fn is_matched(&self, user_a: i64, user_b: i64) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM user_likes
                WHERE liker_id = $1 AND liked_id = $2
            ) AND EXISTS(
                SELECT 1 FROM user_likes
                WHERE liker_id = $2 AND liked_id = $1
            )
        "#;
        self.exists(query, user_a, user_b).await
    }
}

#[async_trait]
impl UserStore for PostgresClient {
    async fn get_user(&self, user_id: i64) -> Result<UserIdentity, StoreError> {
        let query = r#"
            SELECT id, username, first_name, last_name
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", user_id)))?;

        Ok(UserIdentity {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        })
    }
}
