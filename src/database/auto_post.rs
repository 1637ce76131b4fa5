// ABOUTME: SQLite-backed store for auto-post settings, posts, and workout sessions
// ABOUTME: Implements the engine's collaborator traits with an atomic guarded post insert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::repositories::{
    AutoPostSettingsRepository, CooldownGuard, PostLedger, PostWrite, WorkoutHistory,
};
use crate::errors::{AppError, AppResult};
use crate::models::{
    AutoPostSettings, NewPost, PartialAutoPostSettings, PostRecord, TemplateCategory,
};

/// Fixed-precision UTC timestamp so lexical order equals chronological order
fn to_db_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_db_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp {raw}: {e}")))
}

fn parse_db_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::database(format!("Invalid stored id {raw}: {e}")))
}

/// Auto-post persistence over a `SqlitePool`
///
/// Wraps a pool the same way the other managers do; one instance serves as
/// settings repository, post ledger, and workout history.
#[derive(Clone)]
pub struct AutoPostStore {
    pool: SqlitePool,
}

impl AutoPostStore {
    /// Wrap an existing pool; call [`Self::migrate`] before use
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`, creating the file if needed, and migrate
    ///
    /// In-memory databases get a single connection so every query sees the
    /// same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let is_memory = database_url.contains(":memory:");
        let connection_url = if database_url.starts_with("sqlite:")
            && !is_memory
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options
            .connect(&connection_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS auto_post_settings (
                user_id TEXT PRIMARY KEY,
                settings_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                content TEXT NOT NULL,
                post_type TEXT NOT NULL,
                workout_id TEXT,
                category TEXT,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_posts_user_type_created
                ON posts (user_id, post_type, created_at)
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                workout_id TEXT NOT NULL,
                completed_at TEXT NOT NULL
            )
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_completed
                ON workout_sessions (user_id, completed_at)
            ",
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to run migration: {e}")))?;
        }
        Ok(())
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Store a partial preference record as-is
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database query fails
    pub async fn write_partial_settings(
        &self,
        user_id: Uuid,
        settings: &PartialAutoPostSettings,
    ) -> AppResult<()> {
        let json = serde_json::to_string(settings)?;
        sqlx::query(
            r"
            INSERT INTO auto_post_settings (user_id, settings_json, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id) DO UPDATE SET
                settings_json = excluded.settings_json,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(json)
        .bind(to_db_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to write auto-post settings: {e}")))?;

        Ok(())
    }

    // ========================================================================
    // Workout sessions
    // ========================================================================

    /// Record that `user_id` completed `workout_id` at `completed_at`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn record_completed_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO workout_sessions (id, user_id, workout_id, completed_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(workout_id.to_string())
        .bind(to_db_timestamp(completed_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record workout session: {e}")))?;

        Ok(id)
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Posts by `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is malformed
    pub async fn list_posts(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PostRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, content, post_type, workout_id, category, created_at
            FROM posts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list posts: {e}")))?;

        rows.iter().map(Self::row_to_post).collect()
    }

    fn row_to_post(row: &SqliteRow) -> AppResult<PostRecord> {
        let get_str = |column: &str| -> AppResult<String> {
            row.try_get::<String, _>(column)
                .map_err(|e| AppError::database(format!("Failed to read posts.{column}: {e}")))
        };
        let get_opt = |column: &str| -> AppResult<Option<String>> {
            row.try_get::<Option<String>, _>(column)
                .map_err(|e| AppError::database(format!("Failed to read posts.{column}: {e}")))
        };

        Ok(PostRecord {
            id: parse_db_uuid(&get_str("id")?)?,
            user_id: parse_db_uuid(&get_str("user_id")?)?,
            content: get_str("content")?,
            post_type: get_str("post_type")?,
            workout_id: get_opt("workout_id")?
                .as_deref()
                .map(parse_db_uuid)
                .transpose()?,
            category: get_opt("category")?
                .as_deref()
                .map(str::parse::<TemplateCategory>)
                .transpose()?,
            created_at: parse_db_timestamp(&get_str("created_at")?)?,
        })
    }
}

#[async_trait]
impl AutoPostSettingsRepository for AutoPostStore {
    async fn read_settings(&self, user_id: Uuid) -> AppResult<Option<PartialAutoPostSettings>> {
        let row = sqlx::query(
            r"
            SELECT settings_json FROM auto_post_settings WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read auto-post settings: {e}")))?;

        row.map(|r| -> AppResult<PartialAutoPostSettings> {
            let json: String = r.try_get("settings_json").map_err(|e| {
                AppError::database(format!("Failed to read settings_json: {e}"))
            })?;
            Ok(serde_json::from_str(&json)?)
        })
        .transpose()
    }

    async fn write_settings(&self, user_id: Uuid, settings: &AutoPostSettings) -> AppResult<()> {
        settings.validate()?;
        self.write_partial_settings(user_id, &PartialAutoPostSettings::from(settings))
            .await
    }
}

#[async_trait]
impl PostLedger for AutoPostStore {
    async fn most_recent_post_timestamp(
        &self,
        user_id: Uuid,
        post_type: &str,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let row = sqlx::query(
            r"
            SELECT MAX(created_at) AS last_created_at
            FROM posts
            WHERE user_id = $1 AND post_type = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(post_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read latest post time: {e}")))?;

        let last: Option<String> = row
            .try_get("last_created_at")
            .map_err(|e| AppError::database(format!("Failed to read latest post time: {e}")))?;
        last.as_deref().map(parse_db_timestamp).transpose()
    }

    async fn create_post(
        &self,
        post: &NewPost,
        guard: Option<CooldownGuard>,
    ) -> AppResult<PostWrite> {
        // With no guard, compare against a bound no stored timestamp exceeds
        let not_after = guard.map_or_else(
            || "9999-12-31T23:59:59.999999Z".to_owned(),
            |g| to_db_timestamp(g.not_after),
        );

        let result = sqlx::query(
            r"
            INSERT INTO posts (id, user_id, content, post_type, workout_id, category, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (
                SELECT 1 FROM posts
                WHERE user_id = $2 AND post_type = $4 AND created_at > $8
            )
            ",
        )
        .bind(post.id.to_string())
        .bind(post.user_id.to_string())
        .bind(&post.content)
        .bind(&post.post_type)
        .bind(post.workout_id.map(|id| id.to_string()))
        .bind(post.category.map(|c| c.as_str()))
        .bind(to_db_timestamp(post.created_at))
        .bind(not_after)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create post: {e}")))?;

        if result.rows_affected() == 0 {
            Ok(PostWrite::CooldownConflict)
        } else {
            Ok(PostWrite::Created(post.id))
        }
    }
}

#[async_trait]
impl WorkoutHistory for AutoPostStore {
    async fn count_completed_workouts(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<u32> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS completed
            FROM workout_sessions
            WHERE user_id = $1 AND completed_at >= $2
            ",
        )
        .bind(user_id.to_string())
        .bind(to_db_timestamp(since))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count workouts: {e}")))?;

        let completed: i64 = row
            .try_get("completed")
            .map_err(|e| AppError::database(format!("Failed to read workout count: {e}")))?;
        Ok(u32::try_from(completed).unwrap_or(u32::MAX))
    }
}
