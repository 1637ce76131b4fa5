// ABOUTME: Collaborator traits the auto-post engine reads from and writes to
// ABOUTME: Settings repository, post ledger, and workout history abstractions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository traits
//!
//! The engine only ever talks to persistence through these narrow traits, so
//! any backend (the bundled SQLite store, a remote service client, or a test
//! fake) can be plugged in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{AutoPostSettings, NewPost, PartialAutoPostSettings};

/// Write-time cooldown predicate for an atomic check-and-insert
///
/// The insert must be refused when the user already has a post of the same
/// type created strictly after `not_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGuard {
    /// Latest allowed creation time of an existing post
    pub not_after: DateTime<Utc>,
}

/// Result of a post write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostWrite {
    /// Post stored with this identifier
    Created(Uuid),
    /// Refused because the cooldown guard matched an existing post
    CooldownConflict,
}

/// Per-user auto-post preference storage
#[async_trait]
pub trait AutoPostSettingsRepository: Send + Sync {
    /// Read the stored, possibly partial, preference record
    async fn read_settings(&self, user_id: Uuid) -> AppResult<Option<PartialAutoPostSettings>>;

    /// Replace the stored record with fully resolved settings
    async fn write_settings(&self, user_id: Uuid, settings: &AutoPostSettings) -> AppResult<()>;
}

/// Social post storage
#[async_trait]
pub trait PostLedger: Send + Sync {
    /// Timestamp of the user's most recent post of `post_type`
    async fn most_recent_post_timestamp(
        &self,
        user_id: Uuid,
        post_type: &str,
    ) -> AppResult<Option<DateTime<Utc>>>;

    /// Store a post, atomically honouring `guard` when one is given
    async fn create_post(&self, post: &NewPost, guard: Option<CooldownGuard>)
        -> AppResult<PostWrite>;
}

/// Completed-workout history
#[async_trait]
pub trait WorkoutHistory: Send + Sync {
    /// Completed workouts for `user_id` at or after `since`
    async fn count_completed_workouts(&self, user_id: Uuid, since: DateTime<Utc>)
        -> AppResult<u32>;
}
