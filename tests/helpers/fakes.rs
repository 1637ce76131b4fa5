// ABOUTME: Scriptable in-memory implementations of the engine's collaborator traits
// ABOUTME: Supports failure injection per collaborator and records every post write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitsocial_autopost::autopost::RandomSource;
use fitsocial_autopost::database::{
    AutoPostSettingsRepository, CooldownGuard, PostLedger, PostWrite, WorkoutHistory,
};
use fitsocial_autopost::errors::{AppError, AppResult};
use fitsocial_autopost::models::{AutoPostSettings, NewPost, PartialAutoPostSettings};
use uuid::Uuid;

/// Which collaborator call should fail
#[derive(Debug, Default)]
pub struct Failures {
    pub settings_read: AtomicBool,
    pub last_post_read: AtomicBool,
    pub history: AtomicBool,
    pub post_write: AtomicBool,
}

/// In-memory settings, posts, and workout history
#[derive(Debug, Default)]
pub struct FakeStore {
    settings: Mutex<HashMap<Uuid, PartialAutoPostSettings>>,
    posts: Mutex<Vec<NewPost>>,
    workouts: Mutex<Vec<(Uuid, DateTime<Utc>)>>,
    pub failures: Failures,
    /// Fixed weekly count returned instead of counting recorded workouts
    weekly_override: Mutex<Option<u32>>,
    /// Artificial latency on the last-post read to widen race windows
    read_delay: Mutex<Option<Duration>>,
    pub write_attempts: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_partial_settings(&self, user_id: Uuid, settings: PartialAutoPostSettings) {
        self.settings.lock().unwrap().insert(user_id, settings);
    }

    pub fn stored_settings(&self, user_id: Uuid) -> Option<PartialAutoPostSettings> {
        self.settings.lock().unwrap().get(&user_id).cloned()
    }

    pub fn insert_post_at(&self, user_id: Uuid, created_at: DateTime<Utc>) {
        self.posts.lock().unwrap().push(NewPost {
            id: Uuid::new_v4(),
            user_id,
            content: "earlier post".to_owned(),
            post_type: "workout".to_owned(),
            workout_id: None,
            category: None,
            created_at,
        });
    }

    pub fn posts_for(&self, user_id: Uuid) -> Vec<NewPost> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn record_workout(&self, user_id: Uuid, completed_at: DateTime<Utc>) {
        self.workouts.lock().unwrap().push((user_id, completed_at));
    }

    pub fn set_weekly_count(&self, count: u32) {
        *self.weekly_override.lock().unwrap() = Some(count);
    }

    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_settings_read(&self) {
        self.failures.settings_read.store(true, Ordering::SeqCst);
    }

    pub fn fail_last_post_read(&self) {
        self.failures.last_post_read.store(true, Ordering::SeqCst);
    }

    pub fn fail_history(&self) {
        self.failures.history.store(true, Ordering::SeqCst);
    }

    pub fn fail_post_write(&self) {
        self.failures.post_write.store(true, Ordering::SeqCst);
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AutoPostSettingsRepository for FakeStore {
    async fn read_settings(&self, user_id: Uuid) -> AppResult<Option<PartialAutoPostSettings>> {
        if self.failures.settings_read.load(Ordering::SeqCst) {
            return Err(AppError::database("settings store unavailable"));
        }
        Ok(self.stored_settings(user_id))
    }

    async fn write_settings(&self, user_id: Uuid, settings: &AutoPostSettings) -> AppResult<()> {
        self.set_partial_settings(user_id, PartialAutoPostSettings::from(settings));
        Ok(())
    }
}

#[async_trait]
impl PostLedger for FakeStore {
    async fn most_recent_post_timestamp(
        &self,
        user_id: Uuid,
        post_type: &str,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failures.last_post_read.load(Ordering::SeqCst) {
            return Err(AppError::database("post ledger unavailable"));
        }
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id && p.post_type == post_type)
            .map(|p| p.created_at)
            .max())
    }

    async fn create_post(
        &self,
        post: &NewPost,
        guard: Option<CooldownGuard>,
    ) -> AppResult<PostWrite> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.failures.post_write.load(Ordering::SeqCst) {
            return Err(AppError::database("post ledger write failed"));
        }

        let mut posts = self.posts.lock().unwrap();
        if let Some(guard) = guard {
            let blocked = posts.iter().any(|p| {
                p.user_id == post.user_id
                    && p.post_type == post.post_type
                    && p.created_at > guard.not_after
            });
            if blocked {
                return Ok(PostWrite::CooldownConflict);
            }
        }
        posts.push(post.clone());
        Ok(PostWrite::Created(post.id))
    }
}

#[async_trait]
impl WorkoutHistory for FakeStore {
    async fn count_completed_workouts(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<u32> {
        if self.failures.history.load(Ordering::SeqCst) {
            return Err(AppError::database("workout history unavailable"));
        }
        if let Some(count) = *self.weekly_override.lock().unwrap() {
            return Ok(count);
        }
        let count = self
            .workouts
            .lock()
            .unwrap()
            .iter()
            .filter(|(user, at)| *user == user_id && *at >= since)
            .count();
        Ok(u32::try_from(count).unwrap())
    }
}

/// Always picks the same index
#[derive(Debug, Clone, Copy)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick_index(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}
