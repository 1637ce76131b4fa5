// ABOUTME: Auto-post domain service for settings management and manual posts
// ABOUTME: Overlays partial updates on resolved settings and synthesizes manual workout events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::autopost::{AutoPostEngine, AutoPostOutcome, SettingsResolver};
use crate::database::repositories::AutoPostSettingsRepository;
use crate::errors::AppResult;
use crate::models::{AutoPostSettings, PartialAutoPostSettings, WorkoutCompletionEvent};

/// Effective settings for `user_id`
///
/// A user with no stored record gets the defaults.
///
/// # Errors
///
/// Returns database errors from the settings read.
pub async fn get_settings(
    repo: &dyn AutoPostSettingsRepository,
    resolver: &SettingsResolver,
    user_id: Uuid,
) -> AppResult<AutoPostSettings> {
    let stored = repo.read_settings(user_id).await?;
    Ok(resolver.resolve(stored.as_ref()))
}

/// Apply a partial update on top of the user's current effective settings.
///
/// Fields absent from `update` keep their current value. The merged result is
/// validated before anything is written, and the full record is persisted.
///
/// # Errors
///
/// Returns `AppError::value_out_of_range` when the merged settings are invalid,
/// or database errors from the read or write.
pub async fn update_settings(
    repo: &dyn AutoPostSettingsRepository,
    resolver: &SettingsResolver,
    user_id: Uuid,
    update: &PartialAutoPostSettings,
) -> AppResult<AutoPostSettings> {
    let current = get_settings(repo, resolver, user_id).await?;
    let merged = update.overlay_onto(&current);
    merged.validate().map_err(|e| e.with_user_id(user_id))?;

    repo.write_settings(user_id, &merged).await?;
    info!(
        user_id = %user_id,
        enabled = merged.enabled,
        cooldown_hours = merged.cooldown_hours,
        "Auto-post settings updated"
    );
    Ok(merged)
}

/// Workout metadata entered by hand for an immediate post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualWorkoutPost {
    /// Display name of the workout
    pub workout_name: String,
    /// Workout kind, e.g. "strength"
    #[serde(default = "default_workout_type")]
    pub workout_type: String,
    /// Duration in whole minutes
    pub duration_minutes: i64,
    /// Energy expenditure in kcal
    pub calories_burned: i64,
    /// Existing workout to reference; a fresh id is generated when absent
    #[serde(default)]
    pub workout_id: Option<Uuid>,
    /// Completion time; defaults to now
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_workout_type() -> String {
    "general".to_owned()
}

impl ManualWorkoutPost {
    /// Manual entry with a generated workout id completed now
    #[must_use]
    pub fn new(
        workout_name: impl Into<String>,
        duration_minutes: i64,
        calories_burned: i64,
    ) -> Self {
        Self {
            workout_name: workout_name.into(),
            workout_type: default_workout_type(),
            duration_minutes,
            calories_burned,
            workout_id: None,
            completed_at: None,
        }
    }

    /// Completion event for `user_id`, completed at `now` unless set
    #[must_use]
    pub fn into_event(self, user_id: Uuid, now: DateTime<Utc>) -> WorkoutCompletionEvent {
        WorkoutCompletionEvent::new(
            user_id,
            self.workout_id.unwrap_or_else(Uuid::new_v4),
            self.workout_name,
            self.workout_type,
            self.duration_minutes,
            self.calories_burned,
            self.completed_at.unwrap_or(now),
        )
        .manual()
    }
}

/// Run the engine on a manually entered workout
///
/// The same settings, minimums, and cooldown apply as for session events.
pub async fn create_manual_post(
    engine: &AutoPostEngine,
    user_id: Uuid,
    manual: ManualWorkoutPost,
) -> AutoPostOutcome {
    let now = Utc::now();
    let event = manual.into_event(user_id, now);
    engine.handle_workout_completion_at(&event, now).await
}
