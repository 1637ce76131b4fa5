// ABOUTME: Workout completion event model that triggers auto-posting
// ABOUTME: Immutable per-invocation event with validation of its metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Where a workout completion event came from
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// A tracked workout session was marked complete
    #[default]
    Session,
    /// Synthesized from manually entered workout metadata
    Manual,
}

impl Display for EventSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Session => write!(f, "session"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// A completed workout, constructed once per engine invocation
///
/// Duration and calories are signed so that malformed input from a host can be
/// represented and rejected by [`WorkoutCompletionEvent::validate`] instead of
/// wrapping silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutCompletionEvent {
    /// User who completed the workout
    pub user_id: Uuid,
    /// Workout (plan or session) being referenced by the post
    pub workout_id: Uuid,
    /// Display name of the workout
    pub workout_name: String,
    /// Free-form workout type ("strength", "run", "yoga", ...)
    pub workout_type: String,
    /// Duration in whole minutes
    pub duration_minutes: i64,
    /// Calories burned
    pub calories_burned: i64,
    /// When the workout was completed
    pub completed_at: DateTime<Utc>,
    /// Origin of the event
    #[serde(default)]
    pub source: EventSource,
}

impl WorkoutCompletionEvent {
    /// Create an event for a completed workout session
    #[must_use]
    pub fn new(
        user_id: Uuid,
        workout_id: Uuid,
        workout_name: impl Into<String>,
        workout_type: impl Into<String>,
        duration_minutes: i64,
        calories_burned: i64,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            workout_id,
            workout_name: workout_name.into(),
            workout_type: workout_type.into(),
            duration_minutes,
            calories_burned,
            completed_at,
            source: EventSource::Session,
        }
    }

    /// Mark this event as synthesized from manual input
    #[must_use]
    pub const fn manual(mut self) -> Self {
        self.source = EventSource::Manual;
        self
    }

    /// Reject events whose metrics cannot describe a real workout
    ///
    /// # Errors
    ///
    /// Returns `AppError::value_out_of_range` for negative duration or calories.
    /// The workout name is free text and is never rejected.
    pub fn validate(&self) -> AppResult<()> {
        if self.duration_minutes < 0 {
            return Err(AppError::value_out_of_range(format!(
                "duration_minutes must be >= 0, got {}",
                self.duration_minutes
            ))
            .with_user_id(self.user_id));
        }
        if self.calories_burned < 0 {
            return Err(AppError::value_out_of_range(format!(
                "calories_burned must be >= 0, got {}",
                self.calories_burned
            ))
            .with_user_id(self.user_id));
        }
        Ok(())
    }
}
