// ABOUTME: Weekly streak counter over the workout history collaborator
// ABOUTME: Counts completed workouts in a trailing window, failing open to zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::constants::{classification, limits};
use crate::database::repositories::WorkoutHistory;

/// Counts completed workouts in the trailing window ending at an event
///
/// A failed count returns 0 (fail open): classification degrades to a plain
/// completion post instead of blocking posting. The eligibility gate's
/// cooldown lookup deliberately does the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCounter {
    window: Duration,
}

impl Default for StreakCounter {
    fn default() -> Self {
        Self::new(classification::STREAK_WINDOW_DAYS)
    }
}

impl StreakCounter {
    /// Counter over a window of `window_days` days, clamped to 1..=366
    #[must_use]
    pub fn new(window_days: i64) -> Self {
        Self {
            window: Duration::days(window_days.clamp(1, limits::MAX_STREAK_WINDOW_DAYS)),
        }
    }

    /// Start of the window that ends at `ending_at`
    #[must_use]
    pub fn window_start(&self, ending_at: DateTime<Utc>) -> DateTime<Utc> {
        ending_at
            .checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Completed workouts in the window, or 0 if the history lookup fails
    pub async fn weekly_count(
        &self,
        history: &dyn WorkoutHistory,
        user_id: Uuid,
        ending_at: DateTime<Utc>,
    ) -> u32 {
        let since = self.window_start(ending_at);
        match history.count_completed_workouts(user_id, since).await {
            Ok(count) => count,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Workout count lookup failed, treating weekly streak as 0"
                );
                0
            }
        }
    }
}
