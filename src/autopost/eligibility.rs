// ABOUTME: Eligibility gate deciding whether any auto-post may be created
// ABOUTME: Preference switches, metric minimums, and fail-closed cooldown check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Eligibility gate
//!
//! All rules must hold to admit a post:
//! 1. auto-posting enabled
//! 2. posting on workout completion enabled
//! 3. duration at or above the user's minimum
//! 4. calories at or above the user's minimum
//! 5. no previous workout post, or the cooldown has fully elapsed
//!
//! When the last-post lookup itself fails the gate denies (fail closed): an
//! outage must never turn into unbounded posting.

use chrono::{DateTime, Duration, Utc};

use super::outcome::SkipReason;
use crate::constants::limits;
use crate::models::{AutoPostSettings, WorkoutCompletionEvent};

/// What the post ledger reported about the user's latest workout post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownReading {
    /// The user has never had a workout post
    NoPriorPost,
    /// Latest workout post timestamp
    LastPostAt(DateTime<Utc>),
    /// The lookup failed
    Unavailable,
}

/// Admit/deny decision with a diagnostic reason on denial
pub type GateDecision = Result<(), SkipReason>;

/// Stateless eligibility rules
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityGate;

impl EligibilityGate {
    /// Convert fractional cooldown hours into a duration at millisecond precision
    ///
    /// Stored values longer than the accepted maximum are capped at it.
    #[must_use]
    pub fn cooldown_duration(cooldown_hours: f64) -> Duration {
        if cooldown_hours.is_nan() || cooldown_hours <= 0.0 {
            return Duration::zero();
        }
        let hours = cooldown_hours.min(limits::MAX_COOLDOWN_HOURS);
        Duration::milliseconds((hours * 3_600_000.0).round() as i64)
    }

    /// Earliest post time that no longer blocks a post made at `now`
    ///
    /// Falls back to the minimum timestamp, where every prior post blocks.
    #[must_use]
    pub fn cooldown_cutoff(cooldown_hours: f64, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Self::cooldown_duration(cooldown_hours))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Rules 1-4: everything that needs no collaborator
    ///
    /// # Errors
    ///
    /// Returns the first failing rule as a `SkipReason`.
    pub fn check_preconditions(
        settings: &AutoPostSettings,
        event: &WorkoutCompletionEvent,
    ) -> GateDecision {
        if !settings.enabled {
            return Err(SkipReason::Disabled);
        }
        if !settings.on_workout_completion {
            return Err(SkipReason::CompletionPostsDisabled);
        }
        if event.duration_minutes < settings.min_duration_minutes {
            return Err(SkipReason::BelowMinDuration {
                duration_minutes: event.duration_minutes,
                min_duration_minutes: settings.min_duration_minutes,
            });
        }
        if event.calories_burned < settings.min_calories {
            return Err(SkipReason::BelowMinCalories {
                calories_burned: event.calories_burned,
                min_calories: settings.min_calories,
            });
        }
        Ok(())
    }

    /// Rule 5: the cooldown window, evaluated at `now`
    ///
    /// # Errors
    ///
    /// Returns `CooldownActive` inside the window and `CooldownUnknown` when the
    /// lookup failed.
    pub fn check_cooldown(
        settings: &AutoPostSettings,
        reading: CooldownReading,
        now: DateTime<Utc>,
    ) -> GateDecision {
        match reading {
            CooldownReading::NoPriorPost => Ok(()),
            CooldownReading::Unavailable => Err(SkipReason::CooldownUnknown),
            CooldownReading::LastPostAt(last_post) => {
                let required = Self::cooldown_duration(settings.cooldown_hours);
                let elapsed = now - last_post;
                if elapsed >= required {
                    Ok(())
                } else {
                    let remaining = required - elapsed;
                    // Round up so a denial never reports zero minutes left
                    let remaining_minutes = (remaining.num_seconds() + 59) / 60;
                    Err(SkipReason::CooldownActive {
                        remaining_minutes: remaining_minutes.max(1),
                    })
                }
            }
        }
    }

    /// All five rules in order
    ///
    /// # Errors
    ///
    /// Returns the first failing rule as a `SkipReason`.
    pub fn evaluate(
        settings: &AutoPostSettings,
        event: &WorkoutCompletionEvent,
        reading: CooldownReading,
        now: DateTime<Utc>,
    ) -> GateDecision {
        Self::check_preconditions(settings, event)?;
        Self::check_cooldown(settings, reading, now)
    }
}
