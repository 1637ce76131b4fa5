// ABOUTME: Auto-post engine configuration with environment overrides
// ABOUTME: Default user settings, classification thresholds, and streak window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Auto-Post Configuration Module
//!
//! Holds the immutable defaults injected into settings resolution and the
//! thresholds used by workout classification. All values can be overridden via
//! environment variables with the `AUTO_POST_` prefix.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

use super::ConfigError;
use crate::constants::{classification, env_config, limits};
use crate::models::AutoPostSettings;

/// Global configuration singleton
static AUTO_POST_CONFIG: OnceLock<AutoPostConfig> = OnceLock::new();

// ============================================================================
// Main Configuration
// ============================================================================

/// Auto-post configuration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPostConfig {
    /// Values used for every field a user has not stored
    pub default_settings: AutoPostSettings,
    /// Milestone and streak thresholds
    pub classification: ClassificationThresholds,
    /// Trailing window for counting completed workouts
    pub streak_window_days: i64,
}

impl AutoPostConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        AUTO_POST_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load auto-post config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        let defaults = &self.default_settings;
        if defaults.min_duration_minutes < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default min_duration_minutes must be >= 0",
            ));
        }
        if defaults.min_calories < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default min_calories must be >= 0",
            ));
        }
        if !defaults.cooldown_hours.is_finite()
            || !(0.0..=limits::MAX_COOLDOWN_HOURS).contains(&defaults.cooldown_hours)
        {
            return Err(ConfigError::ValueOutOfRange(
                "default cooldown_hours must be between 0 and 8760",
            ));
        }

        if self.classification.milestone_calories < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "milestone_calories must be >= 0",
            ));
        }
        if self.classification.milestone_duration_minutes < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "milestone_duration_minutes must be >= 0",
            ));
        }
        if self.classification.streak_min_workouts == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "streak_min_workouts must be > 0",
            ));
        }

        if !(1..=limits::MAX_STREAK_WINDOW_DAYS).contains(&self.streak_window_days) {
            return Err(ConfigError::ValueOutOfRange(
                "streak_window_days must be between 1 and 366",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Default user settings
        let defaults = &mut self.default_settings;
        Self::apply_env_var(env_config::DEFAULT_ENABLED, &mut defaults.enabled)?;
        Self::apply_env_var(
            env_config::DEFAULT_ON_WORKOUT_COMPLETION,
            &mut defaults.on_workout_completion,
        )?;
        Self::apply_env_var(env_config::DEFAULT_ON_MILESTONES, &mut defaults.on_milestones)?;
        Self::apply_env_var(env_config::DEFAULT_ON_STREAKS, &mut defaults.on_streaks)?;
        Self::apply_env_var(
            env_config::DEFAULT_MIN_DURATION_MINUTES,
            &mut defaults.min_duration_minutes,
        )?;
        Self::apply_env_var(env_config::DEFAULT_MIN_CALORIES, &mut defaults.min_calories)?;
        Self::apply_env_var(
            env_config::DEFAULT_COOLDOWN_HOURS,
            &mut defaults.cooldown_hours,
        )?;

        // Classification thresholds
        Self::apply_env_var(
            env_config::MILESTONE_CALORIES,
            &mut self.classification.milestone_calories,
        )?;
        Self::apply_env_var(
            env_config::MILESTONE_DURATION_MINUTES,
            &mut self.classification.milestone_duration_minutes,
        )?;
        Self::apply_env_var(
            env_config::STREAK_MIN_WORKOUTS,
            &mut self.classification.streak_min_workouts,
        )?;

        // Streak window
        Self::apply_env_var(env_config::STREAK_WINDOW_DAYS, &mut self.streak_window_days)?;

        Ok(self)
    }
}

impl Default for AutoPostConfig {
    fn default() -> Self {
        Self {
            default_settings: AutoPostSettings::default(),
            classification: ClassificationThresholds::default(),
            streak_window_days: classification::STREAK_WINDOW_DAYS,
        }
    }
}

// ============================================================================
// Sub-Configurations
// ============================================================================

/// Thresholds that decide milestone and streak classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Calories at or above which a workout is a milestone
    pub milestone_calories: i64,
    /// Minutes at or above which a workout is a milestone
    pub milestone_duration_minutes: i64,
    /// Workouts in the trailing window at or above which the user is on a streak
    pub streak_min_workouts: u32,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            milestone_calories: classification::MILESTONE_CALORIES,
            milestone_duration_minutes: classification::MILESTONE_DURATION_MINUTES,
            streak_min_workouts: classification::STREAK_MIN_WORKOUTS,
        }
    }
}
