// ABOUTME: Auto-post preference and template models
// ABOUTME: Resolved/partial settings, template categories, templates, and generated content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{auto_post_defaults, limits};
use crate::errors::{AppError, AppResult};

// ============================================================================
// Settings
// ============================================================================

/// Fully populated auto-post preferences for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AutoPostSettings {
    /// Master switch
    pub enabled: bool,
    /// Post when a workout completes
    pub on_workout_completion: bool,
    /// Allow milestone-flavoured posts
    pub on_milestones: bool,
    /// Allow streak-flavoured posts
    pub on_streaks: bool,
    /// Minimum workout duration in minutes
    pub min_duration_minutes: i64,
    /// Minimum calories burned
    pub min_calories: i64,
    /// Minimum hours between two automatic workout posts
    pub cooldown_hours: f64,
}

impl Default for AutoPostSettings {
    fn default() -> Self {
        Self {
            enabled: auto_post_defaults::ENABLED,
            on_workout_completion: auto_post_defaults::ON_WORKOUT_COMPLETION,
            on_milestones: auto_post_defaults::ON_MILESTONES,
            on_streaks: auto_post_defaults::ON_STREAKS,
            min_duration_minutes: auto_post_defaults::MIN_DURATION_MINUTES,
            min_calories: auto_post_defaults::MIN_CALORIES,
            cooldown_hours: auto_post_defaults::COOLDOWN_HOURS,
        }
    }
}

impl AutoPostSettings {
    /// Check that every threshold is usable
    ///
    /// # Errors
    ///
    /// Returns `AppError::value_out_of_range` for negative minimums or a
    /// cooldown that is non-finite, negative, or longer than a year.
    pub fn validate(&self) -> AppResult<()> {
        if self.min_duration_minutes < 0 {
            return Err(AppError::value_out_of_range(
                "min_duration_minutes must be >= 0",
            ));
        }
        if self.min_calories < 0 {
            return Err(AppError::value_out_of_range("min_calories must be >= 0"));
        }
        if !self.cooldown_hours.is_finite()
            || !(0.0..=limits::MAX_COOLDOWN_HOURS).contains(&self.cooldown_hours)
        {
            return Err(AppError::value_out_of_range(format!(
                "cooldown_hours must be between 0 and {}",
                limits::MAX_COOLDOWN_HOURS
            )));
        }
        Ok(())
    }
}

/// Stored preference record, any subset of fields may be present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialAutoPostSettings {
    /// Master switch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Post when a workout completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_workout_completion: Option<bool>,
    /// Allow milestone-flavoured posts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_milestones: Option<bool>,
    /// Allow streak-flavoured posts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_streaks: Option<bool>,
    /// Minimum workout duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration_minutes: Option<i64>,
    /// Minimum calories burned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_calories: Option<i64>,
    /// Minimum hours between two automatic workout posts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_hours: Option<f64>,
}

impl PartialAutoPostSettings {
    /// Field-wise overlay of the present values onto `base`
    #[must_use]
    pub fn overlay_onto(&self, base: &AutoPostSettings) -> AutoPostSettings {
        AutoPostSettings {
            enabled: self.enabled.unwrap_or(base.enabled),
            on_workout_completion: self
                .on_workout_completion
                .unwrap_or(base.on_workout_completion),
            on_milestones: self.on_milestones.unwrap_or(base.on_milestones),
            on_streaks: self.on_streaks.unwrap_or(base.on_streaks),
            min_duration_minutes: self
                .min_duration_minutes
                .unwrap_or(base.min_duration_minutes),
            min_calories: self.min_calories.unwrap_or(base.min_calories),
            cooldown_hours: self.cooldown_hours.unwrap_or(base.cooldown_hours),
        }
    }

    /// Whether no field is present
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.on_workout_completion.is_none()
            && self.on_milestones.is_none()
            && self.on_streaks.is_none()
            && self.min_duration_minutes.is_none()
            && self.min_calories.is_none()
            && self.cooldown_hours.is_none()
    }
}

impl From<&AutoPostSettings> for PartialAutoPostSettings {
    fn from(settings: &AutoPostSettings) -> Self {
        Self {
            enabled: Some(settings.enabled),
            on_workout_completion: Some(settings.on_workout_completion),
            on_milestones: Some(settings.on_milestones),
            on_streaks: Some(settings.on_streaks),
            min_duration_minutes: Some(settings.min_duration_minutes),
            min_calories: Some(settings.min_calories),
            cooldown_hours: Some(settings.cooldown_hours),
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Kind of post generated for a workout
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    /// Plain workout completion
    #[default]
    Completion,
    /// Long or high-burn workout
    Milestone,
    /// Several workouts inside the trailing week
    Streak,
}

impl TemplateCategory {
    /// Every category, in ascending precedence
    pub const ALL: [Self; 3] = [Self::Completion, Self::Milestone, Self::Streak];

    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Milestone => "milestone",
            Self::Streak => "streak",
        }
    }
}

impl Display for TemplateCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completion" => Ok(Self::Completion),
            "milestone" => Ok(Self::Milestone),
            "streak" => Ok(Self::Streak),
            _ => Err(AppError::invalid_input(format!(
                "Invalid template category: {s}"
            ))),
        }
    }
}

/// A content template with named placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTemplate {
    /// Category this template serves
    pub category: TemplateCategory,
    /// Body text containing placeholder tokens
    pub body: String,
    /// Emoji marker prefixed when the rendered body lacks it
    pub emoji: String,
    /// Informational only, never used for selection
    pub priority: i32,
}

impl PostTemplate {
    /// Create a template
    pub fn new(
        category: TemplateCategory,
        body: impl Into<String>,
        emoji: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            category,
            body: body.into(),
            emoji: emoji.into(),
            priority,
        }
    }
}

/// Rendered post content handed to the post ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPostContent {
    /// Final post text
    pub text: String,
    /// Category the text was generated for
    pub category: TemplateCategory,
    /// Workout the post refers to
    pub workout_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_values() {
        let settings = AutoPostSettings::default();
        assert!(settings.enabled);
        assert!(settings.on_workout_completion);
        assert!(settings.on_milestones);
        assert!(settings.on_streaks);
        assert_eq!(settings.min_duration_minutes, 10);
        assert_eq!(settings.min_calories, 50);
        assert!((settings.cooldown_hours - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlay_keeps_absent_fields() {
        let partial = PartialAutoPostSettings {
            on_streaks: Some(false),
            min_calories: Some(120),
            ..Default::default()
        };
        let resolved = partial.overlay_onto(&AutoPostSettings::default());
        assert!(!resolved.on_streaks);
        assert_eq!(resolved.min_calories, 120);
        assert!(resolved.enabled);
        assert_eq!(resolved.min_duration_minutes, 10);
    }

    #[test]
    fn test_partial_from_json_subset() {
        let partial: PartialAutoPostSettings =
            serde_json::from_str(r#"{"cooldown_hours": 0.5}"#).unwrap();
        assert_eq!(partial.cooldown_hours, Some(0.5));
        assert!(partial.enabled.is_none());
        assert!(!partial.is_empty());
        assert!(PartialAutoPostSettings::default().is_empty());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AutoPostSettings::default();
        assert!(settings.validate().is_ok());

        settings.cooldown_hours = f64::NAN;
        assert!(settings.validate().is_err());

        settings.cooldown_hours = 1e10;
        assert!(settings.validate().is_err());

        settings.cooldown_hours = limits::MAX_COOLDOWN_HOURS;
        assert!(settings.validate().is_ok());

        settings.cooldown_hours = 1.0;
        settings.min_calories = -1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in TemplateCategory::ALL {
            assert_eq!(category.as_str().parse::<TemplateCategory>().unwrap(), category);
        }
        assert!("badge".parse::<TemplateCategory>().is_err());
    }
}
