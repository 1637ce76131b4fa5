// ABOUTME: Application-wide constants for workout auto-posting
// ABOUTME: Default settings, classification thresholds, placeholder tokens, env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Compile-time defaults for per-user auto-post preferences
pub mod auto_post_defaults {
    /// Auto-posting is on unless the user turns it off
    pub const ENABLED: bool = true;
    /// Post when a workout completes
    pub const ON_WORKOUT_COMPLETION: bool = true;
    /// Allow milestone-flavoured posts
    pub const ON_MILESTONES: bool = true;
    /// Allow streak-flavoured posts
    pub const ON_STREAKS: bool = true;
    /// Minimum workout duration in minutes
    pub const MIN_DURATION_MINUTES: i64 = 10;
    /// Minimum calories burned
    pub const MIN_CALORIES: i64 = 50;
    /// Minimum hours between two automatic workout posts
    pub const COOLDOWN_HOURS: f64 = 2.0;
}

/// Thresholds used to classify a workout into a template category
pub mod classification {
    /// Calories at or above which a workout counts as a milestone
    pub const MILESTONE_CALORIES: i64 = 400;
    /// Duration at or above which a workout counts as a milestone
    pub const MILESTONE_DURATION_MINUTES: i64 = 60;
    /// Completed workouts inside the trailing window that make a streak
    pub const STREAK_MIN_WORKOUTS: u32 = 3;
    /// Length of the trailing streak window
    pub const STREAK_WINDOW_DAYS: i64 = 7;
}

/// Upper bounds that keep time arithmetic inside the representable range
pub mod limits {
    /// Longest accepted cooldown (one year)
    pub const MAX_COOLDOWN_HOURS: f64 = 8_760.0;
    /// Longest accepted streak window
    pub const MAX_STREAK_WINDOW_DAYS: i64 = 366;
}

/// Placeholder tokens understood by the content renderer
pub mod placeholders {
    /// Workout display name
    pub const WORKOUT_NAME: &str = "{workout_name}";
    /// Duration in whole minutes
    pub const DURATION: &str = "{duration}";
    /// Calories burned
    pub const CALORIES: &str = "{calories}";
    /// Completed workouts in the trailing window
    pub const STREAK: &str = "{streak}";
}

/// Post type identifiers stored in the ledger
pub mod post_types {
    /// Posts generated from workouts
    pub const WORKOUT: &str = "workout";
}

/// Environment variable names for auto-post configuration overrides
pub mod env_config {
    /// Default for `enabled`
    pub const DEFAULT_ENABLED: &str = "AUTO_POST_DEFAULT_ENABLED";
    /// Default for `on_workout_completion`
    pub const DEFAULT_ON_WORKOUT_COMPLETION: &str = "AUTO_POST_DEFAULT_ON_WORKOUT_COMPLETION";
    /// Default for `on_milestones`
    pub const DEFAULT_ON_MILESTONES: &str = "AUTO_POST_DEFAULT_ON_MILESTONES";
    /// Default for `on_streaks`
    pub const DEFAULT_ON_STREAKS: &str = "AUTO_POST_DEFAULT_ON_STREAKS";
    /// Default for `min_duration_minutes`
    pub const DEFAULT_MIN_DURATION_MINUTES: &str = "AUTO_POST_DEFAULT_MIN_DURATION_MINUTES";
    /// Default for `min_calories`
    pub const DEFAULT_MIN_CALORIES: &str = "AUTO_POST_DEFAULT_MIN_CALORIES";
    /// Default for `cooldown_hours`
    pub const DEFAULT_COOLDOWN_HOURS: &str = "AUTO_POST_DEFAULT_COOLDOWN_HOURS";
    /// Milestone calorie threshold
    pub const MILESTONE_CALORIES: &str = "AUTO_POST_MILESTONE_CALORIES";
    /// Milestone duration threshold
    pub const MILESTONE_DURATION_MINUTES: &str = "AUTO_POST_MILESTONE_DURATION_MINUTES";
    /// Streak workout count threshold
    pub const STREAK_MIN_WORKOUTS: &str = "AUTO_POST_STREAK_MIN_WORKOUTS";
    /// Streak window length in days
    pub const STREAK_WINDOW_DAYS: &str = "AUTO_POST_STREAK_WINDOW_DAYS";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name reported by the auto-post service
    pub const AUTO_POST_SERVICE: &str = "fitsocial-autopost";
}
