// ABOUTME: Tagged result types returned by the auto-post engine
// ABOUTME: Created / Skipped(reason) / Failed(error) with diagnostic skip reasons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::TemplateCategory;

/// Why the engine chose not to post
///
/// Reasons are for diagnostics and logs; hosts treat every skip as a silent no-op.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Stored preferences could not be read
    SettingsUnavailable,
    /// User turned auto-posting off
    Disabled,
    /// User turned off posts for workout completion
    CompletionPostsDisabled,
    /// Workout shorter than the user's minimum
    BelowMinDuration {
        /// Event duration in minutes
        duration_minutes: i64,
        /// Required minimum
        min_duration_minutes: i64,
    },
    /// Workout burned fewer calories than the user's minimum
    BelowMinCalories {
        /// Event calories
        calories_burned: i64,
        /// Required minimum
        min_calories: i64,
    },
    /// A workout post exists inside the cooldown window
    CooldownActive {
        /// Minutes until another post is allowed
        remaining_minutes: i64,
    },
    /// The last-post lookup failed, so posting is denied
    CooldownUnknown,
    /// The chosen category has no template
    NoTemplate {
        /// Category that was selected
        category: TemplateCategory,
    },
}

impl SkipReason {
    /// Stable short code for metrics and log filtering
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SettingsUnavailable => "settings_unavailable",
            Self::Disabled => "disabled",
            Self::CompletionPostsDisabled => "completion_posts_disabled",
            Self::BelowMinDuration { .. } => "below_min_duration",
            Self::BelowMinCalories { .. } => "below_min_calories",
            Self::CooldownActive { .. } => "cooldown_active",
            Self::CooldownUnknown => "cooldown_unknown",
            Self::NoTemplate { .. } => "no_template",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::BelowMinDuration {
                duration_minutes,
                min_duration_minutes,
            } => write!(
                f,
                "below_min_duration ({duration_minutes} < {min_duration_minutes})"
            ),
            Self::BelowMinCalories {
                calories_burned,
                min_calories,
            } => write!(f, "below_min_calories ({calories_burned} < {min_calories})"),
            Self::CooldownActive { remaining_minutes } => {
                write!(f, "cooldown_active ({remaining_minutes} min remaining)")
            }
            Self::NoTemplate { category } => write!(f, "no_template ({category})"),
            _ => f.write_str(self.code()),
        }
    }
}

/// Errors that stop the engine from producing a post
#[derive(Debug, Error)]
pub enum AutoPostError {
    /// The event itself is malformed; raised before classification
    #[error("Invalid workout event: {0}")]
    InvalidEvent(#[source] AppError),

    /// The post ledger rejected or failed the write
    #[error("Post ledger write failed: {0}")]
    LedgerWrite(#[source] AppError),
}

impl AutoPostError {
    /// Whether the failure comes from caller-supplied data
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidEvent(_))
    }
}

/// A post the engine created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPost {
    /// Ledger identifier of the new post
    pub post_id: Uuid,
    /// Category the content was generated for
    pub category: TemplateCategory,
    /// Rendered post text
    pub content: String,
}

/// Result of one engine invocation
#[derive(Debug)]
pub enum AutoPostOutcome {
    /// A post was written
    Created(CreatedPost),
    /// The engine chose not to post
    Skipped(SkipReason),
    /// The engine could not post
    Failed(AutoPostError),
}

impl AutoPostOutcome {
    /// Identifier of the created post, if any
    #[must_use]
    pub const fn post_id(&self) -> Option<Uuid> {
        match self {
            Self::Created(post) => Some(post.post_id),
            _ => None,
        }
    }

    /// Skip reason, if the engine declined
    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Whether a post was created
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Whether the engine declined
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Whether the engine failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
