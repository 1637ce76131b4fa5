// ABOUTME: Social post models written to and read from the post ledger
// ABOUTME: New-post requests and persisted post records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auto_post::{GeneratedPostContent, TemplateCategory};
use crate::constants::post_types;

/// Request to create a post on a user's behalf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Post identifier assigned before the write
    pub id: Uuid,
    /// Author of the post
    pub user_id: Uuid,
    /// Post body
    pub content: String,
    /// Ledger post type ("workout" for every auto-post)
    pub post_type: String,
    /// Workout the post refers to
    pub workout_id: Option<Uuid>,
    /// Template category the body came from
    pub category: Option<TemplateCategory>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Build a workout post from generated content
    #[must_use]
    pub fn workout(
        user_id: Uuid,
        content: &GeneratedPostContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            content: content.text.clone(),
            post_type: post_types::WORKOUT.to_owned(),
            workout_id: Some(content.workout_id),
            category: Some(content.category),
            created_at,
        }
    }
}

/// A post as stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Post identifier
    pub id: Uuid,
    /// Author
    pub user_id: Uuid,
    /// Post body
    pub content: String,
    /// Ledger post type
    pub post_type: String,
    /// Referenced workout
    pub workout_id: Option<Uuid>,
    /// Template category
    pub category: Option<TemplateCategory>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
