// ABOUTME: Placeholder substitution for workout post templates
// ABOUTME: Literal token replacement plus emoji-marker prefixing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::placeholders;
use crate::models::{GeneratedPostContent, PostTemplate, WorkoutCompletionEvent};

/// Render `template` for `event`
///
/// Tokens are replaced literally; unknown `{...}` sequences are left untouched.
/// Replacement runs one token at a time in the order name, duration, calories,
/// streak, so a workout name containing a later token is expanded as well.
/// The emoji marker is prefixed unless it already occurs anywhere in the
/// rendered text (plain substring match).
#[must_use]
pub fn render(
    template: &PostTemplate,
    event: &WorkoutCompletionEvent,
    weekly_count: u32,
) -> String {
    let rendered = template
        .body
        .replace(placeholders::WORKOUT_NAME, &event.workout_name)
        .replace(placeholders::DURATION, &event.duration_minutes.to_string())
        .replace(placeholders::CALORIES, &event.calories_burned.to_string())
        .replace(placeholders::STREAK, &weekly_count.to_string());

    if template.emoji.is_empty() || rendered.contains(&template.emoji) {
        rendered
    } else {
        format!("{} {rendered}", template.emoji)
    }
}

/// Render `template` and wrap it with its category and workout reference
#[must_use]
pub fn render_content(
    template: &PostTemplate,
    event: &WorkoutCompletionEvent,
    weekly_count: u32,
) -> GeneratedPostContent {
    GeneratedPostContent {
        text: render(template, event, weekly_count),
        category: template.category,
        workout_id: event.workout_id,
    }
}
