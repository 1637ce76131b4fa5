// ABOUTME: Built-in catalog of workout post templates grouped by category
// ABOUTME: Read-only, process-lifetime template data with per-category lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;

use tracing::warn;

use crate::models::{PostTemplate, TemplateCategory};

/// Process-wide built-in catalog
static BUILTIN_CATALOG: OnceLock<TemplateCatalog> = OnceLock::new();

/// (body, emoji) pairs for plain completion posts
const COMPLETION_TEMPLATES: [(&str, &str); 5] = [
    (
        "Just finished {workout_name}! {duration} minutes done and {calories} calories burned.",
        "💪",
    ),
    (
        "Another one in the books: {workout_name} for {duration} minutes, {calories} calories gone.",
        "✅",
    ),
    (
        "{workout_name} complete. {duration} minutes of work, {calories} calories burned.",
        "🏋️",
    ),
    (
        "Showed up and got it done 🎯 {workout_name}, {duration} min, {calories} cal.",
        "🎯",
    ),
    (
        "Sweat session over! {workout_name} took {duration} minutes and burned {calories} calories.",
        "💦",
    ),
];

/// (body, emoji) pairs for long or high-burn workouts
const MILESTONE_TEMPLATES: [(&str, &str); 4] = [
    (
        "Big one today! {workout_name} for {duration} minutes and {calories} calories torched.",
        "🏆",
    ),
    (
        "New level unlocked: {duration} minutes of {workout_name}, {calories} calories burned.",
        "🚀",
    ),
    (
        "Went the distance with {workout_name}. {duration} minutes, {calories} calories. Proud of this one.",
        "🥇",
    ),
    (
        "Milestone workout 🏅 {workout_name}: {duration} min and {calories} cal.",
        "🏅",
    ),
];

/// (body, emoji) pairs for users on a weekly streak
const STREAK_TEMPLATES: [(&str, &str); 4] = [
    (
        "Workout #{streak} this week! {workout_name} for {duration} minutes, {calories} calories.",
        "🔥",
    ),
    (
        "On a roll: {streak} workouts in 7 days. Today was {workout_name}, {duration} minutes.",
        "⚡",
    ),
    (
        "Consistency pays. {streak} sessions this week, latest {workout_name} burned {calories} calories.",
        "📈",
    ),
    (
        "Streak alive 🔥 {streak} workouts this week, {workout_name} done in {duration} min.",
        "🔥",
    ),
];

/// Immutable collection of post templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: Vec<PostTemplate>,
}

impl TemplateCatalog {
    /// Create a catalog from an explicit template list
    ///
    /// Categories with no template stay reachable by the classifier but
    /// produce no post when chosen.
    #[must_use]
    pub fn new(templates: Vec<PostTemplate>) -> Self {
        let catalog = Self { templates };
        for category in catalog.missing_categories() {
            warn!(%category, "Template catalog has no templates for category");
        }
        catalog
    }

    /// The built-in catalog shared across the process
    pub fn builtin() -> &'static Self {
        BUILTIN_CATALOG.get_or_init(|| Self::new(builtin_templates()))
    }

    /// All templates in catalog order
    #[must_use]
    pub fn templates(&self) -> &[PostTemplate] {
        &self.templates
    }

    /// Templates belonging to `category`, in catalog order
    #[must_use]
    pub fn templates_for(&self, category: TemplateCategory) -> Vec<&PostTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Categories that have no template at all
    #[must_use]
    pub fn missing_categories(&self) -> Vec<TemplateCategory> {
        TemplateCategory::ALL
            .into_iter()
            .filter(|category| !self.templates.iter().any(|t| t.category == *category))
            .collect()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn builtin_templates() -> Vec<PostTemplate> {
    let groups: [(TemplateCategory, &[(&str, &str)]); 3] = [
        (TemplateCategory::Completion, &COMPLETION_TEMPLATES),
        (TemplateCategory::Milestone, &MILESTONE_TEMPLATES),
        (TemplateCategory::Streak, &STREAK_TEMPLATES),
    ];

    groups
        .into_iter()
        .flat_map(|(category, entries)| {
            entries.iter().zip(1..).map(move |((body, emoji), priority)| {
                PostTemplate::new(category, *body, *emoji, priority)
            })
        })
        .collect()
}
