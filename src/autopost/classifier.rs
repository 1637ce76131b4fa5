// ABOUTME: Ordered rule list that picks the template category for a workout
// ABOUTME: Completion < Milestone < Streak precedence, last matching rule wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Template classification
//!
//! Rules are evaluated top to bottom and the **last** matching rule decides
//! the category. Precedence is therefore Streak > Milestone > Completion: a
//! workout that is both a milestone and part of a streak gets a streak post.
//! Whether streak should override milestone (rather than the reverse, or both
//! being posted) is still awaiting product confirmation.

use crate::config::ClassificationThresholds;
use crate::models::{AutoPostSettings, TemplateCategory};

/// Everything classification depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationInput {
    /// User allows milestone posts
    pub on_milestones: bool,
    /// User allows streak posts
    pub on_streaks: bool,
    /// Workout duration in minutes
    pub duration_minutes: i64,
    /// Calories burned
    pub calories_burned: i64,
    /// Completed workouts in the trailing window
    pub weekly_count: u32,
}

impl ClassificationInput {
    /// Collect the classification inputs from resolved settings and event metrics
    #[must_use]
    pub const fn new(
        settings: &AutoPostSettings,
        duration_minutes: i64,
        calories_burned: i64,
        weekly_count: u32,
    ) -> Self {
        Self {
            on_milestones: settings.on_milestones,
            on_streaks: settings.on_streaks,
            duration_minutes,
            calories_burned,
            weekly_count,
        }
    }
}

type RulePredicate = fn(&ClassificationInput, &ClassificationThresholds) -> bool;

/// One `(predicate, category)` entry of the ordered rule list
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Rule name for diagnostics
    pub name: &'static str,
    /// Category assigned when the predicate holds
    pub category: TemplateCategory,
    predicate: RulePredicate,
}

impl ClassificationRule {
    /// Whether this rule matches `input`
    #[must_use]
    pub fn matches(
        &self,
        input: &ClassificationInput,
        thresholds: &ClassificationThresholds,
    ) -> bool {
        (self.predicate)(input, thresholds)
    }
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

const fn always(_: &ClassificationInput, _: &ClassificationThresholds) -> bool {
    true
}

const fn is_milestone(input: &ClassificationInput, t: &ClassificationThresholds) -> bool {
    input.on_milestones
        && (input.calories_burned >= t.milestone_calories
            || input.duration_minutes >= t.milestone_duration_minutes)
}

const fn is_streak(input: &ClassificationInput, t: &ClassificationThresholds) -> bool {
    input.on_streaks && input.weekly_count >= t.streak_min_workouts
}

/// Ascending precedence; later entries override earlier ones
pub const RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        name: "default",
        category: TemplateCategory::Completion,
        predicate: always,
    },
    ClassificationRule {
        name: "milestone",
        category: TemplateCategory::Milestone,
        predicate: is_milestone,
    },
    ClassificationRule {
        name: "streak",
        category: TemplateCategory::Streak,
        predicate: is_streak,
    },
];

/// Pure classifier over [`RULES`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateClassifier {
    thresholds: ClassificationThresholds,
}

impl TemplateClassifier {
    /// Classifier with explicit thresholds
    #[must_use]
    pub const fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    /// Names of every rule that matched, in evaluation order
    #[must_use]
    pub fn matched_rules(&self, input: &ClassificationInput) -> Vec<&'static str> {
        RULES
            .iter()
            .filter(|rule| rule.matches(input, &self.thresholds))
            .map(|rule| rule.name)
            .collect()
    }

    /// Category chosen by the last matching rule
    #[must_use]
    pub fn classify(&self, input: &ClassificationInput) -> TemplateCategory {
        RULES
            .iter()
            .rev()
            .find(|rule| rule.matches(input, &self.thresholds))
            .map_or(TemplateCategory::Completion, |rule| rule.category)
    }
}
