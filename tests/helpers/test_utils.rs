// ABOUTME: Builders for engines and workout events used across integration tests
// ABOUTME: Deterministic engines over fakes or in-memory SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fitsocial_autopost::autopost::{AutoPostEngine, TemplateCatalog};
use fitsocial_autopost::config::AutoPostConfig;
use fitsocial_autopost::database::AutoPostStore;
use fitsocial_autopost::models::{PostTemplate, TemplateCategory, WorkoutCompletionEvent};
use uuid::Uuid;

use super::fakes::{FakeStore, FixedIndex};

/// Fixed reference instant so tests never depend on the wall clock
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 18, 0, 0).unwrap()
}

/// Event completed at [`test_now`]
pub fn workout_event(user_id: Uuid, duration: i64, calories: i64) -> WorkoutCompletionEvent {
    WorkoutCompletionEvent::new(
        user_id,
        Uuid::new_v4(),
        "Leg Day",
        "strength",
        duration,
        calories,
        test_now(),
    )
}

/// One template per category with predictable bodies
pub fn pinned_catalog() -> TemplateCatalog {
    TemplateCatalog::new(vec![
        PostTemplate::new(
            TemplateCategory::Completion,
            "Finished {workout_name} in {duration} min",
            "💪",
            1,
        ),
        PostTemplate::new(
            TemplateCategory::Milestone,
            "Big one: {workout_name}, {calories} kcal",
            "🏆",
            1,
        ),
        PostTemplate::new(
            TemplateCategory::Streak,
            "{streak} workouts this week 🔥",
            "🔥",
            1,
        ),
    ])
}

/// Engine over `store` with built-in defaults and the pinned catalog
pub fn engine_over(store: &Arc<FakeStore>) -> AutoPostEngine {
    AutoPostEngine::from_store(&AutoPostConfig::default(), Arc::clone(store))
        .with_catalog(pinned_catalog())
        .with_random_source(Arc::new(FixedIndex(0)))
}

/// Migrated in-memory SQLite store
pub async fn sqlite_store() -> Arc<AutoPostStore> {
    Arc::new(AutoPostStore::connect("sqlite::memory:").await.unwrap())
}
