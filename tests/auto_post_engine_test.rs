// ABOUTME: Integration tests for the auto-post engine over in-memory collaborator fakes
// ABOUTME: Covers eligibility, classification precedence, failure policy, and same-user races
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use fitsocial_autopost::autopost::{
    AutoPostEngine, AutoPostError, AutoPostOutcome, CreatedPost, SkipReason, TemplateCatalog,
};
use fitsocial_autopost::config::AutoPostConfig;
use fitsocial_autopost::models::{
    PartialAutoPostSettings, PostTemplate, TemplateCategory, WorkoutCompletionEvent,
};
use helpers::fakes::FakeStore;
use helpers::test_utils::{engine_over, test_now, workout_event};
use uuid::Uuid;

fn created(outcome: AutoPostOutcome) -> CreatedPost {
    match outcome {
        AutoPostOutcome::Created(post) => post,
        other => panic!("expected Created, got {other:?}"),
    }
}

fn skipped(outcome: &AutoPostOutcome) -> SkipReason {
    outcome
        .skip_reason()
        .unwrap_or_else(|| panic!("expected Skipped, got {outcome:?}"))
}

async fn run(engine: &AutoPostEngine, event: &WorkoutCompletionEvent) -> AutoPostOutcome {
    engine.handle_workout_completion_at(event, test_now()).await
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[tokio::test]
async fn test_plain_workout_creates_completion_post() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(1);
    let engine = engine_over(&store);
    let user = Uuid::new_v4();

    let post = created(run(&engine, &workout_event(user, 45, 320)).await);

    assert_eq!(post.category, TemplateCategory::Completion);
    assert!(post.content.contains("45"));
    assert_eq!(post.content, "💪 Finished Leg Day in 45 min");
    let stored = store.posts_for(user);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, post.post_id);
    assert_eq!(stored[0].post_type, "workout");
    assert_eq!(stored[0].created_at, test_now());
}

#[tokio::test]
async fn test_completion_content_contains_duration_and_calories() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(1);
    let engine = AutoPostEngine::from_store(&AutoPostConfig::default(), Arc::clone(&store))
        .with_catalog(TemplateCatalog::new(vec![PostTemplate::new(
            TemplateCategory::Completion,
            "{workout_name}: {duration} min, {calories} kcal",
            "",
            1,
        )]));

    let post = created(run(&engine, &workout_event(Uuid::new_v4(), 45, 320)).await);
    assert!(post.content.contains("45"));
    assert!(post.content.contains("320"));
}

#[tokio::test]
async fn test_high_effort_workout_is_milestone() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(1);
    let engine = engine_over(&store);

    let post = created(run(&engine, &workout_event(Uuid::new_v4(), 70, 500)).await);

    assert_eq!(post.category, TemplateCategory::Milestone);
    assert_eq!(post.content, "🏆 Big one: Leg Day, 500 kcal");
}

#[tokio::test]
async fn test_streak_overrides_milestone() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(4);
    let engine = engine_over(&store);

    let post = created(run(&engine, &workout_event(Uuid::new_v4(), 70, 500)).await);

    assert_eq!(post.category, TemplateCategory::Streak);
    // Emoji already present, so no prefix is added
    assert_eq!(post.content, "4 workouts this week 🔥");
}

#[tokio::test]
async fn test_short_workout_skipped_without_write() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 5, 320)).await;

    assert_eq!(
        skipped(&outcome),
        SkipReason::BelowMinDuration {
            duration_minutes: 5,
            min_duration_minutes: 10
        }
    );
    assert_eq!(store.write_attempts(), 0);
}

#[tokio::test]
async fn test_recent_post_blocks_with_remaining_time() {
    let store = Arc::new(FakeStore::new());
    let user = Uuid::new_v4();
    store.insert_post_at(user, test_now() - Duration::minutes(30));
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(user, 45, 320)).await;

    assert_eq!(
        skipped(&outcome),
        SkipReason::CooldownActive {
            remaining_minutes: 90
        }
    );
    assert_eq!(store.posts_for(user).len(), 1);
}

// ============================================================================
// Settings-driven properties
// ============================================================================

#[tokio::test]
async fn test_disabled_user_always_skipped() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(10);
    let engine = engine_over(&store);
    let user = Uuid::new_v4();
    store.set_partial_settings(
        user,
        PartialAutoPostSettings {
            enabled: Some(false),
            ..PartialAutoPostSettings::default()
        },
    );

    for (duration, calories) in [(0, 0), (45, 320), (70, 500), (600, 5000)] {
        let outcome = run(&engine, &workout_event(user, duration, calories)).await;
        assert_eq!(skipped(&outcome), SkipReason::Disabled);
    }
    assert_eq!(store.write_attempts(), 0);
}

#[tokio::test]
async fn test_completion_switch_off_skips() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);
    let user = Uuid::new_v4();
    store.set_partial_settings(
        user,
        PartialAutoPostSettings {
            on_workout_completion: Some(false),
            ..PartialAutoPostSettings::default()
        },
    );

    let outcome = run(&engine, &workout_event(user, 45, 320)).await;
    assert_eq!(skipped(&outcome), SkipReason::CompletionPostsDisabled);
}

#[tokio::test]
async fn test_low_calories_skipped() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 45, 49)).await;
    assert_eq!(
        skipped(&outcome),
        SkipReason::BelowMinCalories {
            calories_burned: 49,
            min_calories: 50
        }
    );
}

#[tokio::test]
async fn test_minimums_are_inclusive() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 10, 50)).await;
    assert!(outcome.is_created(), "{outcome:?}");
}

#[tokio::test]
async fn test_partial_settings_keep_other_defaults() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(1);
    let engine = engine_over(&store);
    let user = Uuid::new_v4();
    store.set_partial_settings(
        user,
        PartialAutoPostSettings {
            on_milestones: Some(false),
            ..PartialAutoPostSettings::default()
        },
    );

    // Milestone-sized workout falls back to completion; minimums still default
    let post = created(run(&engine, &workout_event(user, 70, 500)).await);
    assert_eq!(post.category, TemplateCategory::Completion);
    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 5, 500)).await;
    assert!(outcome.is_skipped());
}

#[tokio::test]
async fn test_streaks_disabled_keeps_milestone() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(6);
    let engine = engine_over(&store);
    let user = Uuid::new_v4();
    store.set_partial_settings(
        user,
        PartialAutoPostSettings {
            on_streaks: Some(false),
            ..PartialAutoPostSettings::default()
        },
    );

    let post = created(run(&engine, &workout_event(user, 70, 500)).await);
    assert_eq!(post.category, TemplateCategory::Milestone);
}

// ============================================================================
// Cooldown
// ============================================================================

#[tokio::test]
async fn test_cooldown_elapsed_exactly_allows_post() {
    let store = Arc::new(FakeStore::new());
    let user = Uuid::new_v4();
    store.insert_post_at(user, test_now() - Duration::hours(2));
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(user, 45, 320)).await;
    assert!(outcome.is_created(), "{outcome:?}");
    assert_eq!(store.posts_for(user).len(), 2);
}

#[tokio::test]
async fn test_cooldown_one_second_short_blocks() {
    let store = Arc::new(FakeStore::new());
    let user = Uuid::new_v4();
    store.insert_post_at(user, test_now() - Duration::hours(2) + Duration::seconds(1));
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(user, 45, 320)).await;
    assert_eq!(
        skipped(&outcome),
        SkipReason::CooldownActive {
            remaining_minutes: 1
        }
    );
}

#[tokio::test]
async fn test_zero_cooldown_allows_back_to_back_posts() {
    let store = Arc::new(FakeStore::new());
    let user = Uuid::new_v4();
    store.set_partial_settings(
        user,
        PartialAutoPostSettings {
            cooldown_hours: Some(0.0),
            ..PartialAutoPostSettings::default()
        },
    );
    let engine = engine_over(&store);

    assert!(run(&engine, &workout_event(user, 45, 320)).await.is_created());
    // Same instant: an existing post at `now` is not strictly after `now - 0`
    assert!(run(&engine, &workout_event(user, 45, 320)).await.is_created());
    assert_eq!(store.posts_for(user).len(), 2);
}

#[tokio::test]
async fn test_cooldown_is_per_user() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    store.insert_post_at(first, test_now() - Duration::minutes(5));

    assert!(run(&engine, &workout_event(first, 45, 320)).await.is_skipped());
    assert!(run(&engine, &workout_event(second, 45, 320)).await.is_created());
}

// ============================================================================
// Failure policy
// ============================================================================

#[tokio::test]
async fn test_cooldown_read_failure_fails_closed() {
    let store = Arc::new(FakeStore::new());
    store.fail_last_post_read();
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 45, 320)).await;
    assert_eq!(skipped(&outcome), SkipReason::CooldownUnknown);
    assert_eq!(store.write_attempts(), 0);
}

#[tokio::test]
async fn test_streak_read_failure_fails_open() {
    let store = Arc::new(FakeStore::new());
    store.fail_history();
    let engine = engine_over(&store);

    let post = created(run(&engine, &workout_event(Uuid::new_v4(), 70, 500)).await);
    assert_eq!(post.category, TemplateCategory::Milestone);
}

#[tokio::test]
async fn test_settings_read_failure_skips() {
    let store = Arc::new(FakeStore::new());
    store.fail_settings_read();
    let engine = engine_over(&store);

    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 45, 320)).await;
    assert_eq!(skipped(&outcome), SkipReason::SettingsUnavailable);
}

#[tokio::test]
async fn test_write_failure_surfaces_as_failed_without_retry() {
    let store = Arc::new(FakeStore::new());
    store.fail_post_write();
    let engine = engine_over(&store);
    let user = Uuid::new_v4();

    let outcome = run(&engine, &workout_event(user, 45, 320)).await;

    match outcome {
        AutoPostOutcome::Failed(AutoPostError::LedgerWrite(e)) => {
            assert_eq!(e.user_id, Some(user));
        }
        other => panic!("expected LedgerWrite failure, got {other:?}"),
    }
    assert_eq!(store.write_attempts(), 1);
}

#[tokio::test]
async fn test_negative_metrics_rejected_before_any_lookup() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);

    for (duration, calories) in [(-1, 320), (45, -10)] {
        let outcome = run(&engine, &workout_event(Uuid::new_v4(), duration, calories)).await;
        match outcome {
            AutoPostOutcome::Failed(e) => assert!(e.is_validation()),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
    assert_eq!(store.write_attempts(), 0);
}

#[tokio::test]
async fn test_empty_category_skips_with_no_template() {
    let store = Arc::new(FakeStore::new());
    store.set_weekly_count(5);
    let engine = engine_over(&store).with_catalog(TemplateCatalog::new(vec![PostTemplate::new(
        TemplateCategory::Completion,
        "{workout_name} done",
        "✅",
        1,
    )]));

    let outcome = run(&engine, &workout_event(Uuid::new_v4(), 45, 320)).await;
    assert_eq!(
        skipped(&outcome),
        SkipReason::NoTemplate {
            category: TemplateCategory::Streak
        }
    );
    assert_eq!(store.write_attempts(), 0);
}

// ============================================================================
// Weekly count and concurrency
// ============================================================================

#[tokio::test]
async fn test_weekly_count_window_ends_at_completion() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);
    let user = Uuid::new_v4();
    for days_ago in [0, 2, 6] {
        store.record_workout(user, test_now() - Duration::days(days_ago));
    }
    store.record_workout(user, test_now() - Duration::days(8));

    let post = created(run(&engine, &workout_event(user, 45, 320)).await);
    assert_eq!(post.category, TemplateCategory::Streak);
    assert_eq!(post.content, "3 workouts this week 🔥");
}

#[tokio::test]
async fn test_concurrent_same_user_creates_one_post() {
    let store = Arc::new(FakeStore::new());
    store.set_read_delay(StdDuration::from_millis(20));
    let engine = engine_over(&store);
    let user = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { run(&engine, &workout_event(user, 45, 320)).await })
        })
        .collect();

    let mut created_count = 0;
    for handle in handles {
        let outcome = handle.await.unwrap();
        if outcome.is_created() {
            created_count += 1;
        } else {
            assert!(matches!(
                outcome.skip_reason(),
                Some(SkipReason::CooldownActive { .. })
            ));
        }
    }
    assert_eq!(created_count, 1);
    assert_eq!(store.posts_for(user).len(), 1);
}

#[tokio::test]
async fn test_guarded_write_stops_race_across_engines() {
    // Separate engines do not share per-user locks; only the guarded write protects them
    let store = Arc::new(FakeStore::new());
    store.set_read_delay(StdDuration::from_millis(30));
    let first = engine_over(&store);
    let second = engine_over(&store);
    let user = Uuid::new_v4();

    let event_a = workout_event(user, 45, 320);
    let event_b = workout_event(user, 45, 320);
    let (a, b) = tokio::join!(run(&first, &event_a), run(&second, &event_b));

    assert_eq!(
        [a.is_created(), b.is_created()].iter().filter(|c| **c).count(),
        1
    );
    assert_eq!(store.posts_for(user).len(), 1);
}

#[tokio::test]
async fn test_different_users_post_concurrently() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);
    let users: Vec<_> = (0..5).map(|_| Uuid::new_v4()).collect();

    let handles: Vec<_> = users
        .iter()
        .map(|user| {
            let engine = engine.clone();
            let user = *user;
            tokio::spawn(async move { run(&engine, &workout_event(user, 45, 320)).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_created());
    }
    for user in users {
        assert_eq!(store.posts_for(user).len(), 1);
    }
}

#[tokio::test]
async fn test_manual_event_follows_same_rules() {
    let store = Arc::new(FakeStore::new());
    let engine = engine_over(&store);
    let user = Uuid::new_v4();

    let event = workout_event(user, 45, 320).manual();
    assert!(run(&engine, &event).await.is_created());
    assert!(run(&engine, &workout_event(user, 45, 320).manual())
        .await
        .is_skipped());
}
