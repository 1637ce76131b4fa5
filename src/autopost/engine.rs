// ABOUTME: Auto-post engine orchestrating eligibility, classification, and post creation
// ABOUTME: Serializes same-user invocations and writes posts with an atomic cooldown guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Auto-post engine
//!
//! One invocation per workout-completion event:
//!
//! 1. validate the event
//! 2. resolve the user's settings
//! 3. eligibility preconditions, then the cooldown lookup (fail closed)
//! 4. weekly workout count (fail open)
//! 5. classify, select a template, render
//! 6. a single guarded write to the post ledger
//!
//! Stages run sequentially because each consumes the previous stage's output.
//! Same-user invocations are serialized by [`UserLocks`]; the ledger write also
//! re-checks the cooldown atomically so separate processes cannot double post.
//! Dropping the future before step 6 leaves no state behind.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::catalog::TemplateCatalog;
use super::classifier::{ClassificationInput, TemplateClassifier};
use super::eligibility::{CooldownReading, EligibilityGate};
use super::outcome::{AutoPostError, AutoPostOutcome, CreatedPost, SkipReason};
use super::renderer;
use super::selector::{RandomSource, TemplateSelector};
use super::serialization::UserLocks;
use super::settings::SettingsResolver;
use super::streak::StreakCounter;
use crate::config::AutoPostConfig;
use crate::constants::post_types;
use crate::database::repositories::{
    AutoPostSettingsRepository, CooldownGuard, PostLedger, PostWrite, WorkoutHistory,
};
use crate::models::{AutoPostSettings, NewPost, WorkoutCompletionEvent};

/// Decides whether and what to post when a workout completes
#[derive(Clone)]
pub struct AutoPostEngine {
    resolver: SettingsResolver,
    classifier: TemplateClassifier,
    streak_counter: StreakCounter,
    selector: TemplateSelector,
    settings_repo: Arc<dyn AutoPostSettingsRepository>,
    ledger: Arc<dyn PostLedger>,
    history: Arc<dyn WorkoutHistory>,
    locks: UserLocks,
}

impl AutoPostEngine {
    /// Engine over explicit collaborators with the built-in catalog and
    /// thread-local randomness
    #[must_use]
    pub fn new(
        config: &AutoPostConfig,
        settings_repo: Arc<dyn AutoPostSettingsRepository>,
        ledger: Arc<dyn PostLedger>,
        history: Arc<dyn WorkoutHistory>,
    ) -> Self {
        Self {
            resolver: SettingsResolver::new(config.default_settings.clone()),
            classifier: TemplateClassifier::new(config.classification),
            streak_counter: StreakCounter::new(config.streak_window_days),
            selector: TemplateSelector::default(),
            settings_repo,
            ledger,
            history,
            locks: UserLocks::new(),
        }
    }

    /// Engine over one store implementing every collaborator trait
    #[must_use]
    pub fn from_store<S>(config: &AutoPostConfig, store: Arc<S>) -> Self
    where
        S: AutoPostSettingsRepository + PostLedger + WorkoutHistory + 'static,
    {
        Self::new(config, store.clone(), store.clone(), store)
    }

    /// Replace the template catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.selector = self.selector.with_catalog(Arc::new(catalog));
        self
    }

    /// Replace the random source used for template selection
    #[must_use]
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.selector = self.selector.with_random(random);
        self
    }

    /// Settings resolver shared with the settings-editing services
    #[must_use]
    pub const fn resolver(&self) -> &SettingsResolver {
        &self.resolver
    }

    /// Settings repository the engine reads preferences from
    #[must_use]
    pub fn settings_repository(&self) -> &Arc<dyn AutoPostSettingsRepository> {
        &self.settings_repo
    }

    /// Handle a workout completion at the current time
    pub async fn handle_workout_completion(
        &self,
        event: &WorkoutCompletionEvent,
    ) -> AutoPostOutcome {
        self.handle_workout_completion_at(event, Utc::now()).await
    }

    /// Handle a workout completion as if the current time were `now`
    pub async fn handle_workout_completion_at(
        &self,
        event: &WorkoutCompletionEvent,
        now: DateTime<Utc>,
    ) -> AutoPostOutcome {
        if let Err(e) = event.validate() {
            warn!(
                user_id = %event.user_id,
                workout_id = %event.workout_id,
                error = %e,
                "Rejected invalid workout event"
            );
            return AutoPostOutcome::Failed(AutoPostError::InvalidEvent(e));
        }

        let guard = self.locks.acquire(event.user_id).await;
        let outcome = self.run_pipeline(event, now).await;
        drop(guard);
        self.locks.release_idle(event.user_id);

        match &outcome {
            AutoPostOutcome::Created(post) => info!(
                user_id = %event.user_id,
                workout_id = %event.workout_id,
                post_id = %post.post_id,
                category = %post.category,
                source = %event.source,
                "Auto-post created"
            ),
            AutoPostOutcome::Skipped(reason) => debug!(
                user_id = %event.user_id,
                workout_id = %event.workout_id,
                reason = %reason,
                "Auto-post skipped"
            ),
            AutoPostOutcome::Failed(e) => error!(
                user_id = %event.user_id,
                workout_id = %event.workout_id,
                error = %e,
                "Auto-post failed"
            ),
        }
        outcome
    }

    async fn run_pipeline(
        &self,
        event: &WorkoutCompletionEvent,
        now: DateTime<Utc>,
    ) -> AutoPostOutcome {
        let Some(settings) = self.load_settings(event).await else {
            return AutoPostOutcome::Skipped(SkipReason::SettingsUnavailable);
        };

        if let Err(reason) = EligibilityGate::check_preconditions(&settings, event) {
            return AutoPostOutcome::Skipped(reason);
        }
        let reading = self.read_cooldown(event).await;
        if let Err(reason) = EligibilityGate::check_cooldown(&settings, reading, now) {
            return AutoPostOutcome::Skipped(reason);
        }

        let weekly_count = self
            .streak_counter
            .weekly_count(self.history.as_ref(), event.user_id, event.completed_at)
            .await;

        let input = ClassificationInput::new(
            &settings,
            event.duration_minutes,
            event.calories_burned,
            weekly_count,
        );
        let category = self.classifier.classify(&input);
        debug!(
            user_id = %event.user_id,
            weekly_count,
            matched = ?self.classifier.matched_rules(&input),
            %category,
            "Classified workout"
        );

        let Some(template) = self.selector.select(category) else {
            return AutoPostOutcome::Skipped(SkipReason::NoTemplate { category });
        };
        let content = renderer::render_content(template, event, weekly_count);
        let post = NewPost::workout(event.user_id, &content, now);

        let guard = CooldownGuard {
            not_after: EligibilityGate::cooldown_cutoff(settings.cooldown_hours, now),
        };
        match self.ledger.create_post(&post, Some(guard)).await {
            Ok(PostWrite::Created(post_id)) => AutoPostOutcome::Created(CreatedPost {
                post_id,
                category,
                content: content.text,
            }),
            // Another writer got in first; recompute how long is left for diagnostics
            Ok(PostWrite::CooldownConflict) => {
                let reading = self.read_cooldown(event).await;
                let reason = EligibilityGate::check_cooldown(&settings, reading, now)
                    .err()
                    .unwrap_or(SkipReason::CooldownUnknown);
                AutoPostOutcome::Skipped(reason)
            }
            Err(e) => AutoPostOutcome::Failed(AutoPostError::LedgerWrite(
                e.with_user_id(event.user_id),
            )),
        }
    }

    async fn load_settings(&self, event: &WorkoutCompletionEvent) -> Option<AutoPostSettings> {
        match self.settings_repo.read_settings(event.user_id).await {
            Ok(stored) => Some(self.resolver.resolve(stored.as_ref())),
            Err(e) => {
                warn!(
                    user_id = %event.user_id,
                    error = %e,
                    "Settings lookup failed, skipping auto-post"
                );
                None
            }
        }
    }

    async fn read_cooldown(&self, event: &WorkoutCompletionEvent) -> CooldownReading {
        match self
            .ledger
            .most_recent_post_timestamp(event.user_id, post_types::WORKOUT)
            .await
        {
            Ok(Some(ts)) => CooldownReading::LastPostAt(ts),
            Ok(None) => CooldownReading::NoPriorPost,
            Err(e) => {
                warn!(
                    user_id = %event.user_id,
                    error = %e,
                    "Last post lookup failed, denying auto-post"
                );
                CooldownReading::Unavailable
            }
        }
    }
}

impl std::fmt::Debug for AutoPostEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoPostEngine")
            .field("resolver", &self.resolver)
            .field("classifier", &self.classifier)
            .field("streak_counter", &self.streak_counter)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}
