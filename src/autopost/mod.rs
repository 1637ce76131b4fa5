// ABOUTME: Workout auto-post engine and its components
// ABOUTME: Settings resolution, eligibility, streaks, classification, templates, rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Auto-Post Engine
//!
//! Decides whether a completed workout should produce a social post on the
//! user's behalf, which kind of post (completion, milestone, or streak), and
//! what it says. Data flows:
//!
//! event → settings resolution → eligibility gate (cooldown lookup) →
//! weekly count → classification → template selection → rendering → ledger write

/// Built-in template catalog
pub mod catalog;
/// Ordered classification rules
pub mod classifier;
/// Eligibility gate
pub mod eligibility;
/// Orchestrator
pub mod engine;
/// Tagged engine results
pub mod outcome;
/// Placeholder rendering
pub mod renderer;
/// Template selection with injectable randomness
pub mod selector;
/// Per-user invocation serialization
pub mod serialization;
/// Settings resolution
pub mod settings;
/// Weekly workout counting
pub mod streak;

pub use catalog::TemplateCatalog;
pub use classifier::{ClassificationInput, TemplateClassifier};
pub use eligibility::{CooldownReading, EligibilityGate};
pub use engine::AutoPostEngine;
pub use outcome::{AutoPostError, AutoPostOutcome, CreatedPost, SkipReason};
pub use selector::{RandomSource, SeededRandom, TemplateSelector, ThreadRandom};
pub use serialization::UserLocks;
pub use settings::SettingsResolver;
pub use streak::StreakCounter;
