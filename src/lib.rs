// ABOUTME: Main library entry point for the workout auto-post engine
// ABOUTME: Decides whether, what kind of, and what social post to publish after a workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Workout Auto-Post Engine
//!
//! Given a workout-completion event, the engine decides whether to publish a
//! social post on the user's behalf, which kind (completion, milestone, or
//! streak), and the post text, while honouring per-user preferences and a
//! per-user cooldown between automatic posts.
//!
//! ## Architecture
//!
//! - **Autopost**: settings resolution, eligibility gate, streak counting,
//!   classification, template selection, rendering, and the orchestrating engine
//! - **Database**: collaborator traits plus a `SQLite` store implementing them
//! - **Services**: settings editing and manual post creation
//! - **Config**: environment-driven defaults and classification thresholds
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use uuid::Uuid;
//! use fitsocial_autopost::autopost::AutoPostEngine;
//! use fitsocial_autopost::config::AutoPostConfig;
//! use fitsocial_autopost::database::AutoPostStore;
//! use fitsocial_autopost::errors::AppResult;
//! use fitsocial_autopost::models::WorkoutCompletionEvent;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(AutoPostStore::connect("sqlite::memory:").await?);
//!     let engine = AutoPostEngine::from_store(AutoPostConfig::global(), store);
//!
//!     let event = WorkoutCompletionEvent::new(
//!         Uuid::new_v4(),
//!         Uuid::new_v4(),
//!         "Leg Day",
//!         "strength",
//!         45,
//!         320,
//!         Utc::now(),
//!     );
//!     let outcome = engine.handle_workout_completion(&event).await;
//!     println!("created: {}", outcome.is_created());
//!     Ok(())
//! }
//! ```

/// Auto-post engine and its pipeline components
pub mod autopost;

/// Configuration management from environment variables
pub mod config;

/// Application constants and configuration defaults
pub mod constants;

/// Persistence traits and the `SQLite` store
pub mod database;

/// Unified error handling system with standard error codes
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// Data models for workout events, settings, templates, and posts
pub mod models;

/// Domain services for settings management and manual posts
pub mod services;
