// ABOUTME: Data models re-exported from fitsocial-core
// ABOUTME: Workout events, auto-post settings, templates, and post records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `WorkoutCompletionEvent`: a finished workout, from a session or manual log
//! - `AutoPostSettings` / `PartialAutoPostSettings`: effective and stored preferences
//! - `PostTemplate` / `TemplateCategory`: content templates and their kinds
//! - `NewPost` / `PostRecord`: ledger writes and reads

pub use fitsocial_core::models::*;
