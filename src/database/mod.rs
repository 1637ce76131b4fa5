// ABOUTME: Persistence layer for the auto-post engine
// ABOUTME: Collaborator traits and the SQLite store implementing them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! The engine depends only on the traits in [`repositories`]. [`AutoPostStore`]
//! implements all of them over a single `SQLite` pool; hosts with their own
//! storage implement the traits directly.

/// Repository traits consumed by the engine
pub mod repositories;

mod auto_post;

pub use auto_post::AutoPostStore;
pub use repositories::{
    AutoPostSettingsRepository, CooldownGuard, PostLedger, PostWrite, WorkoutHistory,
};
