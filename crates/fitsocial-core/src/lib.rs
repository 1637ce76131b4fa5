// ABOUTME: Core types and constants for the fitsocial auto-post engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitsocial Core
//!
//! Foundation crate providing shared types and constants for workout
//! auto-posting. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Default thresholds, placeholder tokens, and env var names
//! - **models**: Workout events, auto-post settings, templates, and posts

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (workout events, settings, templates, posts)
pub mod models;
