// ABOUTME: Core data models for workout auto-posting
// ABOUTME: Re-exports workout events, auto-post settings, templates, and posts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Auto-post settings, template categories, templates, generated content
pub mod auto_post;
/// Post ledger request and record types
pub mod post;
/// Workout completion events
pub mod workout;

pub use auto_post::{
    AutoPostSettings, GeneratedPostContent, PartialAutoPostSettings, PostTemplate,
    TemplateCategory,
};
pub use post::{NewPost, PostRecord};
pub use workout::{EventSource, WorkoutCompletionEvent};
