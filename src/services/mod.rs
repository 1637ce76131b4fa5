// ABOUTME: Domain service layer for operations hosts call around the engine
// ABOUTME: Settings editing and manual post creation reusable from any entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Protocol-agnostic operations built on the engine and its repositories, so a
//! CLI, an HTTP route, or a job runner all apply the same rules.

/// Auto-post settings and manual post operations
pub mod auto_post;
