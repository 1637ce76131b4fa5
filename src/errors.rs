// ABOUTME: Unified error types re-exported from fitsocial-core
// ABOUTME: AppError, ErrorCode, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation returns [`AppResult`]. Engine-level outcomes that
//! are not errors (a skipped post) are modelled separately in
//! [`crate::autopost::AutoPostOutcome`].

pub use fitsocial_core::errors::*;
