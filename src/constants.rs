// ABOUTME: Application constants re-exported from fitsocial-core
// ABOUTME: Defaults, classification thresholds, placeholders, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use fitsocial_core::constants::*;
