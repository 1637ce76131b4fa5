// ABOUTME: Configuration management module for the auto-post engine
// ABOUTME: Exposes engine configuration and the shared configuration error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! - **Auto-post**: default user preferences, classification thresholds,
//!   and the streak window, loaded from `AUTO_POST_*` environment variables

use thiserror::Error;

use crate::errors::AppError;

/// Auto-post engine configuration
pub mod auto_post;

pub use auto_post::{AutoPostConfig, ClassificationThresholds};

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed into its target type
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its accepted bounds
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
