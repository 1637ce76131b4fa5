// ABOUTME: Resolves stored, possibly partial auto-post preferences against defaults
// ABOUTME: Pure field-wise overlay with injectable default settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{AutoPostSettings, PartialAutoPostSettings};

/// Overlays stored preferences onto an immutable default record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsResolver {
    defaults: AutoPostSettings,
}

impl SettingsResolver {
    /// Create a resolver using `defaults` for every absent field
    #[must_use]
    pub const fn new(defaults: AutoPostSettings) -> Self {
        Self { defaults }
    }

    /// The default record this resolver overlays onto
    #[must_use]
    pub const fn defaults(&self) -> &AutoPostSettings {
        &self.defaults
    }

    /// Produce fully populated settings; an absent record equals an empty overlay
    #[must_use]
    pub fn resolve(&self, stored: Option<&PartialAutoPostSettings>) -> AutoPostSettings {
        stored.map_or_else(|| self.defaults.clone(), |raw| raw.overlay_onto(&self.defaults))
    }
}
