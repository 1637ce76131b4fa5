// ABOUTME: Uniform random template selection within a category
// ABOUTME: Injectable random source so tests can pin the chosen template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::catalog::TemplateCatalog;
use crate::models::{PostTemplate, TemplateCategory};

/// Source of uniformly distributed indices
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`; only called with `len > 0`
    fn pick_index(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible randomness from a fixed seed
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    /// Deterministic source seeded with `seed`
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable generator
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen_range(0..len)
    }
}

/// Picks one template of a category uniformly at random
#[derive(Clone)]
pub struct TemplateSelector {
    catalog: Arc<TemplateCatalog>,
    random: Arc<dyn RandomSource>,
}

impl TemplateSelector {
    /// Selector over `catalog` drawing from `random`
    #[must_use]
    pub fn new(catalog: Arc<TemplateCatalog>, random: Arc<dyn RandomSource>) -> Self {
        Self { catalog, random }
    }

    /// Same random source over a different catalog
    #[must_use]
    pub fn with_catalog(&self, catalog: Arc<TemplateCatalog>) -> Self {
        Self::new(catalog, Arc::clone(&self.random))
    }

    /// Same catalog with a different random source
    #[must_use]
    pub fn with_random(&self, random: Arc<dyn RandomSource>) -> Self {
        Self::new(Arc::clone(&self.catalog), random)
    }

    /// Catalog in use
    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// A template of `category`, or `None` when the category is empty
    #[must_use]
    pub fn select(&self, category: TemplateCategory) -> Option<&PostTemplate> {
        let candidates = self.catalog.templates_for(category);
        if candidates.is_empty() {
            return None;
        }
        let index = self.random.pick_index(candidates.len()).min(candidates.len() - 1);
        candidates.get(index).copied()
    }
}

impl Default for TemplateSelector {
    fn default() -> Self {
        Self::new(Arc::new(TemplateCatalog::default()), Arc::new(ThreadRandom))
    }
}

impl std::fmt::Debug for TemplateSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSelector")
            .field("templates", &self.catalog.templates().len())
            .finish_non_exhaustive()
    }
}
