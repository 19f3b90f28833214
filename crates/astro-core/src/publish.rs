//! Hand-off between the generation pass and a render loop.
//!
//! A result becomes visible only once it is complete: `publish` swaps an
//! `Arc` under a short write lock, and readers clone the `Arc` they see.
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::generator::PlanetResult;

/// Publication counter paired with the planet it published.
type Published = (u64, Option<Arc<PlanetResult>>);

#[derive(Debug, Default)]
pub struct PlanetSlot {
    inner: RwLock<Published>,
}

impl PlanetSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible planet. Returns the new publication counter.
    pub fn publish(&self, result: PlanetResult) -> u64 {
        let result = Arc::new(result);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.0 += 1;
        inner.1 = Some(result);
        debug!(generation = inner.0, "planet published");
        inner.0
    }

    /// The last completed planet, if any.
    pub fn latest(&self) -> Option<Arc<PlanetResult>> {
        self.snapshot().1
    }

    /// Number of publications so far; lets a render loop skip re-uploads.
    pub fn generation(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).0
    }

    /// Counter and planet read under one lock, so they always belong together.
    pub fn snapshot(&self) -> (u64, Option<Arc<PlanetResult>>) {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Drop the visible planet. The counter keeps counting.
    pub fn clear(&self) {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).1 = None;
    }
}
