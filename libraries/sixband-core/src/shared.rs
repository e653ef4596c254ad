//! Gain settings shared between a control surface and the processing side
//!
//! The control surface owns the gains and edits them while the engine may be
//! running on another thread. Every edit publishes a complete new
//! [`GainVector`]; readers take a [`SharedGains::snapshot`] once per buffer and
//! never observe a mix of old and new values.

use crate::error::Result;
use crate::types::{GainPreset, GainVector};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Cloneable handle to a gain vector edited from one thread and read from others
#[derive(Debug, Clone)]
pub struct SharedGains {
    inner: Arc<ArcSwap<GainVector>>,
}

impl SharedGains {
    /// Create a handle holding `gains`
    pub fn new(gains: GainVector) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(gains)),
        }
    }

    /// Consistent copy of the current gains
    pub fn snapshot(&self) -> GainVector {
        **self.inner.load()
    }

    /// Replace every gain at once
    pub fn store(&self, gains: GainVector) {
        self.inner.store(Arc::new(gains));
    }

    /// Change one band, returning the clamped value that was stored
    pub fn set_band(&self, band: usize, gain_db: i32) -> Result<i32> {
        // Validate before publishing so a bad index leaves the gains untouched
        let mut probe = self.snapshot();
        let stored = probe.set(band, gain_db)?;

        self.inner.rcu(|current| {
            let mut next = **current;
            // Index was checked above
            let _ = next.set(band, stored);
            next
        });
        Ok(stored)
    }

    /// Load a preset
    pub fn apply_preset(&self, preset: GainPreset) {
        self.store(preset.gains());
    }
}

impl Default for SharedGains {
    fn default() -> Self {
        Self::new(GainVector::flat())
    }
}
