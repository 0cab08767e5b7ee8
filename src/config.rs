#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound for the voice pool. Voices are pre-allocated, so this keeps the
/// render loop's worst case bounded regardless of configuration.
pub const MAX_POLYPHONY: usize = 16;

/// Construction-time settings for a [`crate::SaavyEngine`].
///
/// Everything here is fixed once the engine is built. Sound-shaping values
/// (tempo, envelope times, polyphony mode) live in the parameter registry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Audio sample rate in Hz.
    pub sample_rate: f32,
    /// Number of polyphonic voice slots (clamped to `1..=MAX_POLYPHONY`).
    pub polyphony: usize,
    /// Capacity of the control → render event queue.
    pub event_capacity: usize,
    /// Capacity of the render → control notification queue.
    pub notification_capacity: usize,
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_polyphony(mut self, polyphony: usize) -> Self {
        self.polyphony = polyphony;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    /// Polyphony clamped to the supported range.
    pub fn voice_count(&self) -> usize {
        self.polyphony.clamp(1, MAX_POLYPHONY)
    }

    /// Sample rate with a sane floor, so clock and envelope math never divides by zero.
    pub fn effective_sample_rate(&self) -> f32 {
        if self.sample_rate.is_finite() && self.sample_rate >= 1_000.0 {
            self.sample_rate
        } else {
            48_000.0
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            polyphony: 6,
            event_capacity: 512,
            notification_capacity: 256,
        }
    }
}
