//! Parameter table, live registry and smoothing.
//!
//! Every sound-shaping value in the engine is addressed by a [`ParamId`].
//! Metadata (range, default, unit, names) is static data declared once in
//! [`table`]; the mutable side lives in [`ParameterRegistry`], owned by the
//! render context.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// LFO routing onto parameter values.
pub mod modulation;
/// One-pole smoothing used for parameters and mono glide.
pub mod smoothing;
/// Live parameter values, clamping and change tracking.
pub mod registry;
/// The static descriptor table and the `ParamId` enum it generates.
pub mod table;

pub use registry::ParameterRegistry;
pub use table::{ParamId, PARAMS, PARAM_COUNT};

/// Display unit attached to a parameter. Purely descriptive.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    Generic,
    Hertz,
    Seconds,
    RelativeSemitones,
    Rate,
    Bpm,
}

/// Immutable metadata for one parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamDescriptor {
    pub id: ParamId,
    pub min: f32,
    pub default: f32,
    pub max: f32,
    pub preset_key: &'static str,
    pub display_name: &'static str,
    pub unit: ParamUnit,
    /// Whether changes glide through a smoothing filter instead of jumping.
    pub smoothed: bool,
}

impl ParamDescriptor {
    /// Clamp `value` into `[min, max]`. NaN resolves to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

impl ParamId {
    #[inline]
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &PARAMS[self as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ParamId> {
        ParamId::ALL.get(index).copied()
    }

    pub fn from_preset_key(key: &str) -> Option<ParamId> {
        PARAMS.iter().find(|d| d.preset_key == key).map(|d| d.id)
    }

    pub fn min(self) -> f32 {
        self.descriptor().min
    }

    pub fn max(self) -> f32 {
        self.descriptor().max
    }

    pub fn default_value(self) -> f32 {
        self.descriptor().default
    }

    pub fn unit(self) -> ParamUnit {
        self.descriptor().unit
    }

    pub fn display_name(self) -> &'static str {
        self.descriptor().display_name
    }

    pub fn preset_key(self) -> &'static str {
        self.descriptor().preset_key
    }

    pub fn is_smoothed(self) -> bool {
        self.descriptor().smoothed
    }

    pub fn clamp(self, value: f32) -> f32 {
        self.descriptor().clamp(value)
    }

    /// Semitone offset parameter for sequencer step `step` (clamped to 0..16).
    pub fn arp_seq_pattern(step: usize) -> ParamId {
        Self::offset_from(ParamId::ArpSeqPattern00, step)
    }

    /// Octave boost parameter for sequencer step `step`.
    pub fn arp_seq_oct_boost(step: usize) -> ParamId {
        Self::offset_from(ParamId::ArpSeqOctBoost00, step)
    }

    /// Step enable parameter for sequencer step `step`.
    pub fn arp_seq_note_on(step: usize) -> ParamId {
        Self::offset_from(ParamId::ArpSeqNoteOn00, step)
    }

    fn offset_from(first: ParamId, step: usize) -> ParamId {
        let step = step.min(crate::sequencing::pattern::MAX_STEPS - 1);
        // The sixteen step parameters of each kind are contiguous in the table.
        ParamId::ALL[first as usize + step]
    }
}
