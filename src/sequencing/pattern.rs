/*
Step Pattern
============

The step sequencer plays a pattern of up to 16 slots stored in the parameter
registry, so patterns are saved and recalled with every other parameter:

    ArpSeqPatternNN   semitone offset, -24..=24
    ArpSeqOctBoostNN  adds an octave to the offset
    ArpSeqNoteOnNN    step gate; off steps are rests
    ArpTotalSteps     active slot count, 1..=16

Octave boost pushes the offset away from zero: +5 becomes +17, -5 becomes
-17, and 0 becomes +12.

Each held key is a reference note. On every step, each reference note is
transposed by the step's offset:

    held {60}, pattern [0, +12 (rest), -5]  →  60, -, 55, 60, -, 55, ...
*/

use crate::params::{ParamId, ParameterRegistry};

/// Number of step slots in the registry.
pub const MAX_STEPS: usize = 16;

/// One sequencer step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternSlot {
    pub semitones: i8,
    pub octave_boost: bool,
    pub enabled: bool,
}

impl PatternSlot {
    pub fn new(semitones: i8, octave_boost: bool, enabled: bool) -> Self {
        Self {
            semitones,
            octave_boost,
            enabled,
        }
    }

    /// Read slot `step` (clamped to the last slot) from the registry.
    pub fn from_registry(params: &ParameterRegistry, step: usize) -> Self {
        Self {
            semitones: params.whole(ParamId::arp_seq_pattern(step)) as i8,
            octave_boost: params.flag(ParamId::arp_seq_oct_boost(step)),
            enabled: params.flag(ParamId::arp_seq_note_on(step)),
        }
    }

    /// Transposition in semitones, including the octave boost.
    pub fn offset(&self) -> i32 {
        let semitones = self.semitones as i32;
        match (self.octave_boost, semitones < 0) {
            (false, _) => semitones,
            (true, false) => semitones + 12,
            (true, true) => semitones - 12,
        }
    }

    /// `note` transposed by this step, or `None` if it leaves the MIDI range.
    pub fn apply(&self, note: u8) -> Option<u8> {
        let target = note as i32 + self.offset();
        u8::try_from(target).ok().filter(|n| *n <= 127)
    }
}

/// Number of active steps (`ArpTotalSteps`, 1..=16).
pub fn active_steps(params: &ParameterRegistry) -> usize {
    (params.whole(ParamId::ArpTotalSteps).max(1) as usize).min(MAX_STEPS)
}
