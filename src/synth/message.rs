#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::params::{ParamId, PARAM_COUNT};

/// Control → render event. Consumed exactly once, in FIFO order.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Copy, Clone)]
pub enum SynthMessage {
    NoteOn {
        note: u8,
        velocity: u8,
        /// Overrides the equal-tempered frequency of `note` when set.
        frequency: Option<f32>,
    },
    NoteOff {
        note: u8,
    },
    SetParameter {
        id: ParamId,
        value: f32,
    },
    /// Full parameter array in table order, applied as one unit.
    SetParameters([f32; PARAM_COUNT]),
    SetupWaveform {
        table: usize,
        size: usize,
    },
    SetWaveformValue {
        table: usize,
        index: usize,
        value: f32,
    },
    StopAllNotes,
    Reset,
    ResetDsp,
    ResetSequencer,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
