pub mod config;
pub mod dsp;
#[cfg(feature = "rtrb")]
pub mod engine; // Render block processor and control handle
pub mod io;
pub mod params; // Parameter table, registry and smoothing
pub mod sequencing; // Beat clock, pattern slots, arpeggiator
pub mod synth; // Voice pool, held notes, events

pub use config::EngineConfig;
#[cfg(feature = "rtrb")]
pub use engine::{
    handle::{EngineError, EngineHandle},
    observer::{Notification, SynthObserver},
    SaavyEngine,
};
pub use params::{ParamId, ParamUnit, ParameterRegistry, PARAM_COUNT};
pub use synth::{message::SynthMessage, note_set::NoteSet};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Number of MIDI note numbers (0-127).
pub const NUM_MIDI_NOTES: usize = 128;
