//! Low-level DSP primitives used by voices and post-voice stages.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to embed directly inside voice structs. The engine only
//! cares about how they are parameterised and triggered; the math here is
//! deliberately simple.

/// Circular delay buffer.
pub mod delay;
/// Soft clipping and bit crushing.
pub mod distortion;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Block-rate low frequency oscillators.
pub mod lfo;
/// Phasors, wavetable/sub/FM oscillators and noise.
pub mod oscillator;
/// Pre-allocated wavetable bank.
pub mod waveform;

pub use envelope::{AdsrShape, Envelope, EnvelopeState};
