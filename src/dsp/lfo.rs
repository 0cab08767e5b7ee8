//! Low Frequency Oscillators for parameter modulation.

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at control rate (roughly 0.01 Hz to 20 Hz).
It never reaches the output directly; it moves other parameters.

Here the two instrument LFOs run at block rate: the engine reads one value
at the top of each render block and then advances the phase by the block
length. Parameters only change once per block anyway (see `VoiceParams`), so
a per-sample LFO would buy nothing.

Shapes (the `LfoNIndex` selector)
---------------------------------

    0  sine        smooth sweep
    1  square      hard switch between the extremes
    2  saw up      gradual rise, snap down
    3  saw down    gradual fall, snap up

Output is bipolar (-1.0 to +1.0). Routing mostly wants unipolar depth:

    unipolar = (bipolar + 1.0) * 0.5
*/

use std::f32::consts::TAU;

use crate::dsp::oscillator::Phasor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoShape {
    Sine,
    Square,
    SawUp,
    SawDown,
}

impl LfoShape {
    pub fn from_selector(value: i32) -> Self {
        match value {
            1 => LfoShape::Square,
            2 => LfoShape::SawUp,
            3 => LfoShape::SawDown,
            _ => LfoShape::Sine,
        }
    }

    /// Bipolar value of this shape at `phase` in [0, 1).
    #[inline]
    pub fn value_at(self, phase: f32) -> f32 {
        match self {
            LfoShape::Sine => (TAU * phase).sin(),
            LfoShape::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            LfoShape::SawUp => 2.0 * phase - 1.0,
            LfoShape::SawDown => 1.0 - 2.0 * phase,
        }
    }
}

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Block-rate LFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfo {
    phasor: Phasor,
}

impl Lfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value at the current phase, then advance by `frames` at `rate_hz`.
    pub fn advance(&mut self, shape: LfoShape, rate_hz: f32, frames: usize, sample_rate: f32) -> f32 {
        let value = shape.value_at(self.phasor.phase());
        self.phasor.tick(rate_hz * frames as f32, sample_rate);
        value
    }

    pub fn phase(&self) -> f32 {
        self.phasor.phase()
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }
}
