/*
LFO Routing
===========

Two instrument LFOs (`Lfo1*`, `Lfo2*`: shape, rate in Hz, amount) are sampled
once per block into a `Modulation` value. Each routable parameter has a
selector:

    0  off
    1  LFO 1
    2  LFO 2
    3  both (average of the two)

A routed LFO produces a depth in [0, amount]: the unipolar LFO value scaled
by that LFO's amount. Most destinations are attenuated by it:

    value * (1 - depth)

so at amount 1 the parameter sweeps between its set value and zero, and at
amount 0 nothing moves. Pitch is the exception: it is bipolar vibrato of up to
one semitone either way.

    destination        selector          effect
    -----------        --------          ------
    cutoff             CutoffLfo         attenuate
    resonance          ResonanceLfo      attenuate
    osc balance        OscMixLfo         attenuate (toward osc 1)
    sustain level      SustainLfo        attenuate
    decay time         DecayLfo          attenuate
    noise volume       NoiseLfo          attenuate
    fm amount          FmLfo             attenuate
    osc 2 detune       DetuneLfo         attenuate (Hz offset and multiplier)
    filter env amount  FilterEnvLfo      attenuate
    pitch              PitchLfo          ±1 semitone
    bitcrush rate      BitcrushLfo       attenuate
    auto pan amount    AutopanLfo        attenuate
*/

use crate::{
    dsp::lfo::{bipolar_to_unipolar, Lfo, LfoShape},
    params::{ParamId, ParameterRegistry},
};

/// Routing selector value of a `*Lfo` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoRoute {
    Off,
    Lfo1,
    Lfo2,
    Both,
}

impl LfoRoute {
    pub fn from_selector(value: i32) -> Self {
        match value {
            1 => LfoRoute::Lfo1,
            2 => LfoRoute::Lfo2,
            3 => LfoRoute::Both,
            _ => LfoRoute::Off,
        }
    }
}

/// One LFO reading: bipolar shape value and the amount it is scaled by.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LfoReading {
    pub value: f32,
    pub amount: f32,
}

impl LfoReading {
    /// Depth in [0, amount].
    #[inline]
    pub fn depth(&self) -> f32 {
        bipolar_to_unipolar(self.value) * self.amount
    }

    /// Scaled bipolar value in [-amount, amount].
    #[inline]
    pub fn bipolar(&self) -> f32 {
        self.value * self.amount
    }
}

/// Both LFOs for one block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Modulation {
    pub lfo1: LfoReading,
    pub lfo2: LfoReading,
}

impl Modulation {
    /// No LFO movement at all.
    pub const NONE: Modulation = Modulation {
        lfo1: LfoReading {
            value: 0.0,
            amount: 0.0,
        },
        lfo2: LfoReading {
            value: 0.0,
            amount: 0.0,
        },
    };

    pub fn depth(&self, route: LfoRoute) -> f32 {
        match route {
            LfoRoute::Off => 0.0,
            LfoRoute::Lfo1 => self.lfo1.depth(),
            LfoRoute::Lfo2 => self.lfo2.depth(),
            LfoRoute::Both => 0.5 * (self.lfo1.depth() + self.lfo2.depth()),
        }
    }

    pub fn bipolar(&self, route: LfoRoute) -> f32 {
        match route {
            LfoRoute::Off => 0.0,
            LfoRoute::Lfo1 => self.lfo1.bipolar(),
            LfoRoute::Lfo2 => self.lfo2.bipolar(),
            LfoRoute::Both => 0.5 * (self.lfo1.bipolar() + self.lfo2.bipolar()),
        }
    }

    /// Multiplier for a destination whose routing selector is `selector`.
    #[inline]
    pub fn attenuation(&self, params: &ParameterRegistry, selector: ParamId) -> f32 {
        1.0 - self.depth(LfoRoute::from_selector(params.whole(selector)))
    }

    /// Pitch ratio from `PitchLfo`: up to a semitone either way.
    #[inline]
    pub fn pitch_ratio(&self, params: &ParameterRegistry) -> f32 {
        let semitones = self.bipolar(LfoRoute::from_selector(params.whole(ParamId::PitchLfo)));
        2.0_f32.powf(semitones / 12.0)
    }
}

/// The two instrument LFOs. Free-running; only `reset` restarts them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfoBank {
    lfo1: Lfo,
    lfo2: Lfo,
}

impl LfoBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read both LFOs for a block of `frames`, then advance them.
    pub fn advance(&mut self, params: &ParameterRegistry, frames: usize) -> Modulation {
        let sample_rate = params.sample_rate();
        let lfo1 = LfoReading {
            value: self.lfo1.advance(
                LfoShape::from_selector(params.whole(ParamId::Lfo1Index)),
                params.smoothed(ParamId::Lfo1Rate),
                frames,
                sample_rate,
            ),
            amount: params.smoothed(ParamId::Lfo1Amplitude),
        };
        let lfo2 = LfoReading {
            value: self.lfo2.advance(
                LfoShape::from_selector(params.whole(ParamId::Lfo2Index)),
                params.smoothed(ParamId::Lfo2Rate),
                frames,
                sample_rate,
            ),
            amount: params.smoothed(ParamId::Lfo2Amplitude),
        };
        Modulation { lfo1, lfo2 }
    }

    pub fn reset(&mut self) {
        self.lfo1.reset();
        self.lfo2.reset();
    }
}
