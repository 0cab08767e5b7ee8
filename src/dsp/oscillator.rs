use std::f32::consts::TAU;

use crate::dsp::waveform::WaveformBank;

/// Normalised phase accumulator, wraps in [0, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Phasor {
    phase: f32,
}

impl Phasor {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Return the current phase, then advance by `frequency / sample_rate`.
    #[inline]
    pub fn tick(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let current = self.phase;
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 || self.phase < 0.0 {
            self.phase = self.phase.rem_euclid(1.0);
        }
        current
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Oscillator reading from the shared [`WaveformBank`], morphing across tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavetableOsc {
    phasor: Phasor,
}

impl WavetableOsc {
    pub fn new() -> Self {
        Self::default()
    }

    /// One sample at `frequency`, with `phase_offset` added for FM.
    #[inline]
    pub fn next_sample(
        &mut self,
        bank: &WaveformBank,
        morph: f32,
        frequency: f32,
        phase_offset: f32,
        sample_rate: f32,
    ) -> f32 {
        let phase = self.phasor.tick(frequency, sample_rate);
        bank.morph(morph, phase + phase_offset)
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }
}

/// Band-unlimited sine/square sub oscillator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubOsc {
    phasor: Phasor,
}

impl SubOsc {
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, square: bool, sample_rate: f32) -> f32 {
        let phase = self.phasor.tick(frequency, sample_rate);
        if square {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        } else {
            (TAU * phase).sin()
        }
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }
}

/// Sine modulator used for simple two-operator FM.
#[derive(Debug, Clone, Copy, Default)]
pub struct FmOsc {
    phasor: Phasor,
}

impl FmOsc {
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        (TAU * self.phasor.tick(frequency, sample_rate)).sin()
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }
}

/// White noise from a 32-bit xorshift generator. Deterministic per seed.
#[derive(Debug, Clone, Copy)]
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new(0x9E37_79B9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phasor_wraps() {
        let mut phasor = Phasor::new();
        for _ in 0..1_000 {
            phasor.tick(440.0, 48_000.0);
            assert!((0.0..1.0).contains(&phasor.phase()));
        }
    }

    #[test]
    fn sub_sine_matches_reference() {
        let sample_rate = 48_000.0;
        let mut sub = SubOsc::default();
        let mut last = 0.0;
        for n in 0..13 {
            last = sub.next_sample(440.0, false, sample_rate);
            let expected = (TAU * 440.0 * n as f32 / sample_rate).sin();
            assert!((last - expected).abs() < 1e-4, "sample {n}");
        }
        assert!(last != 0.0);
    }

    #[test]
    fn noise_stays_in_range() {
        let mut noise = Noise::default();
        for _ in 0..10_000 {
            let sample = noise.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn wavetable_osc_reads_bank() {
        let bank = WaveformBank::with_default_tables();
        let mut osc = WavetableOsc::new();
        let mut buffer = [0.0f32; 256];
        for sample in buffer.iter_mut() {
            *sample = osc.next_sample(&bank, 1.0, 220.0, 0.0, 48_000.0);
        }
        assert!(buffer.iter().any(|s| s.abs() > 0.5));
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
