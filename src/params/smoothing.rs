/*
Portamento Smoothing
====================

A one-pole lowpass on a control value. Each step moves the output a fixed
fraction of the remaining distance toward the target, so jumps turn into
exponential glides.

The rate is expressed as a half-time: the time it takes to cover half of the
remaining distance. After one half-time the output is 50% of the way there,
after two it is 75%, after three 87.5%, and so on.

    per-sample coefficient   c = 0.5 ^ (1 / (half_time * sample_rate))
    per-sample update        y = target + (y - target) * c

Because the update is a pure geometric decay toward a constant target,
advancing by `n` samples at once is exact:

    y = target + (y - target) * c^n

Parameters use that block form (one `powf` per block, not per sample). The
mono glide uses the per-sample form so pitch moves smoothly inside a block.
*/

/// Distance (relative to the target, for targets above 1.0) below which the
/// output snaps onto the target.
const SNAP_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct Portamento {
    value: f32,
    target: f32,
    half_time: f32,
}

impl Portamento {
    pub fn new(value: f32, half_time: f32) -> Self {
        Self {
            value,
            target: value,
            half_time: half_time.max(0.0),
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn set_half_time(&mut self, half_time: f32) {
        self.half_time = half_time.max(0.0);
    }

    /// Jump straight to `value`, discarding any glide in progress.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    /// Finish the glide immediately.
    pub fn settle(&mut self) {
        self.value = self.target;
    }

    /// Advance by one sample and return the new output.
    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        self.advance(1, sample_rate)
    }

    /// Advance by `frames` samples at once.
    pub fn advance(&mut self, frames: usize, sample_rate: f32) -> f32 {
        if self.value == self.target || frames == 0 {
            return self.value;
        }

        // Half-times shorter than a sample behave as a jump.
        let samples = self.half_time * sample_rate;
        if samples <= 1.0 {
            self.value = self.target;
            return self.value;
        }

        let decay = 0.5_f32.powf(frames as f32 / samples);
        self.value = self.target + (self.value - self.target) * decay;

        if (self.value - self.target).abs() <= SNAP_EPSILON * self.target.abs().max(1.0) {
            self.value = self.target;
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}
