//! Waveshaping and bit reduction.
//!
//! Soft clipping keeps the summed voices out of hard digital overs. The bit
//! crusher reduces both resolution (bit depth) and time (sample-and-hold at a
//! lower rate) for lo-fi colour.

/// Soft clipping using x / (1 + |x|) transfer function.
#[inline]
pub fn soft_clip(sample: f32, drive: f32) -> f32 {
    let x = sample * drive;
    x / (1.0 + x.abs())
}

/// Quantise to `bits` of resolution over [-1, 1].
#[inline]
pub fn quantize(sample: f32, bits: f32) -> f32 {
    if bits >= 24.0 {
        return sample;
    }
    let steps = 2.0_f32.powf(bits.max(1.0) - 1.0);
    (sample * steps).round() / steps
}

/// Sample-and-hold downsampler plus bit-depth reduction.
pub struct BitCrusher {
    held: f32,
    counter: f32,
}

impl BitCrusher {
    pub fn new() -> Self {
        Self {
            held: 0.0,
            counter: 1.0,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], bits: f32, target_rate: f32, sample_rate: f32) {
        let step = (target_rate / sample_rate).clamp(0.0, 1.0);
        if step >= 1.0 && bits >= 24.0 {
            return;
        }

        for sample in buffer.iter_mut() {
            if self.counter >= 1.0 {
                self.counter -= 1.0;
                self.held = quantize(*sample, bits);
            }
            self.counter += step;
            *sample = self.held;
        }
    }

    pub fn reset(&mut self) {
        self.held = 0.0;
        self.counter = 1.0;
    }
}

impl Default for BitCrusher {
    fn default() -> Self {
        Self::new()
    }
}
