/// Circular delay buffer, sized once at construction.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    pub fn new(max_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; max_samples.max(2)],
            write_pos: 0,
        }
    }

    /// Enough room for `max_seconds` at `sample_rate`.
    pub fn with_max_time(max_seconds: f32, sample_rate: f32) -> Self {
        Self::new((max_seconds * sample_rate).ceil() as usize + 1)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Sample written `delay_samples` ago (clamped to the buffer length).
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay_samples = delay_samples.clamp(1, len - 1);
        let read_pos = (self.write_pos + len - delay_samples) % len;
        self.buffer[read_pos]
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_comes_back_after_delay() {
        let mut line = DelayLine::new(16);
        let mut output = Vec::new();
        for n in 0..10 {
            output.push(line.read(4));
            line.write(if n == 0 { 1.0 } else { 0.0 });
        }
        assert_eq!(output[4], 1.0);
        assert_eq!(output.iter().filter(|&&s| s != 0.0).count(), 1);
    }

    #[test]
    fn oversized_delay_is_clamped() {
        let mut line = DelayLine::new(8);
        line.write(0.5);
        assert!(line.read(1_000).is_finite());
    }

    #[test]
    fn reset_clears_history() {
        let mut line = DelayLine::new(8);
        for _ in 0..8 {
            line.write(1.0);
        }
        line.reset();
        assert_eq!(line.read(3), 0.0);
    }
}
