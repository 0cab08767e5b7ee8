//! Block-quantised tempo clock for the arpeggiator.
//!
//! Beats land on block boundaries: a beat that falls inside a block fires at
//! the start of the next one. The first block after a reset always fires so
//! the arpeggiator answers a key press immediately.

#[derive(Debug, Clone, Copy, Default)]
pub struct BeatClock {
    /// Samples since the last beat, measured at the start of the next block.
    elapsed: f64,
    running: bool,
}

impl BeatClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of one step in samples.
    ///
    /// `bpm` counts quarter notes; `division` is steps per quarter note
    /// (4 = sixteenths).
    pub fn period_samples(sample_rate: f32, bpm: f32, division: f32) -> f64 {
        let steps_per_minute = (bpm as f64 * division as f64).max(f64::MIN_POSITIVE);
        (sample_rate as f64 * 60.0 / steps_per_minute).max(1.0)
    }

    /// Advance by a block of `frames` samples. Returns true when a beat fires
    /// at the start of this block. At most one beat fires per block; when a
    /// block spans several periods the extra ones are dropped and only the
    /// remainder is carried.
    pub fn advance(&mut self, frames: usize, period: f64) -> bool {
        let period = period.max(1.0);

        let fired = if !self.running {
            self.running = true;
            self.elapsed = 0.0;
            true
        } else if self.elapsed >= period {
            self.elapsed %= period;
            true
        } else {
            false
        };

        self.elapsed += frames as f64;
        fired
    }

    /// Back to the un-started state: the next block fires.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteenths_at_120_bpm() {
        let period = BeatClock::period_samples(48_000.0, 120.0, 4.0);
        assert_eq!(period, 6_000.0);
    }

    #[test]
    fn first_block_fires() {
        let mut clock = BeatClock::new();
        assert!(clock.advance(64, 6_000.0));
        assert!(!clock.advance(64, 6_000.0));
    }

    #[test]
    fn fires_once_per_period() {
        let mut clock = BeatClock::new();
        let mut beats = 0;
        // 10 periods of 1000 samples, in blocks of 100
        for _ in 0..100 {
            if clock.advance(100, 1_000.0) {
                beats += 1;
            }
        }
        assert_eq!(beats, 10);
    }

    #[test]
    fn carries_remainder_across_blocks() {
        let mut clock = BeatClock::new();
        assert!(clock.advance(700, 1_000.0));
        assert!(!clock.advance(700, 1_000.0));
        // 1400 elapsed: fires, carries 400
        assert!(clock.advance(700, 1_000.0));
        assert_eq!(clock.elapsed(), 1_100.0);
        assert!(clock.advance(700, 1_000.0));
    }

    #[test]
    fn long_blocks_fire_at_most_once() {
        let mut clock = BeatClock::new();
        assert!(clock.advance(4_500, 1_000.0));
        assert!(clock.advance(4_500, 1_000.0));
        assert_eq!(clock.elapsed(), 500.0 + 4_500.0);
    }

    #[test]
    fn reset_restarts_on_next_block() {
        let mut clock = BeatClock::new();
        clock.advance(100, 1_000.0);
        clock.reset();
        assert!(!clock.is_running());
        assert!(clock.advance(100, 1_000.0));
    }
}
