//! Wavetable storage shared by every voice's oscillators.
//!
//! Tables are pre-allocated at full size when the bank is built. `setup` only
//! changes a table's active length and `set_value` writes in place, so both are
//! safe to apply from the render context.

/// Number of wavetables the oscillators can morph across.
pub const NUM_WAVETABLES: usize = 4;
/// Capacity of each table in samples.
pub const WAVETABLE_SIZE: usize = 4096;

pub struct WaveformBank {
    tables: [Vec<f32>; NUM_WAVETABLES],
}

impl WaveformBank {
    /// Empty tables (every table silent, full length).
    pub fn new() -> Self {
        Self {
            tables: std::array::from_fn(|_| {
                let mut table = Vec::with_capacity(WAVETABLE_SIZE);
                table.resize(WAVETABLE_SIZE, 0.0);
                table
            }),
        }
    }

    /// Triangle, square, narrow pulse and sawtooth, in that order.
    pub fn with_default_tables() -> Self {
        let mut bank = Self::new();
        let size = WAVETABLE_SIZE;
        for i in 0..size {
            let phase = i as f32 / size as f32;
            let triangle = if phase < 0.5 {
                4.0 * phase - 1.0
            } else {
                3.0 - 4.0 * phase
            };
            let square = if phase < 0.5 { 1.0 } else { -1.0 };
            let pulse = if i < size / 8 { -1.0 } else { 1.0 };
            let saw = 2.0 * phase - 1.0;

            bank.tables[0][i] = triangle;
            bank.tables[1][i] = square;
            bank.tables[2][i] = pulse;
            bank.tables[3][i] = saw;
        }
        bank
    }

    /// Set the active length of `table`, zero-filling it.
    ///
    /// Unknown tables are ignored. `size` is clamped to `1..=WAVETABLE_SIZE`,
    /// so this never reallocates.
    pub fn setup(&mut self, table: usize, size: usize) -> bool {
        let Some(samples) = self.tables.get_mut(table) else {
            return false;
        };
        let size = size.clamp(1, WAVETABLE_SIZE);
        samples.clear();
        samples.resize(size, 0.0);
        true
    }

    /// Write one sample. Unknown tables and indices past the active length are ignored.
    pub fn set_value(&mut self, table: usize, index: usize, value: f32) -> bool {
        let Some(slot) = self.tables.get_mut(table).and_then(|t| t.get_mut(index)) else {
            return false;
        };
        *slot = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
        true
    }

    /// Replace a table's contents in one go (initialisation helper).
    pub fn load(&mut self, table: usize, samples: &[f32]) -> bool {
        if !self.setup(table, samples.len()) {
            return false;
        }
        for (index, &value) in samples.iter().take(WAVETABLE_SIZE).enumerate() {
            self.set_value(table, index, value);
        }
        true
    }

    pub fn len(&self, table: usize) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }

    pub fn value(&self, table: usize, index: usize) -> Option<f32> {
        self.tables.get(table).and_then(|t| t.get(index)).copied()
    }

    /// Linearly interpolated lookup at `phase` in [0, 1).
    #[inline]
    pub fn sample(&self, table: usize, phase: f32) -> f32 {
        let samples = &self.tables[table.min(NUM_WAVETABLES - 1)];
        let len = samples.len();
        let position = phase.rem_euclid(1.0) * len as f32;
        let index = (position as usize).min(len - 1);
        let frac = position - index as f32;
        let next = samples[(index + 1) % len];
        samples[index] + (next - samples[index]) * frac
    }

    /// Crossfade across all tables: `position` 0.0 is table 0, 1.0 is the last table.
    #[inline]
    pub fn morph(&self, position: f32, phase: f32) -> f32 {
        let scaled = position.clamp(0.0, 1.0) * (NUM_WAVETABLES - 1) as f32;
        let lower = (scaled as usize).min(NUM_WAVETABLES - 1);
        let upper = (lower + 1).min(NUM_WAVETABLES - 1);
        let blend = scaled - lower as f32;

        let a = self.sample(lower, phase);
        if blend <= 0.0 || lower == upper {
            return a;
        }
        a + (self.sample(upper, phase) - a) * blend
    }
}

impl Default for WaveformBank {
    fn default() -> Self {
        Self::with_default_tables()
    }
}
