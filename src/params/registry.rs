use super::{smoothing::Portamento, ParamId, PARAMS, PARAM_COUNT};

/// Fixed half-time (seconds) of the smoothing filter on smoothed parameters.
pub const PARAM_SMOOTHING_HALF_TIME: f32 = 0.005;

/// Live parameter values, owned by the render context.
///
/// Two values are kept per parameter: the value most recently set (what
/// `get` reports, always clamped into range) and the smoothed value that DSP
/// code reads. For unsmoothed parameters the two are identical.
pub struct ParameterRegistry {
    values: [f32; PARAM_COUNT],
    smoothers: [Portamento; PARAM_COUNT],
    dirty: u128,
    sample_rate: f32,
}

impl ParameterRegistry {
    pub fn new(sample_rate: f32) -> Self {
        let mut values = [0.0; PARAM_COUNT];
        let mut smoothers = [Portamento::new(0.0, PARAM_SMOOTHING_HALF_TIME); PARAM_COUNT];
        for descriptor in PARAMS {
            let index = descriptor.id.index();
            values[index] = descriptor.default;
            smoothers[index].snap(descriptor.default);
        }

        Self {
            values,
            smoothers,
            dirty: 0,
            sample_rate,
        }
    }

    /// Last value set for `id` (the smoothing target for smoothed parameters).
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Value currently seen by the DSP, after smoothing.
    #[inline]
    pub fn smoothed(&self, id: ParamId) -> f32 {
        self.smoothers[id.index()].value()
    }

    /// Parameter read as a switch (`>= 0.5` is on).
    #[inline]
    pub fn flag(&self, id: ParamId) -> bool {
        self.get(id) >= 0.5
    }

    /// Parameter read as a whole number (rounded to nearest).
    #[inline]
    pub fn whole(&self, id: ParamId) -> i32 {
        self.get(id).round() as i32
    }

    /// Clamp and store `value`. Returns true when the stored value changed.
    pub fn set(&mut self, id: ParamId, value: f32) -> bool {
        let index = id.index();
        let clamped = id.clamp(value);
        if self.values[index] == clamped {
            return false;
        }

        self.values[index] = clamped;
        if id.is_smoothed() {
            self.smoothers[index].set_target(clamped);
        } else {
            self.smoothers[index].snap(clamped);
        }
        self.dirty |= 1u128 << index;
        true
    }

    /// Apply a full parameter array. Each entry is clamped independently, so
    /// the order of application does not matter. Short slices update a prefix;
    /// extra entries are ignored. Returns the number of values that changed.
    pub fn set_all(&mut self, values: &[f32]) -> usize {
        let mut changed = 0;
        for (&id, &value) in ParamId::ALL.iter().zip(values) {
            if self.set(id, value) {
                changed += 1;
            }
        }
        changed
    }

    pub fn snapshot(&self) -> [f32; PARAM_COUNT] {
        self.values
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&mut self) {
        for descriptor in PARAMS {
            self.set(descriptor.id, descriptor.default);
        }
    }

    /// Advance every smoothing filter by one block.
    pub fn advance(&mut self, frames: usize) {
        for smoother in self.smoothers.iter_mut() {
            if !smoother.is_settled() {
                smoother.advance(frames, self.sample_rate);
            }
        }
    }

    /// Finish all glides immediately.
    pub fn settle(&mut self) {
        for smoother in self.smoothers.iter_mut() {
            smoother.settle();
        }
    }

    /// Ids changed since the last call, in table order.
    pub fn take_changed(&mut self) -> ChangedParams {
        let bits = std::mem::take(&mut self.dirty);
        ChangedParams { bits }
    }

    pub fn has_changes(&self) -> bool {
        self.dirty != 0
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

/// Iterator over a set of changed parameter ids.
pub struct ChangedParams {
    bits: u128,
}

impl Iterator for ChangedParams {
    type Item = ParamId;

    fn next(&mut self) -> Option<ParamId> {
        while self.bits != 0 {
            let index = self.bits.trailing_zeros() as usize;
            self.bits &= self.bits - 1;
            if let Some(id) = ParamId::from_index(index) {
                return Some(id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn set_clamps_into_range_for_every_parameter() {
        let mut registry = ParameterRegistry::new(SAMPLE_RATE);
        let inputs = [-1.0e9, -1.0, 0.0, 0.5, 1.0, 3.0, 440.0, 1.0e9, f32::NAN];

        for &id in ParamId::ALL {
            for &input in &inputs {
                registry.set(id, input);
                let value = registry.get(id);
                assert!(
                    (id.min()..=id.max()).contains(&value),
                    "{:?} stored {} for input {}",
                    id,
                    value,
                    input
                );
                if (id.min()..=id.max()).contains(&input) {
                    assert_eq!(value, input);
                }
            }
        }
    }

    #[test]
    fn smoothed_parameter_glides_toward_target() {
        let mut registry = ParameterRegistry::new(SAMPLE_RATE);
        registry.set(ParamId::Cutoff, 1_000.0);

        assert_eq!(registry.get(ParamId::Cutoff), 1_000.0);
        assert_eq!(registry.smoothed(ParamId::Cutoff), 20_000.0);

        registry.advance(64);
        let mid = registry.smoothed(ParamId::Cutoff);
        assert!(mid < 20_000.0 && mid > 1_000.0);

        registry.settle();
        assert_eq!(registry.smoothed(ParamId::Cutoff), 1_000.0);
    }

    #[test]
    fn unsmoothed_parameter_applies_immediately() {
        let mut registry = ParameterRegistry::new(SAMPLE_RATE);
        registry.set(ParamId::ArpRate, 90.0);
        assert_eq!(registry.smoothed(ParamId::ArpRate), 90.0);
    }

    #[test]
    fn only_real_changes_are_reported() {
        let mut registry = ParameterRegistry::new(SAMPLE_RATE);
        assert!(!registry.set(ParamId::MasterVolume, ParamId::MasterVolume.default_value()));
        assert!(registry.set(ParamId::MasterVolume, 1.5));
        assert!(registry.set(ParamId::ArpIsOn, 1.0));
        // Clamps to the same stored value
        assert!(!registry.set(ParamId::ArpIsOn, 7.0));

        let changed: Vec<ParamId> = registry.take_changed().collect();
        assert_eq!(changed, vec![ParamId::MasterVolume, ParamId::ArpIsOn]);
        assert_eq!(registry.take_changed().count(), 0);
    }

    #[test]
    fn set_all_is_order_independent_and_clamped() {
        let mut forward = ParameterRegistry::new(SAMPLE_RATE);
        let mut values: Vec<f32> = ParamId::ALL.iter().map(|&id| id.max() + 10.0).collect();
        values[ParamId::Cutoff.index()] = 500.0;

        forward.set_all(&values);

        let mut reverse = ParameterRegistry::new(SAMPLE_RATE);
        for &id in ParamId::ALL.iter().rev() {
            reverse.set(id, values[id.index()]);
        }

        assert_eq!(forward.snapshot(), reverse.snapshot());
        assert_eq!(forward.get(ParamId::Cutoff), 500.0);
        assert_eq!(forward.get(ParamId::ArpTotalSteps), 16.0);
    }

    #[test]
    fn set_all_with_short_slice_updates_prefix() {
        let mut registry = ParameterRegistry::new(SAMPLE_RATE);
        let changed = registry.set_all(&[0.0, 0.0]);
        assert_eq!(changed, 2);
        assert_eq!(registry.get(ParamId::Index1), 0.0);
        assert_eq!(registry.get(ParamId::MorphBalance), 0.5);
    }
}
