use std::f32::consts::TAU;

/*
| type      | passes          | rejects      |
| --------- | --------------- | ------------ |
| low-pass  | below cutoff    | above cutoff |
| high-pass | above cutoff    | below cutoff |
| band-pass | around cutoff   | both sides   |

Topology-preserving-transform state-variable filter. All three responses
come out of the same two integrators; `FilterType` (driven by the
`FilterType` parameter, 0/1/2) picks one.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    BandPass,
    HighPass,
}

impl FilterType {
    /// Map the registry's 0/1/2 selector onto a response.
    pub fn from_selector(value: i32) -> Self {
        match value {
            1 => FilterType::BandPass,
            2 => FilterType::HighPass,
            _ => FilterType::LowPass,
        }
    }
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz: 1000.0,
            resonance: 0.0,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            ..Self::new(FilterType::LowPass)
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            ..Self::new(FilterType::HighPass)
        }
    }

    /// Prewarped integrator gain for the current cutoff.
    #[inline]
    pub fn coefficient(cutoff_hz: f32, sample_rate: f32) -> f32 {
        // Keep the cutoff safely below Nyquist so tan() stays finite.
        let cutoff = cutoff_hz.clamp(10.0, sample_rate * 0.49);
        (TAU * cutoff / (2.0 * sample_rate)).tan()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    /// Filter one sample with an explicit cutoff (for per-sample envelope sweeps).
    #[inline]
    pub fn process(&mut self, sample: f32, cutoff_hz: f32, sample_rate: f32) -> f32 {
        let g = Self::coefficient(cutoff_hz, sample_rate);
        let k = self.damping();
        let outputs = self.next_sample(sample, k, g);
        self.select(outputs)
    }

    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let g = Self::coefficient(self.cutoff_hz, sample_rate);
        let k = self.damping();

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);
            *sample = self.select(outputs);
        }
    }

    #[inline]
    fn damping(&self) -> f32 {
        2.0 - 2.0 * self.resonance.clamp(0.0, 0.99)
    }

    #[inline]
    fn select(&self, outputs: FilterOutputs) -> f32 {
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::HighPass => outputs.highpass,
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance;
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * freq * n as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        buffer
            .iter()
            .skip(64)
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer[511] > 0.99);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 512];
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(buffer[511].abs() < 0.01);
    }

    #[test]
    fn lowpass_attenuates_high_frequencies() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = sine(5_000.0, 512);
        filter.render(&mut buffer, SAMPLE_RATE);
        assert!(peak_after_transient(&buffer) < 0.3);
    }

    #[test]
    fn selector_maps_to_responses() {
        assert_eq!(FilterType::from_selector(0), FilterType::LowPass);
        assert_eq!(FilterType::from_selector(1), FilterType::BandPass);
        assert_eq!(FilterType::from_selector(2), FilterType::HighPass);
        assert_eq!(FilterType::from_selector(9), FilterType::LowPass);
    }

    #[test]
    fn cutoff_above_nyquist_stays_finite() {
        let mut filter = SVFilter::lowpass(22_050.0);
        let mut buffer = sine(1_000.0, 256);
        filter.render(&mut buffer, 44_100.0);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }
}
