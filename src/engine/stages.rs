//! Post-voice processing chain.
//!
//! After the voices are summed, the mono mix runs through each stage in
//! order. Stages read their settings from the registry once per block,
//! together with that block's LFO readings.

use crate::{
    dsp::{
        delay::DelayLine,
        distortion::{soft_clip, BitCrusher},
    },
    params::{modulation::Modulation, ParamId, ParameterRegistry},
};

/// One block-level processor in the post-voice chain.
pub trait PostStage: Send {
    fn process(&mut self, buffer: &mut [f32], params: &ParameterRegistry, modulation: &Modulation);

    /// Clear internal state (tails, held samples).
    fn reset(&mut self);
}

/// The default chain: bit crusher, delay, master volume.
pub fn default_chain(sample_rate: f32) -> Vec<Box<dyn PostStage>> {
    vec![
        Box::new(BitCrushStage::new(sample_rate)),
        Box::new(DelayStage::new(sample_rate)),
        Box::new(MasterStage),
    ]
}

pub struct BitCrushStage {
    crusher: BitCrusher,
    sample_rate: f32,
}

impl BitCrushStage {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            crusher: BitCrusher::new(),
            sample_rate,
        }
    }
}

impl PostStage for BitCrushStage {
    fn process(&mut self, buffer: &mut [f32], params: &ParameterRegistry, modulation: &Modulation) {
        let rate = params.smoothed(ParamId::BitCrushSampleRate)
            * modulation.attenuation(params, ParamId::BitcrushLfo);
        self.crusher.render(
            buffer,
            params.get(ParamId::BitCrushDepth),
            rate.max(ParamId::BitCrushSampleRate.min()),
            self.sample_rate,
        );
    }

    fn reset(&mut self) {
        self.crusher.reset();
    }
}

/// Feedback delay. The line is sized for the longest `DelayTime` up front.
pub struct DelayStage {
    line: DelayLine,
    sample_rate: f32,
}

impl DelayStage {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            line: DelayLine::with_max_time(ParamId::DelayTime.max(), sample_rate),
            sample_rate,
        }
    }
}

impl PostStage for DelayStage {
    fn process(&mut self, buffer: &mut [f32], params: &ParameterRegistry, _modulation: &Modulation) {
        if !params.flag(ParamId::DelayOn) {
            return;
        }

        let delay = (params.smoothed(ParamId::DelayTime) * self.sample_rate) as usize;
        let feedback = params.smoothed(ParamId::DelayFeedback);
        let mix = params.smoothed(ParamId::DelayMix);

        for sample in buffer.iter_mut() {
            let delayed = self.line.read(delay);
            self.line.write(*sample + delayed * feedback);
            *sample += (delayed - *sample) * mix;
        }
    }

    fn reset(&mut self) {
        self.line.reset();
    }
}

/// Master gain followed by a soft clipper.
pub struct MasterStage;

impl PostStage for MasterStage {
    fn process(&mut self, buffer: &mut [f32], params: &ParameterRegistry, _modulation: &Modulation) {
        let volume = params.smoothed(ParamId::MasterVolume);
        for sample in buffer.iter_mut() {
            *sample = soft_clip(*sample * volume, 1.0);
        }
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn master_stage_is_bounded() {
        let params = ParameterRegistry::new(SAMPLE_RATE);
        let mut buffer = [4.0, -4.0, 0.0, 100.0];
        MasterStage.process(&mut buffer, &params, &Modulation::NONE);
        assert!(buffer.iter().all(|s| s.abs() < 1.0));
        assert_eq!(buffer[2], 0.0);
    }

    #[test]
    fn delay_is_bypassed_when_off() {
        let params = ParameterRegistry::new(SAMPLE_RATE);
        let mut stage = DelayStage::new(SAMPLE_RATE);
        let mut buffer = [0.5; 64];
        stage.process(&mut buffer, &params, &Modulation::NONE);
        assert!(buffer.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn delay_echoes_an_impulse() {
        let mut params = ParameterRegistry::new(SAMPLE_RATE);
        params.set(ParamId::DelayOn, 1.0);
        params.set(ParamId::DelayTime, 0.1);
        params.set(ParamId::DelayMix, 0.5);
        params.settle();

        let mut stage = DelayStage::new(SAMPLE_RATE);
        let mut buffer = vec![0.0; 9_600];
        buffer[0] = 1.0;
        stage.process(&mut buffer, &params, &Modulation::NONE);

        // 100 ms at 48 kHz
        assert!(buffer[4_800].abs() > 0.1);
        assert_eq!(buffer[2_000], 0.0);

        stage.reset();
        let mut silence = vec![0.0; 9_600];
        stage.process(&mut silence, &params, &Modulation::NONE);
        assert!(silence.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn bitcrush_route_lowers_the_hold_rate() {
        use crate::params::modulation::LfoReading;

        let mut params = ParameterRegistry::new(SAMPLE_RATE);
        params.set(ParamId::BitCrushSampleRate, 48_000.0);
        params.set(ParamId::BitcrushLfo, 1.0);
        params.settle();
        let modulation = Modulation {
            lfo1: LfoReading {
                value: 1.0,
                amount: 1.0,
            },
            ..Modulation::NONE
        };
        let ramp: Vec<f32> = (0..64).map(|i| i as f32 / 64.0).collect();

        let mut plain = ramp.clone();
        BitCrushStage::new(SAMPLE_RATE).process(&mut plain, &params, &Modulation::NONE);
        assert_eq!(plain, ramp);

        let mut crushed = ramp.clone();
        BitCrushStage::new(SAMPLE_RATE).process(&mut crushed, &params, &modulation);
        // Floor rate is 4096 Hz: one new value roughly every 12 samples
        assert_eq!(crushed[1], crushed[0]);
        assert_ne!(crushed, ramp);
    }

    #[test]
    fn default_chain_keeps_silence_silent() {
        let params = ParameterRegistry::new(SAMPLE_RATE);
        let mut chain = default_chain(SAMPLE_RATE);
        let mut buffer = [0.0; 256];
        for stage in chain.iter_mut() {
            stage.process(&mut buffer, &params, &Modulation::NONE);
        }
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
