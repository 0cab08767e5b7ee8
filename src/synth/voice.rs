use crate::{
    dsp::{
        filter::{FilterType, SVFilter},
        oscillator::{FmOsc, Noise, SubOsc, WavetableOsc},
        waveform::WaveformBank,
        AdsrShape, Envelope, EnvelopeState,
    },
    io::converter::midi_note_to_freq,
    params::{modulation::Modulation, smoothing::Portamento, ParamId, ParameterRegistry},
};

/// Headroom so a full pool of voices does not slam the master stage.
const VOICE_GAIN: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Playing, envelope in attack/decay/sustain
    Releasing, // Key released, envelope in release phase
}

/// Per-block snapshot of the registry values a voice reads, with LFO routing
/// already applied.
///
/// Built once per block so each voice does not walk the registry per sample.
#[derive(Debug, Clone, Copy)]
pub struct VoiceParams {
    pub osc1_morph: f32,
    pub osc2_morph: f32,
    pub balance: f32,
    pub osc1_ratio: f32,
    pub osc2_ratio: f32,
    pub osc1_volume: f32,
    pub osc2_volume: f32,
    pub osc2_detune_hz: f32,
    pub detune_multiplier: f32,
    pub sub_volume: f32,
    pub sub_octave_down: bool,
    pub sub_square: bool,
    pub fm_volume: f32,
    pub fm_amount: f32,
    pub noise_volume: f32,
    pub cutoff: f32,
    pub resonance: f32,
    pub filter_mix: f32,
    pub filter_env_amount: f32,
    pub filter_type: FilterType,
    pub amp_shape: AdsrShape,
    pub filter_shape: AdsrShape,
    pub glide: f32,
    /// Vibrato from the pitch LFO route, applied on top of the note pitch.
    pub pitch_ratio: f32,
}

impl VoiceParams {
    /// Snapshot without any LFO movement.
    pub fn from_registry(params: &ParameterRegistry) -> Self {
        Self::modulated(params, &Modulation::NONE)
    }

    pub fn modulated(params: &ParameterRegistry, modulation: &Modulation) -> Self {
        let semitones = |id| 2.0_f32.powf(params.get(id) / 12.0);
        let lfo = |selector| modulation.attenuation(params, selector);
        let detune = lfo(ParamId::DetuneLfo);

        Self {
            osc1_morph: params.smoothed(ParamId::Index1),
            osc2_morph: params.smoothed(ParamId::Index2),
            balance: params.smoothed(ParamId::MorphBalance) * lfo(ParamId::OscMixLfo),
            osc1_ratio: semitones(ParamId::Morph1SemitoneOffset),
            osc2_ratio: semitones(ParamId::Morph2SemitoneOffset),
            osc1_volume: params.smoothed(ParamId::Morph1Volume),
            osc2_volume: params.smoothed(ParamId::Morph2Volume),
            osc2_detune_hz: params.smoothed(ParamId::Morph2Detuning) * detune,
            detune_multiplier: 1.0
                + (params.smoothed(ParamId::DetuningMultiplier) - 1.0) * detune,
            sub_volume: params.smoothed(ParamId::SubVolume),
            sub_octave_down: params.flag(ParamId::SubOctaveDown),
            sub_square: params.flag(ParamId::SubIsSquare),
            fm_volume: params.smoothed(ParamId::FmVolume),
            fm_amount: params.smoothed(ParamId::FmAmount) * lfo(ParamId::FmLfo),
            noise_volume: params.smoothed(ParamId::NoiseVolume) * lfo(ParamId::NoiseLfo),
            cutoff: params.smoothed(ParamId::Cutoff) * lfo(ParamId::CutoffLfo),
            resonance: params.smoothed(ParamId::Resonance) * lfo(ParamId::ResonanceLfo),
            filter_mix: params.smoothed(ParamId::FilterMix),
            filter_env_amount: params.smoothed(ParamId::FilterAdsrMix)
                * lfo(ParamId::FilterEnvLfo),
            filter_type: FilterType::from_selector(params.whole(ParamId::FilterType)),
            amp_shape: AdsrShape::new(
                params.smoothed(ParamId::AttackDuration),
                params.smoothed(ParamId::DecayDuration) * lfo(ParamId::DecayLfo),
                params.smoothed(ParamId::SustainLevel) * lfo(ParamId::SustainLfo),
                params.smoothed(ParamId::ReleaseDuration),
            ),
            filter_shape: AdsrShape::new(
                params.smoothed(ParamId::FilterAttackDuration),
                params.smoothed(ParamId::FilterDecayDuration),
                params.smoothed(ParamId::FilterSustainLevel),
                params.smoothed(ParamId::FilterReleaseDuration),
            ),
            glide: params.get(ParamId::Glide),
            pitch_ratio: modulation.pitch_ratio(params),
        }
    }
}

/// One sounding note: oscillators, filter and both envelopes.
pub struct Voice {
    note: u8,
    velocity: u8,
    state: VoiceState,
    stamp: u64,
    held: bool,

    pitch: Portamento,
    amp_env: Envelope,
    filter_env: Envelope,
    osc1: WavetableOsc,
    osc2: WavetableOsc,
    sub: SubOsc,
    fm: FmOsc,
    noise: Noise,
    filter: SVFilter,
}

impl Voice {
    pub fn new(seed: u32) -> Self {
        Self {
            note: 0,
            velocity: 0,
            state: VoiceState::Free,
            stamp: 0,
            held: false,
            pitch: Portamento::new(midi_note_to_freq(69), 0.0),
            amp_env: Envelope::new(),
            filter_env: Envelope::new(),
            osc1: WavetableOsc::new(),
            osc2: WavetableOsc::new(),
            sub: SubOsc::default(),
            fm: FmOsc::default(),
            noise: Noise::new(seed),
            filter: SVFilter::new(FilterType::LowPass),
        }
    }

    /// Start (or restart) a note. Both envelopes attack from their current
    /// level, so restarting a sounding voice does not click.
    pub fn start(&mut self, note: u8, velocity: u8, frequency: f32, stamp: u64, held: bool) {
        let was_sounding = self.is_active();
        self.note = note;
        self.velocity = velocity;
        self.stamp = stamp;
        self.held = held;
        self.state = VoiceState::Active;

        self.pitch.snap(frequency);
        if !was_sounding {
            self.filter.reset();
        }
        self.amp_env.note_on();
        self.filter_env.note_on();
    }

    /// Move to a new note without touching the envelopes (mono legato, or the
    /// mono fallback to a still-held key). The pitch glides over `glide`
    /// seconds.
    pub fn retarget(&mut self, note: u8, velocity: u8, frequency: f32, glide: f32, held: bool) {
        self.note = note;
        self.velocity = velocity;
        self.held = held;
        self.pitch.set_half_time(glide);
        self.pitch.set_target(frequency);
    }

    /// Retrigger for a new note with a glide from the current pitch.
    pub fn glide_to(
        &mut self,
        note: u8,
        velocity: u8,
        frequency: f32,
        glide: f32,
        stamp: u64,
        held: bool,
    ) {
        let from = self.pitch.value();
        let was_sounding = self.is_active();
        self.start(note, velocity, frequency, stamp, held);
        if was_sounding {
            self.pitch.snap(from);
            self.pitch.set_half_time(glide);
            self.pitch.set_target(frequency);
        }
    }

    pub fn release(&mut self, sample_rate: f32) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.amp_env.note_off(sample_rate);
            self.filter_env.note_off(sample_rate);
        }
    }

    /// Hard stop, straight to free.
    pub fn kill(&mut self) {
        self.amp_env.reset();
        self.filter_env.reset();
        self.filter.reset();
        self.free();
    }

    /// Add this voice's output into `out`.
    pub fn render(
        &mut self,
        out: &mut [f32],
        params: &VoiceParams,
        bank: &WaveformBank,
        sample_rate: f32,
    ) {
        if self.is_free() {
            return;
        }

        self.amp_env.set_shape(params.amp_shape);
        self.filter_env.set_shape(params.filter_shape);
        self.filter.set_resonance(params.resonance);
        self.filter.set_type(params.filter_type);

        let gain = VOICE_GAIN * self.velocity as f32 / 127.0;
        let osc1_level = params.osc1_volume * (1.0 - params.balance);
        let osc2_level = params.osc2_volume * params.balance;
        let sub_ratio = if params.sub_octave_down { 0.25 } else { 0.5 };
        let fm_depth = params.fm_volume * params.fm_amount;

        for sample in out.iter_mut() {
            let frequency = self.pitch.next_sample(sample_rate) * params.pitch_ratio;

            let fm = if fm_depth > 0.0 {
                self.fm.next_sample(frequency, sample_rate) * fm_depth * 0.1
            } else {
                0.0
            };

            let osc1 = self.osc1.next_sample(
                bank,
                params.osc1_morph,
                frequency * params.osc1_ratio,
                fm,
                sample_rate,
            );
            let osc2_frequency =
                frequency * params.osc2_ratio * params.detune_multiplier + params.osc2_detune_hz;
            let osc2 =
                self.osc2
                    .next_sample(bank, params.osc2_morph, osc2_frequency, fm, sample_rate);
            let sub = self
                .sub
                .next_sample(frequency * sub_ratio, params.sub_square, sample_rate);
            let noise = self.noise.next_sample();

            let dry = osc1 * osc1_level
                + osc2 * osc2_level
                + sub * params.sub_volume
                + noise * params.noise_volume;

            let filter_level = self.filter_env.next_sample(sample_rate);
            let sweep = (1.0 + (filter_level - 1.0) * params.filter_env_amount).max(0.0);
            let wet = self.filter.process(dry, params.cutoff * sweep, sample_rate);
            let voice = dry + (wet - dry) * params.filter_mix;

            *sample += voice * self.amp_env.next_sample(sample_rate) * gain;
        }

        // Release finished: back to the pool
        if !self.amp_env.is_active() {
            self.free();
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn is_releasing(&self) -> bool {
        self.state == VoiceState::Releasing
    }

    fn free(&mut self) {
        self.state = VoiceState::Free;
        self.held = false;
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    pub fn held(&self) -> bool {
        self.held
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn frequency(&self) -> f32 {
        self.pitch.value()
    }

    pub fn envelope_level(&self) -> f32 {
        self.amp_env.level()
    }

    pub fn envelope_state(&self) -> EnvelopeState {
        self.amp_env.state()
    }
}
