//! Static parameter table.
//!
//! One row per parameter: `Variant => (min, default, max, preset key,
//! display name, unit, smoothed)`. The macro generates the `ParamId` enum and
//! the `PARAMS` slice from the same rows, so ids and descriptors can never
//! drift apart.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ParamDescriptor, ParamUnit};

const BPM_MIN: f32 = 1.0;
const BPM_MAX: f32 = 256.0;
/// A 64th note, as a fraction of a beat.
const MIN_DIVISION_OF_BEAT: f32 = 1.0 / 64.0;
/// Eight bars of four beats.
const MAX_DIVISION_OF_BEAT: f32 = 4.0 * 8.0;
/// LFO rate bounds in Hz (~0.00052 to ~273.07).
const RATE_MIN: f32 = (BPM_MIN / 60.0) / MAX_DIVISION_OF_BEAT;
const RATE_MAX: f32 = (BPM_MAX / 60.0) / MIN_DIVISION_OF_BEAT;

macro_rules! param_table {
    ($($variant:ident => ($min:expr, $default:expr, $max:expr, $key:literal, $name:literal, $unit:ident, $smoothed:literal)),* $(,)?) => {
        /// Identifier of a synthesizer parameter. Discriminants index [`PARAMS`].
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum ParamId {
            $($variant),*
        }

        impl ParamId {
            /// Every parameter, in table order.
            pub const ALL: &'static [ParamId] = &[$(ParamId::$variant),*];
        }

        /// Descriptor table, indexed by `ParamId as usize`.
        pub static PARAMS: &[ParamDescriptor] = &[
            $(ParamDescriptor {
                id: ParamId::$variant,
                min: $min,
                default: $default,
                max: $max,
                preset_key: $key,
                display_name: $name,
                unit: ParamUnit::$unit,
                smoothed: $smoothed,
            }),*
        ];
    };
}

param_table! {
    Index1 => (0.0, 1.0, 1.0, "index1", "Osc 1 Wave", Generic, true),
    Index2 => (0.0, 1.0, 1.0, "index2", "Osc 2 Wave", Generic, true),
    MorphBalance => (0.0, 0.5, 1.0, "morphBalance", "Osc Balance", Generic, true),
    Morph1SemitoneOffset => (-12.0, 0.0, 12.0, "morph1SemitoneOffset", "Osc 1 Semitones", RelativeSemitones, false),
    Morph2SemitoneOffset => (-12.0, 0.0, 12.0, "morph2SemitoneOffset", "Osc 2 Semitones", RelativeSemitones, false),
    Morph1Volume => (0.0, 0.8, 1.0, "morph1Volume", "Osc 1 Volume", Generic, true),
    Morph2Volume => (0.0, 0.8, 1.0, "morph2Volume", "Osc 2 Volume", Generic, true),
    SubVolume => (0.0, 0.0, 1.0, "subVolume", "Sub Volume", Generic, true),
    SubOctaveDown => (0.0, 0.0, 1.0, "subOctaveDown", "Sub Octave Down", Generic, false),
    SubIsSquare => (0.0, 0.0, 1.0, "subIsSquare", "Sub Is Square", Generic, false),
    FmVolume => (0.0, 0.0, 1.0, "fmVolume", "FM Volume", Generic, true),
    FmAmount => (0.0, 0.0, 15.0, "fmAmount", "FM Amount", Generic, true),
    NoiseVolume => (0.0, 0.0, 1.0, "noiseVolume", "Noise Volume", Generic, true),
    Lfo1Index => (0.0, 0.0, 3.0, "lfo1Index", "LFO 1 Wave", Generic, false),
    Lfo1Amplitude => (0.0, 0.0, 1.0, "lfo1Amplitude", "LFO 1 Amount", Generic, true),
    Lfo1Rate => (RATE_MIN, 0.25, RATE_MAX, "lfo1Rate", "LFO 1 Rate", Rate, true),
    Cutoff => (64.0, 20_000.0, 22_050.0, "cutoff", "Cutoff", Hertz, true),
    Resonance => (0.0, 0.1, 0.75, "resonance", "Resonance", Generic, true),
    FilterMix => (0.0, 1.0, 1.0, "filterMix", "Filter Mix", Generic, true),
    FilterAdsrMix => (0.0, 0.0, 1.2, "filterADSRMix", "Filter Envelope Amount", Generic, true),
    IsMono => (0.0, 0.0, 1.0, "isMono", "Mono", Generic, false),
    Glide => (0.0, 0.0, 0.2, "glide", "Glide", Seconds, false),
    FilterAttackDuration => (0.0005, 0.05, 2.0, "filterAttackDuration", "Filter Attack", Seconds, true),
    FilterDecayDuration => (0.005, 0.05, 2.0, "filterDecayDuration", "Filter Decay", Seconds, true),
    FilterSustainLevel => (0.0, 1.0, 1.0, "filterSustainLevel", "Filter Sustain", Generic, true),
    FilterReleaseDuration => (0.0, 0.5, 2.0, "filterReleaseDuration", "Filter Release", Seconds, true),
    AttackDuration => (0.0005, 0.05, 2.0, "attackDuration", "Attack", Seconds, true),
    DecayDuration => (0.0, 0.005, 2.0, "decayDuration", "Decay", Seconds, true),
    SustainLevel => (0.0, 0.8, 1.0, "sustainLevel", "Sustain", Generic, true),
    ReleaseDuration => (0.004, 0.05, 2.0, "releaseDuration", "Release", Seconds, true),
    Morph2Detuning => (-4.0, 0.0, 4.0, "morph2Detuning", "Osc 2 Detune", Hertz, true),
    DetuningMultiplier => (1.0, 1.0, 2.0, "detuningMultiplier", "Detune Multiplier", Generic, true),
    MasterVolume => (0.0, 0.5, 2.0, "masterVolume", "Master Volume", Generic, true),
    BitCrushDepth => (1.0, 24.0, 24.0, "bitCrushDepth", "Bit Depth", Generic, false),
    BitCrushSampleRate => (4096.0, 44_100.0, 48_000.0, "bitCrushSampleRate", "Downsample Rate", Hertz, true),
    AutoPanAmount => (0.0, 0.0, 1.0, "autoPanAmount", "Auto Pan Amount", Generic, true),
    AutoPanFrequency => (0.0, 0.25, 10.0, "autoPanFrequency", "Auto Pan Rate", Hertz, true),
    ReverbOn => (0.0, 1.0, 1.0, "reverbOn", "Reverb On", Generic, false),
    ReverbFeedback => (0.0, 0.5, 1.0, "reverbFeedback", "Reverb Size", Generic, true),
    ReverbHighPass => (80.0, 700.0, 900.0, "reverbHighPass", "Reverb Low Cut", Hertz, true),
    ReverbMix => (0.0, 0.0, 1.0, "reverbMix", "Reverb Mix", Generic, true),
    DelayOn => (0.0, 0.0, 1.0, "delayOn", "Delay On", Generic, false),
    DelayFeedback => (0.0, 0.1, 0.9, "delayFeedback", "Delay Feedback", Generic, true),
    DelayTime => (0.1, 0.5, 1.5, "delayTime", "Delay Time", Seconds, true),
    DelayMix => (0.0, 0.125, 1.0, "delayMix", "Delay Mix", Generic, true),
    Lfo2Index => (0.0, 0.0, 3.0, "lfo2Index", "LFO 2 Wave", Generic, false),
    Lfo2Amplitude => (0.0, 0.0, 1.0, "lfo2Amplitude", "LFO 2 Amount", Generic, true),
    Lfo2Rate => (RATE_MIN, 0.25, RATE_MAX, "lfo2Rate", "LFO 2 Rate", Rate, true),
    CutoffLfo => (0.0, 0.0, 3.0, "cutoffLFO", "Cutoff LFO", Generic, false),
    ResonanceLfo => (0.0, 0.0, 3.0, "resonanceLFO", "Resonance LFO", Generic, false),
    OscMixLfo => (0.0, 0.0, 3.0, "oscMixLFO", "Osc Mix LFO", Generic, false),
    SustainLfo => (0.0, 0.0, 3.0, "sustainLFO", "Sustain LFO", Generic, false),
    DecayLfo => (0.0, 0.0, 3.0, "decayLFO", "Decay LFO", Generic, false),
    NoiseLfo => (0.0, 0.0, 3.0, "noiseLFO", "Noise LFO", Generic, false),
    FmLfo => (0.0, 0.0, 3.0, "fmLFO", "FM LFO", Generic, false),
    DetuneLfo => (0.0, 0.0, 3.0, "detuneLFO", "Detune LFO", Generic, false),
    FilterEnvLfo => (0.0, 0.0, 3.0, "filterEnvLFO", "Filter Envelope LFO", Generic, false),
    PitchLfo => (0.0, 0.0, 3.0, "pitchLFO", "Pitch LFO", Generic, false),
    BitcrushLfo => (0.0, 0.0, 3.0, "bitcrushLFO", "Bitcrush LFO", Generic, false),
    AutopanLfo => (0.0, 0.0, 3.0, "autopanLFO", "Auto Pan LFO", Generic, false),
    ArpDirection => (0.0, 1.0, 2.0, "arpDirection", "Arp Direction", Generic, false),
    ArpInterval => (0.0, 12.0, 12.0, "arpInterval", "Arp Interval", RelativeSemitones, false),
    ArpIsOn => (0.0, 0.0, 1.0, "arpIsOn", "Arp On", Generic, false),
    ArpOctave => (0.0, 1.0, 3.0, "arpOctave", "Arp Octaves", Generic, false),
    ArpRate => (BPM_MIN, 120.0, BPM_MAX, "arpRate", "Arp Tempo", Bpm, false),
    ArpIsSequencer => (0.0, 0.0, 1.0, "arpIsSequencer", "Sequencer Mode", Generic, false),
    ArpTotalSteps => (1.0, 4.0, 16.0, "arpTotalSteps", "Sequencer Steps", Generic, false),
    ArpSeqPattern00 => (-24.0, 0.0, 24.0, "arpSeqPattern00", "Seq Step 1", RelativeSemitones, false),
    ArpSeqPattern01 => (-24.0, 0.0, 24.0, "arpSeqPattern01", "Seq Step 2", RelativeSemitones, false),
    ArpSeqPattern02 => (-24.0, 0.0, 24.0, "arpSeqPattern02", "Seq Step 3", RelativeSemitones, false),
    ArpSeqPattern03 => (-24.0, 0.0, 24.0, "arpSeqPattern03", "Seq Step 4", RelativeSemitones, false),
    ArpSeqPattern04 => (-24.0, 0.0, 24.0, "arpSeqPattern04", "Seq Step 5", RelativeSemitones, false),
    ArpSeqPattern05 => (-24.0, 0.0, 24.0, "arpSeqPattern05", "Seq Step 6", RelativeSemitones, false),
    ArpSeqPattern06 => (-24.0, 0.0, 24.0, "arpSeqPattern06", "Seq Step 7", RelativeSemitones, false),
    ArpSeqPattern07 => (-24.0, 0.0, 24.0, "arpSeqPattern07", "Seq Step 8", RelativeSemitones, false),
    ArpSeqPattern08 => (-24.0, 0.0, 24.0, "arpSeqPattern08", "Seq Step 9", RelativeSemitones, false),
    ArpSeqPattern09 => (-24.0, 0.0, 24.0, "arpSeqPattern09", "Seq Step 10", RelativeSemitones, false),
    ArpSeqPattern10 => (-24.0, 0.0, 24.0, "arpSeqPattern10", "Seq Step 11", RelativeSemitones, false),
    ArpSeqPattern11 => (-24.0, 0.0, 24.0, "arpSeqPattern11", "Seq Step 12", RelativeSemitones, false),
    ArpSeqPattern12 => (-24.0, 0.0, 24.0, "arpSeqPattern12", "Seq Step 13", RelativeSemitones, false),
    ArpSeqPattern13 => (-24.0, 0.0, 24.0, "arpSeqPattern13", "Seq Step 14", RelativeSemitones, false),
    ArpSeqPattern14 => (-24.0, 0.0, 24.0, "arpSeqPattern14", "Seq Step 15", RelativeSemitones, false),
    ArpSeqPattern15 => (-24.0, 0.0, 24.0, "arpSeqPattern15", "Seq Step 16", RelativeSemitones, false),
    ArpSeqOctBoost00 => (0.0, 0.0, 1.0, "arpSeqOctBoost00", "Seq Octave Boost 1", Generic, false),
    ArpSeqOctBoost01 => (0.0, 0.0, 1.0, "arpSeqOctBoost01", "Seq Octave Boost 2", Generic, false),
    ArpSeqOctBoost02 => (0.0, 0.0, 1.0, "arpSeqOctBoost02", "Seq Octave Boost 3", Generic, false),
    ArpSeqOctBoost03 => (0.0, 0.0, 1.0, "arpSeqOctBoost03", "Seq Octave Boost 4", Generic, false),
    ArpSeqOctBoost04 => (0.0, 0.0, 1.0, "arpSeqOctBoost04", "Seq Octave Boost 5", Generic, false),
    ArpSeqOctBoost05 => (0.0, 0.0, 1.0, "arpSeqOctBoost05", "Seq Octave Boost 6", Generic, false),
    ArpSeqOctBoost06 => (0.0, 0.0, 1.0, "arpSeqOctBoost06", "Seq Octave Boost 7", Generic, false),
    ArpSeqOctBoost07 => (0.0, 0.0, 1.0, "arpSeqOctBoost07", "Seq Octave Boost 8", Generic, false),
    ArpSeqOctBoost08 => (0.0, 0.0, 1.0, "arpSeqOctBoost08", "Seq Octave Boost 9", Generic, false),
    ArpSeqOctBoost09 => (0.0, 0.0, 1.0, "arpSeqOctBoost09", "Seq Octave Boost 10", Generic, false),
    ArpSeqOctBoost10 => (0.0, 0.0, 1.0, "arpSeqOctBoost10", "Seq Octave Boost 11", Generic, false),
    ArpSeqOctBoost11 => (0.0, 0.0, 1.0, "arpSeqOctBoost11", "Seq Octave Boost 12", Generic, false),
    ArpSeqOctBoost12 => (0.0, 0.0, 1.0, "arpSeqOctBoost12", "Seq Octave Boost 13", Generic, false),
    ArpSeqOctBoost13 => (0.0, 0.0, 1.0, "arpSeqOctBoost13", "Seq Octave Boost 14", Generic, false),
    ArpSeqOctBoost14 => (0.0, 0.0, 1.0, "arpSeqOctBoost14", "Seq Octave Boost 15", Generic, false),
    ArpSeqOctBoost15 => (0.0, 0.0, 1.0, "arpSeqOctBoost15", "Seq Octave Boost 16", Generic, false),
    ArpSeqNoteOn00 => (0.0, 0.0, 1.0, "arpSeqNoteOn00", "Seq Step On 1", Generic, false),
    ArpSeqNoteOn01 => (0.0, 0.0, 1.0, "arpSeqNoteOn01", "Seq Step On 2", Generic, false),
    ArpSeqNoteOn02 => (0.0, 0.0, 1.0, "arpSeqNoteOn02", "Seq Step On 3", Generic, false),
    ArpSeqNoteOn03 => (0.0, 0.0, 1.0, "arpSeqNoteOn03", "Seq Step On 4", Generic, false),
    ArpSeqNoteOn04 => (0.0, 0.0, 1.0, "arpSeqNoteOn04", "Seq Step On 5", Generic, false),
    ArpSeqNoteOn05 => (0.0, 0.0, 1.0, "arpSeqNoteOn05", "Seq Step On 6", Generic, false),
    ArpSeqNoteOn06 => (0.0, 0.0, 1.0, "arpSeqNoteOn06", "Seq Step On 7", Generic, false),
    ArpSeqNoteOn07 => (0.0, 0.0, 1.0, "arpSeqNoteOn07", "Seq Step On 8", Generic, false),
    ArpSeqNoteOn08 => (0.0, 0.0, 1.0, "arpSeqNoteOn08", "Seq Step On 9", Generic, false),
    ArpSeqNoteOn09 => (0.0, 0.0, 1.0, "arpSeqNoteOn09", "Seq Step On 10", Generic, false),
    ArpSeqNoteOn10 => (0.0, 0.0, 1.0, "arpSeqNoteOn10", "Seq Step On 11", Generic, false),
    ArpSeqNoteOn11 => (0.0, 0.0, 1.0, "arpSeqNoteOn11", "Seq Step On 12", Generic, false),
    ArpSeqNoteOn12 => (0.0, 0.0, 1.0, "arpSeqNoteOn12", "Seq Step On 13", Generic, false),
    ArpSeqNoteOn13 => (0.0, 0.0, 1.0, "arpSeqNoteOn13", "Seq Step On 14", Generic, false),
    ArpSeqNoteOn14 => (0.0, 0.0, 1.0, "arpSeqNoteOn14", "Seq Step On 15", Generic, false),
    ArpSeqNoteOn15 => (0.0, 0.0, 1.0, "arpSeqNoteOn15", "Seq Step On 16", Generic, false),
    FilterType => (0.0, 0.0, 2.0, "filterType", "Filter Type", Generic, false),
    PhaserMix => (0.0, 0.0, 1.0, "phaserMix", "Phaser Mix", Generic, true),
    PhaserRate => (1.0, 12.0, 300.0, "phaserRate", "Phaser Rate", Hertz, true),
    PhaserFeedback => (0.0, 0.0, 0.8, "phaserFeedback", "Phaser Feedback", Generic, true),
    PhaserNotchWidth => (100.0, 800.0, 1000.0, "phaserNotchWidth", "Phaser Notch Width", Hertz, true),
    MonoIsLegato => (0.0, 0.0, 1.0, "monoIsLegato", "Legato", Generic, false),
    ArpDivision => (1.0, 4.0, 8.0, "arpDivision", "Arp Steps Per Beat", Generic, false),
}

/// Number of parameters in the table.
pub const PARAM_COUNT: usize = ParamId::ALL.len();

// Dirty tracking packs parameter ids into a single u128.
const _: () = assert!(PARAM_COUNT <= 128);
