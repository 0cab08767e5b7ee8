use crate::MIN_TIME;

/*
ADSR Envelope
=============

Linear attack/decay/sustain/release generator. Every voice owns two: one for
amplitude, one for the filter cutoff.

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Per-sample increments are derived from stage durations:

    increment = distance / (time_seconds * sample_rate)


Retriggering Without Clicks
---------------------------

Voices get retriggered constantly: the same key struck twice, a slot stolen
for a new note, the arpeggiator re-sounding a note it just released. If
note_on dropped the level to 0.0 the output would jump, which is an audible
click. Instead the attack ramps up from wherever the level currently is:

    level ──╮            ╱╲
            ╰─╮        ╱    ╲___
              ╰──────╱  ← attack starts from the current level
                   ↑
                note_on during release

`reset()` is the hard version: straight to Idle and 0.0. It is only used for
panic/reset paths where a click is acceptable.


Release
-------

note_off snapshots the current level and the release length in samples, then
interpolates linearly to zero so the envelope lands exactly on 0.0 and goes
Idle. Release can start from any stage.

Shape parameters may change while a note sounds (they are driven by smoothed
registry values). Attack/decay/sustain changes take effect on the next sample;
the release length is fixed at note_off.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrShape {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl AdsrShape {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(MIN_TIME),
            decay: decay.max(MIN_TIME),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(MIN_TIME),
        }
    }
}

impl Default for AdsrShape {
    fn default() -> Self {
        Self::new(0.01, 0.1, 0.7, 0.3)
    }
}

pub struct Envelope {
    shape: AdsrShape,

    stage: EnvelopeState,
    level: f32,

    decay_start_level: f32,

    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new() -> Self {
        Self::with_shape(AdsrShape::default())
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self::with_shape(AdsrShape::new(attack, decay, sustain, release))
    }

    pub fn with_shape(shape: AdsrShape) -> Self {
        Self {
            shape,
            stage: EnvelopeState::Idle,
            level: 0.0,
            decay_start_level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    pub fn set_shape(&mut self, shape: AdsrShape) {
        self.shape = shape;
    }

    /// Gate high: attack from the current level.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: release from the current level.
    pub fn note_off(&mut self, sample_rate: f32) {
        if matches!(self.stage, EnvelopeState::Idle | EnvelopeState::Release) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.shape.release * sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance the envelope by one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += 1.0 / (self.shape.attack * sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.decay_start_level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.shape.sustain;
                let total_drop = self.decay_start_level - target;
                self.level -= total_drop / (self.shape.decay * sample_rate);
                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.shape.sustain;
            }

            EnvelopeState::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);
                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        self.level = self.level.clamp(0.0, 1.0);
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(sample_rate);
        }
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn is_releasing(&self) -> bool {
        matches!(self.stage, EnvelopeState::Release)
    }

    /// Hard stop: straight to idle at zero.
    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.decay_start_level = 0.0;
        self.release_elapsed_samples = 0;
        self.release_start_level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
