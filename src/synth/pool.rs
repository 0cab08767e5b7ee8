use std::cmp::Ordering;

use crate::{
    config::MAX_POLYPHONY,
    dsp::waveform::WaveformBank,
    io::converter::midi_note_to_freq,
    synth::{
        held::HeldNote,
        note_set::NoteSet,
        voice::{Voice, VoiceParams},
    },
};

/*
Voice Allocation
================

The pool owns `capacity` polyphonic voices plus one extra voice reserved for
mono mode. Nothing is allocated after construction.

Poly note-on picks a slot in this order:

  1. a voice already sounding the same note   → retrigger it
  2. a free voice                             → start it
  3. otherwise steal                          → restart the victim

The victim is the minimum under a total order:

    releasing  <  active                 (already on its way out)
    not held   <  held                   (arp notes before played keys)
    older stamp <  newer stamp           (first in, first stolen)
    lower note  <  higher note           (tie-break, keeps it deterministic)

Restarting a voice never drops its envelope to zero; the attack ramps from the
current level, so a steal does not click.

Mono
----

One voice. A new note while the previous one is still gated either continues
the envelope (legato) or retriggers it; in both cases pitch glides over the
`Glide` time. Releasing the sounding key while other keys are still down falls
back to the most recent of them without retriggering (last-note priority).
*/

/// Receiver of note events generated inside the render context.
pub trait NoteSink {
    fn note_on(&mut self, note: u8, velocity: u8);
    fn note_off(&mut self, note: u8);
}

/// Total order used to pick a voice to steal. `Less` means a better victim.
pub fn steal_order(a: &Voice, b: &Voice) -> Ordering {
    b.is_releasing()
        .cmp(&a.is_releasing())
        .then(a.held().cmp(&b.held()))
        .then(a.stamp().cmp(&b.stamp()))
        .then(a.note().cmp(&b.note()))
}

pub struct VoicePool {
    voices: Vec<Voice>,
    mono_voice: Voice,
    capacity: usize,
    next_stamp: u64,
    mono: bool,
    legato: bool,
    glide: f32,
    sample_rate: f32,
}

impl VoicePool {
    pub fn new(capacity: usize, sample_rate: f32) -> Self {
        let mut pool = Self {
            voices: Vec::new(),
            mono_voice: Voice::new(0x1234_5678),
            capacity: capacity.clamp(1, MAX_POLYPHONY),
            next_stamp: 0,
            mono: false,
            legato: false,
            glide: 0.0,
            sample_rate,
        };
        pool.allocate_if_needed();
        pool
    }

    /// Make sure voice storage matches the configured capacity. Returns true
    /// when the storage was rebuilt. Only call outside of steady-state
    /// rendering (construction, DSP reset).
    pub fn allocate_if_needed(&mut self) -> bool {
        if self.voices.len() == self.capacity {
            return false;
        }
        self.voices = (0..self.capacity)
            .map(|i| Voice::new(0x9E37_79B9 ^ (i as u32 + 1).wrapping_mul(0x85EB_CA6B)))
            .collect();
        true
    }

    /// Apply the mono/legato/glide settings. Switching between mono and poly
    /// releases everything that is sounding. Returns true on a mode switch.
    pub fn configure(&mut self, mono: bool, legato: bool, glide: f32) -> bool {
        self.legato = legato;
        self.glide = glide.max(0.0);
        if mono == self.mono {
            return false;
        }
        self.stop_all_notes();
        self.mono = mono;
        true
    }

    pub fn note_on(&mut self, note: u8, velocity: u8, frequency: Option<f32>, held: bool) {
        if note > 127 {
            return;
        }
        let frequency = frequency.unwrap_or_else(|| midi_note_to_freq(note));
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if self.mono {
            let voice = &mut self.mono_voice;
            let gated = voice.is_active() && !voice.is_releasing();
            if gated && self.legato {
                voice.retarget(note, velocity, frequency, self.glide, held);
            } else {
                voice.glide_to(note, velocity, frequency, self.glide, stamp, held);
            }
            return;
        }

        let index = self
            .voices
            .iter()
            .position(|v| v.is_active() && v.note() == note)
            .or_else(|| self.voices.iter().position(|v| v.is_free()))
            .or_else(|| self.steal_candidate());

        if let Some(index) = index {
            self.voices[index].start(note, velocity, frequency, stamp, held);
        }
    }

    /// Release `note`. In mono mode, `fallback` is the most recent key still
    /// held; the voice moves to it instead of releasing. Returns false when
    /// the note was not sounding.
    pub fn note_off(&mut self, note: u8, fallback: Option<HeldNote>) -> bool {
        if self.mono {
            let voice = &mut self.mono_voice;
            if voice.is_releasing() || !voice.is_active() || voice.note() != note {
                return false;
            }
            match fallback {
                Some(next) => {
                    let frequency = next.frequency.unwrap_or_else(|| midi_note_to_freq(next.note));
                    voice.retarget(next.note, next.velocity, frequency, self.glide, true);
                }
                None => voice.release(self.sample_rate),
            }
            return true;
        }

        match self
            .voices
            .iter_mut()
            .find(|v| v.is_active() && !v.is_releasing() && v.note() == note)
        {
            Some(voice) => {
                voice.release(self.sample_rate);
                true
            }
            None => false,
        }
    }

    fn steal_candidate(&self) -> Option<usize> {
        self.voices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| steal_order(a, b))
            .map(|(index, _)| index)
    }

    /// Release every sounding voice.
    pub fn stop_all_notes(&mut self) {
        let sample_rate = self.sample_rate;
        for voice in self.all_voices_mut() {
            voice.release(sample_rate);
        }
    }

    /// Hard stop: every voice straight to free.
    pub fn reset(&mut self) {
        for voice in self.all_voices_mut() {
            voice.kill();
        }
    }

    /// Add every sounding voice into `out`.
    pub fn render(&mut self, out: &mut [f32], params: &VoiceParams, bank: &WaveformBank) {
        let sample_rate = self.sample_rate;
        for voice in self.all_voices_mut() {
            voice.render(out, params, bank, sample_rate);
        }
    }

    fn all_voices_mut(&mut self) -> impl Iterator<Item = &mut Voice> {
        self.voices
            .iter_mut()
            .chain(std::iter::once(&mut self.mono_voice))
    }

    fn all_voices(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter().chain(std::iter::once(&self.mono_voice))
    }

    /// Notes whose gate is still on (started and not yet released).
    pub fn playing_notes(&self) -> NoteSet {
        self.all_voices()
            .filter(|v| v.is_active() && !v.is_releasing())
            .map(|v| v.note())
            .collect()
    }

    /// Voices producing output, including ones in release.
    pub fn sounding_count(&self) -> usize {
        self.all_voices().filter(|v| v.is_active()).count()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn mono_voice(&self) -> &Voice {
        &self.mono_voice
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_mono(&self) -> bool {
        self.mono
    }
}

impl NoteSink for VoicePool {
    fn note_on(&mut self, note: u8, velocity: u8) {
        VoicePool::note_on(self, note, velocity, None, false);
    }

    fn note_off(&mut self, note: u8) {
        VoicePool::note_off(self, note, None);
    }
}
