/*
Arpeggiator / Step Sequencer
============================

Runs once per render block, after events are applied and before voices
render. It reads the held keys and the registry, and plays notes into a
`NoteSink` (the voice pool) on beats from the `BeatClock`.

Arpeggio mode
-------------

The held keys, sorted ascending, are repeated across `ArpOctave + 1` octaves
of `ArpInterval` semitones each:

    held {60, 64, 67}, 2 octaves of 12  →  60 64 67 72 76 79

Direction picks the walk through that list:

    up       60 64 67 72 76 79 | 60 ...
    down     79 76 72 67 64 60 | 79 ...
    up-down  60 64 67 72 76 79 76 72 67 64 | 60 ...   (ends not repeated)

Sequencer mode
--------------

Steps through the registry pattern (see `pattern`), transposing every held
key by the step's offset. Rest steps and steps with no held keys still
advance.

Every beat releases whatever the previous beat played before starting the
new notes, so arpeggiated notes never overlap.
*/

use crate::{
    params::{ParamId, ParameterRegistry},
    sequencing::{
        clock::BeatClock,
        pattern::{active_steps, PatternSlot},
    },
    synth::{held::HeldNotes, note_set::NoteSet, pool::NoteSink},
    NUM_MIDI_NOTES,
};

/// Velocity of every generated note.
pub const ARP_VELOCITY: u8 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpDirection {
    Up,
    UpDown,
    Down,
}

impl ArpDirection {
    /// Map the registry's 0/1/2 selector onto a direction.
    pub fn from_selector(value: i32) -> Self {
        match value {
            0 => ArpDirection::Up,
            2 => ArpDirection::Down,
            _ => ArpDirection::UpDown,
        }
    }
}

/// Sorted held keys expanded over octaves, indexed without materialising the
/// full list.
struct OctaveSpan<'a> {
    notes: &'a [u8],
    octaves: usize,
    interval: i32,
}

impl OctaveSpan<'_> {
    fn len(&self) -> usize {
        self.notes.len() * self.octaves
    }

    fn get(&self, index: usize) -> i32 {
        let octave = index / self.notes.len();
        self.notes[index % self.notes.len()] as i32 + octave as i32 * self.interval
    }

    /// Note for `step` walking in `direction`. `None` when empty.
    fn walk(&self, direction: ArpDirection, step: usize) -> Option<(i32, usize)> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let (position, cycle) = match direction {
            ArpDirection::Up => (step % len, len),
            ArpDirection::Down => (len - 1 - step % len, len),
            ArpDirection::UpDown if len == 1 => (0, 1),
            ArpDirection::UpDown => {
                let cycle = 2 * len - 2;
                let index = step % cycle;
                let position = if index < len { index } else { cycle - index };
                (position, cycle)
            }
        };
        Some((self.get(position), cycle))
    }
}

pub struct ArpSequencer {
    enabled: bool,
    step: usize,
    beat_counter: u64,
    clock: BeatClock,
    last_notes: NoteSet,
    sorted: [u8; NUM_MIDI_NOTES],
}

impl ArpSequencer {
    pub fn new() -> Self {
        Self {
            enabled: false,
            step: 0,
            beat_counter: 0,
            clock: BeatClock::new(),
            last_notes: NoteSet::EMPTY,
            sorted: [0; NUM_MIDI_NOTES],
        }
    }

    /// Turn on and restart from step 0.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.reset();
    }

    /// Turn off and release whatever the last beat played.
    pub fn disable(&mut self, sink: &mut impl NoteSink) {
        self.enabled = false;
        self.release_last(sink);
    }

    /// Step, beat counter and clock back to zero. Held keys are untouched.
    pub fn reset(&mut self) {
        self.step = 0;
        self.beat_counter = 0;
        self.clock.reset();
    }

    /// Forget emitted notes without releasing them (the voices were killed).
    pub fn clear_emitted(&mut self) {
        self.last_notes.clear();
    }

    /// Advance by one block of `frames`. Returns the new beat counter when a
    /// beat advanced it.
    pub fn process(
        &mut self,
        frames: usize,
        params: &ParameterRegistry,
        held: &HeldNotes,
        sink: &mut impl NoteSink,
    ) -> Option<u64> {
        if !self.enabled {
            return None;
        }

        let period = BeatClock::period_samples(
            params.sample_rate(),
            params.get(ParamId::ArpRate),
            params.get(ParamId::ArpDivision),
        );
        if !self.clock.advance(frames, period) {
            return None;
        }

        if params.flag(ParamId::ArpIsSequencer) {
            self.sequencer_beat(params, held, sink);
        } else if !self.arpeggio_beat(params, held, sink) {
            return None;
        }

        self.beat_counter += 1;
        Some(self.beat_counter)
    }

    fn arpeggio_beat(
        &mut self,
        params: &ParameterRegistry,
        held: &HeldNotes,
        sink: &mut impl NoteSink,
    ) -> bool {
        self.release_last(sink);

        let notes = held.sorted_into(&mut self.sorted);
        let span = OctaveSpan {
            notes,
            octaves: params.whole(ParamId::ArpOctave).max(0) as usize + 1,
            interval: params.whole(ParamId::ArpInterval),
        };
        let direction = ArpDirection::from_selector(params.whole(ParamId::ArpDirection));

        let Some((note, cycle)) = span.walk(direction, self.step) else {
            return false;
        };

        if let Ok(note) = u8::try_from(note) {
            if note <= 127 {
                sink.note_on(note, ARP_VELOCITY);
                self.last_notes.insert(note);
            }
        }
        self.step = (self.step % cycle) + 1;
        true
    }

    fn sequencer_beat(
        &mut self,
        params: &ParameterRegistry,
        held: &HeldNotes,
        sink: &mut impl NoteSink,
    ) {
        self.release_last(sink);

        let steps = active_steps(params);
        let index = self.step % steps;
        let slot = PatternSlot::from_registry(params, index);

        if slot.enabled {
            for reference in held.as_slice() {
                if let Some(note) = slot.apply(reference.note) {
                    sink.note_on(note, ARP_VELOCITY);
                    self.last_notes.insert(note);
                }
            }
        }
        self.step = index + 1;
    }

    fn release_last(&mut self, sink: &mut impl NoteSink) {
        for note in self.last_notes {
            sink.note_off(note);
        }
        self.last_notes.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn beat_counter(&self) -> u64 {
        self.beat_counter
    }

    pub fn clock(&self) -> &BeatClock {
        &self.clock
    }

    /// Notes the last beat started that are still sounding.
    pub fn last_notes(&self) -> NoteSet {
        self.last_notes
    }
}

impl Default for ArpSequencer {
    fn default() -> Self {
        Self::new()
    }
}
