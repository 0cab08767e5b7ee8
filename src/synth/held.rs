use crate::{synth::note_set::NoteSet, NUM_MIDI_NOTES};

/// A key that is currently down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldNote {
    pub note: u8,
    pub velocity: u8,
    /// Explicit frequency from the note-on, if one was given.
    pub frequency: Option<f32>,
}

impl HeldNote {
    const EMPTY: HeldNote = HeldNote {
        note: 0,
        velocity: 0,
        frequency: None,
    };
}

/// Notes with a note-on but no note-off yet, in press order (oldest first).
///
/// Backed by a fixed array with one slot per MIDI note, so pressing and
/// releasing never allocates.
pub struct HeldNotes {
    notes: [HeldNote; NUM_MIDI_NOTES],
    len: usize,
}

impl HeldNotes {
    pub fn new() -> Self {
        Self {
            notes: [HeldNote::EMPTY; NUM_MIDI_NOTES],
            len: 0,
        }
    }

    /// Record a key press. A note that is already held moves to the most
    /// recent position with its new velocity. Returns true if the note was
    /// not held before.
    pub fn press(&mut self, note: u8, velocity: u8, frequency: Option<f32>) -> bool {
        if note as usize >= NUM_MIDI_NOTES {
            return false;
        }

        let was_held = self.remove_entry(note);
        self.notes[self.len] = HeldNote {
            note,
            velocity,
            frequency,
        };
        self.len += 1;
        !was_held
    }

    /// Record a key release. Returns false if the note was not held.
    pub fn release(&mut self, note: u8) -> bool {
        self.remove_entry(note)
    }

    fn remove_entry(&mut self, note: u8) -> bool {
        let Some(position) = self.as_slice().iter().position(|held| held.note == note) else {
            return false;
        };
        self.notes.copy_within(position + 1..self.len, position);
        self.len -= 1;
        true
    }

    pub fn contains(&self, note: u8) -> bool {
        self.as_slice().iter().any(|held| held.note == note)
    }

    /// Most recently pressed note still held.
    pub fn latest(&self) -> Option<HeldNote> {
        self.as_slice().last().copied()
    }

    pub fn as_slice(&self) -> &[HeldNote] {
        &self.notes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn to_set(&self) -> NoteSet {
        self.as_slice().iter().map(|held| held.note).collect()
    }

    /// Write the held note numbers into `buffer` in ascending order and
    /// return the filled prefix.
    pub fn sorted_into<'a>(&self, buffer: &'a mut [u8; NUM_MIDI_NOTES]) -> &'a [u8] {
        for (slot, held) in buffer.iter_mut().zip(self.as_slice()) {
            *slot = held.note;
        }
        let sorted = &mut buffer[..self.len];
        sorted.sort_unstable();
        sorted
    }
}

impl Default for HeldNotes {
    fn default() -> Self {
        Self::new()
    }
}
