//! Display state fed by engine notifications.

use std::collections::VecDeque;

use saavy_synth::{NoteSet, ParamId, SynthObserver};

/// Parameter changes kept for the activity log.
const CHANGE_LOG_LEN: usize = 6;

#[derive(Default)]
pub struct UiState {
    pub held: NoteSet,
    pub playing: NoteSet,
    pub beat: u64,
    pub changes: VecDeque<(ParamId, f32)>,
}

impl SynthObserver for UiState {
    fn parameter_changed(&mut self, id: ParamId, value: f32) {
        if self.changes.len() == CHANGE_LOG_LEN {
            self.changes.pop_front();
        }
        self.changes.push_back((id, value));
    }

    fn beat_counter_changed(&mut self, beat: u64) {
        self.beat = beat;
    }

    fn held_notes_changed(&mut self, notes: NoteSet) {
        self.held = notes;
    }

    fn playing_notes_changed(&mut self, notes: NoteSet) {
        self.playing = notes;
    }
}

/// Note name such as "C#4" (MIDI 60 = C4).
pub fn note_name(note: u8) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = note as i32 / 12 - 1;
    format!("{}{}", NAMES[note as usize % 12], octave)
}

pub fn note_list(notes: NoteSet) -> String {
    if notes.is_empty() {
        return "-".to_string();
    }
    notes
        .iter()
        .map(note_name)
        .collect::<Vec<_>>()
        .join(" ")
}
