use crate::{
    io::midi::{MidiEvent, CC_ALL_NOTES_OFF},
    synth::message::SynthMessage,
};

/// Translate a MIDI event on `channel_filter` into an engine event.
///
/// Note-on with velocity 0 is a note-off. CC 123 (all notes off) stops every
/// note. Everything else is ignored.
pub fn midi_to_synth(midi: MidiEvent, channel_filter: u8) -> Option<SynthMessage> {
    if midi.channel() != channel_filter {
        return None;
    }

    match midi {
        MidiEvent::NoteOn { key, velocity: 0, .. } | MidiEvent::NoteOff { key, .. } => {
            Some(SynthMessage::NoteOff { note: key })
        }
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
            frequency: None,
        }),
        MidiEvent::ControlChange {
            controller: CC_ALL_NOTES_OFF,
            ..
        } => Some(SynthMessage::StopAllNotes),
        _ => None,
    }
}

/// Equal-tempered frequency of a MIDI note, A4 (69) = 440 Hz.
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
