use crate::{params::ParamId, synth::note_set::NoteSet};

/// Render → control state report, batched at the end of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// A parameter's stored value changed (clamped target value).
    ParameterChanged { id: ParamId, value: f32 },
    BeatCounterChanged(u64),
    HeldNotesChanged(NoteSet),
    PlayingNotesChanged(NoteSet),
}

impl Notification {
    pub fn dispatch(self, observer: &mut impl SynthObserver) {
        match self {
            Notification::ParameterChanged { id, value } => observer.parameter_changed(id, value),
            Notification::BeatCounterChanged(beat) => observer.beat_counter_changed(beat),
            Notification::HeldNotesChanged(notes) => observer.held_notes_changed(notes),
            Notification::PlayingNotesChanged(notes) => observer.playing_notes_changed(notes),
        }
    }
}

/// Receives notifications on the control thread via [`EngineHandle::poll`].
///
/// Every method defaults to doing nothing; implement the ones you need.
///
/// [`EngineHandle::poll`]: crate::engine::handle::EngineHandle::poll
pub trait SynthObserver {
    fn parameter_changed(&mut self, _id: ParamId, _value: f32) {}
    fn beat_counter_changed(&mut self, _beat: u64) {}
    fn held_notes_changed(&mut self, _notes: NoteSet) {}
    fn playing_notes_changed(&mut self, _notes: NoteSet) {}
}

/// Observer that ignores everything.
impl SynthObserver for () {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Beats(Vec<u64>);

    impl SynthObserver for Beats {
        fn beat_counter_changed(&mut self, beat: u64) {
            self.0.push(beat);
        }
    }

    #[test]
    fn dispatch_routes_to_matching_callback() {
        let mut beats = Beats::default();
        Notification::BeatCounterChanged(3).dispatch(&mut beats);
        Notification::HeldNotesChanged(NoteSet::EMPTY).dispatch(&mut beats);
        Notification::ParameterChanged {
            id: ParamId::Cutoff,
            value: 100.0,
        }
        .dispatch(&mut beats);
        assert_eq!(beats.0, vec![3]);
    }
}
