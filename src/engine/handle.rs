use rtrb::{Consumer, Producer};

use crate::{
    engine::observer::{Notification, SynthObserver},
    params::{ParamId, PARAMS, PARAM_COUNT},
    synth::message::SynthMessage,
};

/// Errors returned by [`EngineHandle`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The event queue is full; the event was not sent. Existing events are
    /// left untouched.
    QueueFull,
    /// The render side was dropped.
    Disconnected,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::QueueFull => write!(f, "Event queue is full, event dropped"),
            EngineError::Disconnected => write!(f, "Render engine is no longer running"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Control-thread side of the engine.
///
/// Every mutation is queued for the render thread. The handle keeps its own
/// copy of the parameter values so reads never touch render state; the copy
/// follows the render side through `ParameterChanged` notifications.
pub struct EngineHandle {
    tx: Producer<SynthMessage>,
    notifications: Consumer<Notification>,
    parameters: [f32; PARAM_COUNT],
}

impl EngineHandle {
    pub(crate) fn new(tx: Producer<SynthMessage>, notifications: Consumer<Notification>) -> Self {
        let mut parameters = [0.0; PARAM_COUNT];
        for descriptor in PARAMS {
            parameters[descriptor.id.index()] = descriptor.default;
        }

        Self {
            tx,
            notifications,
            parameters,
        }
    }

    fn send(&mut self, message: SynthMessage) -> Result<(), EngineError> {
        if self.tx.is_abandoned() {
            return Err(EngineError::Disconnected);
        }

        self.tx.push(message).map_err(|_| {
            log::warn!(target: "engine", "Event queue full, dropping {}", message_name(&message));
            EngineError::QueueFull
        })
    }

    /// Queue a parameter change. The value is clamped into range.
    pub fn set_parameter(&mut self, id: ParamId, value: f32) -> Result<(), EngineError> {
        let value = id.clamp(value);
        self.send(SynthMessage::SetParameter { id, value })?;
        self.parameters[id.index()] = value;
        Ok(())
    }

    /// Follow a host tempo (BPM). The arpeggiator clock runs from `ArpRate`,
    /// so this is a clamped write of that parameter.
    pub fn set_tempo(&mut self, bpm: f32) -> Result<(), EngineError> {
        self.set_parameter(ParamId::ArpRate, bpm)
    }

    /// Last value set or reported for `id`.
    pub fn parameter(&self, id: ParamId) -> f32 {
        self.parameters[id.index()]
    }

    pub fn parameter_min(&self, id: ParamId) -> f32 {
        id.min()
    }

    pub fn parameter_max(&self, id: ParamId) -> f32 {
        id.max()
    }

    pub fn parameter_default(&self, id: ParamId) -> f32 {
        id.default_value()
    }

    /// All parameter values in table order.
    pub fn parameters(&self) -> [f32; PARAM_COUNT] {
        self.parameters
    }

    /// Replace every parameter at once. Each value is clamped independently.
    /// Sent as a single event, so either all values are queued or none are.
    pub fn set_parameters(&mut self, values: &[f32; PARAM_COUNT]) -> Result<(), EngineError> {
        let mut clamped = [0.0; PARAM_COUNT];
        for (&id, slot) in ParamId::ALL.iter().zip(clamped.iter_mut()) {
            *slot = id.clamp(values[id.index()]);
        }
        self.send(SynthMessage::SetParameters(clamped))?;
        self.parameters = clamped;
        Ok(())
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) -> Result<(), EngineError> {
        self.send(SynthMessage::NoteOn {
            note,
            velocity,
            frequency: None,
        })
    }

    /// Note-on at an explicit frequency instead of the note's tempered pitch.
    pub fn note_on_with_frequency(
        &mut self,
        note: u8,
        velocity: u8,
        frequency: f32,
    ) -> Result<(), EngineError> {
        self.send(SynthMessage::NoteOn {
            note,
            velocity,
            frequency: Some(frequency),
        })
    }

    pub fn note_off(&mut self, note: u8) -> Result<(), EngineError> {
        self.send(SynthMessage::NoteOff { note })
    }

    pub fn stop_all_notes(&mut self) -> Result<(), EngineError> {
        self.send(SynthMessage::StopAllNotes)
    }

    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.send(SynthMessage::Reset)
    }

    pub fn reset_dsp(&mut self) -> Result<(), EngineError> {
        self.send(SynthMessage::ResetDsp)
    }

    pub fn reset_sequencer(&mut self) -> Result<(), EngineError> {
        self.send(SynthMessage::ResetSequencer)
    }

    pub fn setup_waveform(&mut self, table: usize, size: usize) -> Result<(), EngineError> {
        log::debug!(target: "engine", "Waveform table {} set up with {} samples", table, size);
        self.send(SynthMessage::SetupWaveform { table, size })
    }

    pub fn set_waveform_value(
        &mut self,
        table: usize,
        index: usize,
        value: f32,
    ) -> Result<(), EngineError> {
        self.send(SynthMessage::SetWaveformValue {
            table,
            index,
            value,
        })
    }

    /// Free slots in the event queue.
    pub fn available_slots(&self) -> usize {
        self.tx.slots()
    }

    /// Deliver pending notifications to `observer`. Returns how many were
    /// delivered.
    pub fn poll(&mut self, observer: &mut impl SynthObserver) -> usize {
        let mut delivered = 0;
        while let Ok(notification) = self.notifications.pop() {
            if let Notification::ParameterChanged { id, value } = notification {
                self.parameters[id.index()] = value;
            }
            notification.dispatch(observer);
            delivered += 1;
        }
        delivered
    }
}

fn message_name(message: &SynthMessage) -> &'static str {
    match message {
        SynthMessage::NoteOn { .. } => "NoteOn",
        SynthMessage::NoteOff { .. } => "NoteOff",
        SynthMessage::SetParameter { .. } => "SetParameter",
        SynthMessage::SetParameters(_) => "SetParameters",
        SynthMessage::SetupWaveform { .. } => "SetupWaveform",
        SynthMessage::SetWaveformValue { .. } => "SetWaveformValue",
        SynthMessage::StopAllNotes => "StopAllNotes",
        SynthMessage::Reset => "Reset",
        SynthMessage::ResetDsp => "ResetDsp",
        SynthMessage::ResetSequencer => "ResetSequencer",
    }
}

#[cfg(test)]
mod tests {
    use rtrb::RingBuffer;

    use super::*;

    fn handle(capacity: usize) -> (EngineHandle, Consumer<SynthMessage>, Producer<Notification>) {
        let (tx, rx) = RingBuffer::new(capacity);
        let (note_tx, note_rx) = RingBuffer::new(16);
        (EngineHandle::new(tx, note_rx), rx, note_tx)
    }

    #[test]
    fn full_queue_rejects_newest() {
        let (mut handle, mut rx, _notes) = handle(2);
        handle.note_on(60, 100).unwrap();
        handle.note_on(62, 100).unwrap();
        assert_eq!(handle.note_on(64, 100), Err(EngineError::QueueFull));

        let first = rx.pop().unwrap();
        assert!(matches!(first, SynthMessage::NoteOn { note: 60, .. }));
        let second = rx.pop().unwrap();
        assert!(matches!(second, SynthMessage::NoteOn { note: 62, .. }));
        assert!(rx.pop().is_err());
    }

    #[test]
    fn rejected_parameter_leaves_mirror_alone() {
        let (mut handle, _rx, _notes) = handle(1);
        handle.set_parameter(ParamId::Cutoff, 1_000.0).unwrap();
        assert_eq!(
            handle.set_parameter(ParamId::Cutoff, 2_000.0),
            Err(EngineError::QueueFull)
        );
        assert_eq!(handle.parameter(ParamId::Cutoff), 1_000.0);
    }

    #[test]
    fn set_parameter_clamps_before_sending() {
        let (mut handle, mut rx, _notes) = handle(4);
        handle.set_parameter(ParamId::Resonance, 5.0).unwrap();
        assert_eq!(handle.parameter(ParamId::Resonance), 0.75);
        match rx.pop().unwrap() {
            SynthMessage::SetParameter { id, value } => {
                assert_eq!(id, ParamId::Resonance);
                assert_eq!(value, 0.75);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn tempo_writes_the_arp_rate() {
        let (mut handle, mut rx, _notes) = handle(4);
        handle.set_tempo(97.5).unwrap();
        assert_eq!(handle.parameter(ParamId::ArpRate), 97.5);
        assert!(matches!(
            rx.pop().unwrap(),
            SynthMessage::SetParameter {
                id: ParamId::ArpRate,
                ..
            }
        ));
    }

    #[test]
    fn set_parameters_is_a_single_event() {
        let (mut handle, mut rx, _notes) = handle(4);
        let mut values = handle.parameters();
        values[ParamId::ArpRate.index()] = 1_000.0;
        handle.set_parameters(&values).unwrap();

        assert_eq!(handle.parameter(ParamId::ArpRate), 256.0);
        assert!(matches!(rx.pop().unwrap(), SynthMessage::SetParameters(_)));
        assert!(rx.pop().is_err());
    }

    #[test]
    fn poll_updates_mirror_and_reports() {
        struct Changes(Vec<(ParamId, f32)>);
        impl SynthObserver for Changes {
            fn parameter_changed(&mut self, id: ParamId, value: f32) {
                self.0.push((id, value));
            }
        }

        let (mut handle, _rx, mut notes) = handle(4);
        notes
            .push(Notification::ParameterChanged {
                id: ParamId::Glide,
                value: 0.1,
            })
            .unwrap();
        notes.push(Notification::BeatCounterChanged(1)).unwrap();

        let mut changes = Changes(Vec::new());
        assert_eq!(handle.poll(&mut changes), 2);
        assert_eq!(changes.0, vec![(ParamId::Glide, 0.1)]);
        assert_eq!(handle.parameter(ParamId::Glide), 0.1);
    }

    #[test]
    fn dropped_engine_is_reported() {
        let (mut handle, rx, _notes) = handle(4);
        drop(rx);
        assert_eq!(handle.note_off(60), Err(EngineError::Disconnected));
    }
}
