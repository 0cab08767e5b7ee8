/*
Render Block Processor
======================

`SaavyEngine` is the render context. It owns every piece of mutable synth
state: registry, waveforms, voice pool, held keys, arpeggiator and the post
chain. The control thread only ever talks to it through two SPSC rings:

    EngineHandle ──SynthMessage──▶ SaavyEngine ──Notification──▶ EngineHandle
      (control)      (events)        (render)     (state reports)

Each block (at most MAX_BLOCK_SIZE frames; longer buffers are split):

  1. drain every queued event, in order
  2. advance parameter smoothing and read both LFOs for the block
  3. run the arpeggiator/sequencer (may start/stop voices)
  4. render voices into the mix
  5. run the post-voice stages
  6. report what changed: one ParameterChanged per changed parameter, and
     at most one beat/held/playing report each

`process_block` renders the mono mix once and copies it to every channel.
With auto pan on, the first two channels then move against each other.

Nothing on this path locks or allocates. A full notification ring drops the
report rather than wait.
*/

pub mod handle;
pub mod observer;
pub mod stages;

use std::f32::consts::TAU;

use rtrb::{Consumer, Producer, RingBuffer};

use self::{
    handle::EngineHandle,
    observer::Notification,
    stages::{default_chain, PostStage},
};
use crate::{
    config::EngineConfig,
    dsp::{oscillator::Phasor, waveform::WaveformBank},
    io::{AudioInput, AudioOutput},
    params::{
        modulation::{LfoBank, Modulation},
        ParamId, ParameterRegistry,
    },
    sequencing::ArpSequencer,
    synth::{
        held::HeldNotes,
        message::{MessageReceiver, SynthMessage},
        note_set::NoteSet,
        pool::VoicePool,
        voice::VoiceParams,
    },
    MAX_BLOCK_SIZE,
};

pub struct SaavyEngine {
    sample_rate: f32,
    params: ParameterRegistry,
    waveforms: WaveformBank,
    pool: VoicePool,
    held: HeldNotes,
    arp: ArpSequencer,
    stages: Vec<Box<dyn PostStage>>,
    lfos: LfoBank,
    modulation: Modulation,
    pan: Phasor,
    rx: Consumer<SynthMessage>,
    notifications: Producer<Notification>,
    reported_held: NoteSet,
    reported_playing: NoteSet,
    reported_beat: u64,
}

impl SaavyEngine {
    /// Build the render context and its control handle.
    pub fn new(config: EngineConfig) -> (Self, EngineHandle) {
        let sample_rate = config.effective_sample_rate();
        let (tx, rx) = RingBuffer::new(config.event_capacity.max(1));
        let (notification_tx, notification_rx) =
            RingBuffer::new(config.notification_capacity.max(1));

        log::debug!(
            target: "engine",
            "Engine created: {} Hz, {} voices, {} event slots",
            sample_rate,
            config.voice_count(),
            config.event_capacity
        );

        let mut engine = Self {
            sample_rate,
            params: ParameterRegistry::new(sample_rate),
            waveforms: WaveformBank::with_default_tables(),
            pool: VoicePool::new(config.voice_count(), sample_rate),
            held: HeldNotes::new(),
            arp: ArpSequencer::new(),
            stages: default_chain(sample_rate),
            lfos: LfoBank::new(),
            modulation: Modulation::NONE,
            pan: Phasor::new(),
            rx,
            notifications: notification_tx,
            reported_held: NoteSet::EMPTY,
            reported_playing: NoteSet::EMPTY,
            reported_beat: 0,
        };
        engine.sync_modes();

        (engine, EngineHandle::new(tx, notification_rx))
    }

    /// Render a mono block. Buffers longer than `MAX_BLOCK_SIZE` are split.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    /// Render into every output channel. The synth is mono, so each channel
    /// receives a copy of the first, then auto pan spreads the first two.
    /// Input is ignored.
    pub fn process_block(&mut self, _input: &AudioInput, output: &mut AudioOutput) {
        let Some((first, rest)) = output.buffers.split_first_mut() else {
            return;
        };
        self.render_block(first);
        for channel in rest.iter_mut() {
            let frames = channel.len().min(first.len());
            channel[..frames].copy_from_slice(&first[..frames]);
        }

        if let [left, right, ..] = output.buffers.as_mut_slice() {
            self.auto_pan(left, right);
        }
    }

    /// Sine pan between two channels. Full amount swings each side from
    /// unity down to silence; the centre leaves both untouched.
    fn auto_pan(&mut self, left: &mut [f32], right: &mut [f32]) {
        let amount = self.params.smoothed(ParamId::AutoPanAmount)
            * self.modulation.attenuation(&self.params, ParamId::AutopanLfo);
        if amount <= 0.0 {
            return;
        }

        let rate = self.params.smoothed(ParamId::AutoPanFrequency);
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let position = amount * (TAU * self.pan.tick(rate, self.sample_rate)).sin();
            *l *= 1.0 - position.max(0.0);
            *r *= 1.0 + position.min(0.0);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(message) = MessageReceiver::pop(&mut self.rx) {
            self.handle_message(message);
        }

        self.params.advance(out.len());
        self.modulation = self.lfos.advance(&self.params, out.len());

        if let Some(beat) = self
            .arp
            .process(out.len(), &self.params, &self.held, &mut self.pool)
        {
            self.reported_beat = beat;
            self.notify(Notification::BeatCounterChanged(beat));
        }

        out.fill(0.0);
        let voice_params = VoiceParams::modulated(&self.params, &self.modulation);
        self.pool.render(out, &voice_params, &self.waveforms);

        for stage in self.stages.iter_mut() {
            stage.process(out, &self.params, &self.modulation);
        }

        self.report_changes();
    }

    fn handle_message(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn {
                note,
                velocity,
                frequency,
            } => self.note_on(note, velocity, frequency),
            SynthMessage::NoteOff { note } => self.note_off(note),
            SynthMessage::SetParameter { id, value } => self.set_parameter(id, value),
            SynthMessage::SetParameters(values) => {
                if self.params.set_all(&values) > 0 {
                    self.sync_modes();
                }
            }
            SynthMessage::SetupWaveform { table, size } => {
                self.waveforms.setup(table, size);
            }
            SynthMessage::SetWaveformValue {
                table,
                index,
                value,
            } => {
                self.waveforms.set_value(table, index, value);
            }
            SynthMessage::StopAllNotes => self.stop_all_notes(),
            SynthMessage::Reset => self.reset(),
            SynthMessage::ResetDsp => self.reset_dsp(),
            SynthMessage::ResetSequencer => self.reset_sequencer(),
        }
    }

    /// Key press. With the arpeggiator on, keys only feed the held set.
    /// Velocity is clamped to 127.
    pub fn note_on(&mut self, note: u8, velocity: u8, frequency: Option<f32>) {
        if note > 127 {
            return;
        }
        let velocity = velocity.min(127);
        if velocity == 0 {
            self.note_off(note);
            return;
        }

        self.held.press(note, velocity, frequency);
        if !self.arp.is_enabled() {
            self.pool.note_on(note, velocity, frequency, true);
        }
    }

    /// Key release. A note that is neither held nor sounding is ignored.
    pub fn note_off(&mut self, note: u8) {
        let was_held = self.held.release(note);
        if !was_held || self.arp.is_enabled() {
            return;
        }
        self.pool.note_off(note, self.held.latest());
    }

    pub fn set_parameter(&mut self, id: ParamId, value: f32) {
        if self.params.set(id, value) {
            self.sync_modes();
        }
    }

    /// Follow a host tempo. Writes `ArpRate`, so observers see the change
    /// like any other parameter write.
    pub fn set_tempo(&mut self, bpm: f32) {
        self.set_parameter(ParamId::ArpRate, bpm);
    }

    /// Apply mode parameters that need more than a value change: arpeggiator
    /// on/off and mono/poly switching.
    fn sync_modes(&mut self) {
        let arp_on = self.params.flag(ParamId::ArpIsOn);
        if arp_on != self.arp.is_enabled() {
            if arp_on {
                self.pool.stop_all_notes();
                self.arp.enable();
                self.report_beat_reset();
            } else {
                self.arp.disable(&mut self.pool);
            }
        }

        self.pool.configure(
            self.params.flag(ParamId::IsMono),
            self.params.flag(ParamId::MonoIsLegato),
            self.params.get(ParamId::Glide),
        );
    }

    /// Release everything and forget held keys.
    pub fn stop_all_notes(&mut self) {
        self.pool.stop_all_notes();
        self.held.clear();
        self.arp.clear_emitted();
    }

    /// Hard stop: every voice idle immediately, held keys cleared.
    pub fn reset(&mut self) {
        self.pool.reset();
        self.held.clear();
        self.arp.clear_emitted();
    }

    /// Full recovery: hard stop plus cleared filter/delay state, settled
    /// smoothing, and a restarted sequencer.
    pub fn reset_dsp(&mut self) {
        self.reset();
        self.pool.allocate_if_needed();
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
        self.params.settle();
        self.lfos.reset();
        self.pan.reset();
        self.arp.reset();
        self.report_beat_reset();
    }

    /// Step, beat counter and clock back to zero. Held keys stay.
    pub fn reset_sequencer(&mut self) {
        self.arp.reset();
        self.report_beat_reset();
    }

    /// The counter went back to zero; say so now rather than at the next
    /// beat, which may never come with no keys held.
    fn report_beat_reset(&mut self) {
        if self.reported_beat != 0 {
            self.reported_beat = 0;
            self.notify(Notification::BeatCounterChanged(0));
        }
    }

    /// Direct table setup, for use before the engine moves to the audio
    /// thread.
    pub fn setup_waveform(&mut self, table: usize, size: usize) -> bool {
        self.waveforms.setup(table, size)
    }

    /// Direct table load, for use before the engine moves to the audio
    /// thread.
    pub fn load_waveform(&mut self, table: usize, samples: &[f32]) -> bool {
        self.waveforms.load(table, samples)
    }

    fn report_changes(&mut self) {
        for id in self.params.take_changed() {
            let value = self.params.get(id);
            if self
                .notifications
                .push(Notification::ParameterChanged { id, value })
                .is_err()
            {
                break;
            }
        }

        let held = self.held.to_set();
        if held != self.reported_held {
            self.reported_held = held;
            self.notify(Notification::HeldNotesChanged(held));
        }

        let playing = self.pool.playing_notes();
        if playing != self.reported_playing {
            self.reported_playing = playing;
            self.notify(Notification::PlayingNotesChanged(playing));
        }
    }

    fn notify(&mut self, notification: Notification) {
        // Full ring: drop the report, never block the render thread
        let _ = self.notifications.push(notification);
    }

    pub fn params(&self) -> &ParameterRegistry {
        &self.params
    }

    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }

    pub fn held_notes(&self) -> &HeldNotes {
        &self.held
    }

    pub fn arp(&self) -> &ArpSequencer {
        &self.arp
    }

    /// LFO readings used for the most recent block.
    pub fn modulation(&self) -> &Modulation {
        &self.modulation
    }

    pub fn waveforms(&self) -> &WaveformBank {
        &self.waveforms
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Last beat counter reported to the control side.
    pub fn beat_counter(&self) -> u64 {
        self.reported_beat
    }
}
