#![cfg(feature = "rtrb")]

//! End-to-end behaviour through the public control handle.
//!
//! At 48 kHz, 120 BPM and four steps per beat a step lasts exactly 6000
//! frames, so each `step()` call below is one arpeggiator beat.

use saavy_synth::{
    EngineConfig, EngineHandle, NoteSet, ParamId, SaavyEngine, SynthObserver,
};

const STEP_FRAMES: usize = 6_000;

#[derive(Default)]
struct Beats(Vec<u64>);

impl SynthObserver for Beats {
    fn beat_counter_changed(&mut self, beat: u64) {
        self.0.push(beat);
    }
}

fn engine_with(polyphony: usize) -> (SaavyEngine, EngineHandle) {
    SaavyEngine::new(
        EngineConfig::default()
            .with_sample_rate(48_000.0)
            .with_polyphony(polyphony),
    )
}

fn step(engine: &mut SaavyEngine) -> NoteSet {
    let mut buffer = vec![0.0; STEP_FRAMES];
    engine.render_block(&mut buffer);
    engine.pool().playing_notes()
}

fn notes(values: &[u8]) -> NoteSet {
    values.iter().copied().collect()
}

#[test]
fn parameter_writes_are_clamped() {
    let (mut engine, mut handle) = engine_with(6);
    handle.set_parameter(ParamId::Cutoff, 1.0e9).unwrap();
    handle.set_parameter(ParamId::SustainLevel, -3.0).unwrap();
    step(&mut engine);

    assert_eq!(engine.params().get(ParamId::Cutoff), ParamId::Cutoff.max());
    assert_eq!(engine.params().get(ParamId::SustainLevel), 0.0);
    assert_eq!(handle.parameter(ParamId::Cutoff), ParamId::Cutoff.max());
}

#[test]
fn never_sounds_more_voices_than_configured() {
    let (mut engine, mut handle) = engine_with(4);
    for note in 40..60 {
        handle.note_on(note, 100).unwrap();
    }
    step(&mut engine);
    assert!(engine.pool().sounding_count() <= 4);
    assert_eq!(engine.pool().playing_notes().len(), 4);
}

#[test]
fn steals_the_oldest_voice_when_full() {
    let (mut engine, mut handle) = engine_with(4);
    for note in [60, 62, 64, 65, 67] {
        handle.note_on(note, 100).unwrap();
    }
    assert_eq!(step(&mut engine), notes(&[62, 64, 65, 67]));
}

#[test]
fn releasing_an_unplayed_note_changes_nothing() {
    let (mut engine, mut handle) = engine_with(6);
    handle.note_on(60, 100).unwrap();
    step(&mut engine);
    handle.poll(&mut ());

    handle.note_off(61).unwrap();
    step(&mut engine);

    assert_eq!(handle.poll(&mut ()), 0);
    assert_eq!(engine.pool().playing_notes(), notes(&[60]));
}

#[test]
fn arpeggiator_walks_held_notes_upward() {
    let (mut engine, mut handle) = engine_with(6);
    handle.set_parameter(ParamId::ArpOctave, 0.0).unwrap();
    handle.set_parameter(ParamId::ArpDirection, 0.0).unwrap();
    handle.set_parameter(ParamId::ArpIsOn, 1.0).unwrap();
    for note in [67, 60, 64] {
        handle.note_on(note, 90).unwrap();
    }

    let played: Vec<NoteSet> = (0..4).map(|_| step(&mut engine)).collect();
    assert_eq!(
        played,
        vec![notes(&[60]), notes(&[64]), notes(&[67]), notes(&[60])]
    );
    assert_eq!(engine.arp().beat_counter(), 4);

    let mut beats = Beats::default();
    handle.poll(&mut beats);
    assert_eq!(beats.0, vec![1, 2, 3, 4]);
}

#[test]
fn sequencer_plays_the_pattern_with_rests() {
    let (mut engine, mut handle) = engine_with(6);
    handle.set_parameter(ParamId::ArpTotalSteps, 3.0).unwrap();
    handle.set_parameter(ParamId::ArpSeqPattern00, 0.0).unwrap();
    handle.set_parameter(ParamId::ArpSeqPattern01, 12.0).unwrap();
    handle.set_parameter(ParamId::ArpSeqPattern02, -5.0).unwrap();
    handle.set_parameter(ParamId::ArpSeqNoteOn00, 1.0).unwrap();
    handle.set_parameter(ParamId::ArpSeqNoteOn01, 0.0).unwrap();
    handle.set_parameter(ParamId::ArpSeqNoteOn02, 1.0).unwrap();
    handle.set_parameter(ParamId::ArpIsSequencer, 1.0).unwrap();
    handle.set_parameter(ParamId::ArpIsOn, 1.0).unwrap();
    handle.note_on(60, 100).unwrap();

    let played: Vec<NoteSet> = (0..4).map(|_| step(&mut engine)).collect();
    assert_eq!(
        played,
        vec![notes(&[60]), NoteSet::EMPTY, notes(&[55]), notes(&[60])]
    );
}

#[test]
fn sequencer_reset_keeps_held_notes() {
    let (mut engine, mut handle) = engine_with(6);
    handle.set_parameter(ParamId::ArpOctave, 0.0).unwrap();
    handle.set_parameter(ParamId::ArpDirection, 0.0).unwrap();
    handle.set_parameter(ParamId::ArpIsOn, 1.0).unwrap();
    for note in [60, 64, 67] {
        handle.note_on(note, 100).unwrap();
    }
    step(&mut engine);
    step(&mut engine);
    assert_eq!(engine.arp().beat_counter(), 2);

    handle.reset_sequencer().unwrap();
    assert_eq!(step(&mut engine), notes(&[60]));
    assert_eq!(engine.arp().beat_counter(), 1);
    assert_eq!(engine.held_notes().to_set(), notes(&[60, 64, 67]));
}

#[test]
fn stop_and_reset_leave_everything_idle() {
    let (mut engine, mut handle) = engine_with(6);
    for note in [48, 52, 55] {
        handle.note_on(note, 100).unwrap();
    }
    step(&mut engine);

    handle.stop_all_notes().unwrap();
    step(&mut engine);
    assert!(engine.pool().playing_notes().is_empty());
    assert!(engine.held_notes().is_empty());

    handle.reset().unwrap();
    let mut buffer = vec![1.0; 512];
    engine.render_block(&mut buffer);
    assert_eq!(engine.pool().sounding_count(), 0);
    assert!(engine.pool().voices().iter().all(|v| v.is_free()));
    assert!(engine.pool().mono_voice().is_free());
    assert!(buffer.iter().all(|s| s.abs() < 1e-3));
}

#[test]
fn mono_mode_keeps_one_voice() {
    let (mut engine, mut handle) = engine_with(6);
    handle.set_parameter(ParamId::IsMono, 1.0).unwrap();
    handle.note_on(60, 100).unwrap();
    handle.note_on(64, 100).unwrap();
    assert_eq!(step(&mut engine), notes(&[64]));

    handle.note_off(64).unwrap();
    assert_eq!(step(&mut engine), notes(&[60]));
}

#[test]
fn sequencer_reset_reports_zero_with_nothing_held() {
    let (mut engine, mut handle) = engine_with(6);
    handle.set_parameter(ParamId::ArpIsOn, 1.0).unwrap();
    handle.note_on(60, 100).unwrap();
    for _ in 0..3 {
        step(&mut engine);
    }

    handle.note_off(60).unwrap();
    handle.reset_sequencer().unwrap();
    step(&mut engine);
    step(&mut engine);

    let mut beats = Beats::default();
    handle.poll(&mut beats);
    assert_eq!(beats.0, vec![1, 2, 3, 0]);
    assert_eq!(engine.beat_counter(), 0);
}

#[test]
fn out_of_range_velocity_is_clamped() {
    let (mut engine, mut handle) = engine_with(6);
    handle.note_on(60, 255).unwrap();
    step(&mut engine);

    let voice = engine
        .pool()
        .voices()
        .iter()
        .find(|v| v.note() == 60 && v.is_active())
        .unwrap();
    assert_eq!(voice.velocity(), 127);
}

#[test]
fn routed_lfos_change_the_output() {
    let render = |routes: &[(ParamId, f32)]| {
        let (mut engine, mut handle) = engine_with(6);
        for &(id, value) in routes {
            handle.set_parameter(id, value).unwrap();
        }
        handle.note_on(60, 100).unwrap();
        let mut buffer = vec![0.0; 48_000];
        engine.render_block(&mut buffer);
        buffer
    };

    let plain = render(&[]);
    let modulated = render(&[
        (ParamId::Lfo1Amplitude, 1.0),
        (ParamId::Lfo1Rate, 5.0),
        (ParamId::CutoffLfo, 1.0),
        (ParamId::PitchLfo, 1.0),
    ]);
    // An LFO with no destination leaves the sound alone
    let unrouted = render(&[(ParamId::Lfo1Amplitude, 1.0), (ParamId::Lfo1Rate, 5.0)]);

    assert_ne!(plain, modulated);
    assert_eq!(plain, unrouted);
}

#[test]
fn host_tempo_sets_the_step_length() {
    let (mut engine, mut handle) = engine_with(6);
    // 60 BPM, four steps per beat: 12000 frames per step
    handle.set_tempo(60.0).unwrap();
    handle.set_parameter(ParamId::ArpIsOn, 1.0).unwrap();
    handle.note_on(60, 100).unwrap();

    step(&mut engine);
    step(&mut engine);
    step(&mut engine);
    assert_eq!(engine.arp().beat_counter(), 2);
}
