//! Benchmarks for complete engine blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::{EngineConfig, ParamId, SaavyEngine};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let config = EngineConfig::default().with_sample_rate(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === IDLE ===
        // Nothing sounding: the fixed cost of a block
        let (mut engine, _handle) = SaavyEngine::new(config.clone());
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                engine.render_block(black_box(&mut buffer));
            })
        });

        // === FULL POOL ===
        // Every voice sustaining with sub, noise and FM on: worst case per block
        let (mut engine, _handle) =
            SaavyEngine::new(config.clone().with_polyphony(saavy_synth::config::MAX_POLYPHONY));
        engine.set_parameter(ParamId::SubVolume, 0.5);
        engine.set_parameter(ParamId::NoiseVolume, 0.1);
        engine.set_parameter(ParamId::FmVolume, 0.5);
        engine.set_parameter(ParamId::FmAmount, 2.0);
        engine.set_parameter(ParamId::SustainLevel, 1.0);
        engine.set_parameter(ParamId::DelayOn, 1.0);
        for note in 48..48 + saavy_synth::config::MAX_POLYPHONY as u8 {
            engine.note_on(note, 100, None);
        }
        group.bench_with_input(BenchmarkId::new("full_pool", size), &size, |b, _| {
            b.iter(|| {
                engine.render_block(black_box(&mut buffer));
            })
        });

        // === ARPEGGIATOR ===
        // Fast sequencer retriggering voices every few blocks
        let (mut engine, _handle) = SaavyEngine::new(config.clone());
        engine.set_parameter(ParamId::ArpIsOn, 1.0);
        engine.set_parameter(ParamId::ArpRate, 256.0);
        engine.set_parameter(ParamId::ArpDivision, 8.0);
        engine.set_parameter(ParamId::ArpOctave, 3.0);
        for note in [48, 52, 55, 59] {
            engine.note_on(note, 100, None);
        }
        group.bench_with_input(BenchmarkId::new("arpeggiator", size), &size, |b, _| {
            b.iter(|| {
                engine.render_block(black_box(&mut buffer));
            })
        });

        // === EVENT LOAD ===
        // A burst of queued parameter changes drained every block
        let (mut engine, mut handle) = SaavyEngine::new(config.clone());
        engine.note_on(60, 100, None);
        let mut cutoff = 500.0;
        group.bench_with_input(BenchmarkId::new("event_load", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..32 {
                    cutoff = if cutoff > 10_000.0 { 500.0 } else { cutoff * 1.1 };
                    let _ = handle.set_parameter(ParamId::Cutoff, cutoff);
                }
                engine.render_block(black_box(&mut buffer));
                handle.poll(&mut ());
            })
        });
    }

    group.finish();
}
