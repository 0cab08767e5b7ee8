//! Benchmarks for wavetable and sub oscillators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::{
    oscillator::{SubOsc, WavetableOsc},
    waveform::WaveformBank,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let bank = WaveformBank::with_default_tables();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Single table read (morph lands exactly on a table)
        let mut osc = WavetableOsc::new();
        group.bench_with_input(BenchmarkId::new("wavetable", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.next_sample(&bank, 0.0, black_box(440.0), 0.0, SAMPLE_RATE);
                }
            })
        });

        // Crossfade between two tables, two lookups per sample
        let mut osc = WavetableOsc::new();
        group.bench_with_input(BenchmarkId::new("morph", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = osc.next_sample(&bank, 0.4, black_box(440.0), 0.0, SAMPLE_RATE);
                }
            })
        });

        // Sine sub - uses sin() transcendental function
        let mut sub = SubOsc::default();
        group.bench_with_input(BenchmarkId::new("sub_sine", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = sub.next_sample(black_box(110.0), false, SAMPLE_RATE);
                }
            })
        });
    }

    group.finish();
}
