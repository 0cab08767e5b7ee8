//! Engine-level benchmarks.
//!
//! These drive `SaavyEngine::render_block` the way an audio callback does,
//! with events arriving through the handle.

mod engine;

pub use engine::bench_engine;
