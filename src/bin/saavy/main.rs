//! saavy - Terminal synthesizer
//!
//! Run with: cargo run
//!
//! Play notes from the computer keyboard; the arpeggiator, sequencer and
//! mono mode are toggled from the same screen.

mod app;
mod ui;

use color_eyre::eyre::WrapErr;
use saavy_synth::{EngineConfig, SaavyEngine};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let device = app::AudioDevice::open()?;
    let config = EngineConfig::default()
        .with_sample_rate(device.sample_rate())
        .with_polyphony(8);

    let (engine, handle) = SaavyEngine::new(config);
    let (_stream, scope_rx) = device.start(engine).wrap_err("failed to start audio")?;

    let mut terminal = ratatui::init();
    let result = ui::UiApp::new(handle, scope_rx, device.sample_rate()).run(&mut terminal);
    ratatui::restore();
    result
}
