//! Audio output: a cpal stream that owns the engine.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, Stream, SupportedStreamConfig,
};
use rtrb::{Consumer, RingBuffer};

use saavy_synth::{SaavyEngine, MAX_BLOCK_SIZE};

/// Samples kept for the oscilloscope (about 170 ms at 48 kHz).
const SCOPE_CAPACITY: usize = 8192;

pub struct AudioDevice {
    device: Device,
    config: SupportedStreamConfig,
}

impl AudioDevice {
    /// Default output device with its default config.
    pub fn open() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    /// Move the engine onto the audio thread and start playing. The returned
    /// consumer receives the rendered mono signal for display.
    pub fn start(&self, mut engine: SaavyEngine) -> EyreResult<(Stream, Consumer<f32>)> {
        let channels = self.config.channels() as usize;
        let (mut scope_tx, scope_rx) = RingBuffer::new(SCOPE_CAPACITY);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = self.device.build_output_stream(
            &self.config.clone().into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    engine.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // Scope is best effort
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!(target: "audio", "Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;
        Ok((stream, scope_rx))
    }
}
