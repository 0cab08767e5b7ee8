//! Status bar widget - tempo, modes, beat and audio level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_synth::{EngineHandle, ParamId};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn toggle(label: &str, on: bool) -> Span<'static> {
    Span::styled(
        format!("{}  ", label),
        Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
    )
}

/// Render the status bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    handle: &EngineHandle,
    beat: u64,
    sample_rate: f32,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" saavy ").borders(Borders::ALL);

    let flag = |id| handle.parameter(id) >= 0.5;
    let direction = match handle.parameter(ParamId::ArpDirection).round() as i32 {
        0 => "Up",
        2 => "Down",
        _ => "Up/Down",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", handle.parameter(ParamId::ArpRate)),
            Style::default().fg(Color::Cyan),
        ),
        toggle("Arp", flag(ParamId::ArpIsOn)),
        toggle("Seq", flag(ParamId::ArpIsSequencer)),
        toggle("Mono", flag(ParamId::IsMono)),
        toggle("Legato", flag(ParamId::MonoIsLegato)),
        Span::styled(format!("{}  ", direction), Style::default().fg(Color::White)),
        Span::styled(format!("Beat {}  ", beat), Style::default().fg(Color::White)),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
