//! TUI module for saavy
//!
//! Computer-keyboard note input, mode toggles, and a live view of what the
//! engine reports back through its notification queue.

mod notes;
pub mod state;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::{Duration, Instant};

use saavy_synth::{EngineError, EngineHandle, ParamId};

use notes::render_notes;
use state::UiState;
use transport::{render_transport, AudioStats};
use waveform::render_scope;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// Terminals only report key presses, so every note gets a fixed length.
const NOTE_LENGTH: Duration = Duration::from_millis(300);

/// Piano layout on the home row, starting at C.
const PIANO_KEYS: &[char] = &[
    'a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k',
];

pub struct UiApp {
    handle: EngineHandle,
    scope_rx: Consumer<f32>,
    scope: Vec<f32>,
    state: UiState,
    sample_rate: f32,
    octave: i32,
    /// Notes waiting for their note-off
    pending_off: Vec<(u8, Instant)>,
    status: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(handle: EngineHandle, scope_rx: Consumer<f32>, sample_rate: f32) -> Self {
        Self {
            handle,
            scope_rx,
            scope: vec![0.0; VIS_BUFFER_SIZE],
            state: UiState::default(),
            sample_rate,
            octave: 4,
            pending_off: Vec::new(),
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.handle.poll(&mut self.state);
            self.release_expired();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Err(err) = self.handle_key(key.code) {
                            self.status = Some(err.to_string());
                        }
                    }
                }
            }
        }

        self.handle.stop_all_notes().ok();
        Ok(())
    }

    fn poll_scope(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() > VIS_BUFFER_SIZE {
            let excess = self.scope.len() - VIS_BUFFER_SIZE;
            self.scope.drain(0..excess);
        }
    }

    fn release_expired(&mut self) {
        let now = Instant::now();
        let handle = &mut self.handle;
        self.pending_off.retain(|&(note, deadline)| {
            if deadline > now {
                return true;
            }
            // Queue full: try again next frame
            handle.note_off(note).is_err()
        });
    }

    fn play(&mut self, note: u8) -> Result<(), EngineError> {
        self.handle.note_on(note, 100)?;
        let deadline = Instant::now() + NOTE_LENGTH;
        match self.pending_off.iter_mut().find(|(n, _)| *n == note) {
            Some(entry) => entry.1 = deadline,
            None => self.pending_off.push((note, deadline)),
        }
        Ok(())
    }

    fn toggle(&mut self, id: ParamId) -> Result<(), EngineError> {
        let value = if self.handle.parameter(id) >= 0.5 { 0.0 } else { 1.0 };
        self.handle.set_parameter(id, value)
    }

    fn nudge(&mut self, id: ParamId, amount: f32) -> Result<(), EngineError> {
        let value = self.handle.parameter(id) + amount;
        self.handle.set_parameter(id, value)
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<(), EngineError> {
        self.status = None;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c) if PIANO_KEYS.contains(&c) => {
                let offset = PIANO_KEYS.iter().position(|&k| k == c).unwrap_or(0) as i32;
                let note = (self.octave + 1) * 12 + offset;
                if let Ok(note) = u8::try_from(note) {
                    if note <= 127 {
                        self.play(note)?;
                    }
                }
            }
            KeyCode::Char('z') => self.octave = (self.octave - 1).max(0),
            KeyCode::Char('x') => self.octave = (self.octave + 1).min(8),
            KeyCode::Char(' ') => self.toggle(ParamId::ArpIsOn)?,
            KeyCode::Char('v') => self.toggle(ParamId::ArpIsSequencer)?,
            KeyCode::Char('m') => self.toggle(ParamId::IsMono)?,
            KeyCode::Char('l') => self.toggle(ParamId::MonoIsLegato)?,
            KeyCode::Char('b') => self.toggle(ParamId::DelayOn)?,
            KeyCode::Char('1') => self.handle.set_parameter(ParamId::ArpDirection, 0.0)?,
            KeyCode::Char('2') => self.handle.set_parameter(ParamId::ArpDirection, 1.0)?,
            KeyCode::Char('3') => self.handle.set_parameter(ParamId::ArpDirection, 2.0)?,
            KeyCode::Char('[') => self.nudge(ParamId::ArpRate, -5.0)?,
            KeyCode::Char(']') => self.nudge(ParamId::ArpRate, 5.0)?,
            KeyCode::Char('-') => self.nudge(ParamId::Cutoff, -1_000.0)?,
            KeyCode::Char('=') => self.nudge(ParamId::Cutoff, 1_000.0)?,
            KeyCode::Char('r') => self.handle.reset_sequencer()?,
            KeyCode::Char('p') => {
                self.pending_off.clear();
                self.handle.stop_all_notes()?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, notes, scope, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Min(8),     // Notes and changes
                Constraint::Length(8),  // Scope
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.scope);
        render_transport(
            frame,
            chunks[0],
            &self.handle,
            self.state.beat,
            self.sample_rate,
            &stats,
        );
        render_notes(frame, chunks[1], &self.state, self.octave);
        render_scope(frame, chunks[2], &self.scope);

        let help = match &self.status {
            Some(status) => Paragraph::new(format!(" {}", status))
                .style(Style::default().fg(Color::Red)),
            None => Paragraph::new(
                " [A-K] Play  [Z/X] Octave  [Space] Arp  [V] Seq  [M] Mono  [L] Legato  \
                 [1-3] Direction  [ ] Tempo  [-/=] Cutoff  [B] Delay  [R] Restart  [P] Panic  [Q] Quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, chunks[3]);
    }
}
