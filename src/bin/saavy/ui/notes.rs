//! Held/playing notes and recent parameter changes

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{note_list, UiState};

pub fn render_notes(frame: &mut Frame, area: Rect, state: &UiState, octave: i32) {
    let block = Block::default().title(" Notes ").borders(Borders::ALL);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let mut lines = vec![
        Line::from(vec![
            label(" Held:    "),
            Span::styled(note_list(state.held), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            label(" Playing: "),
            Span::styled(note_list(state.playing), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            label(" Octave:  "),
            Span::raw(format!("{}", octave)),
        ]),
        Line::default(),
    ];

    for (id, value) in state.changes.iter().rev() {
        lines.push(Line::from(Span::styled(
            format!(" {:<20} {:>10.3}", id.display_name(), value),
            Style::default().fg(Color::Cyan),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
