use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::AppState;

pub fn render(f: &mut Frame, size: Rect, state: &AppState) {
    let area = super::centered(size, 50, 30);

    let name = state.selected_server().map(|s| s.name.clone()).unwrap_or_default();

    let popup = Paragraph::new(vec![
        Line::from(Span::styled(
            "Remove Server",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Are you sure you want to remove '{name}' ?")),
        Line::from(""),
        Line::from("Y: Yes    N/Esc: No"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Confirm"));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
