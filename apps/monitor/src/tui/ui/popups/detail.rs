use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::monitoring::{SlotStatus, status_cell_id, time_cell_id};
use crate::tui::state::AppState;

pub fn render(f: &mut Frame, size: Rect, state: &AppState) {
    let area = super::centered(size, 70, 50);

    let Some(server) = state.selected_server() else {
        return;
    };
    let slot = state.selected_slot().cloned().unwrap_or_default();

    let status = match &slot.status {
        SlotStatus::Pending => "Pending".to_string(),
        SlotStatus::Up { latency_ms } => format!("Up ({latency_ms}ms)"),
        SlotStatus::Down { .. } => "Down".to_string(),
    };
    let checked = match slot.last_checked {
        Some(_) => slot.time_label(),
        None => "-".into(),
    };

    let lines = vec![
        Line::from(Span::styled(
            "Server Details",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Name: {}", server.name)),
        Line::from(format!("Host: {}", server.host)),
        Line::from(format!(
            "Cells: {} / {}",
            status_cell_id(state.selected),
            time_cell_id(state.selected)
        )),
        Line::from(format!("Status: {status}")),
        Line::from(format!("Last checked: {checked}")),
        Line::from(format!("Reason: {}", slot.reason().unwrap_or("-"))),
        Line::from(""),
        Line::from("Esc/Q: Close"),
    ];

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Details"));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
