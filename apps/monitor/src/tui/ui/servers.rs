use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use super::{COLOR_ACTIVE, COLOR_BRAND, COLOR_ERROR, COLOR_LABEL, COLOR_MUTED, COLOR_SUCCESS};
use crate::monitoring::SlotStatus;
use crate::tui::state::AppState;

/// Monitoring table: one row per registered server, in registry order
pub fn render(f: &mut Frame, area: Rect, state: &mut AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Servers ")
        .border_style(Style::default().fg(COLOR_BRAND));

    if state.servers.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No servers registered", Style::default().fg(COLOR_MUTED))),
            Line::from(""),
            Line::from(Span::styled("Press 'a' to add one", Style::default().fg(COLOR_LABEL))),
        ])
        .block(block);

        f.render_widget(Clear, area);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["#", "Name", "Host", "Last checked", "Status"])
        .style(Style::default().fg(COLOR_LABEL).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .servers
        .iter()
        .enumerate()
        .map(|(i, server)| {
            let slot = state.slots.get(i).cloned().unwrap_or_default();
            let status_color = match slot.status {
                SlotStatus::Pending => COLOR_MUTED,
                SlotStatus::Up { .. } => COLOR_SUCCESS,
                SlotStatus::Down { .. } => COLOR_ERROR,
            };

            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(server.name.clone()),
                Cell::from(server.host.clone()),
                Cell::from(slot.time_label()),
                Cell::from(Span::styled(slot.label(), Style::default().fg(status_color))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(25),
        Constraint::Percentage(35),
        Constraint::Length(14),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    state.table_state.select(Some(state.selected));

    f.render_widget(Clear, area);
    f.render_stateful_widget(table, area, &mut state.table_state);
}
