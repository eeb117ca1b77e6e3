use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::{
    COLOR_ACTIVE, COLOR_BRAND, COLOR_ERROR, COLOR_INFO, COLOR_LABEL, COLOR_MUTED, COLOR_SUCCESS,
};
use crate::session::ViewMode;
use crate::tui::state::{AppState, StatusLevel};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    // Row 1: Brand + mode tabs
    let mut tab_spans = vec![
        Span::styled("Uppe. ", Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD)),
        Span::styled(" ", Style::default()),
    ];

    let modes = [(ViewMode::View, "Servers"), (ViewMode::Add, "Add server")];
    for (i, (mode, label)) in modes.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::styled(" | ", Style::default().fg(COLOR_MUTED)));
        }
        let style = if state.mode == *mode {
            Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_LABEL)
        };
        tab_spans.push(Span::styled(*label, style));
    }

    // Row 2: Status bar
    let (up, down, pending) = state.status_counts();
    let mut status_spans = vec![
        Span::styled(format!("{} servers ", state.servers.len()), Style::default().fg(COLOR_LABEL)),
        Span::styled(format!("{up} up "), Style::default().fg(COLOR_SUCCESS)),
        Span::styled(format!("{down} down "), Style::default().fg(COLOR_ERROR)),
        Span::styled(format!("{pending} pending "), Style::default().fg(COLOR_MUTED)),
        Span::styled(
            format!("[every {}s, sweep #{}] ", state.interval.as_secs(), state.sweeps),
            Style::default().fg(COLOR_MUTED),
        ),
    ];

    // Status notification
    if let Some((msg, _, level)) = &state.status_message {
        let color = match level {
            StatusLevel::Success => COLOR_SUCCESS,
            StatusLevel::Error => COLOR_ERROR,
            StatusLevel::Info => COLOR_INFO,
        };
        status_spans.push(Span::styled(
            format!(" -- {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans), Line::from(""), Line::from(status_spans)]);

    f.render_widget(Clear, area);
    f.render_widget(header, area);
}
