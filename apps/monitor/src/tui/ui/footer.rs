use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::{COLOR_BRAND, COLOR_MUTED};
use crate::session::ViewMode;
use crate::tui::state::AppState;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    f.render_widget(Clear, area);
    if state.show_help {
        return;
    }

    let keys: &[(&str, &str)] = match state.mode {
        ViewMode::View => &[
            ("A", "Add"),
            ("D", "Delete"),
            ("Enter", "Details"),
            ("R", "Refresh"),
            ("H/?", "Help"),
            ("Q/Esc", "Quit"),
        ],
        ViewMode::Add => &[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Back to servers")],
    };

    let mut spans = Vec::new();
    for (i, (key, label)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED)));
        }
        spans.push(Span::styled(
            format!("{key}: {label}"),
            Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}
