use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{COLOR_ACTIVE, COLOR_BRAND, COLOR_ERROR, COLOR_LABEL, COLOR_MUTED, COLOR_SUCCESS};
use crate::tui::state::AppState;
use crate::tui::types::FormField;
use crate::validation::ValidationResult;

/// Registration form with one input per field and its validity underneath
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Add server ")
        .border_style(Style::default().fg(COLOR_BRAND));
    let inner = outer.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &state.form;
    render_input(f, rows[0], "Server name", &form.name, form.field == FormField::Name);
    render_check(f, rows[1], form.name_check.as_ref());
    render_input(f, rows[3], "Host (domain or IPv4)", &form.host, form.field == FormField::Host);
    render_check(f, rows[4], form.host_check.as_ref());

    if !state.servers.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            format!("{} servers registered. Esc returns to the table.", state.servers.len()),
            Style::default().fg(COLOR_MUTED),
        )));
        f.render_widget(hint, rows[5]);
    }
}

fn render_input(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(COLOR_ACTIVE)
    } else {
        Style::default().fg(COLOR_LABEL)
    };

    let mut spans = vec![Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::SLOW_BLINK)));
    }

    let input = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()).border_style(border_style));
    f.render_widget(input, area);
}

fn render_check(f: &mut Frame, area: Rect, check: Option<&ValidationResult>) {
    let line = match check {
        None => Line::from(""),
        Some(check) if check.is_valid => {
            Line::from(Span::styled("✓ Looks good", Style::default().fg(COLOR_SUCCESS)))
        }
        Some(check) => Line::from(Span::styled(
            format!("✗ {}", check.error.as_deref().unwrap_or("Invalid value")),
            Style::default().fg(COLOR_ERROR),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
