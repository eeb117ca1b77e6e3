use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(f: &mut Frame, size: Rect) {
    let area = super::centered(size, 60, 60);

    let help_lines = vec![
        Line::from(Span::styled(
            "Keybinds",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Servers table:", Style::default().fg(Color::Yellow))),
        Line::from("  Up/Down, k/j      - Select server"),
        Line::from("  g/Home, G/End     - Jump to first / last"),
        Line::from("  Enter             - Show last result details"),
        Line::from("  A                 - Add a server"),
        Line::from("  D                 - Remove selected server"),
        Line::from("  R                 - Probe everything now"),
        Line::from(""),
        Line::from(Span::styled("Add form:", Style::default().fg(Color::Yellow))),
        Line::from("  Tab/Up/Down       - Switch field"),
        Line::from("  Enter             - Save server"),
        Line::from("  Esc               - Back to the table"),
        Line::from(""),
        Line::from(Span::styled("General:", Style::default().fg(Color::Yellow))),
        Line::from("  ?                 - Toggle help"),
        Line::from("  Q / Esc           - Quit"),
    ];

    let popup = Paragraph::new(help_lines)
        .block(Block::default().borders(Borders::ALL).title("Help - Keybinds"));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
