pub mod delete;
pub mod detail;
pub mod help;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered rect taking `percent_x` by `percent_y` of `size`
pub fn centered(size: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vchunks[1])[1]
}
