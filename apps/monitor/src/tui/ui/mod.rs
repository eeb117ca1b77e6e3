pub mod footer;
pub mod form;
pub mod header;
pub mod popups;
pub mod servers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Color;

use crate::session::ViewMode;
use crate::tui::state::AppState;
use crate::tui::types::FrameAreas;

pub const COLOR_BRAND: Color = Color::Cyan;
pub const COLOR_ACTIVE: Color = Color::Yellow;
pub const COLOR_LABEL: Color = Color::Gray;
pub const COLOR_MUTED: Color = Color::DarkGray;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_INFO: Color = Color::Blue;

/// Render the entire UI
pub fn render(f: &mut Frame, state: &mut AppState) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    header::render(f, chunks[0], state);

    match state.mode {
        ViewMode::View => servers::render(f, chunks[1], state),
        ViewMode::Add => form::render(f, chunks[1], state),
    }

    footer::render(f, chunks[2], state);

    state.areas = Some(FrameAreas { table: chunks[1] });

    // Popups (overlays)
    if state.show_help {
        popups::help::render(f, size);
    }

    if state.show_detail {
        popups::detail::render(f, size, state);
    }

    if state.show_delete_confirm {
        popups::delete::render(f, size, state);
    }
}
