use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::tui::state::AppState;

/// Rows above the first server: top border and column header
const TABLE_HEADER_ROWS: u16 = 2;

/// Click selects a row; the wheel moves the selection
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => state.next_server(),
        MouseEventKind::ScrollUp => state.prev_server(),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(areas) = &state.areas
                && let Some(row) = row_at(&areas.table, mouse.column, mouse.row)
            {
                let row = row + state.table_state.offset();
                if row < state.servers.len() {
                    state.selected = row;
                }
            }
        }
        _ => {}
    }
}

fn row_at(table: &Rect, x: u16, y: u16) -> Option<usize> {
    let inside = x > table.x
        && x < table.x + table.width.saturating_sub(1)
        && y >= table.y + TABLE_HEADER_ROWS
        && y < table.y + table.height.saturating_sub(1);
    inside.then(|| (y - table.y - TABLE_HEADER_ROWS) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServerRecord;
    use crate::tui::types::FrameAreas;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_click_selects_row() {
        let mut state = AppState::new(Duration::from_secs(10));
        state.servers = vec![ServerRecord::new("a", "a.com"), ServerRecord::new("b", "b.com")];
        state.areas = Some(FrameAreas { table: Rect::new(0, 4, 80, 10) });

        handle_mouse(&mut state, click(10, 7));
        assert_eq!(state.selected, 1);

        // Header row and rows past the end are ignored
        handle_mouse(&mut state, click(10, 5));
        handle_mouse(&mut state, click(10, 9));
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_click_accounts_for_scroll_offset() {
        let mut state = AppState::new(Duration::from_secs(10));
        state.servers = (0..20)
            .map(|i| ServerRecord::new(format!("s{i}"), format!("s{i}.example.com")))
            .collect();
        state.areas = Some(FrameAreas { table: Rect::new(0, 4, 80, 10) });
        *state.table_state.offset_mut() = 12;

        // Second visible row
        handle_mouse(&mut state, click(10, 7));
        assert_eq!(state.selected, 13);
    }
}
