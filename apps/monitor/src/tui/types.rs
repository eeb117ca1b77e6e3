use ratatui::layout::Rect;

/// Frame areas for mouse hit-testing
pub struct FrameAreas {
    pub table: Rect,
}

/// Which registration field has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Host,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Host,
            FormField::Host => FormField::Name,
        }
    }
}
