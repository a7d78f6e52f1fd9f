use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: hint bar on top, screen content below
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub content_area: Rect,
}

pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Screen content
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        content_area: chunks[1],
    }
}

/// Split the history screen: summaries on top, break list below
pub fn split_history(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Create a centered modal area `height` rows tall
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
