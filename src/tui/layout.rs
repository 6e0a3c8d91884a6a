use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level screen layout: header, body, status bar.
pub struct AppLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header (title + subtitle)
                Constraint::Min(5),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self { header_area: chunks[0], body_area: chunks[1], status_area: chunks[2] }
    }
}

/// Results-view layout inside the body: summary strip on top, record list
/// beside the detail pane below.
pub struct ResultsLayout {
    pub summary_area: Rect,
    pub list_area: Rect,
    pub detail_area: Rect,
}

impl ResultsLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Summary + filters
                Constraint::Min(3),    // Records
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45), // Record list
                Constraint::Percentage(55), // Detail pane
            ])
            .split(vertical[1]);

        Self { summary_area: vertical[0], list_area: horizontal[0], detail_area: horizontal[1] }
    }
}
