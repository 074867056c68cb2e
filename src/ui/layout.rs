use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct StageLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct SetupLayout {
    pub header_area: Rect,
    pub field_areas: [Rect; 4],
    pub message_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_stage_chunks(area: Rect) -> StageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(area);

    StageLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_setup_chunks(area: Rect) -> SetupLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    SetupLayout {
        header_area: chunks[0],
        field_areas: [chunks[1], chunks[2], chunks[3], chunks[4]],
        message_area: chunks[5],
        help_area: chunks[6],
    }
}

/// Centered rectangle taking the given percentages of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
