use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct WorksheetLayout {
    pub header_area: Rect,
    pub prompt_area: Rect,
    pub response_area: Rect,
    pub help_area: Rect,
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub score_area: Rect,
    pub results_area: Rect,
    pub notes_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_worksheet_chunks(area: Rect) -> WorksheetLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    WorksheetLayout {
        header_area: chunks[0],
        prompt_area: chunks[1],
        response_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    SummaryLayout {
        header_area: chunks[0],
        score_area: chunks[1],
        results_area: content[0],
        notes_area: content[1],
        footer_area: chunks[3],
    }
}
