use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the filter panel beside the result list.
pub const FILTER_PANEL_WIDTH: u16 = 34;

/// Search bar, body and pager rows.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Split the list body into an optional filter panel and the results.
pub fn split_body(body: Rect, show_filters: bool) -> (Option<Rect>, Rect) {
    if !show_filters {
        return (None, body);
    }
    let panel_width = FILTER_PANEL_WIDTH.min(body.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(panel_width), Constraint::Min(0)])
        .split(body);
    (Some(chunks[0]), chunks[1])
}

/// Category list, ingredient checklist and range sliders, top to bottom.
pub fn filter_sections(panel: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Min(3),
            Constraint::Length(6),
        ])
        .split(panel);
    (chunks[0], chunks[1], chunks[2])
}
