use ratatui::style::{Color, Modifier, Style};

/// First row to draw so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || max_visible_rows == 0 {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index + 1 - max_visible_rows;
    }

    0
}

/// Rows left for data once borders and the header are drawn.
pub const fn visible_rows(area_height: u16) -> usize {
    area_height.saturating_sub(3) as usize
}

pub fn selected_row_style() -> Style {
    Style::default()
        .bg(Color::Rgb(60, 133, 39))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
