use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};
use ratatui::Frame;

/// A `percent_x` by `percent_y` rectangle centred in `area`.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Clears `area`, draws a titled border and returns the inner area.
pub fn render_popup_frame(f: &mut Frame<'_>, area: Rect, title: &str, color: Color) -> Rect {
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::popup_area;
    use ratatui::layout::Rect;

    #[test]
    fn popup_is_centred() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = popup_area(area, 50, 50);
        assert_eq!(popup, Rect::new(25, 10, 50, 20));
    }
}
