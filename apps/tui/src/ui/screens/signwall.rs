use crate::app::App;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use world_archive_core::signwall::{css_color, sign_lines, CellPos, MAX_SIGN_LINES};
use world_archive_core::Sign;

const CELL_WIDTH: u16 = 14;
const CELL_HEIGHT: u16 = MAX_SIGN_LINES as u16 + 1;
const COPPER: Color = Color::Rgb(184, 115, 51);
const COPPER_DARK: Color = Color::Rgb(150, 92, 40);

pub fn render_sign_wall(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (col_offset, row_offset) = app.wall_offset;
    let block = Block::default()
        .title(format!(
            " Sign Wall {}x{} ({} signs) col {} row {} ",
            app.wall.cols(),
            app.wall.rows(),
            app.wall.occupied(),
            col_offset,
            row_offset
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.wall.is_empty() {
        let paragraph = Paragraph::new("No signs on the wall").alignment(Alignment::Center);
        f.render_widget(paragraph, inner);
        return;
    }

    let visible_cols = usize::from(inner.width / CELL_WIDTH);
    let visible_rows = usize::from(inner.height / CELL_HEIGHT);

    for pos in visible_cells(
        (app.wall.cols(), app.wall.rows()),
        app.wall_offset,
        (visible_cols, visible_rows),
    ) {
        let Some(cell) = cell_area(inner, pos, app.wall_offset, (visible_cols, visible_rows))
        else {
            continue;
        };
        let sign = app
            .wall
            .sign_at(pos)
            .and_then(|index| app.site.signs.get(index));
        f.render_widget(sign_cell(sign, pos), cell);
    }
}

/// Grid positions inside the viewport, row by row.
fn visible_cells(
    grid: (usize, usize),
    offset: (usize, usize),
    visible: (usize, usize),
) -> impl Iterator<Item = CellPos> {
    let cols = offset.0..grid.0.min(offset.0.saturating_add(visible.0));
    let rows = offset.1..grid.1.min(offset.1.saturating_add(visible.1));
    rows.flat_map(move |row| cols.clone().map(move |col| CellPos { col, row }))
}

/// Screen rectangle of `pos` when it falls inside the viewport.
fn cell_area(
    inner: Rect,
    pos: CellPos,
    offset: (usize, usize),
    visible: (usize, usize),
) -> Option<Rect> {
    let col = pos.col.checked_sub(offset.0)?;
    let row = pos.row.checked_sub(offset.1)?;
    if col >= visible.0 || row >= visible.1 {
        return None;
    }

    let x = inner.x + u16::try_from(col).ok()? * CELL_WIDTH;
    let y = inner.y + u16::try_from(row).ok()? * CELL_HEIGHT;
    Some(Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT))
}

fn sign_cell(sign: Option<&Sign>, pos: CellPos) -> Paragraph<'static> {
    // Checkerboard stands in for the per-cell colour jitter.
    let background = if (pos.col + pos.row) % 2 == 0 {
        COPPER
    } else {
        COPPER_DARK
    };
    let width = usize::from(CELL_WIDTH - 2);

    let lines: Vec<TextLine<'static>> = sign
        .map(|sign| {
            let mut style = Style::default().fg(terminal_color(&css_color(sign.color.as_deref())));
            if sign.glow.unwrap_or(false) {
                style = style.add_modifier(Modifier::BOLD);
            }
            sign_lines(&sign.text)
                .map(|line| TextLine::styled(fit(line, width), style))
                .collect()
        })
        .unwrap_or_default();

    Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .style(Style::default().bg(background))
}

/// `#RRGGBB` as a terminal colour; anything else renders black.
pub fn terminal_color(css: &str) -> Color {
    let hex = css.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Black;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Black,
    }
}

/// Truncates `text` to `width` characters, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::{cell_area, fit, terminal_color, visible_cells, CELL_HEIGHT, CELL_WIDTH};
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use world_archive_core::signwall::CellPos;

    #[test]
    fn parses_css_hex_colours() {
        assert_eq!(terminal_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(terminal_color("#000000"), Color::Rgb(0, 0, 0));
        assert_eq!(terminal_color("red"), Color::Black);
        assert_eq!(terminal_color("#zzzzzz"), Color::Black);
    }

    #[test]
    fn fit_truncates_long_lines() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("a very long line", 6), "a ver…");
        assert_eq!(fit("ünïcödé", 7), "ünïcödé");
    }

    #[test]
    fn cells_outside_the_viewport_are_skipped() {
        let inner = Rect::new(1, 1, CELL_WIDTH * 3, CELL_HEIGHT * 2);
        let pos = CellPos { col: 2, row: 1 };

        let rect = cell_area(inner, pos, (1, 0), (3, 2)).unwrap();
        assert_eq!(rect, Rect::new(1 + CELL_WIDTH, 1 + CELL_HEIGHT, CELL_WIDTH, CELL_HEIGHT));

        assert!(cell_area(inner, pos, (3, 0), (3, 2)).is_none());
        assert!(cell_area(inner, pos, (0, 0), (2, 2)).is_none());
        assert!(cell_area(inner, pos, (0, 2), (3, 2)).is_none());
    }

    #[test]
    fn only_cells_in_the_viewport_are_visited() {
        let cells: Vec<_> = visible_cells((500, 40), (10, 2), (3, 2)).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], CellPos { col: 10, row: 2 });
        assert_eq!(cells[5], CellPos { col: 12, row: 3 });

        let clipped: Vec<_> = visible_cells((4, 2), (3, 1), (5, 5)).collect();
        assert_eq!(clipped, vec![CellPos { col: 3, row: 1 }]);

        assert_eq!(visible_cells((4, 2), (9, 9), (3, 3)).count(), 0);
    }
}
