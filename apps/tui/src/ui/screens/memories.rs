use crate::app::App;
use crate::ui::widgets::popup::{popup_area, render_popup_frame};
use crate::ui::widgets::tables::{
    header_style, scroll_offset, selected_row_style, visible_rows,
};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use world_archive_core::gallery::EMPTY_MESSAGE;

pub fn render_memories(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" Memories ({}) ", app.memories.len()))
        .borders(Borders::ALL);

    if app.memories.is_empty() {
        let paragraph = Paragraph::new(EMPTY_MESSAGE)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let max_rows = visible_rows(area.height);
    let offset = scroll_offset(app.memories.len(), max_rows, app.selected_memory);

    let rows = app
        .memories
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_rows)
        .map(|(index, item)| {
            let row = Row::new(vec![
                Cell::from(item.card_date()),
                Cell::from(item.author.clone()),
                Cell::from(item.file.clone()),
            ]);
            if index == app.selected_memory {
                row.style(selected_row_style())
            } else {
                row
            }
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Percentage(30),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(vec!["Date", "Author", "File"]).style(header_style()))
    .block(block);
    f.render_widget(table, area);
}

pub fn render_lightbox(app: &App, index: usize, f: &mut Frame<'_>) {
    let Some(item) = app.memories.get(index) else {
        return;
    };

    let area = popup_area(f.area(), 60, 40);
    let inner = render_popup_frame(f, area, &item.file, Color::Cyan);

    let lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            item.caption(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            item.src.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Esc or Enter to close",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}
