use crate::app::App;
use crate::ui::widgets::tables::{
    header_style, scroll_offset, selected_row_style, visible_rows,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use world_archive_core::timeline::{event_date_label, ThanksLine, EMPTY_MESSAGE};

pub fn render_history(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = if app.thanks.is_empty() {
        vec![Constraint::Percentage(100)]
    } else {
        vec![Constraint::Percentage(65), Constraint::Percentage(35)]
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(area);

    let timeline = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(chunks[0]);

    render_events(app, f, timeline[0]);
    render_description(app, f, timeline[1]);
    if let Some(&thanks_area) = chunks.get(1) {
        render_thanks(&app.thanks, f, thanks_area);
    }
}

fn render_events(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" History ({}) ", app.events.len()))
        .borders(Borders::ALL);

    if app.events.is_empty() {
        let paragraph = Paragraph::new(EMPTY_MESSAGE)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let max_rows = visible_rows(area.height);
    let offset = scroll_offset(app.events.len(), max_rows, app.selected_event);

    let rows = app
        .events
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_rows)
        .map(|(index, event)| {
            let row = Row::new(vec![
                event_date_label(event),
                event.category.clone(),
                event.title.clone(),
            ]);
            if index == app.selected_event {
                row.style(selected_row_style())
            } else {
                row
            }
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(vec!["Date", "Category", "Title"]).style(header_style()))
    .block(block);
    f.render_widget(table, area);
}

fn render_description(app: &App, f: &mut Frame<'_>, area: Rect) {
    let text = app
        .events
        .get(app.selected_event)
        .map_or("", |event| event.description.as_str());
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Details ").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn thanks_item(line: &ThanksLine) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        line.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if line.trusted {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            ThanksLine::trusted_tag(),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(contribution) = &line.contribution {
        spans.push(Span::raw(format!(" - {contribution}")));
    }
    ListItem::new(Text::from(TextLine::from(spans)))
}

fn render_thanks(thanks: &[ThanksLine], f: &mut Frame<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = thanks.iter().map(thanks_item).collect();
    let list = List::new(items).block(
        Block::default()
            .title(" Thanks ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(list, area);
}
