use crate::app::App;
use crate::ui::widgets::tables::{
    header_style, scroll_offset, selected_row_style, visible_rows,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use world_archive_core::versions::{DownloadPanel, LOAD_FAILURE_MESSAGE};

pub fn render_downloads(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.versions.is_empty() {
        let message = if app.site.errors.iter().any(|e| e.contains("versions.json")) {
            LOAD_FAILURE_MESSAGE
        } else {
            "No versions listed"
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title(" Versions ").borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_version_list(app, f, chunks[0]);
    if let Some(entry) = app.selected_panel() {
        render_panel(&entry.panel, app.show_full_checksum, f, chunks[1]);
    }
}

fn render_version_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let max_rows = visible_rows(area.height);
    let offset = scroll_offset(app.versions.len(), max_rows, app.selected_version);

    let rows = app
        .versions
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_rows)
        .map(|(index, entry)| {
            let style = if index == app.selected_version {
                selected_row_style()
            } else if entry.is_latest {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![Cell::from(entry.label.clone())]).style(style)
        });

    let table = Table::new(rows, [Constraint::Percentage(100)])
        .header(Row::new(vec![Cell::from("Version")]).style(header_style()))
        .block(
            Block::default()
                .title(format!(
                    " Versions ({} of {}) ",
                    app.selected_version + 1,
                    app.versions.len()
                ))
                .borders(Borders::ALL),
        );
    f.render_widget(table, area);
}

fn field_line<'a>(label: &'a str, value: &'a str) -> TextLine<'a> {
    TextLine::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn render_panel(panel: &DownloadPanel, full_checksum: bool, f: &mut Frame<'_>, area: Rect) {
    let checksum = if full_checksum && !panel.checksum_full.is_empty() {
        panel.checksum_full.as_str()
    } else {
        panel.checksum_display.as_str()
    };
    let missing = "(not available)";

    let helper = panel.helper();
    let helper_style = if helper.is_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let lines = vec![
        field_line("Size", &panel.file_size),
        field_line("Checksum", checksum),
        TextLine::from(""),
        field_line("Torrent", panel.magnet_link.as_deref().unwrap_or(missing)),
        field_line("HTTPS", panel.https_link.as_deref().unwrap_or(missing)),
        TextLine::from(""),
        TextLine::from(Span::styled(helper.text(), helper_style)),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Download ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
