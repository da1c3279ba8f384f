use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;
use world_archive_core::Tab;

pub fn tab_titles() -> Vec<TextLine<'static>> {
    Tab::ALL
        .iter()
        .map(|tab| TextLine::from(format!("{} {}", tab.index() + 1, tab.label())))
        .collect()
}

pub fn render_tab_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let tabs = Tabs::new(tab_titles())
        .select(app.current_tab().index())
        .block(
            Block::default()
                .title(" World Archive ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");

    f.render_widget(tabs, area);
}
