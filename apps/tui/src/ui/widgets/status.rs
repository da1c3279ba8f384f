use crate::app::App;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use world_archive_core::Tab;

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let color = if app.site.errors.is_empty() {
        Color::Green
    } else {
        Color::Red
    };
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .title(" Status ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(status, area);
}

/// Key hints for the current tab, most specific first.
pub fn shortcut_hints(tab: Tab) -> Vec<(&'static str, &'static str)> {
    let mut hints = match tab {
        Tab::Download => vec![("↑/↓", "Version"), ("c", "Full checksum")],
        Tab::Memories => vec![("↑/↓", "Select"), ("Enter", "Open")],
        Tab::SignWall => vec![("←↑↓→/hjkl", "Pan"), ("Home", "Reset")],
        Tab::History => vec![("↑/↓", "Event")],
    };
    hints.extend([("Tab/1-4", "Switch"), ("?", "Help"), ("q", "Quit")]);
    hints
}

pub fn render_shortcuts(tab: Tab, f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let spans: Vec<Span<'_>> = shortcut_hints(tab)
        .into_iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(key, key_style),
                Span::raw(format!(": {action}   ")),
            ]
        })
        .collect();

    let paragraph = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::shortcut_hints;
    use world_archive_core::Tab;

    #[test]
    fn every_tab_can_quit_and_switch() {
        for tab in Tab::ALL {
            let hints = shortcut_hints(tab);
            assert!(hints.iter().any(|(key, _)| *key == "q"));
            assert!(hints.iter().any(|(key, _)| *key == "Tab/1-4"));
        }
        assert_eq!(shortcut_hints(Tab::SignWall)[0].1, "Pan");
    }
}
