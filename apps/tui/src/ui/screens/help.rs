use crate::cli::CliArgs;
use crate::ui::widgets::popup::{popup_area, render_popup_frame};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

const KEY_BINDINGS: [(&str, &str); 10] = [
    ("Tab / Shift+Tab", "Next / previous tab"),
    ("1-4", "Download, Memories, Sign Wall, History"),
    ("←/→", "Switch tab (pan on the sign wall)"),
    ("↑/↓ j/k", "Move selection (pan on the sign wall)"),
    ("PgUp/PgDn", "Move by five rows"),
    ("h/l", "Pan the sign wall"),
    ("Home", "Reset the sign wall view"),
    ("c", "Show the full checksum"),
    ("Enter", "Open the selected memory"),
    ("q / Esc", "Quit or close the overlay"),
];

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = popup_area(f.area(), 70, 80);
    let inner = render_popup_frame(f, area, "Help", Color::Yellow);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<TextLine<'_>> = KEY_BINDINGS
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:<18}"), key_style),
                Span::raw(*action),
            ])
        })
        .collect();

    lines.push(TextLine::from(""));
    lines.extend(CliArgs::help_text().lines().map(|line| TextLine::from(line.to_string())));

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}
