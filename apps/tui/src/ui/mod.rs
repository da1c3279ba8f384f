// UI module for the site previewer
// One screen per site tab, plus help and lightbox overlays

pub mod screens;
pub mod widgets;

use crate::app::{App, Overlay};
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::Frame;
use world_archive_core::Tab;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(6),    // Current tab
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    widgets::tabs::render_tab_bar(app, f, layout[0]);

    match app.current_tab() {
        Tab::Download => screens::downloads::render_downloads(app, f, layout[1]),
        Tab::Memories => screens::memories::render_memories(app, f, layout[1]),
        Tab::SignWall => screens::signwall::render_sign_wall(app, f, layout[1]),
        Tab::History => screens::history::render_history(app, f, layout[1]),
    }

    widgets::status::render_status(app, f, layout[2]);
    widgets::status::render_shortcuts(app.current_tab(), f, layout[3]);

    match app.overlay {
        Overlay::None => {}
        Overlay::Help => screens::help::render_help_popup(f),
        Overlay::Lightbox(index) => screens::memories::render_lightbox(app, index, f),
    }
}
