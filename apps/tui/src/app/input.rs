use crate::app::state::{App, Overlay};
use crossterm::event::KeyCode;
use world_archive_core::Tab;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_overlay(app, key) {
        return;
    }

    if let Some(tab) = tab_shortcut(app.current_tab(), key) {
        app.switch_tab(tab);
        return;
    }

    if app.current_tab() == Tab::SignWall && handle_wall_input(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::F(1) | KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-5),
        KeyCode::PageDown => app.move_selection(5),
        KeyCode::Char('c') => app.toggle_checksum(),
        KeyCode::Enter => app.open_lightbox(),
        _ => {}
    }
}

/// Help and the lightbox swallow every key; Esc (or F1/? for help) closes.
fn handle_overlay(app: &mut App, key: KeyCode) -> bool {
    match app.overlay {
        Overlay::None => false,
        Overlay::Help => {
            if matches!(key, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                app.overlay = Overlay::None;
            }
            true
        }
        Overlay::Lightbox(_) => {
            if matches!(key, KeyCode::Esc | KeyCode::Enter) {
                app.overlay = Overlay::None;
            }
            true
        }
    }
}

fn tab_shortcut(current: Tab, key: KeyCode) -> Option<Tab> {
    match key {
        KeyCode::Tab => Some(current.next()),
        KeyCode::BackTab => Some(current.previous()),
        // Arrows pan on the sign wall instead.
        KeyCode::Right if current != Tab::SignWall => Some(current.next()),
        KeyCode::Left if current != Tab::SignWall => Some(current.previous()),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit.to_digit(10)? as usize;
            Tab::from_index(index - 1)
        }
        _ => None,
    }
}

fn handle_wall_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.pan_wall(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.pan_wall(1, 0),
        KeyCode::Home => app.wall_offset = (0, 0),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::handle_input;
    use crate::app::state::{App, Overlay};
    use crate::site::SiteData;
    use crossterm::event::KeyCode;
    use world_archive_core::{MemoryImage, Sign, Tab};

    fn app() -> App {
        let site = SiteData {
            signs: vec![
                Sign {
                    col: Some(0),
                    text: "a".to_string(),
                    ..Sign::default()
                },
                Sign {
                    col: Some(3),
                    row: Some(1),
                    text: "b".to_string(),
                    ..Sign::default()
                },
            ],
            images: vec![MemoryImage::File("a.png".to_string())],
            ..SiteData::default()
        };
        App::new(site, ".".to_string())
    }

    #[test]
    fn number_keys_jump_to_tabs() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('4'));
        assert_eq!(app.current_tab(), Tab::History);
        handle_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_tab(), Tab::Download);
    }

    #[test]
    fn arrows_cycle_tabs_but_pan_the_wall() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Right);
        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab(), Tab::SignWall);

        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab(), Tab::SignWall);
        assert_eq!(app.wall_offset, (1, 0));

        handle_input(&mut app, KeyCode::Down);
        assert_eq!(app.wall_offset, (1, 1));

        handle_input(&mut app, KeyCode::Tab);
        assert_eq!(app.current_tab(), Tab::History);
        handle_input(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_tab(), Tab::SignWall);
    }

    #[test]
    fn escape_closes_overlays_before_quitting() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('2'));
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::Lightbox(0));

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        handle_input(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);

        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn help_toggles() {
        let mut app = app();
        handle_input(&mut app, KeyCode::F(1));
        assert_eq!(app.overlay, Overlay::Help);
        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_tab(), Tab::Download);
        handle_input(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::None);
    }
}
