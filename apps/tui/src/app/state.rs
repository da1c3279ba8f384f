use world_archive_core::gallery::{gallery_items, GalleryItem};
use world_archive_core::tabs::Transition;
use world_archive_core::timeline::{sorted_events, sorted_thanks, ThanksLine};
use world_archive_core::versions::{ordered_versions, DownloadPanel};
use world_archive_core::{HistoryEvent, SignGrid, Tab, TabController};

use crate::site::SiteData;

/// One dropdown entry with its precomputed panel.
#[derive(Debug, Clone)]
pub struct VersionEntry {
    pub label: String,
    pub is_latest: bool,
    pub panel: DownloadPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    /// Index into the sorted memories.
    Lightbox(usize),
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub overlay: Overlay,
    pub status_message: String,
    pub site_dir: String,
    pub site: SiteData,
    pub tabs: TabController,
    pub versions: Vec<VersionEntry>,
    pub selected_version: usize,
    pub show_full_checksum: bool,
    pub memories: Vec<GalleryItem>,
    pub selected_memory: usize,
    pub wall: SignGrid,
    /// Top-left visible cell as (col, row).
    pub wall_offset: (usize, usize),
    pub events: Vec<HistoryEvent>,
    pub thanks: Vec<ThanksLine>,
    pub selected_event: usize,
}

impl App {
    pub fn new(site: SiteData, site_dir: String) -> Self {
        let status_message = if site.errors.is_empty() {
            format!("Loaded site from {site_dir}")
        } else {
            format!("{} file(s) failed to load", site.errors.len())
        };

        let mut app = Self {
            running: true,
            overlay: Overlay::None,
            status_message,
            site_dir,
            site,
            tabs: TabController::default(),
            versions: Vec::new(),
            selected_version: 0,
            show_full_checksum: false,
            memories: Vec::new(),
            selected_memory: 0,
            wall: SignGrid::default(),
            wall_offset: (0, 0),
            events: Vec::new(),
            thanks: Vec::new(),
            selected_event: 0,
        };
        app.prepare_view(Tab::Download);
        app
    }

    pub const fn current_tab(&self) -> Tab {
        self.tabs.selected()
    }

    /// Shows `tab`, building its view on the first visit. The terminal has no
    /// exit animation, so an animated switch finishes at once.
    pub fn switch_tab(&mut self, tab: Tab) {
        let switch = self.tabs.switch_to(tab);
        if let Transition::Animated { exit, enter } = switch.transition {
            self.tabs.finish_exit(exit, enter);
        }
        if switch.first_visit {
            self.prepare_view(tab);
        }
        tracing::debug!(%tab, first_visit = switch.first_visit, "switched tab");
    }

    fn prepare_view(&mut self, tab: Tab) {
        if !self.tabs.lifecycle_mut(tab).begin_load() {
            return;
        }

        match tab {
            Tab::Download => {
                self.versions = ordered_versions(&self.site.versions)
                    .into_iter()
                    .map(|option| VersionEntry {
                        label: option.label(),
                        is_latest: option.is_latest,
                        panel: DownloadPanel::for_version(option.version),
                    })
                    .collect();
            }
            Tab::Memories => self.memories = gallery_items(&self.site.images),
            Tab::SignWall => {
                self.wall = SignGrid::normalize(&self.site.signs);
                if !self.wall.collisions().is_empty() {
                    self.status_message = format!(
                        "{} sign(s) hidden by later signs in the same cell",
                        self.wall.collisions().len()
                    );
                }
            }
            Tab::History => {
                self.events = sorted_events(&self.site.events)
                    .into_iter()
                    .cloned()
                    .collect();
                self.thanks = sorted_thanks(&self.site.thanks);
            }
        }

        let lifecycle = self.tabs.lifecycle_mut(tab);
        lifecycle.finish_load();
        lifecycle.mark_rendered();
    }

    pub fn selected_panel(&self) -> Option<&VersionEntry> {
        self.versions.get(self.selected_version)
    }

    /// Moves the list selection of the current tab by `delta` rows.
    pub fn move_selection(&mut self, delta: isize) {
        match self.current_tab() {
            Tab::Download => {
                self.selected_version = step(self.selected_version, delta, self.versions.len());
                self.show_full_checksum = false;
            }
            Tab::Memories => {
                self.selected_memory = step(self.selected_memory, delta, self.memories.len());
            }
            Tab::History => {
                self.selected_event = step(self.selected_event, delta, self.events.len());
            }
            Tab::SignWall => self.pan_wall(0, delta),
        }
    }

    /// Scrolls the wall viewport by whole cells, clamped to the grid.
    pub fn pan_wall(&mut self, cols: isize, rows: isize) {
        let (col, row) = self.wall_offset;
        self.wall_offset = (
            step(col, cols, self.wall.cols()),
            step(row, rows, self.wall.rows()),
        );
    }

    pub fn toggle_checksum(&mut self) {
        if self.current_tab() == Tab::Download && self.selected_panel().is_some() {
            self.show_full_checksum = !self.show_full_checksum;
        }
    }

    pub fn open_lightbox(&mut self) {
        if self.current_tab() == Tab::Memories && self.selected_memory < self.memories.len() {
            self.overlay = Overlay::Lightbox(self.selected_memory);
        }
    }

    pub fn toggle_help(&mut self) {
        self.overlay = if self.overlay == Overlay::Help {
            Overlay::None
        } else {
            Overlay::Help
        };
    }
}

/// `index + delta` clamped to `0..len`.
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::{step, App, Overlay};
    use crate::site::SiteData;
    use world_archive_core::{MemoryImage, Sign, Tab, Version, ViewLifecycle};

    fn version(id: &str, date: &str) -> Version {
        Version {
            id: Some(id.to_string()),
            date: Some(date.to_string()),
            ..Version::default()
        }
    }

    fn sign(col: i64, row: i64) -> Sign {
        Sign {
            col: Some(col),
            row: Some(row),
            text: "x".to_string(),
            ..Sign::default()
        }
    }

    fn sample_app() -> App {
        let site = SiteData {
            versions: vec![version("old", "2023-01-01"), version("new", "2024-01-01")],
            signs: vec![sign(0, 0), sign(4, 0), sign(1, 3)],
            images: vec![
                MemoryImage::File("2021-01-01.png".to_string()),
                MemoryImage::File("2022-01-01.png".to_string()),
            ],
            ..SiteData::default()
        };
        App::new(site, "site".to_string())
    }

    #[test]
    fn step_clamps_to_bounds() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(1, 5, 3), 2);
        assert_eq!(step(2, -1, 3), 1);
        assert_eq!(step(4, 1, 0), 0);
    }

    #[test]
    fn downloads_are_ready_at_start() {
        let app = sample_app();
        assert_eq!(app.tabs.lifecycle(Tab::Download), ViewLifecycle::Rendered);
        assert_eq!(app.versions.len(), 2);
        assert!(app.versions[0].is_latest);
        assert!(app.versions[0].label.ends_with("- Latest"));
        assert_eq!(app.status_message, "Loaded site from site");
    }

    #[test]
    fn views_are_built_on_first_visit() {
        let mut app = sample_app();
        assert!(app.memories.is_empty());
        assert_eq!(app.tabs.lifecycle(Tab::Memories), ViewLifecycle::Unloaded);

        app.switch_tab(Tab::Memories);
        assert_eq!(app.current_tab(), Tab::Memories);
        assert_eq!(app.memories.len(), 2);
        assert_eq!(app.memories[0].file, "2022-01-01.png");
        assert!(app.tabs.panel(Tab::Memories).visible);
        assert!(!app.tabs.panel(Tab::Download).visible);

        app.switch_tab(Tab::SignWall);
        assert_eq!(app.wall.cols(), 5);
        assert_eq!(app.wall.rows(), 2);
    }

    #[test]
    fn selection_and_panning_stay_in_bounds() {
        let mut app = sample_app();
        app.move_selection(10);
        assert_eq!(app.selected_version, 1);

        app.switch_tab(Tab::SignWall);
        app.pan_wall(9, 9);
        assert_eq!(app.wall_offset, (4, 1));
        app.move_selection(-5);
        assert_eq!(app.wall_offset, (4, 0));
    }

    #[test]
    fn lightbox_only_opens_on_memories() {
        let mut app = sample_app();
        app.open_lightbox();
        assert_eq!(app.overlay, Overlay::None);

        app.switch_tab(Tab::Memories);
        app.move_selection(1);
        app.open_lightbox();
        assert_eq!(app.overlay, Overlay::Lightbox(1));
    }

    #[test]
    fn checksum_toggle_resets_on_new_selection() {
        let mut app = sample_app();
        app.toggle_checksum();
        assert!(app.show_full_checksum);
        app.move_selection(1);
        assert!(!app.show_full_checksum);
    }
}
