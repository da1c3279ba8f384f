//! Tab controller: which panel is visible, the enter/exit animation states
//! of each panel, and the one-time load lifecycle of every view.

/// Delay between starting a panel's exit animation and showing the next one.
pub const TAB_EXIT_DELAY_MS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Download,
    Memories,
    SignWall,
    History,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Download, Self::Memories, Self::SignWall, Self::History];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Memories => "memories",
            Self::SignWall => "signwall",
            Self::History => "history",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "download" => Some(Self::Download),
            "memories" => Some(Self::Memories),
            "signwall" => Some(Self::SignWall),
            "history" => Some(Self::History),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Download => "Download",
            Self::Memories => "Memories",
            Self::SignWall => "Sign Wall",
            Self::History => "History",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Download => 0,
            Self::Memories => 1,
            Self::SignWall => 2,
            Self::History => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Download),
            1 => Some(Self::Memories),
            2 => Some(Self::SignWall),
            3 => Some(Self::History),
            _ => None,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Download => Self::Memories,
            Self::Memories => Self::SignWall,
            Self::SignWall => Self::History,
            Self::History => Self::Download,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Download => Self::History,
            Self::Memories => Self::Download,
            Self::SignWall => Self::Memories,
            Self::History => Self::SignWall,
        }
    }

    /// Id of the panel element, e.g. `tab-signwall`.
    pub fn panel_id(self) -> String {
        format!("tab-{}", self.as_str())
    }

    /// Class put on `<body>` while this tab is shown.
    pub const fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Download => None,
            Self::Memories => Some("memories-active"),
            Self::SignWall => Some("signwall-active"),
            Self::History => Some("history-active"),
        }
    }

    /// Whether the page itself scrolls while this tab is shown.
    pub const fn scrolls_page(self) -> bool {
        matches!(self, Self::Memories | Self::History)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load/render progress of one view. A view only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ViewLifecycle {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Rendered,
}

impl ViewLifecycle {
    /// Claims the load. Returns `false` when a load already started.
    pub fn begin_load(&mut self) -> bool {
        if *self == Self::Unloaded {
            *self = Self::Loading;
            true
        } else {
            false
        }
    }

    pub fn finish_load(&mut self) {
        if *self < Self::Loaded {
            *self = Self::Loaded;
        }
    }

    pub fn mark_rendered(&mut self) {
        *self = Self::Rendered;
    }

    pub const fn is_rendered(self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Display and animation classes of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    /// `display: block` versus `display: none`.
    pub visible: bool,
    /// `tab-active`, which also plays the enter animation.
    pub active: bool,
    /// `tab-exit`, the leave animation.
    pub exiting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Target shown at once; nothing was leaving.
    Immediate { enter: Tab },
    /// `exit` animates out; call [`TabController::finish_exit`] after
    /// [`TAB_EXIT_DELAY_MS`].
    Animated { exit: Tab, enter: Tab },
}

impl Transition {
    pub const fn enter(self) -> Tab {
        match self {
            Self::Immediate { enter } | Self::Animated { enter, .. } => enter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSwitch {
    pub transition: Transition,
    /// The target view has never been loaded.
    pub first_visit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabController {
    selected: Tab,
    panels: [PanelState; 4],
    views: [ViewLifecycle; 4],
}

impl Default for TabController {
    fn default() -> Self {
        Self::new(Tab::Download)
    }
}

impl TabController {
    /// Starts with `initial` shown, as served by the page markup.
    pub fn new(initial: Tab) -> Self {
        let mut panels = [PanelState::default(); 4];
        panels[initial.index()] = PanelState {
            visible: true,
            active: true,
            exiting: false,
        };
        Self {
            selected: initial,
            panels,
            views: [ViewLifecycle::default(); 4],
        }
    }

    /// The tab whose button is highlighted.
    pub const fn selected(&self) -> Tab {
        self.selected
    }

    pub const fn panel(&self, tab: Tab) -> PanelState {
        self.panels[tab.index()]
    }

    pub const fn lifecycle(&self, tab: Tab) -> ViewLifecycle {
        self.views[tab.index()]
    }

    pub fn lifecycle_mut(&mut self, tab: Tab) -> &mut ViewLifecycle {
        &mut self.views[tab.index()]
    }

    fn active_panel(&self) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| self.panel(*tab).active)
    }

    pub fn switch_to(&mut self, target: Tab) -> TabSwitch {
        self.selected = target;
        let first_visit = self.lifecycle(target) == ViewLifecycle::Unloaded;

        let transition = match self.active_panel() {
            Some(current) if current != target => {
                let panel = &mut self.panels[current.index()];
                panel.exiting = true;
                panel.active = false;
                Transition::Animated {
                    exit: current,
                    enter: target,
                }
            }
            _ => {
                self.panels[target.index()] = PanelState {
                    visible: true,
                    active: true,
                    exiting: false,
                };
                Transition::Immediate { enter: target }
            }
        };

        TabSwitch {
            transition,
            first_visit,
        }
    }

    /// Second half of an animated switch: hide the leaving panel and show the
    /// entering one, unless another switch has since picked a different tab.
    /// A leaving panel that was selected again in the meantime stays shown.
    pub fn finish_exit(&mut self, exit: Tab, enter: Tab) {
        if exit != self.selected {
            let leaving = &mut self.panels[exit.index()];
            leaving.exiting = false;
            leaving.visible = false;
        }

        if self.selected != enter {
            return;
        }
        let entering = &mut self.panels[enter.index()];
        entering.visible = true;
        entering.active = true;
    }

    /// Whether the page should scroll once an overlay closes.
    pub fn page_scrolls(&self) -> bool {
        Tab::ALL
            .into_iter()
            .any(|tab| tab.scrolls_page() && self.panel(tab).visible)
    }
}

#[cfg(test)]
mod tests {
    use super::{PanelState, Tab, TabController, Transition, ViewLifecycle};

    #[test]
    fn names_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(Tab::parse(tab.as_str()), Some(tab));
            assert_eq!(Tab::from_index(tab.index()), Some(tab));
            assert_eq!(tab.next().previous(), tab);
        }
        assert_eq!(Tab::parse("nope"), None);
        assert_eq!(Tab::SignWall.panel_id(), "tab-signwall");
    }

    #[test]
    fn switching_away_animates_then_shows_target() {
        let mut tabs = TabController::new(Tab::Download);
        let switch = tabs.switch_to(Tab::History);

        assert!(switch.first_visit);
        assert_eq!(
            switch.transition,
            Transition::Animated {
                exit: Tab::Download,
                enter: Tab::History
            }
        );
        assert_eq!(
            tabs.panel(Tab::Download),
            PanelState {
                visible: true,
                active: false,
                exiting: true
            }
        );
        assert!(!tabs.panel(Tab::History).visible);

        tabs.finish_exit(Tab::Download, Tab::History);
        assert_eq!(tabs.panel(Tab::Download), PanelState::default());
        assert_eq!(
            tabs.panel(Tab::History),
            PanelState {
                visible: true,
                active: true,
                exiting: false
            }
        );
    }

    #[test]
    fn switching_to_the_active_tab_is_idempotent() {
        let mut tabs = TabController::new(Tab::Memories);
        let before = tabs.clone();

        let first = tabs.switch_to(Tab::Memories);
        let second = tabs.switch_to(Tab::Memories);

        assert_eq!(first.transition, Transition::Immediate { enter: Tab::Memories });
        assert_eq!(second.transition, first.transition);
        assert_eq!(tabs, before);
        assert!(!tabs.panel(Tab::Memories).exiting);
    }

    #[test]
    fn switch_during_exit_shows_immediately() {
        let mut tabs = TabController::new(Tab::Download);
        tabs.switch_to(Tab::SignWall);
        let again = tabs.switch_to(Tab::History);
        assert_eq!(again.transition, Transition::Immediate { enter: Tab::History });
        assert!(tabs.panel(Tab::History).active);

        // The first switch's timer fires late and must not reveal the wall.
        tabs.finish_exit(Tab::Download, Tab::SignWall);
        assert_eq!(tabs.panel(Tab::SignWall), PanelState::default());
        assert!(!tabs.panel(Tab::Download).visible);
        assert!(tabs.panel(Tab::History).visible);
    }

    #[test]
    fn switching_back_before_exit_finishes_keeps_tab_shown() {
        let mut tabs = TabController::new(Tab::Download);
        tabs.switch_to(Tab::History);
        let back = tabs.switch_to(Tab::Download);
        assert_eq!(back.transition, Transition::Immediate { enter: Tab::Download });
        assert_eq!(
            tabs.panel(Tab::Download),
            PanelState {
                visible: true,
                active: true,
                exiting: false,
            }
        );

        tabs.finish_exit(Tab::Download, Tab::History);
        assert_eq!(tabs.selected(), Tab::Download);
        assert!(tabs.panel(Tab::Download).visible);
        assert!(tabs.panel(Tab::Download).active);
        assert!(!tabs.panel(Tab::History).visible);
    }

    #[test]
    fn lifecycle_only_loads_once() {
        let mut tabs = TabController::default();
        assert!(tabs.lifecycle_mut(Tab::SignWall).begin_load());
        assert!(!tabs.lifecycle_mut(Tab::SignWall).begin_load());

        let switch = tabs.switch_to(Tab::SignWall);
        assert!(!switch.first_visit);

        tabs.lifecycle_mut(Tab::SignWall).finish_load();
        tabs.lifecycle_mut(Tab::SignWall).mark_rendered();
        tabs.lifecycle_mut(Tab::SignWall).finish_load();
        assert_eq!(tabs.lifecycle(Tab::SignWall), ViewLifecycle::Rendered);
        assert!(tabs.lifecycle(Tab::SignWall).is_rendered());
    }

    #[test]
    fn page_scroll_follows_visible_panels() {
        let mut tabs = TabController::new(Tab::Download);
        assert!(!tabs.page_scrolls());
        tabs.switch_to(Tab::Memories);
        tabs.finish_exit(Tab::Download, Tab::Memories);
        assert!(tabs.page_scrolls());
        assert_eq!(Tab::Memories.body_class(), Some("memories-active"));
        assert_eq!(Tab::Download.body_class(), None);
    }
}
