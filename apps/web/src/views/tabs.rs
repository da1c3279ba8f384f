use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;
use world_archive_core::tabs::{PanelState, Transition, TAB_EXIT_DELAY_MS};
use world_archive_core::Tab;

use crate::dom;
use crate::site::Site;
use crate::views::{gallery, signwall, timeline};

fn sync_panel(tab: Tab, state: PanelState) {
    let Some(panel) = dom::by_id::<HtmlElement>(&tab.panel_id()) else {
        return;
    };
    dom::set_class(&panel, "tab-exit", state.exiting);
    dom::set_style(&panel, "display", if state.visible { "block" } else { "none" });
    if state.active {
        // Reading layout restarts the enter animation.
        let _ = panel.offset_width();
    }
    dom::set_class(&panel, "tab-active", state.active);
}

fn sync_buttons(selected: Tab) {
    for button in dom::query_all(".tab-btn") {
        let is_selected = button
            .get_attribute("data-tab")
            .is_some_and(|name| name == selected.as_str());
        dom::set_class(&button, "active", is_selected);
    }
}

fn sync_body(selected: Tab) {
    let Some(body) = dom::body() else {
        return;
    };
    for tab in Tab::ALL {
        if let Some(class) = tab.body_class() {
            dom::set_class(&body, class, tab == selected);
        }
    }
}

pub fn switch_tab(site: &Rc<Site>, name: &str) {
    let Some(target) = Tab::parse(name) else {
        log::warn!("unknown tab {name:?}");
        return;
    };

    let switch = site.tabs.borrow_mut().switch_to(target);
    sync_buttons(target);

    match switch.transition {
        Transition::Immediate { enter } => {
            let state = site.tabs.borrow().panel(enter);
            sync_panel(enter, state);
        }
        Transition::Animated { exit, enter } => {
            let state = site.tabs.borrow().panel(exit);
            sync_panel(exit, state);

            let site = Rc::clone(site);
            Timeout::new(TAB_EXIT_DELAY_MS, move || {
                let (leaving, entering) = {
                    let mut tabs = site.tabs.borrow_mut();
                    tabs.finish_exit(exit, enter);
                    (tabs.panel(exit), tabs.panel(enter))
                };
                sync_panel(exit, leaving);
                sync_panel(enter, entering);
            })
            .forget();
        }
    }

    sync_body(target);
    log::debug!("switched to {target} (first visit: {})", switch.first_visit);

    match target {
        Tab::Download => {}
        Tab::Memories => gallery::render(site),
        Tab::SignWall => signwall::render(site),
        Tab::History => timeline::render(site),
    }
}
