use std::cell::{Cell, RefCell};
use std::rc::Rc;

use world_archive_core::pan::DragPan;
use world_archive_core::{Tab, TabController, Version};

/// Page-wide state shared by every event handler.
#[derive(Default)]
pub struct Site {
    pub versions: RefCell<Vec<Version>>,
    pub tabs: RefCell<TabController>,
    pub pan: Cell<DragPan>,
    pub pan_bound: Cell<bool>,
}

impl Site {
    /// Claims the one-time load of `tab`'s view.
    pub fn begin_load(&self, tab: Tab) -> bool {
        self.tabs.borrow_mut().lifecycle_mut(tab).begin_load()
    }

    pub fn finish_render(&self, tab: Tab) {
        let mut tabs = self.tabs.borrow_mut();
        let lifecycle = tabs.lifecycle_mut(tab);
        lifecycle.finish_load();
        lifecycle.mark_rendered();
    }
}

thread_local! {
    static SITE: Rc<Site> = Rc::new(Site::default());
}

pub fn current() -> Rc<Site> {
    SITE.with(Rc::clone)
}
