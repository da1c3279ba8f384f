mod dom;
mod fetch;
mod site;
mod views;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlSelectElement, KeyboardEvent};

use crate::views::{downloads, gallery, tabs};

fn main() {
    console_error_panic_hook::set_once();
    if let Err(error) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger already set: {error}").into());
    }

    let site = site::current();
    spawn_local(downloads::load_versions(site));
    bind_controls();
}

/// Wires the page markup to the exported handlers.
fn bind_controls() {
    if let Some(dropdown) = dom::by_id::<HtmlSelectElement>("version") {
        dom::listen(&dropdown.clone(), "change", move |_: Event| {
            update_download_link(&dropdown.value());
        });
    }

    for button in dom::query_all(".tab-btn[data-tab]") {
        let Some(name) = button.get_attribute("data-tab") else {
            continue;
        };
        dom::listen(&button, "click", move |_: Event| switch_tab(&name));
    }

    for button in dom::query_all(".copy-btn") {
        dom::listen(&button, "click", |event: Event| copy_checksum(&event));
    }

    if let Some(lightbox) = dom::by_id::<web_sys::HtmlElement>("lightbox") {
        dom::listen(&lightbox, "click", |event: Event| close_lightbox(Some(event)));
    }

    if let Some(document) = dom::document() {
        dom::listen(&document, "keydown", |event: Event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if is_escape {
                close_lightbox(None);
            }
        });
    }
}

#[wasm_bindgen(js_name = updateDownloadLink)]
pub fn update_download_link(key: &str) {
    downloads::update_download_link(&site::current(), key);
}

#[wasm_bindgen(js_name = copyChecksum)]
pub fn copy_checksum(event: &Event) {
    downloads::copy_checksum(event);
}

#[wasm_bindgen(js_name = switchTab)]
pub fn switch_tab(name: &str) {
    tabs::switch_tab(&site::current(), name);
}

#[wasm_bindgen(js_name = openLightbox)]
#[allow(clippy::cast_possible_truncation)]
pub fn open_lightbox(src: &str, author: &str, millis: f64) {
    gallery::open_lightbox(src, author, millis as i64);
}

#[wasm_bindgen(js_name = closeLightbox)]
pub fn close_lightbox(event: Option<Event>) {
    gallery::close_lightbox(&site::current(), event.as_ref());
}
