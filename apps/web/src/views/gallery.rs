//! Memories gallery and its lightbox.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlElement, HtmlImageElement};
use world_archive_core::dates::{from_millis, to_millis};
use world_archive_core::gallery::{gallery_items, lightbox_caption, GalleryItem, EMPTY_MESSAGE};
use world_archive_core::{MemoryImage, Tab};

use crate::dom;
use crate::fetch::describe;
use crate::site::Site;

const LIGHTBOX_IMAGE_ID: &str = "lightboxImg";

/// Reads the `MEMORY_IMAGES` manifest declared by `public/img/images.js`.
///
/// The manifest is a top-level `const`, which is not a `window` property, so
/// it is looked up through a function evaluated in global scope.
fn memory_images() -> Vec<MemoryImage> {
    let lookup = js_sys::Function::new_no_args(
        "return typeof MEMORY_IMAGES === 'undefined' ? [] : MEMORY_IMAGES;",
    );
    let value = match lookup.call0(&JsValue::NULL) {
        Ok(value) => value,
        Err(error) => {
            log::error!("Error reading MEMORY_IMAGES: {}", describe(&error));
            return Vec::new();
        }
    };
    serde_wasm_bindgen::from_value(value).unwrap_or_else(|error| {
        log::error!("Error decoding MEMORY_IMAGES: {error}");
        Vec::new()
    })
}

pub fn render(site: &Site) {
    if !site.begin_load(Tab::Memories) {
        return;
    }
    let Some(gallery) = dom::by_id::<HtmlElement>("memoriesGallery") else {
        return;
    };

    let items = gallery_items(&memory_images());
    gallery.set_inner_html("");

    if items.is_empty() {
        gallery.set_inner_html(&format!(r#"<div class="memories-empty">{EMPTY_MESSAGE}</div>"#));
    } else if let Err(error) = append_items(&gallery, &items) {
        dom::log_js_error("memories gallery", &error);
    }

    log::debug!("rendered {} memories", items.len());
    site.finish_render(Tab::Memories);
}

fn append_items(gallery: &HtmlElement, items: &[GalleryItem]) -> Result<(), JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let fragment = document.create_document_fragment();
    for item in items {
        let card = memory_card(item)?;
        fragment.append_child(&card)?;
    }
    gallery.append_child(&fragment)?;
    Ok(())
}

fn memory_card(item: &GalleryItem) -> Result<HtmlElement, JsValue> {
    let card = dom::create("div", "memory-item")?;

    let img = dom::create("img", "")?.dyn_into::<HtmlImageElement>()?;
    img.set_src(&item.src);
    img.set_alt(&item.file);
    img.set_attribute("loading", "lazy")?;
    img.set_attribute("decoding", "async")?;

    let on_load = Closure::<dyn FnMut()>::new({
        let img = img.clone();
        move || dom::set_class(&img, "loaded", true)
    });
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();

    let on_click = Closure::<dyn FnMut()>::new({
        let src = item.src.clone();
        let author = item.author.clone();
        let millis = to_millis(item.date);
        move || open_lightbox(&src, &author, millis)
    });
    img.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();

    let overlay = dom::create("div", "memory-overlay")?;
    let author = dom::create("span", "memory-author")?;
    author.set_text_content(Some(&item.author));
    let date = dom::create("span", "memory-date")?;
    date.set_text_content(Some(&item.card_date()));
    overlay.append_child(&author)?;
    overlay.append_child(&date)?;

    card.append_child(&img)?;
    card.append_child(&overlay)?;
    Ok(card)
}

pub fn open_lightbox(src: &str, author: &str, millis: i64) {
    if let Some(img) = dom::by_id::<HtmlImageElement>(LIGHTBOX_IMAGE_ID) {
        img.set_src(src);
    }
    if let Some(caption) = dom::by_id::<HtmlElement>("lightboxCaption") {
        let date = from_millis(millis).unwrap_or_default();
        caption.set_text_content(Some(&lightbox_caption(author, date)));
    }
    if let Some(lightbox) = dom::by_id::<HtmlElement>("lightbox") {
        dom::set_class(&lightbox, "active", true);
    }
    if let Some(body) = dom::body() {
        dom::set_style(&body, "overflow", "hidden");
    }
}

/// Closes on Escape (no event) or on a click that hit the backdrop or the
/// image itself; clicks on the caption are ignored.
pub fn close_lightbox(site: &Site, event: Option<&Event>) {
    if let Some(event) = event {
        let target = event.target();
        let on_backdrop = target.is_some() && target == event.current_target();
        let on_image = target
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
            .is_some_and(|element| element.id() == LIGHTBOX_IMAGE_ID);
        if !on_backdrop && !on_image {
            return;
        }
    }

    if let Some(lightbox) = dom::by_id::<HtmlElement>("lightbox") {
        dom::set_class(&lightbox, "active", false);
    }
    if let Some(body) = dom::body() {
        let overflow = if site.tabs.borrow().page_scrolls() {
            ""
        } else {
            "hidden"
        };
        dom::set_style(&body, "overflow", overflow);
    }
}
