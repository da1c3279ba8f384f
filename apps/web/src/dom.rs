//! Thin lookups over `web_sys`. Missing elements are not errors: the page
//! markup may leave any section out.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use crate::fetch::describe;

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Creates `<tag class="...">`.
pub fn create(tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let element = doc.create_element(tag)?.dyn_into::<HtmlElement>()?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(error) = element.style().set_property(property, value) {
        log_js_error(property, &error);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(error) = element.class_list().toggle_with_force(class, on) {
        log_js_error(class, &error);
    }
}

pub fn log_js_error(context: &str, error: &JsValue) {
    log::warn!("{context}: {}", describe(error));
}

/// Attaches a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(error) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log_js_error(event, &error);
    }
    closure.forget();
}
