//! Version picker: fills the dropdown and keeps the file info, download
//! buttons and helper message in sync with the selection.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlAnchorElement, HtmlElement, HtmlOptionElement, HtmlSelectElement};
use world_archive_core::versions::{
    copy_feedback, find_version, ordered_versions, DownloadPanel, LOAD_FAILURE_MESSAGE,
};
use world_archive_core::{Resource, Version};

use crate::dom;
use crate::fetch::{describe, fetch_json};
use crate::site::Site;

const ERROR_COLOR: &str = "#dc3545";

pub async fn load_versions(site: Rc<Site>) {
    match fetch_json::<Vec<Version>>(Resource::Versions).await {
        Ok(versions) => {
            log::info!("loaded {} versions", versions.len());
            *site.versions.borrow_mut() = versions;
            populate(&site);
        }
        Err(error) => {
            log::error!("Error loading versions: {error}");
            if let Some(wrapper) = dom::query::<HtmlElement>(".button-wrapper") {
                append_helper(&wrapper, LOAD_FAILURE_MESSAGE, true);
            }
        }
    }
}

fn populate(site: &Site) {
    let first_key = {
        let versions = site.versions.borrow();
        let ordered = ordered_versions(&versions);
        let Some(first) = ordered.first() else {
            return;
        };

        if let Some(dropdown) = dom::by_id::<HtmlSelectElement>("version") {
            for option in &ordered {
                match build_option(option.value(), &option.label()) {
                    Ok(element) => {
                        if let Err(error) = dropdown.append_child(&element) {
                            dom::log_js_error("version option", &error);
                        }
                    }
                    Err(error) => dom::log_js_error("version option", &error),
                }
            }
        }

        first.value().to_string()
    };

    update_download_link(site, &first_key);
}

fn build_option(value: &str, label: &str) -> Result<HtmlOptionElement, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let option = document
        .create_element("option")?
        .dyn_into::<HtmlOptionElement>()?;
    option.set_value(value);
    option.set_text_content(Some(label));
    Ok(option)
}

/// Shows the file info and links of the version with identity `key`. Unknown
/// keys are ignored.
pub fn update_download_link(site: &Site, key: &str) {
    let panel = {
        let versions = site.versions.borrow();
        let Some(version) = find_version(&versions, key) else {
            log::warn!("unknown version {key:?}");
            return;
        };
        DownloadPanel::for_version(version)
    };

    if let Some(size) = dom::by_id::<HtmlElement>("fileSize") {
        size.set_text_content(Some(&panel.file_size));
    }
    if let Some(checksum) = dom::by_id::<HtmlElement>("checksum") {
        checksum.set_text_content(Some(&panel.checksum_display));
        if let Err(error) = checksum.set_attribute("data-full", &panel.checksum_full) {
            dom::log_js_error("checksum", &error);
        }
    }

    update_button("downloadBtn", panel.magnet_link.as_deref());
    update_button("httpsBtn", panel.https_link.as_deref());

    if let Some(wrapper) = dom::query::<HtmlElement>(".button-wrapper") {
        if let Ok(Some(existing)) = wrapper.query_selector(".helper-text") {
            existing.remove();
        }
        let helper = panel.helper();
        append_helper(&wrapper, helper.text(), helper.is_error());
    }
}

fn update_button(id: &str, link: Option<&str>) {
    let Some(button) = dom::by_id::<HtmlAnchorElement>(id) else {
        return;
    };
    match link {
        Some(link) => {
            button.set_href(link);
            dom::set_style(&button, "display", "inline-flex");
        }
        None => dom::set_style(&button, "display", "none"),
    }
}

fn append_helper(wrapper: &HtmlElement, message: &str, is_error: bool) {
    let class = if is_error {
        "helper-text error-text"
    } else {
        "helper-text"
    };
    let helper = match dom::create("div", class) {
        Ok(helper) => helper,
        Err(error) => {
            dom::log_js_error("helper text", &error);
            return;
        }
    };
    helper.set_text_content(Some(message));
    if is_error {
        dom::set_style(&helper, "color", ERROR_COLOR);
    }
    if let Err(error) = wrapper.append_child(&helper) {
        dom::log_js_error("helper text", &error);
    }
}

/// Copies the full checksum and flashes the clicked button.
pub fn copy_checksum(event: &Event) {
    let Some(checksum) = dom::by_id::<HtmlElement>("checksum") else {
        return;
    };
    let full = checksum
        .get_attribute("data-full")
        .filter(|value| !value.is_empty())
        .or_else(|| checksum.text_content())
        .unwrap_or_default();
    let button = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok());

    spawn_local(async move {
        match write_clipboard(&full).await {
            Ok(()) => {
                if let Some(button) = button {
                    flash_copied(button);
                }
            }
            Err(error) => log::error!("Failed to copy: {}", describe(&error)),
        }
    });
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = js_sys::Reflect::get(&window.navigator(), &"clipboard".into())?;
    let write_text = js_sys::Reflect::get(&clipboard, &"writeText".into())?
        .dyn_into::<js_sys::Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn flash_copied(button: HtmlElement) {
    let style = button.style();
    let original_text = button.text_content();
    let original_background = style.get_property_value("background").unwrap_or_default();
    let original_color = style.get_property_value("color").unwrap_or_default();

    button.set_text_content(Some(copy_feedback::TEXT));
    dom::set_style(&button, "background", copy_feedback::BACKGROUND);
    dom::set_style(&button, "color", copy_feedback::COLOR);

    Timeout::new(copy_feedback::DURATION_MS, move || {
        button.set_text_content(original_text.as_deref());
        dom::set_style(&button, "background", &original_background);
        dom::set_style(&button, "color", &original_color);
    })
    .forget();
}
