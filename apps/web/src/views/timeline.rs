use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use world_archive_core::timeline::{
    category_class, event_date_label, node_animation_delay, sorted_events, sorted_thanks,
    ThanksLine, EMPTY_MESSAGE,
};
use world_archive_core::{HistoryDocument, HistoryEvent, Resource, Tab, ThanksEntry};

use crate::dom;
use crate::fetch::fetch_json;
use crate::site::Site;

pub fn render(site: &Rc<Site>) {
    if !site.begin_load(Tab::History) {
        return;
    }
    let Some(container) = dom::by_id::<HtmlElement>("historyTimeline") else {
        return;
    };
    container.set_inner_html("");

    let site = Rc::clone(site);
    spawn_local(async move {
        let (events, thanks) = match fetch_json::<HistoryDocument>(Resource::History).await {
            Ok(document) => {
                site.tabs.borrow_mut().lifecycle_mut(Tab::History).finish_load();
                document.into_parts()
            }
            Err(error) => {
                log::error!("Error loading history: {error}");
                (Vec::new(), Vec::new())
            }
        };

        if let Err(error) = render_thanks(&thanks) {
            dom::log_js_error("thanks list", &error);
        }

        if events.is_empty() {
            let empty = format!(r#"<div class="history-empty">{EMPTY_MESSAGE}</div>"#);
            container.set_inner_html(&empty);
        } else if let Err(error) = render_events(&container, &events) {
            dom::log_js_error("timeline", &error);
        }

        site.finish_render(Tab::History);
    });
}

fn render_events(container: &HtmlElement, events: &[HistoryEvent]) -> Result<(), JsValue> {
    for (index, event) in sorted_events(events).into_iter().enumerate() {
        let node = dom::create("div", "tl-node")?;
        dom::set_style(&node, "animation-delay", &node_animation_delay(index));

        let dot = dom::create("div", &category_class(event))?;
        let card = dom::create("div", "tl-card")?;

        let date = dom::create("span", "tl-date")?;
        date.set_text_content(Some(&event_date_label(event)));
        let title = dom::create("h3", "tl-title")?;
        title.set_text_content(Some(&event.title));
        let description = dom::create("p", "tl-desc")?;
        description.set_text_content(Some(&event.description));

        card.append_child(&date)?;
        card.append_child(&title)?;
        card.append_child(&description)?;
        node.append_child(&dot)?;
        node.append_child(&card)?;
        container.append_child(&node)?;
    }
    Ok(())
}

fn render_thanks(thanks: &[ThanksEntry]) -> Result<(), JsValue> {
    let (Some(section), Some(list)) = (
        dom::query::<HtmlElement>(".history-thanks"),
        dom::by_id::<HtmlElement>("historyThanksList"),
    ) else {
        return Ok(());
    };

    if thanks.is_empty() {
        dom::set_style(&section, "display", "none");
        return Ok(());
    }

    dom::set_style(&section, "display", "");
    list.set_inner_html("");
    for line in sorted_thanks(thanks) {
        let item = thanks_item(&line)?;
        list.append_child(&item)?;
    }
    Ok(())
}

fn thanks_item(line: &ThanksLine) -> Result<HtmlElement, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    let item = dom::create("li", "")?;

    let name = dom::create("span", "thanks-name")?;
    name.set_text_content(Some(&line.name));
    item.append_child(&name)?;

    if line.trusted {
        let tag = dom::create("span", "thanks-tag")?;
        tag.set_text_content(Some(ThanksLine::trusted_tag()));
        let space = document.create_text_node(" ");
        item.append_child(&space)?;
        item.append_child(&tag)?;
    }

    if let Some(contribution) = &line.contribution {
        let text = document.create_text_node(&format!(" - {contribution}"));
        item.append_child(&text)?;
    }
    Ok(item)
}
