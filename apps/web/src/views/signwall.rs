//! Sign wall: renders the normalized grid and pans the container by drag or
//! wheel.

use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, PointerEvent, WheelEvent};
use world_archive_core::loader::or_default;
use world_archive_core::pan::{wheel_pan_delta, ScrollExtent, ScrollPos, WheelDelta};
use world_archive_core::signwall::{
    css_color, parse_cell_size, sign_animation_delay, sign_lines, CellJitter, GridStyle,
    DEFAULT_CELL_SIZE,
};
use world_archive_core::{Resource, Sign, SignGrid, Tab};

use crate::dom;
use crate::fetch::fetch_json;
use crate::site::Site;

const CELL_SIZE_PROPERTY: &str = "--sign-cell-size";

pub fn render(site: &Rc<Site>) {
    bind_interactions(site);
    if !site.begin_load(Tab::SignWall) {
        return;
    }

    let site = Rc::clone(site);
    spawn_local(async move {
        let signs: Vec<Sign> = or_default(fetch_json(Resource::Signs).await);
        site.tabs.borrow_mut().lifecycle_mut(Tab::SignWall).finish_load();

        let grid = SignGrid::normalize(&signs);
        for collision in grid.collisions() {
            log::warn!(
                "sign at col {} row {} hides an earlier sign",
                collision.source_col,
                collision.source_row
            );
        }

        if let Some(element) = dom::by_id::<HtmlElement>("signWallGrid") {
            element.set_inner_html("");
            if !grid.is_empty() {
                if let Err(error) = draw(&element, &grid, &signs) {
                    dom::log_js_error("sign wall", &error);
                }
            }
        }

        log::debug!(
            "rendered {} signs on a {}x{} wall",
            grid.occupied(),
            grid.cols(),
            grid.rows()
        );
        site.finish_render(Tab::SignWall);
    });
}

fn cell_size(grid: &HtmlElement) -> f64 {
    web_sys::window()
        .and_then(|window| window.get_computed_style(grid).ok().flatten())
        .and_then(|style| style.get_property_value(CELL_SIZE_PROPERTY).ok())
        .map_or(DEFAULT_CELL_SIZE, |value| parse_cell_size(&value))
}

fn draw(element: &HtmlElement, grid: &SignGrid, signs: &[Sign]) -> Result<(), JsValue> {
    let style = GridStyle::new(grid.cols(), cell_size(element));
    dom::set_style(element, "grid-template-columns", &style.template_columns);
    dom::set_style(element, "grid-auto-rows", &style.auto_rows);
    dom::set_style(element, "min-width", &style.min_width);

    let mut placed = 0;
    for (_, sign_index) in grid.cells() {
        let cell = dom::create("div", "copper-cell")?;

        let block = dom::create("div", "copper-block")?;
        let jitter = CellJitter::sample(js_sys::Math::random);
        dom::set_style(&block, "filter", &jitter.css_filter());
        cell.append_child(&block)?;

        if let Some(sign) = sign_index.and_then(|index| signs.get(index)) {
            let sign_node = sign_element(sign, placed)?;
            cell.append_child(&sign_node)?;
            placed += 1;
        }

        element.append_child(&cell)?;
    }
    Ok(())
}

fn sign_element(sign: &Sign, index: usize) -> Result<HtmlElement, JsValue> {
    let element = dom::create("div", "wall-sign")?;
    dom::set_style(&element, "animation-delay", &sign_animation_delay(index));

    let color = css_color(sign.color.as_deref());
    for line in sign_lines(&sign.text) {
        let line_element = dom::create("div", "sign-line")?;
        line_element.set_text_content(Some(line));
        dom::set_style(&line_element, "color", &color);
        element.append_child(&line_element)?;
    }
    Ok(element)
}

fn scroll_pos(container: &HtmlElement) -> ScrollPos {
    ScrollPos {
        left: f64::from(container.scroll_left()),
        top: f64::from(container.scroll_top()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scroll_to(container: &HtmlElement, pos: ScrollPos) {
    container.set_scroll_left(pos.left.round() as i32);
    container.set_scroll_top(pos.top.round() as i32);
}

fn extent(container: &HtmlElement) -> ScrollExtent {
    ScrollExtent {
        scroll_width: f64::from(container.scroll_width()),
        client_width: f64::from(container.client_width()),
        scroll_height: f64::from(container.scroll_height()),
        client_height: f64::from(container.client_height()),
    }
}

/// Pointer and wheel listeners on the scroll container, installed once.
fn bind_interactions(site: &Rc<Site>) {
    if site.pan_bound.get() {
        return;
    }
    let Some(container) = dom::by_id::<HtmlElement>("signWallContainer") else {
        return;
    };
    site.pan_bound.set(true);

    dom::listen(&container, "pointerdown", {
        let site = Rc::clone(site);
        let container = container.clone();
        move |event: Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let mut pan = site.pan.get();
            let started = pan.pointer_down(
                event.button(),
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                scroll_pos(&container),
            );
            site.pan.set(pan);
            if started {
                dom::set_class(&container, "dragging", true);
                if let Err(error) = container.set_pointer_capture(event.pointer_id()) {
                    dom::log_js_error("pointer capture", &error);
                }
            }
        }
    });

    dom::listen(&container, "pointermove", {
        let site = Rc::clone(site);
        let container = container.clone();
        move |event: Event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let next = site.pan.get().pointer_move(
                f64::from(pointer.client_x()),
                f64::from(pointer.client_y()),
            );
            if let Some(pos) = next {
                scroll_to(&container, pos);
                event.prevent_default();
            }
        }
    });

    for name in ["pointerup", "pointercancel", "pointerleave"] {
        dom::listen(&container, name, {
            let site = Rc::clone(site);
            let container = container.clone();
            move |event: Event| {
                let mut pan = site.pan.get();
                let was_dragging = pan.end();
                site.pan.set(pan);
                if !was_dragging {
                    return;
                }
                dom::set_class(&container, "dragging", false);
                if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
                    if container.has_pointer_capture(pointer.pointer_id()) {
                        if let Err(error) = container.release_pointer_capture(pointer.pointer_id())
                        {
                            dom::log_js_error("pointer capture", &error);
                        }
                    }
                }
            }
        });
    }

    let on_wheel = Closure::<dyn FnMut(Event)>::new({
        let container = container.clone();
        move |event: Event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let delta = WheelDelta {
                dx: wheel.delta_x(),
                dy: wheel.delta_y(),
            };
            if let Some(dx) = wheel_pan_delta(delta, extent(&container)) {
                let mut pos = scroll_pos(&container);
                pos.left += dx;
                scroll_to(&container, pos);
                event.prevent_default();
            }
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    if let Err(error) = container.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        on_wheel.as_ref().unchecked_ref(),
        &options,
    ) {
        dom::log_js_error("wheel", &error);
    }
    on_wheel.forget();
}
