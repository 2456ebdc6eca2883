//! DOM helpers.
//!
//! Minimal subset needed by the four views. To add new UI pieces, extend
//! the page builders rather than reaching for raw `web_sys` in the views.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

pub fn window() -> Window {
    web_sys::window().expect("no window")
}

fn doc() -> Document {
    window().document().expect("no document")
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

/// The single mount point every view renders into.
pub fn app_root() -> Element {
    by_id("app").expect("missing #app root element")
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

/// Current query string, including the leading `?` when present.
pub fn search() -> String {
    window().location().search().unwrap_or_default()
}

/// Attach a click handler. Mirrors the JS addEventListener pattern.
pub fn on_click(el: &Element, f: impl FnMut(web_sys::MouseEvent) + 'static) {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::MouseEvent)>);
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Escape text interpolated into page HTML.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
