//! Small helpers over `web_sys` shared by the widgets.

use pos_core::columns::display_value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

/// Convert a JS exception into an `anyhow` error with context.
pub trait JsResultExt<T> {
    fn js_context(self, context: &str) -> anyhow::Result<T>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_context(self, context: &str) -> anyhow::Result<T> {
        self.map_err(|e| anyhow::anyhow!("{}: {:?}", context, e))
    }
}

pub fn window() -> anyhow::Result<Window> {
    web_sys::window().ok_or_else(|| anyhow::anyhow!("no global window"))
}

pub fn document() -> anyhow::Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow::anyhow!("window has no document"))
}

pub fn collect_elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `querySelectorAll` on an element. Invalid selectors log and yield nothing.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => collect_elements(&list),
        Err(e) => {
            log::warn!("Bad selector '{}': {:?}", selector, e);
            Vec::new()
        }
    }
}

/// `querySelectorAll` on the whole document.
pub fn document_query_all(selector: &str) -> Vec<Element> {
    let result = document().and_then(|doc| {
        doc.query_selector_all(selector)
            .js_context("querySelectorAll failed")
    });
    match result {
        Ok(list) => collect_elements(&list),
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    }
}

pub fn query_one(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Direct element children of `parent` (no text nodes).
pub fn child_elements(parent: &Element) -> Vec<Element> {
    let children = parent.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .collect()
}

/// Trimmed text content.
pub fn text(el: &Element) -> String {
    el.text_content().unwrap_or_default().trim().to_string()
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// Show or hide via inline `display`, leaving the node in place.
pub fn set_display(el: &Element, visible: bool) {
    set_style(el, "display", display_value(visible));
}

/// The element an event was dispatched to, if it is one.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// `closest()` that treats a bad selector as "no match".
pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// Attach a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event_type: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) =
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
    {
        log::warn!("Failed to attach '{}' listener: {:?}", event_type, e);
    }
    closure.forget();
}

/// Container that widget chrome is inserted into: the nearest
/// `.table-responsive` wrapper, else the table's parent.
pub fn table_container(table: &Element) -> Option<Element> {
    closest(table, ".table-responsive").or_else(|| table.parent_element())
}

/// Insert `child` as the first child of `parent`.
pub fn prepend(parent: &Element, child: &Element) -> anyhow::Result<()> {
    parent
        .insert_before(child, parent.first_child().as_ref())
        .js_context("insertBefore failed")?;
    Ok(())
}

pub fn create_element(doc: &Document, tag: &str, class_name: &str) -> anyhow::Result<Element> {
    let el = doc
        .create_element(tag)
        .js_context("createElement failed")?;
    if !class_name.is_empty() {
        el.set_class_name(class_name);
    }
    Ok(el)
}

/// Blocking user-facing message.
pub fn alert(message: &str) {
    match window() {
        Ok(win) => {
            let _ = win.alert_with_message(message);
        }
        Err(e) => log::warn!("Cannot show alert '{}': {}", message, e),
    }
}
