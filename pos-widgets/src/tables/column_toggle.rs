//! Column visibility menu with persisted per-column flags.

use super::{body_rows, header_cells, BULK_CELL_CLASS, BULK_HEADER_CLASS};
use crate::dom::{
    child_elements, create_element, document, event_element, listen, prepend, query_one,
    set_display, set_style, table_container, text, window, JsResultExt,
};
use crate::storage::LocalStorage;
use pos_core::columns::{column_name, ColumnVisibility};
use pos_core::store::{load_json, save_json};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};

const TOGGLE_BUTTON_CLASS: &str = "column-toggle-btn";
const MENU_CLASS: &str = "column-toggle-menu";
const MENU_STYLE: &str = "position: absolute; background: white; border: 1px solid #ddd; \
    border-radius: 0.375rem; padding: 0.5rem 0.75rem; z-index: 1000; \
    box-shadow: 0 4px 12px rgba(0,0,0,0.15); max-height: 300px; overflow-y: auto;";

/// An open menu and the button that opened it.
struct OpenMenu {
    element: Element,
    button: Element,
}

pub struct ColumnToggle {
    table: Element,
    storage_key: String,
    store: LocalStorage,
    state: RefCell<ColumnVisibility>,
    menu: RefCell<Option<OpenMenu>>,
}

impl ColumnToggle {
    /// Load saved visibility, register newly seen columns, add the
    /// "Columns" button and apply the state.
    pub fn attach(
        table: Element,
        storage_key: String,
        store: LocalStorage,
    ) -> anyhow::Result<Rc<Self>> {
        let mut state: ColumnVisibility = load_json(&store, &storage_key).unwrap_or_default();
        let names = column_names(&table);
        if state.ensure_columns(names.iter().cloned()) {
            save_json(&store, &storage_key, &state);
        }

        let toggle = Rc::new(Self {
            table,
            storage_key,
            store,
            state: RefCell::new(state),
            menu: RefCell::new(None),
        });
        toggle.create_toggle_button()?;
        toggle.listen_for_outside_clicks()?;
        toggle.apply_column_state();
        log::debug!("Column toggle attached with {} columns", names.len());
        Ok(toggle)
    }

    fn create_toggle_button(self: &Rc<Self>) -> anyhow::Result<()> {
        let Some(container) = table_container(&self.table) else {
            log::warn!("Table has no container; column toggle button not added");
            return Ok(());
        };
        if query_one(&container, &format!(".{}", TOGGLE_BUTTON_CLASS)).is_some() {
            return Ok(());
        }

        let doc = document()?;
        let button = create_element(
            &doc,
            "button",
            &format!("btn btn-sm btn-outline-secondary mb-2 {}", TOGGLE_BUTTON_CLASS),
        )?;
        button
            .set_attribute("type", "button")
            .js_context("setAttribute failed")?;
        button.set_inner_html(r#"<i class="fas fa-columns"></i> Columns"#);
        prepend(&container, &button)?;

        let weak = Rc::downgrade(self);
        let clicked = button.clone();
        listen(&button, "click", move |_event: Event| {
            let Some(toggle) = weak.upgrade() else {
                return;
            };
            if toggle.is_menu_open() {
                toggle.close_menu();
            } else if let Err(e) = toggle.show_toggle_menu(&clicked) {
                log::warn!("Failed to open column menu: {}", e);
            }
        });
        Ok(())
    }

    /// One document-level listener for the toggle's lifetime. Clicks inside
    /// the menu or on its button keep it open.
    fn listen_for_outside_clicks(self: &Rc<Self>) -> anyhow::Result<()> {
        let weak = Rc::downgrade(self);
        listen(&*document()?, "click", move |event: Event| {
            let Some(toggle) = weak.upgrade() else {
                return;
            };
            let Some(target) = event_element(&event) else {
                return;
            };
            let outside = match toggle.menu.borrow().as_ref() {
                Some(open) => {
                    let node: &web_sys::Node = target.as_ref();
                    !open.element.contains(Some(node)) && !open.button.contains(Some(node))
                }
                None => false,
            };
            if outside {
                toggle.close_menu();
            }
        });
        Ok(())
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.borrow().is_some()
    }

    /// Build a checkbox per column under `button`. Any previous menu is
    /// closed first.
    pub fn show_toggle_menu(self: &Rc<Self>, button: &Element) -> anyhow::Result<()> {
        self.close_menu();

        let doc = document()?;
        let menu = create_element(&doc, "div", MENU_CLASS)?;
        menu.set_attribute("style", MENU_STYLE)
            .js_context("setAttribute failed")?;

        for name in column_names(&self.table) {
            let label = create_element(&doc, "label", "d-block mb-1")?;
            let input = create_element(&doc, "input", "form-check-input me-2")?;
            input
                .set_attribute("type", "checkbox")
                .js_context("setAttribute failed")?;
            let input = input
                .dyn_into::<HtmlInputElement>()
                .map_err(|_| anyhow::anyhow!("created <input> is not an HtmlInputElement"))?;
            input.set_checked(self.is_visible(&name));
            label
                .append_child(&input)
                .js_context("appendChild failed")?;
            label
                .insert_adjacent_text("beforeend", &name)
                .js_context("insertAdjacentText failed")?;

            let weak = Rc::downgrade(self);
            listen(&input, "change", move |event: Event| {
                let checked = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.checked());
                if let (Some(toggle), Some(checked)) = (weak.upgrade(), checked) {
                    toggle.toggle_column(&name, checked);
                }
            });
            menu.append_child(&label)
                .js_context("appendChild failed")?;
        }

        let body = doc
            .body()
            .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
        body.append_child(&menu).js_context("appendChild failed")?;

        let win = window()?;
        let rect = button.get_bounding_client_rect();
        let top = rect.bottom() + win.scroll_y().unwrap_or(0.0) + 5.0;
        let left = rect.left() + win.scroll_x().unwrap_or(0.0);
        set_style(&menu, "top", &format!("{}px", top));
        set_style(&menu, "left", &format!("{}px", left));

        *self.menu.borrow_mut() = Some(OpenMenu {
            element: menu,
            button: button.clone(),
        });
        Ok(())
    }

    pub fn close_menu(&self) {
        if let Some(open) = self.menu.borrow_mut().take() {
            open.element.remove();
        }
    }

    /// Record and persist one column's visibility, then re-apply.
    pub fn toggle_column(&self, name: &str, visible: bool) {
        self.state.borrow_mut().set_visible(name, visible);
        save_json(&self.store, &self.storage_key, &*self.state.borrow());
        self.apply_column_state();
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.state.borrow().is_visible(name)
    }

    /// Show or hide header and body cells by ordinal position. The bulk
    /// checkbox column is never counted.
    pub fn apply_column_state(&self) {
        let headers = data_headers(&self.table);
        let names: Vec<String> = headers.iter().map(header_name).collect();
        let visibility = self.state.borrow().visibility_by_position(&names);

        for (th, visible) in headers.iter().zip(&visibility) {
            set_display(th, *visible);
        }
        for row in body_rows(&self.table) {
            let cells = child_elements(&row)
                .into_iter()
                .filter(|cell| !cell.class_list().contains(BULK_CELL_CLASS));
            for (cell, visible) in cells.zip(&visibility) {
                set_display(&cell, *visible);
            }
        }
    }
}

fn data_headers(table: &Element) -> Vec<Element> {
    header_cells(table)
        .into_iter()
        .filter(|th| !th.class_list().contains(BULK_HEADER_CLASS))
        .collect()
}

fn header_name(th: &Element) -> String {
    column_name(th.get_attribute("data-column").as_deref(), &text(th))
}

/// Distinct column names in header order.
fn column_names(table: &Element) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in data_headers(table).iter().map(header_name) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
