//! Bulk row selection with an action bar.
//!
//! A checkbox column is injected as the first column of the header and every
//! body row. Row ids come from the configured row attribute when every row
//! has a distinct one, otherwise from each row's position at enhancement time.

use super::{body_rows, header_cells};
use crate::dom::{
    alert, closest, create_element, document, listen, prepend, query_all, set_display,
    set_style, table_container, JsResultExt,
};
use pos_core::bulk::BulkActions;
use pos_core::selection::{count_label, row_identifiers, SelectionSet};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlSelectElement};

/// Class of the injected header cell.
pub const BULK_HEADER_CLASS: &str = "bulk-select-header";
/// Class of the injected body cells.
pub const BULK_CELL_CLASS: &str = "bulk-select-cell";

const SELECT_ALL_CLASS: &str = "bulk-select-all";
const ROW_CHECKBOX_CLASS: &str = "bulk-select-row";
const ROW_ID_ATTRIBUTE: &str = "data-row-id";

pub struct BulkSelect {
    table: Element,
    actions: BulkActions<BulkSelect>,
    selection: RefCell<SelectionSet>,
    bar: Element,
    count: Element,
    action_select: HtmlSelectElement,
}

/// Elements of a freshly built action bar.
struct ActionBar {
    bar: Element,
    count: Element,
    select: HtmlSelectElement,
    apply: Element,
    clear: Element,
}

impl BulkSelect {
    pub fn attach(
        table: Element,
        actions: BulkActions<BulkSelect>,
        row_key_attribute: &str,
    ) -> anyhow::Result<Rc<Self>> {
        let doc = document()?;
        let row_count = add_checkboxes(&doc, &table, row_key_attribute)?.len();
        let ActionBar {
            bar,
            count,
            select,
            apply,
            clear,
        } = build_action_bar(&doc, &actions)?;

        match table_container(&table) {
            Some(container) => prepend(&container, &bar)?,
            None => log::warn!("Table has no container; action bar not shown"),
        }

        let engine = Rc::new(Self {
            table,
            actions,
            selection: RefCell::new(SelectionSet::new()),
            bar,
            count,
            action_select: select,
        });
        engine.attach_event_listeners(&apply, &clear);
        log::debug!(
            "Bulk selection attached ({} rows, {} actions)",
            row_count,
            engine.actions.len()
        );
        Ok(engine)
    }

    fn attach_event_listeners(self: &Rc<Self>, apply: &Element, clear: &Element) {
        let with = |f: fn(&BulkSelect, &Event)| {
            let weak: Weak<Self> = Rc::downgrade(self);
            move |event: Event| {
                if let Some(engine) = weak.upgrade() {
                    f(&engine, &event);
                }
            }
        };

        if let Some(select_all) = self.select_all_checkbox() {
            listen(
                &select_all,
                "change",
                with(|engine, event| {
                    if let Some(input) = input_target(event) {
                        engine.select_all_rows(input.checked());
                    }
                }),
            );
        }

        for checkbox in self.row_checkboxes() {
            listen(
                &checkbox,
                "change",
                with(|engine, event| {
                    if let Some(input) = input_target(event) {
                        let id = input.get_attribute(ROW_ID_ATTRIBUTE).unwrap_or_default();
                        engine.toggle_row(&id, input.checked());
                    }
                }),
            );
        }

        listen(apply, "click", with(|engine, _| engine.execute_bulk_action()));
        listen(clear, "click", with(|engine, _| engine.clear_selection()));
    }

    fn select_all_checkbox(&self) -> Option<HtmlInputElement> {
        query_all(&self.table, &format!("input.{}", SELECT_ALL_CLASS))
            .into_iter()
            .find_map(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn row_checkboxes(&self) -> Vec<HtmlInputElement> {
        query_all(&self.table, &format!("input.{}", ROW_CHECKBOX_CLASS))
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    /// Mirror the "select all" checkbox onto every row.
    pub fn select_all_rows(&self, checked: bool) {
        let mut ids = Vec::new();
        for checkbox in self.row_checkboxes() {
            checkbox.set_checked(checked);
            if let Some(id) = checkbox.get_attribute(ROW_ID_ATTRIBUTE) {
                ids.push(id);
            }
        }
        self.selection
            .borrow_mut()
            .set_all(ids.iter().map(String::as_str), checked);
        self.update_action_bar();
    }

    pub fn toggle_row(&self, id: &str, checked: bool) {
        self.selection.borrow_mut().set(id, checked);
        self.update_action_bar();
    }

    /// Show the bar iff something is selected and refresh the count.
    fn update_action_bar(&self) {
        let selection = self.selection.borrow();
        set_style(
            &self.bar,
            "display",
            if selection.action_bar_visible() { "block" } else { "none" },
        );
        self.count
            .set_text_content(Some(&count_label(selection.len())));
    }

    /// Empty the selection and uncheck everything, including "select all".
    pub fn clear_selection(&self) {
        self.selection.borrow_mut().clear();
        for checkbox in self.row_checkboxes() {
            checkbox.set_checked(false);
        }
        if let Some(select_all) = self.select_all_checkbox() {
            select_all.set_checked(false);
        }
        self.update_action_bar();
    }

    /// Run the action chosen in the selector against the current selection.
    pub fn execute_bulk_action(&self) {
        let chosen = self.action_select.value();
        let selected = self.selected_ids();
        if let Err(e) = self.actions.run(&chosen, &selected, self) {
            if e.is_user_facing() {
                alert(&e.to_string());
            } else {
                log::warn!("{}", e);
            }
        }
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.borrow().ids().to_vec()
    }

    /// Selected `(id, row)` pairs for rows still present in the table.
    pub fn selected_rows(&self) -> Vec<(String, Element)> {
        let checkboxes = self.row_checkboxes();
        self.selected_ids()
            .into_iter()
            .filter_map(|id| {
                let row = checkboxes
                    .iter()
                    .find(|cb| cb.get_attribute(ROW_ID_ATTRIBUTE).as_deref() == Some(id.as_str()))
                    .and_then(|cb| closest(cb, "tr"))?;
                Some((id, row))
            })
            .collect()
    }

    /// Forget a row that a callback removed from the DOM.
    pub fn forget_row(&self, id: &str) {
        self.selection.borrow_mut().remove(id);
        self.update_action_bar();
    }
}

fn input_target(event: &Event) -> Option<HtmlInputElement> {
    event.target()?.dyn_into::<HtmlInputElement>().ok()
}

fn checkbox(doc: &Document, class_name: &str) -> anyhow::Result<Element> {
    let input = create_element(doc, "input", class_name)?;
    input
        .set_attribute("type", "checkbox")
        .js_context("setAttribute failed")?;
    Ok(input)
}

/// Inject the checkbox column and return the row ids in body order.
fn add_checkboxes(
    doc: &Document,
    table: &Element,
    row_key_attribute: &str,
) -> anyhow::Result<Vec<String>> {
    if let Some(header_row) = header_cells(table).first().and_then(|th| th.parent_element()) {
        let th = create_element(doc, "th", BULK_HEADER_CLASS)?;
        set_style(&th, "width", "40px");
        th.append_child(&*checkbox(doc, SELECT_ALL_CLASS)?)
            .js_context("appendChild failed")?;
        prepend(&header_row, &th)?;
    }

    let rows = body_rows(table);
    let keys: Vec<Option<String>> = rows
        .iter()
        .map(|row| row.get_attribute(row_key_attribute))
        .collect();
    let ids = row_identifiers(keys.iter().map(Option::as_deref));
    for (row, id) in rows.iter().zip(&ids) {
        let td = create_element(doc, "td", BULK_CELL_CLASS)?;
        set_style(&td, "width", "40px");
        let input = checkbox(doc, ROW_CHECKBOX_CLASS)?;
        input
            .set_attribute(ROW_ID_ATTRIBUTE, id)
            .js_context("setAttribute failed")?;
        td.append_child(&input).js_context("appendChild failed")?;
        prepend(row, &td)?;
    }
    Ok(ids)
}

fn build_action_bar(doc: &Document, actions: &BulkActions<BulkSelect>) -> anyhow::Result<ActionBar> {
    let bar = create_element(doc, "div", "bulk-action-bar")?;
    set_display(&bar, false);

    let inner = create_element(doc, "div", "d-flex align-items-center gap-3 p-3")?;
    set_style(&inner, "background", "#f3f4f6");
    set_style(&inner, "border-radius", "0.5rem");

    let count = create_element(doc, "span", "text-muted bulk-count")?;
    count.set_text_content(Some(&count_label(0)));

    let spacer = create_element(doc, "div", "flex-grow-1")?;

    let select_el = create_element(doc, "select", "form-select form-select-sm bulk-action-select")?;
    set_style(&select_el, "max-width", "200px");
    let placeholder = create_element(doc, "option", "")?;
    let _ = placeholder.set_attribute("value", "");
    placeholder.set_text_content(Some("Select action..."));
    select_el
        .append_child(&placeholder)
        .js_context("appendChild failed")?;
    for action in actions.iter() {
        let option = create_element(doc, "option", "")?;
        let _ = option.set_attribute("value", &action.id);
        option.set_text_content(Some(&action.label));
        select_el
            .append_child(&option)
            .js_context("appendChild failed")?;
    }

    let apply = create_element(doc, "button", "btn btn-sm btn-primary bulk-action-btn")?;
    let _ = apply.set_attribute("type", "button");
    apply.set_text_content(Some("Apply"));

    let clear = create_element(doc, "button", "btn btn-sm btn-outline-secondary bulk-clear-btn")?;
    let _ = clear.set_attribute("type", "button");
    clear.set_text_content(Some("Clear"));

    for child in [&count, &spacer, &select_el, &apply, &clear] {
        inner.append_child(child).js_context("appendChild failed")?;
    }
    bar.append_child(&inner).js_context("appendChild failed")?;

    let select = select_el
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| anyhow::anyhow!("created <select> is not an HtmlSelectElement"))?;

    Ok(ActionBar {
        bar,
        count,
        select,
        apply,
        clear,
    })
}
