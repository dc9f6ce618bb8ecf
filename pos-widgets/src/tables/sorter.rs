//! Click-to-sort headers with persisted `{column, direction}`.

use super::{body_rows, header_cells};
use crate::dom::{
    child_elements, closest, create_element, document, event_element, listen, query_one,
    set_style, text,
};
use crate::storage::LocalStorage;
use pos_core::sort::{next_direction, restore_sort, sort_rows, SortDirection, SortState};
use pos_core::store::save_json;
use std::cmp::Ordering;
use std::rc::Rc;
use web_sys::{Element, Event};

const SORTABLE_HEADER: &str = r#"th[data-sortable="true"]"#;

pub struct TableSorter {
    table: Element,
    storage_key: String,
    store: LocalStorage,
}

impl TableSorter {
    /// Wire every sortable header and re-apply any persisted sort.
    pub fn attach(
        table: Element,
        storage_key: String,
        store: LocalStorage,
    ) -> anyhow::Result<Rc<Self>> {
        let sorter = Rc::new(Self {
            table,
            storage_key,
            store,
        });

        let doc = document()?;
        for th in sorter.sortable_headers() {
            set_style(&th, "cursor", "pointer");
            let indicator = create_element(&doc, "span", "sort-indicator")?;
            indicator.set_inner_html(r#" <i class="fas fa-arrows-up-down"></i>"#);
            let _ = th.append_child(&indicator);

            let weak = Rc::downgrade(&sorter);
            listen(&th, "click", move |event: Event| {
                if let Some(sorter) = weak.upgrade() {
                    sorter.handle_click(&event);
                }
            });
        }

        let mut rows = body_rows(&sorter.table);
        let restored = restore_sort(
            &sorter.store,
            &sorter.storage_key,
            &mut rows,
            |row, column| cell_for_column(row, column).map(|cell| text(&cell)),
            locale_compare,
        );
        if let Some(state) = restored {
            sorter.place_rows(&rows);
            sorter.update_sort_indicators(&state.column, state.direction);
        }
        Ok(sorter)
    }

    fn sortable_headers(&self) -> Vec<Element> {
        header_cells(&self.table)
            .into_iter()
            .filter(|th| th.get_attribute("data-sortable").as_deref() == Some("true"))
            .collect()
    }

    fn handle_click(&self, event: &Event) {
        let Some(th) = event_element(event).and_then(|el| closest(&el, SORTABLE_HEADER)) else {
            return;
        };
        let Some(column) = th.get_attribute("data-column") else {
            return;
        };
        let direction = next_direction(th.get_attribute("data-direction").as_deref());
        self.apply_sort(&column, direction);
        self.save_sort_state(SortState::new(column, direction));
    }

    /// Re-order the body rows in place by `column`.
    pub fn apply_sort(&self, column: &str, direction: SortDirection) {
        let mut rows = body_rows(&self.table);
        sort_rows(
            &mut rows,
            direction,
            |row| cell_for_column(row, column).map(|cell| text(&cell)),
            locale_compare,
        );
        self.place_rows(&rows);
        self.update_sort_indicators(column, direction);
    }

    /// Re-append rows to the body in the given order.
    fn place_rows(&self, rows: &[Element]) {
        let Some(tbody) = query_one(&self.table, "tbody") else {
            return;
        };
        for row in rows {
            let _ = tbody.append_child(row);
        }
    }

    /// Exactly one header ends up carrying the direction and state class.
    fn update_sort_indicators(&self, column: &str, direction: SortDirection) {
        for th in self.sortable_headers() {
            let _ = th.set_attribute("data-direction", "");
            let _ = th.class_list().remove_2("sort-asc", "sort-desc");
        }
        let active = header_cells(&self.table)
            .into_iter()
            .find(|th| th.get_attribute("data-column").as_deref() == Some(column));
        if let Some(th) = active {
            let _ = th.set_attribute("data-direction", direction.as_str());
            let _ = th.class_list().add_1(direction.css_class());
        }
    }

    fn save_sort_state(&self, state: SortState) {
        save_json(&self.store, &self.storage_key, &state);
    }
}

fn cell_for_column(row: &Element, column: &str) -> Option<Element> {
    child_elements(row)
        .into_iter()
        .find(|cell| cell.get_attribute("data-column").as_deref() == Some(column))
}

fn locale_compare(a: &str, b: &str) -> Ordering {
    js_sys::JsString::from(a)
        .locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new())
        .cmp(&0)
}
