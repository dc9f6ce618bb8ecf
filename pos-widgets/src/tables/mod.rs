//! TableEnhancer: behaviours composed onto server-rendered tables.
//!
//! Each behaviour owns its DOM wiring and keeps its state in a `pos-core`
//! type. [`TableRegistry`] decides which behaviours a table gets from an
//! explicit [`TableDescriptor`](pos_core::config::TableDescriptor).

mod bulk_select;
mod column_toggle;
mod registry;
mod sorter;

pub use bulk_select::{BulkSelect, BULK_CELL_CLASS, BULK_HEADER_CLASS};
pub use column_toggle::ColumnToggle;
pub use registry::{EnhancedTable, TableRegistry};
pub use sorter::TableSorter;

use crate::dom::{child_elements, query_one};
use web_sys::Element;

/// Body rows of a table, in current DOM order.
fn body_rows(table: &Element) -> Vec<Element> {
    query_one(table, "tbody")
        .map(|tbody| {
            child_elements(&tbody)
                .into_iter()
                .filter(|el| el.tag_name().eq_ignore_ascii_case("tr"))
                .collect()
        })
        .unwrap_or_default()
}

/// Header cells of the first header row.
fn header_cells(table: &Element) -> Vec<Element> {
    query_one(table, "thead tr")
        .map(|row| {
            child_elements(&row)
                .into_iter()
                .filter(|el| el.tag_name().eq_ignore_ascii_case("th"))
                .collect()
        })
        .unwrap_or_default()
}
