//! Per-table column visibility state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical name of a header cell: its `data-column` identifier when present,
/// otherwise its trimmed text. Two headers with the same text therefore share
/// one visibility flag.
pub fn column_name(data_column: Option<&str>, header_text: &str) -> String {
    match data_column {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => header_text.trim().to_string(),
    }
}

/// Inline `display` value for a cell.
pub fn display_value(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "none"
    }
}

/// Column name → visible flag. Serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnVisibility {
    columns: BTreeMap<String, bool>,
}

impl ColumnVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every discovered column as visible unless a choice already
    /// exists for it. Returns true when anything was added.
    pub fn ensure_columns<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = false;
        for name in names {
            let name = name.into();
            if !self.columns.contains_key(&name) {
                self.columns.insert(name, true);
                added = true;
            }
        }
        added
    }

    /// Unknown columns are visible.
    pub fn is_visible(&self, name: &str) -> bool {
        self.columns.get(name).copied() != Some(false)
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) {
        self.columns.insert(name.to_string(), visible);
    }

    /// Visibility of each ordinal position, given the header names in order.
    pub fn visibility_by_position(&self, header_names: &[String]) -> Vec<bool> {
        header_names
            .iter()
            .map(|name| self.is_visible(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn column_name_prefers_identifier() {
        assert_eq!(column_name(Some("total"), " Total (₱) "), "total");
        assert_eq!(column_name(None, "  Customer "), "Customer");
        assert_eq!(column_name(Some(""), " Date "), "Date");
    }

    #[test]
    fn unseen_columns_default_to_visible() {
        let mut state = ColumnVisibility::new();
        assert!(state.ensure_columns(names(&["id", "total"])));
        assert!(state.is_visible("id"));
        assert!(state.is_visible("total"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn persisted_choices_survive_discovery() {
        let mut state: ColumnVisibility = serde_json::from_str(r#"{"total":false}"#).unwrap();
        let added = state.ensure_columns(names(&["id", "total"]));
        assert!(added);
        assert!(!state.is_visible("total"));
        assert!(state.is_visible("id"));
        assert!(!state.ensure_columns(names(&["id", "total"])));
    }

    #[test]
    fn toggling_twice_restores_display() {
        let headers = names(&["id", "customer", "total"]);
        let mut state = ColumnVisibility::new();
        state.ensure_columns(headers.clone());
        let before: Vec<&str> = state
            .visibility_by_position(&headers)
            .into_iter()
            .map(display_value)
            .collect();

        state.set_visible("customer", !state.is_visible("customer"));
        assert_eq!(state.visibility_by_position(&headers), vec![true, false, true]);
        state.set_visible("customer", !state.is_visible("customer"));

        let after: Vec<&str> = state
            .visibility_by_position(&headers)
            .into_iter()
            .map(display_value)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn duplicate_header_text_shares_state() {
        let headers = names(&["Qty", "Qty"]);
        let mut state = ColumnVisibility::new();
        state.ensure_columns(headers.clone());
        assert_eq!(state.len(), 1);
        state.set_visible("Qty", false);
        assert_eq!(state.visibility_by_position(&headers), vec![false, false]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut state = ColumnVisibility::new();
        state.set_visible("total", false);
        state.set_visible("id", true);
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"id":true,"total":false}"#
        );
    }
}
