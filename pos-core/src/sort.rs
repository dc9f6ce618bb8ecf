//! Column sorting for server-rendered tables.
//!
//! Cell text is compared numerically when both sides parse as numbers after
//! stripping everything except digits, `.` and `-` (so `₱1,250.00` sorts as
//! 1250). Otherwise the caller-supplied collation decides; the browser layer
//! passes `localeCompare`.

use crate::store::{load_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// CSS state class placed on the active header.
    pub fn css_class(self) -> &'static str {
        match self {
            SortDirection::Asc => "sort-asc",
            SortDirection::Desc => "sort-desc",
        }
    }

    /// Read a header's `data-direction` attribute. Missing, empty or
    /// unrecognised values mean ascending.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Persisted `{column, direction}` pair, one per table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Direction a header click should sort in, given the header's current
/// `data-direction`. An unsorted header counts as ascending, so the first
/// click sorts descending.
pub fn next_direction(current: Option<&str>) -> SortDirection {
    SortDirection::from_attribute(current).toggled()
}

/// Numeric value of a cell, or `None` when it does not look like a number.
pub fn numeric_value(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_float_prefix(&stripped)
}

/// Parse the longest leading decimal literal (`-12.5` out of `-12.5.3-1`).
///
/// Input is already reduced to digits, dots and minus signs.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Case-insensitive collation used when no locale-aware comparer is available.
pub fn default_collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ascending comparison of two trimmed cell texts.
pub fn compare_text<F>(a: &str, b: &str, collate: F) -> Ordering
where
    F: Fn(&str, &str) -> Ordering,
{
    let a = a.trim();
    let b = b.trim();
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => collate(a, b),
    }
}

/// Compare two rows' cells for the active column. A row without a cell for
/// the column contributes nothing to the ordering.
///
/// This is not a total order once missing cells are involved, so it must
/// only be fed to [`sort_rows`], never to `slice::sort_by`.
pub fn compare_cells<F>(
    a: Option<&str>,
    b: Option<&str>,
    direction: SortDirection,
    collate: F,
) -> Ordering
where
    F: Fn(&str, &str) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(compare_text(a, b, collate)),
        _ => Ordering::Equal,
    }
}

/// Stable in-place sort of rows by the text of one cell each.
///
/// `cell_text` is evaluated once per row up front. Any comparator outcome
/// is accepted, including inconsistent ones from missing cells.
pub fn sort_rows<R, K, F>(rows: &mut Vec<R>, direction: SortDirection, cell_text: K, collate: F)
where
    K: Fn(&R) -> Option<String>,
    F: Fn(&str, &str) -> Ordering,
{
    let keyed: Vec<(Option<String>, R)> =
        rows.drain(..).map(|row| (cell_text(&row), row)).collect();
    let sorted = merge_sort(keyed, &|a: &(Option<String>, R), b: &(Option<String>, R)| {
        compare_cells(a.0.as_deref(), b.0.as_deref(), direction, &collate)
    });
    rows.extend(sorted.into_iter().map(|(_, row)| row));
}

/// Top-down stable merge sort. Takes from the right run only when its head
/// is strictly less, so equal and incomparable items keep their order.
fn merge_sort<T, C>(mut items: Vec<T>, cmp: &C) -> Vec<T>
where
    C: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}

/// Load the persisted sort for a table and apply it to `rows`.
///
/// `cell_text` receives the row and the saved column name. Returns the
/// restored state, or `None` (rows untouched) when nothing usable is saved.
pub fn restore_sort<S, R, K, F>(
    store: &S,
    storage_key: &str,
    rows: &mut Vec<R>,
    cell_text: K,
    collate: F,
) -> Option<SortState>
where
    S: KeyValueStore + ?Sized,
    K: Fn(&R, &str) -> Option<String>,
    F: Fn(&str, &str) -> Ordering,
{
    let state: SortState = load_json(store, storage_key)?;
    log::debug!("Re-applying saved sort {:?} from '{}'", state, storage_key);
    sort_rows(rows, state.direction, |row| cell_text(row, &state.column), collate);
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sorted(values: &[&str], direction: SortDirection) -> Vec<String> {
        let mut rows: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        sort_rows(&mut rows, direction, |r| Some(r.clone()), default_collate);
        rows
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            sorted(&["10", "9", "100"], SortDirection::Asc),
            vec!["9", "10", "100"]
        );
    }

    #[test]
    fn currency_and_grouping_are_stripped() {
        assert_eq!(numeric_value("₱1,250.50"), Some(1250.5));
        assert_eq!(numeric_value("  -3 units "), Some(-3.0));
        assert_eq!(
            sorted(&["₱1,250.00", "₱99.99", "₱250.00"], SortDirection::Desc),
            vec!["₱1,250.00", "₱250.00", "₱99.99"]
        );
    }

    #[test]
    fn parse_takes_longest_numeric_prefix() {
        assert_eq!(numeric_value("1.2.3"), Some(1.2));
        assert_eq!(numeric_value("12-3"), Some(12.0));
        assert_eq!(numeric_value("-.5"), Some(-0.5));
        assert_eq!(numeric_value("5."), Some(5.0));
        assert_eq!(numeric_value("--5"), None);
        assert_eq!(numeric_value("."), None);
        assert_eq!(numeric_value("Pending"), None);
    }

    #[test]
    fn text_falls_back_to_collation() {
        assert_eq!(
            sorted(&["banana", "Apple", "cherry"], SortDirection::Asc),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn mixed_pair_uses_collation() {
        assert_eq!(compare_text("12", "abc", default_collate), Ordering::Less);
    }

    #[test]
    fn descending_inverts_distinct_numeric_values() {
        let values = ["42", "7", "-1", "13.5", "1000"];
        let asc = sorted(&values, SortDirection::Asc);
        let desc = sorted(&values, SortDirection::Desc);
        let mut reversed = desc.clone();
        reversed.reverse();
        assert_eq!(asc, reversed);
        for (i, a) in values.iter().enumerate() {
            for b in values.iter().skip(i + 1) {
                let up = compare_cells(Some(a), Some(b), SortDirection::Asc, default_collate);
                let down = compare_cells(Some(a), Some(b), SortDirection::Desc, default_collate);
                assert_eq!(up, down.reverse());
            }
        }
    }

    #[test]
    fn ties_keep_original_order() {
        let mut rows = vec![("a", "5"), ("b", "3"), ("c", "5"), ("d", "3")];
        sort_rows(
            &mut rows,
            SortDirection::Desc,
            |r| Some(r.1.to_string()),
            default_collate,
        );
        let ids: Vec<&str> = rows.iter().map(|r| r.0).collect();
        assert_eq!(ids, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn rows_missing_the_column_compare_equal() {
        assert_eq!(
            compare_cells(None, Some("5"), SortDirection::Asc, default_collate),
            Ordering::Equal
        );
    }

    #[test]
    fn rows_without_the_cell_never_break_the_sort() {
        // Summary and colspan rows have no cell for the column.
        let mut seed: u32 = 7;
        for len in [23usize, 40, 64] {
            let mut rows: Vec<(usize, Option<String>)> = (0..len)
                .map(|i| {
                    seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    let value = (seed >> 16) % 50;
                    let cell = if value % 4 == 0 { None } else { Some(value.to_string()) };
                    (i, cell)
                })
                .collect();
            sort_rows(&mut rows, SortDirection::Asc, |r| r.1.clone(), default_collate);
            assert_eq!(rows.len(), len);

            let mut ids: Vec<usize> = rows.iter().map(|r| r.0).collect();
            ids.sort_unstable();
            assert_eq!(ids, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn missing_cells_stay_in_place_between_sorted_neighbours() {
        let mut rows = vec![Some("3"), Some("1"), None, Some("2")];
        sort_rows(&mut rows, SortDirection::Asc, |r| r.map(str::to_string), default_collate);
        assert_eq!(rows, vec![Some("1"), Some("3"), None, Some("2")]);
    }

    #[test]
    fn saved_descending_sort_is_reapplied() {
        let store = MemoryStore::new();
        store
            .set_item("sort_orders", r#"{"column":"total","direction":"desc"}"#)
            .unwrap();
        let mut rows = vec![("A", "₱120.00"), ("B", "₱1,500.00"), ("C", "₱75.50")];

        let state = restore_sort(
            &store,
            "sort_orders",
            &mut rows,
            |row, column| (column == "total").then(|| row.1.to_string()),
            default_collate,
        );

        assert_eq!(state, Some(SortState::new("total", SortDirection::Desc)));
        let ids: Vec<&str> = rows.iter().map(|r| r.0).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn nothing_saved_leaves_rows_alone() {
        let store = MemoryStore::new();
        store.set_item("sort_broken", "{not json").unwrap();
        let mut rows = vec!["b", "a"];
        for key in ["sort_missing", "sort_broken"] {
            let state = restore_sort(
                &store,
                key,
                &mut rows,
                |r, _| Some(r.to_string()),
                default_collate,
            );
            assert!(state.is_none());
        }
        assert_eq!(rows, vec!["b", "a"]);
    }

    #[test]
    fn empty_table_sorts_trivially() {
        let mut rows: Vec<String> = Vec::new();
        sort_rows(&mut rows, SortDirection::Asc, |r| Some(r.clone()), default_collate);
        assert!(rows.is_empty());
    }

    #[test]
    fn first_click_sorts_descending() {
        assert_eq!(next_direction(None), SortDirection::Desc);
        assert_eq!(next_direction(Some("")), SortDirection::Desc);
        assert_eq!(next_direction(Some("desc")), SortDirection::Asc);
    }

    #[test]
    fn sort_state_serializes_lowercase_direction() {
        let state = SortState::new("total", SortDirection::Desc);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"column":"total","direction":"desc"}"#);
        let back: SortState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
