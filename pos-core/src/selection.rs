//! In-memory row selection for bulk actions.

use std::collections::HashSet;

/// Default row attribute carrying a stable row identifier.
pub const DEFAULT_ROW_KEY_ATTRIBUTE: &str = "data-row-id";

/// Identifiers for a table's body rows, in body order.
///
/// Caller-supplied keys are used only when every row carries a non-empty
/// key and no two keys are equal. Otherwise every row is identified by its
/// position at enhancement time, so keyed and positional ids never mix.
pub fn row_identifiers<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let keys: Vec<Option<&str>> = keys
        .into_iter()
        .map(|key| key.map(str::trim).filter(|key| !key.is_empty()))
        .collect();

    let mut seen = HashSet::with_capacity(keys.len());
    let all_unique = keys
        .iter()
        .all(|key| matches!(key, Some(key) if seen.insert(*key)));
    if all_unique {
        return keys.into_iter().flatten().map(str::to_string).collect();
    }

    if keys.iter().any(Option::is_some) {
        log::warn!("Row keys are missing or repeated; identifying rows by position");
    }
    (0..keys.len()).map(|index| index.to_string()).collect()
}

/// Live count label shown in the action bar.
pub fn count_label(count: usize) -> String {
    format!("{} selected", count)
}

/// Selected row identifiers in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Returns false if it was already selected.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Remove an id. Returns false if it was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|x| x == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Mirror one row checkbox into the set.
    pub fn set(&mut self, id: &str, selected: bool) {
        if selected {
            self.insert(id);
        } else {
            self.remove(id);
        }
    }

    /// Mirror the "select all" checkbox across the given rows.
    pub fn set_all<'a, I>(&mut self, ids: I, selected: bool)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in ids {
            self.set(id, selected);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The action bar is shown iff something is selected.
    pub fn action_bar_visible(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_keys_are_used_as_is() {
        assert_eq!(
            row_identifiers([Some(" INV-0042 "), Some("INV-0043")]),
            vec!["INV-0042", "INV-0043"]
        );
        assert!(row_identifiers(std::iter::empty()).is_empty());
    }

    #[test]
    fn unkeyed_row_switches_every_row_to_position() {
        let ids = row_identifiers([Some("1"), None, Some("  ")]);
        assert_eq!(ids, vec!["0", "1", "2"]);

        let mut set = SelectionSet::new();
        set.set_all(ids.iter().map(String::as_str), true);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn repeated_keys_switch_every_row_to_position() {
        let ids = row_identifiers([Some("A"), Some("B"), Some("A")]);
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut set = SelectionSet::new();
        set.insert("2");
        set.insert("0");
        set.insert("2");
        assert_eq!(set.ids(), &["2".to_string(), "0".to_string()]);
    }

    #[test]
    fn select_all_then_deselect_one() {
        let rows = ["0", "1", "2"];
        let mut set = SelectionSet::new();
        set.set_all(rows, true);
        assert_eq!(set.len(), 3);
        set.set("1", false);
        assert_eq!(set.ids(), &["0".to_string(), "2".to_string()]);
        set.set_all(rows, false);
        assert!(set.is_empty());
        assert!(!set.action_bar_visible());
    }

    #[test]
    fn count_tracks_set_size_through_any_sequence() {
        let rows = ["a", "b", "c", "d"];
        let mut set = SelectionSet::new();
        let steps: Vec<Box<dyn Fn(&mut SelectionSet)>> = vec![
            Box::new(|s: &mut SelectionSet| s.set("a", true)),
            Box::new(|s: &mut SelectionSet| s.set("a", true)),
            Box::new(move |s: &mut SelectionSet| s.set_all(rows, true)),
            Box::new(|s: &mut SelectionSet| s.set("c", false)),
            Box::new(|s: &mut SelectionSet| s.clear()),
            Box::new(|s: &mut SelectionSet| s.set("d", true)),
            Box::new(|s: &mut SelectionSet| s.set("b", false)),
        ];
        for step in steps {
            step(&mut set);
            let unique: std::collections::HashSet<&String> = set.ids().iter().collect();
            assert_eq!(set.len(), unique.len());
            assert_eq!(count_label(set.len()), format!("{} selected", unique.len()));
            assert_eq!(set.action_bar_visible(), !unique.is_empty());
        }
        assert_eq!(set.ids(), &["d".to_string()]);
    }
}
