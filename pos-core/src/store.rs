//! Key/value persistence seam.
//!
//! The browser build backs [`KeyValueStore`] with `localStorage`; tests use
//! [`MemoryStore`]. Values are plain strings, and structured state goes
//! through [`load_json`]/[`save_json`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Minimal string key/value store, shaped after the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory store. Clones share the same map, so a store handed to two
/// widgets behaves like one page's `localStorage`.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persistence key for a table's sort state.
pub fn sort_key(storage_id: &str) -> String {
    format!("sort_{}", storage_id)
}

/// Persistence key for a table's column visibility state.
pub fn columns_key(storage_id: &str) -> String {
    format!("cols_{}", storage_id)
}

/// Read and deserialize a JSON value. Missing keys and malformed JSON both
/// come back as `None`; the latter is logged.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed stored state under '{}': {}", key, e);
            None
        }
    }
}

/// Serialize and store a JSON value, logging (not propagating) failures.
pub fn save_json<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize state for '{}': {}", key, e);
            return;
        }
    };
    if let Err(e) = store.set_item(key, &json) {
        log::warn!("Failed to persist '{}': {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn clones_share_storage() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set_item("a", "1").unwrap();
        assert_eq!(other.get_item("a").as_deref(), Some("1"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn keys_are_namespaced_by_purpose() {
        assert_eq!(sort_key("orders"), "sort_orders");
        assert_eq!(columns_key("orders"), "cols_orders");
    }

    #[test]
    fn json_round_trips_through_store() {
        let store = MemoryStore::new();
        let mut map = BTreeMap::new();
        map.insert("total".to_string(), false);
        save_json(&store, "cols_x", &map);
        assert_eq!(store.get_item("cols_x").as_deref(), Some(r#"{"total":false}"#));
        let loaded: Option<BTreeMap<String, bool>> = load_json(&store, "cols_x");
        assert_eq!(loaded, Some(map));
    }

    #[test]
    fn malformed_json_loads_as_none() {
        let store = MemoryStore::new();
        store.set_item("sort_x", "{not json").unwrap();
        let loaded: Option<BTreeMap<String, bool>> = load_json(&store, "sort_x");
        assert!(loaded.is_none());
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryStore::new();
        let loaded: Option<BTreeMap<String, bool>> = load_json(&store, "nothing");
        assert!(loaded.is_none());
        assert!(store.is_empty());
    }
}
