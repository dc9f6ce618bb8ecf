//! `localStorage` backing for [`KeyValueStore`].

use crate::dom::{window, JsResultExt};
use pos_core::store::KeyValueStore;
use web_sys::Storage;

/// The page's `localStorage`. Cheap to clone.
#[derive(Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new() -> anyhow::Result<Self> {
        let storage = window()?
            .local_storage()
            .js_context("localStorage unavailable")?
            .ok_or_else(|| anyhow::anyhow!("localStorage is disabled"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage
            .set_item(key, value)
            .js_context("localStorage.setItem failed")
    }
}
