//! Dark/light theme preference.
//!
//! A stored `"true"`/`"false"` wins over the system `prefers-color-scheme`.
//! Until the user picks a theme the preference follows the system and
//! nothing is written; every explicit choice persists the literal string.

use crate::store::KeyValueStore;

pub const DEFAULT_STORAGE_KEY: &str = "multibliz-darkmode";
pub const DEFAULT_DARK_CLASS: &str = "dark-mode";

/// Name of the document event broadcast on every theme change.
pub const THEME_CHANGE_EVENT: &str = "darkmodechange";

/// Selector for page toggle buttons.
pub const TOGGLE_SELECTOR: &str = r#"[data-toggle="darkmode"]"#;

/// Media query for the system preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Literal value persisted for a mode.
pub fn persisted_value(dark: bool) -> &'static str {
    if dark {
        "true"
    } else {
        "false"
    }
}

/// Interpret a stored value. Anything other than `"true"` is light.
pub fn parse_stored(value: &str) -> bool {
    value == "true"
}

/// How toggle buttons render for the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAppearance {
    pub active: bool,
    pub icon_class: &'static str,
    pub title: &'static str,
}

pub fn toggle_appearance(dark: bool) -> ToggleAppearance {
    if dark {
        ToggleAppearance {
            active: true,
            icon_class: "fas fa-moon",
            title: "Switch to Light Mode",
        }
    } else {
        ToggleAppearance {
            active: false,
            icon_class: "fas fa-sun",
            title: "Switch to Dark Mode",
        }
    }
}

/// Current theme plus its backing store.
pub struct ThemePreference<S: KeyValueStore> {
    store: S,
    storage_key: String,
    dark: bool,
}

impl<S: KeyValueStore> ThemePreference<S> {
    /// Resolve the initial mode from the store, falling back to the system.
    pub fn load(store: S, storage_key: impl Into<String>, system_dark: bool) -> Self {
        let storage_key = storage_key.into();
        let dark = store
            .get_item(&storage_key)
            .map(|v| parse_stored(&v))
            .unwrap_or(system_dark);
        Self {
            store,
            storage_key,
            dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn has_stored_preference(&self) -> bool {
        self.store.get_item(&self.storage_key).is_some()
    }

    /// Set and persist an explicit choice.
    pub fn set(&mut self, dark: bool) {
        self.dark = dark;
        if let Err(e) = self.store.set_item(&self.storage_key, persisted_value(dark)) {
            log::warn!("Failed to persist theme preference: {}", e);
        }
    }

    /// Flip the mode and persist it. Returns the new mode.
    pub fn toggle(&mut self) -> bool {
        self.set(!self.dark);
        self.dark
    }

    /// Track a system preference change. Ignored once the user has chosen.
    /// Returns the new mode when it was applied.
    pub fn follow_system(&mut self, system_dark: bool) -> Option<bool> {
        if self.has_stored_preference() {
            return None;
        }
        self.dark = system_dark;
        Some(system_dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn stored_value_wins_over_system() {
        let store = MemoryStore::new();
        store.set_item(DEFAULT_STORAGE_KEY, "false").unwrap();
        let pref = ThemePreference::load(store, DEFAULT_STORAGE_KEY, true);
        assert!(!pref.is_dark());
    }

    #[test]
    fn unset_state_follows_system_without_persisting() {
        let store = MemoryStore::new();
        let pref = ThemePreference::load(store.clone(), DEFAULT_STORAGE_KEY, true);
        assert!(pref.is_dark());
        assert!(store.get_item(DEFAULT_STORAGE_KEY).is_none());
    }

    #[test]
    fn toggling_twice_returns_to_system_state() {
        for system_dark in [false, true] {
            let store = MemoryStore::new();
            let mut pref = ThemePreference::load(store.clone(), DEFAULT_STORAGE_KEY, system_dark);

            let first = pref.toggle();
            assert_eq!(first, !system_dark);
            assert_eq!(
                store.get_item(DEFAULT_STORAGE_KEY).as_deref(),
                Some(persisted_value(!system_dark))
            );

            let second = pref.toggle();
            assert_eq!(second, system_dark);
            assert_eq!(
                store.get_item(DEFAULT_STORAGE_KEY).as_deref(),
                Some(persisted_value(system_dark))
            );
        }
    }

    #[test]
    fn persisted_values_are_literal_strings() {
        assert_eq!(persisted_value(true), "true");
        assert_eq!(persisted_value(false), "false");
        assert!(parse_stored("true"));
        assert!(!parse_stored("yes"));
    }

    #[test]
    fn system_changes_stop_after_explicit_choice() {
        let store = MemoryStore::new();
        let mut pref = ThemePreference::load(store, DEFAULT_STORAGE_KEY, false);
        assert_eq!(pref.follow_system(true), Some(true));
        pref.set(false);
        assert_eq!(pref.follow_system(true), None);
        assert!(!pref.is_dark());
    }

    #[test]
    fn toggle_buttons_describe_the_other_mode() {
        let dark = toggle_appearance(true);
        assert!(dark.active);
        assert_eq!(dark.title, "Switch to Light Mode");
        assert_eq!(toggle_appearance(false).icon_class, "fas fa-sun");
    }
}
