//! ThemeManager: dark/light mode on `<html>`, persisted to `localStorage`.

use crate::dom::{document, document_query_all, listen, window, JsResultExt};
use crate::storage::LocalStorage;
use pos_core::config::ThemeConfig;
use pos_core::theme::{
    toggle_appearance, ThemePreference, PREFERS_DARK_QUERY, THEME_CHANGE_EVENT, TOGGLE_SELECTOR,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Event, MediaQueryListEvent};

pub struct ThemeManager {
    preference: RefCell<ThemePreference<LocalStorage>>,
    class_name: String,
}

impl ThemeManager {
    /// Resolve the initial mode, apply it, wire every
    /// `[data-toggle="darkmode"]` button and follow OS changes until the user
    /// makes an explicit choice.
    pub fn init(config: &ThemeConfig) -> anyhow::Result<Rc<Self>> {
        let store = LocalStorage::new()?;
        let media = window()?
            .match_media(PREFERS_DARK_QUERY)
            .js_context("matchMedia failed")?;
        let system_dark = media.as_ref().map(|m| m.matches()).unwrap_or(false);

        let preference = ThemePreference::load(store, config.storage_key.clone(), system_dark);
        let manager = Rc::new(Self {
            preference: RefCell::new(preference),
            class_name: config.class_name.clone(),
        });
        manager.apply();
        manager.setup_toggle_buttons();

        if let Some(media) = media {
            let weak = Rc::downgrade(&manager);
            listen(&media, "change", move |event: Event| {
                let Some(manager) = weak.upgrade() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
                    return;
                };
                let followed = manager.preference.borrow_mut().follow_system(event.matches());
                if followed.is_some() {
                    manager.apply();
                    manager.update_toggle_buttons();
                }
            });
        }

        log::info!("Theme initialized (dark: {})", manager.is_dark_mode());
        Ok(manager)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.preference.borrow().is_dark()
    }

    /// Set and persist a mode.
    pub fn set_mode(&self, dark: bool) {
        self.preference.borrow_mut().set(dark);
        self.apply();
        self.update_toggle_buttons();
    }

    /// Flip and persist the mode. Returns the new mode.
    pub fn toggle(&self) -> bool {
        let dark = self.preference.borrow_mut().toggle();
        self.apply();
        self.update_toggle_buttons();
        dark
    }

    /// Put the class on `<html>` and broadcast the change.
    fn apply(&self) {
        let dark = self.is_dark_mode();
        let Ok(doc) = document() else {
            return;
        };
        if let Some(root) = doc.document_element() {
            let classes = root.class_list();
            let _ = if dark {
                classes.add_1(&self.class_name)
            } else {
                classes.remove_1(&self.class_name)
            };
        }
        if let Err(e) = dispatch_theme_change(dark) {
            log::warn!("Failed to dispatch {}: {}", THEME_CHANGE_EVENT, e);
        }
    }

    fn setup_toggle_buttons(self: &Rc<Self>) {
        for toggle in document_query_all(TOGGLE_SELECTOR) {
            let weak: Weak<Self> = Rc::downgrade(self);
            listen(&toggle, "click", move |event: Event| {
                event.prevent_default();
                if let Some(manager) = weak.upgrade() {
                    manager.toggle();
                }
            });
        }
        self.update_toggle_buttons();
    }

    fn update_toggle_buttons(&self) {
        let look = toggle_appearance(self.is_dark_mode());
        for toggle in document_query_all(TOGGLE_SELECTOR) {
            let classes = toggle.class_list();
            let _ = if look.active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
            toggle.set_inner_html(&format!(r#"<i class="{}"></i>"#, look.icon_class));
            let _ = toggle.set_attribute("title", look.title);
        }
    }
}

/// Dispatch `darkmodechange` on the document with `detail: { isDark }`.
fn dispatch_theme_change(dark: bool) -> anyhow::Result<()> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &JsValue::from_str("isDark"), &JsValue::from_bool(dark))
        .js_context("building event detail failed")?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(THEME_CHANGE_EVENT, &init)
        .js_context("CustomEvent construction failed")?;
    document()?
        .dispatch_event(&event)
        .js_context("dispatchEvent failed")?;
    Ok(())
}
