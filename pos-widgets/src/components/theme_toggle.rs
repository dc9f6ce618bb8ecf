//! Dark mode toggle button.

use crate::state::AppState;
use dioxus::prelude::*;
use pos_core::theme::toggle_appearance;

/// Icon button that flips the theme through the shared [`ThemeManager`].
///
/// [`ThemeManager`]: crate::theme::ThemeManager
#[component]
pub fn ThemeToggle() -> Element {
    let mut state = use_context::<AppState>();
    let look = toggle_appearance((state.dark_mode)());
    let class = if look.active {
        "btn btn-sm btn-outline-secondary active"
    } else {
        "btn btn-sm btn-outline-secondary"
    };

    let on_click = move |_evt: Event<MouseData>| {
        let manager = state.theme.peek().clone();
        match manager {
            Some(manager) => {
                let dark = !(state.dark_mode)();
                manager.set_mode(dark);
                state.dark_mode.set(dark);
            }
            None => log::warn!("Theme toggle clicked before the theme manager started"),
        }
    };

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            title: "{look.title}",
            onclick: on_click,
            i { class: "{look.icon_class}" }
        }
    }
}
