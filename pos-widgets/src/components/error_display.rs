//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Displays an error message in a dismissable alert box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            class: "alert alert-danger",
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; border-radius: 0.375rem;",
            i { class: "fas fa-triangle-exclamation me-2" }
            strong { "Widget error: " }
            "{props.message}"
        }
    }
}
