//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`.

use crate::tables::TableRegistry;
use crate::theme::ThemeManager;
use dioxus::prelude::*;
use pos_core::config::WidgetConfig;
use std::rc::Rc;

/// Shared state for the POS admin widgets.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Page configuration (None until read)
    pub config: Signal<Option<WidgetConfig>>,
    /// Whether the widgets are still initializing
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Mirrors the theme manager so RSX can re-render on changes
    pub dark_mode: Signal<bool>,
    /// Theme manager (None until initialized)
    pub theme: Signal<Option<Rc<ThemeManager>>>,
    /// Enhanced tables (None until initialized)
    pub tables: Signal<Option<Rc<TableRegistry>>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            config: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            dark_mode: Signal::new(false),
            theme: Signal::new(None),
            tables: Signal::new(None),
        }
    }
}
