//! POS Admin Dashboard
//!
//! Mounts the dashboard widgets onto a server-rendered admin page:
//! 1. The page embeds `<script id="pos-widget-config" type="application/json">`
//!    with sales figures, theme settings and table descriptors.
//! 2. On mount, the theme manager applies the stored (or OS) mode.
//! 3. Chart.js charts are mounted onto the canvases rendered below and the
//!    sales counter animates up to its value.
//! 4. Each described table (or, without descriptors, every table carrying
//!    the `data-sortable` / `data-toggleable` / `data-bulkable` markers) gets
//!    its sorting, column toggle and bulk selection behaviours.

use dioxus::prelude::*;
use pos_core::chart::{BAR_CANVAS_ID, SPARKLINE_CANVAS_ID};
use pos_core::kpi::format_grouped;
use pos_core::theme::THEME_CHANGE_EVENT;
use pos_widgets::components::{ChartCanvas, ErrorDisplay, KpiBadge, ThemeToggle};
use pos_widgets::page_config::{discover_marked_tables, read_page_config};
use pos_widgets::state::AppState;
use pos_widgets::storage::LocalStorage;
use pos_widgets::tables::{BulkSelect, TableRegistry};
use pos_widgets::theme::ThemeManager;
use pos_widgets::{charts, dom, js_bridge};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("pos-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Initialize every widget once on mount
    use_effect(move || {
        let config = match read_page_config() {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to read widget config: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Invalid widget configuration: {}", e)));
                state.loading.set(false);
                return;
            }
        };

        match ThemeManager::init(&config.theme) {
            Ok(manager) => {
                state.dark_mode.set(manager.is_dark_mode());
                state.theme.set(Some(manager));
                follow_theme_events(state);
            }
            Err(e) => log::warn!("Theme manager unavailable: {}", e),
        }

        js_bridge::init_charts();
        charts::render_sparkline(&config.seven_day_sales);
        charts::render_sales_by_day(&config.sales_by_day);
        if let Err(e) = charts::add_kpi_indicators(config.sales_change_percent) {
            log::warn!("Failed to add KPI indicators: {}", e);
        }
        if let Err(e) = charts::schedule_sales_counter(config.sales_count) {
            log::warn!("Failed to start sales counter: {}", e);
        }

        match LocalStorage::new() {
            Ok(store) => {
                let mut registry = TableRegistry::new(store);
                register_demo_actions(&mut registry);
                let descriptors = if config.tables.is_empty() {
                    discover_marked_tables()
                } else {
                    config.tables.clone()
                };
                registry.enhance_all(&descriptors);
                state.tables.set(Some(Rc::new(registry)));
            }
            Err(e) => {
                log::error!("Tables not enhanced: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Table enhancements unavailable: {}", e)));
            }
        }

        state.config.set(Some(config));
        state.loading.set(false);
    });

    let config = state.config.read().clone();
    let change_percent = config.as_ref().and_then(|c| c.sales_change_percent);
    let sales_count = config
        .as_ref()
        .and_then(|c| c.sales_count)
        .map(|n| format_grouped(n as f64, 0))
        .unwrap_or_else(|| "0".to_string());
    let loading = (state.loading)();
    let enhanced_tables = state
        .tables
        .read()
        .as_ref()
        .map(|registry| registry.tables().len())
        .unwrap_or(0);

    rsx! {
        div {
            class: "container-fluid py-3",
            div {
                class: "d-flex justify-content-between align-items-center mb-3",
                h4 { class: "mb-0", "Sales Overview" }
                ThemeToggle {}
            }

            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }

            div {
                class: "card mb-3",
                div {
                    class: "card-body",
                    h6 { class: "card-title text-muted", "Transactions (7 days)" }
                    h3 {
                        "data-metric": "sales-count",
                        "{sales_count}"
                    }
                    KpiBadge { change_percent }
                }
            }

            div {
                class: "row",
                div {
                    class: "col-md-6",
                    ChartCanvas {
                        id: SPARKLINE_CANVAS_ID.to_string(),
                        title: "Last 7 Days".to_string(),
                        min_height: 120,
                        loading,
                    }
                }
                div {
                    class: "col-md-6",
                    ChartCanvas {
                        id: BAR_CANVAS_ID.to_string(),
                        title: "Sales by Day of Week".to_string(),
                        loading,
                    }
                }
            }

            if enhanced_tables > 0 {
                p {
                    class: "text-muted small mb-0",
                    "{enhanced_tables} table(s) enhanced with sorting, column and bulk tools"
                }
            }
        }
    }
}

/// Keep `dark_mode` in step with changes made outside RSX (server-rendered
/// toggle buttons, OS preference changes).
fn follow_theme_events(mut state: AppState) {
    let Ok(doc) = dom::document() else {
        return;
    };
    dom::listen(&doc, THEME_CHANGE_EVENT, move |event: web_sys::Event| {
        let Some(event) = event.dyn_ref::<web_sys::CustomEvent>() else {
            return;
        };
        let dark = js_sys::Reflect::get(&event.detail(), &JsValue::from_str("isDark"))
            .ok()
            .and_then(|v| v.as_bool());
        if let Some(dark) = dark {
            state.dark_mode.set(dark);
        }
    });
}

/// Callbacks for the bulk actions the admin tables offer.
fn register_demo_actions(registry: &mut TableRegistry) {
    registry.register_action("export", |selected: &[String], table: &BulkSelect| {
        let rows: Vec<String> = table
            .selected_rows()
            .iter()
            .map(|(id, row)| format!("{}: {}", id, dom::text(row)))
            .collect();
        log::info!("Exporting {} rows: {:?}", selected.len(), rows);
    });

    registry.register_action("hide", |selected: &[String], table: &BulkSelect| {
        for (_, row) in table.selected_rows() {
            dom::set_display(&row, false);
        }
        log::info!("Hid {} rows", selected.len());
        table.clear_selection();
    });

    registry.register_action("delete", |selected: &[String], table: &BulkSelect| {
        for (id, row) in table.selected_rows() {
            row.remove();
            table.forget_row(&id);
        }
        log::info!("Removed {} rows", selected.len());
    });
}
