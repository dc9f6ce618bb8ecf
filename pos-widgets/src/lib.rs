//! Browser widgets for the POS admin panel, compiled to WASM.
//!
//! This crate provides:
//! - `js_bridge`: Chart.js bridge via `js_sys::eval()` and an embedded JS shim
//! - `charts`: ChartRenderer (sparkline, weekday bars, KPI badges, counters)
//! - `theme`: ThemeManager (dark/light toggle over `localStorage`)
//! - `tables`: TableEnhancer (sorting, column visibility, bulk selection)
//! - `state` / `components`: shared Dioxus state and RSX components

pub mod charts;
pub mod components;
pub mod dom;
pub mod js_bridge;
pub mod page_config;
pub mod state;
pub mod storage;
pub mod tables;
pub mod theme;
