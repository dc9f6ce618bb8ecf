//! Reusable Dioxus RSX components for the POS admin panel.

mod chart_canvas;
mod error_display;
mod kpi_badge;
mod theme_toggle;

pub use chart_canvas::ChartCanvas;
pub use error_display::ErrorDisplay;
pub use kpi_badge::KpiBadge;
pub use theme_toggle::ThemeToggle;
