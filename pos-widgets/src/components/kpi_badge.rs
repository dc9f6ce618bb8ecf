//! Trend badge for a KPI card.

use dioxus::prelude::*;
use pos_core::kpi::KpiIndicator;

#[derive(Props, Clone, PartialEq)]
pub struct KpiBadgeProps {
    /// Percent change against the previous period
    #[props(!optional)]
    pub change_percent: Option<f64>,
    #[props(default = "vs last week".to_string())]
    pub caption: String,
}

/// Green ↑ or red ↓ with the absolute change to one decimal. Renders
/// nothing when no change is known.
#[component]
pub fn KpiBadge(props: KpiBadgeProps) -> Element {
    let Some(indicator) = props.change_percent.and_then(KpiIndicator::new) else {
        return rsx! {};
    };
    let classes = indicator.css_classes();
    let label = indicator.label();

    rsx! {
        div {
            class: "kpi-container",
            span {
                class: "{classes}",
                "{label}"
            }
            small {
                class: "text-muted ms-1",
                "{props.caption}"
            }
        }
    }
}
