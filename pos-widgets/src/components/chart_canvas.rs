//! Canvas host for a Chart.js chart.

use crate::js_bridge;
use dioxus::prelude::*;

/// Props for ChartCanvas
#[derive(Props, Clone, PartialEq)]
pub struct ChartCanvasProps {
    /// The DOM id of the `<canvas>` (Chart.js renders into this)
    pub id: String,
    /// Whether the widgets are still initializing
    #[props(default = false)]
    pub loading: bool,
    /// Card title shown above the chart
    #[props(default = String::new())]
    pub title: String,
    /// Minimum height in pixels
    #[props(default = 240)]
    pub min_height: u32,
}

/// A card holding one `<canvas>`. The chart itself is mounted later by
/// [`crate::charts`] and destroyed when the card unmounts.
#[component]
pub fn ChartCanvas(props: ChartCanvasProps) -> Element {
    let canvas_id = props.id.clone();
    use_drop(move || js_bridge::destroy_chart(&canvas_id));

    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            class: "card mb-3",
            div {
                class: "card-body",
                if !props.title.is_empty() {
                    h6 {
                        class: "card-title text-muted",
                        "{props.title}"
                    }
                }
                div {
                    style: "{style}",
                    if props.loading {
                        div {
                            style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                            "Loading chart..."
                        }
                    }
                    canvas { id: "{props.id}" }
                }
            }
        }
    }
}
