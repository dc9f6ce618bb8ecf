//! Chart.js configurations for the dashboard sparkline and weekday bar chart.
//!
//! Configurations are plain JSON. Formatter callbacks cannot travel as JSON,
//! so each [`ChartSpec`] names the formatting it wants and the JS shim in
//! `pos-widgets` attaches the matching callbacks before calling `new Chart`.

use crate::axis::{bar_step, nice_axis, series_max};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Canvas id of the 7-day sales sparkline.
pub const SPARKLINE_CANVAS_ID: &str = "salesSparklineChart";
/// Canvas id of the sales-by-weekday bar chart.
pub const BAR_CANVAS_ID: &str = "salesByDayChart";

const TOOLTIP_BACKGROUND: &str = "rgba(31, 41, 55, 0.9)";
const GRID_COLOR: &str = "rgba(209, 213, 219, 0.3)";
const TICK_COLOR: &str = "#9ca3af";
const SPARKLINE_COLOR: &str = "#10b981";

/// Monday-first bar palette: (fill, border, hover fill).
const WEEKDAY_PALETTE: [(&str, &str, &str); 7] = [
    ("rgba(37, 99, 235, 0.8)", "#2563eb", "rgba(37, 99, 235, 1)"),
    ("rgba(59, 130, 246, 0.8)", "#3b82f6", "rgba(59, 130, 246, 1)"),
    ("rgba(96, 165, 250, 0.8)", "#60a5fa", "rgba(96, 165, 250, 1)"),
    ("rgba(16, 185, 129, 0.8)", "#10b981", "rgba(16, 185, 129, 1)"),
    ("rgba(34, 197, 94, 0.8)", "#22c55e", "rgba(34, 197, 94, 1)"),
    ("rgba(139, 92, 246, 0.8)", "#8b5cf6", "rgba(139, 92, 246, 1)"),
    ("rgba(236, 72, 153, 0.8)", "#ec4899", "rgba(236, 72, 153, 1)"),
];

/// One point of the 7-day sales series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub amount: f64,
}

/// How the JS shim formats tooltip labels and y-axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Plain,
    Currency,
    Transactions,
}

/// A Chart.js configuration plus the formatting the shim should attach.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub config: Value,
    pub tooltip_format: ValueFormat,
    pub tick_format: ValueFormat,
}

impl ChartSpec {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn tooltip_style() -> Value {
    json!({
        "backgroundColor": TOOLTIP_BACKGROUND,
        "padding": 12,
        "titleFont": { "size": 12, "weight": 600 },
        "bodyFont": { "size": 11 },
        "borderColor": "#d1d5db",
        "borderWidth": 1,
        "displayColors": false,
    })
}

fn x_scale() -> Value {
    json!({
        "border": { "display": false },
        "grid": { "display": false },
        "ticks": { "color": TICK_COLOR, "font": { "size": 11 } },
    })
}

/// Line chart of the last seven days of sales, y-axis in currency.
pub fn sparkline_spec(series: &[DailySales]) -> ChartSpec {
    let labels: Vec<&str> = series.iter().map(|d| d.date.as_str()).collect();
    let amounts: Vec<f64> = series.iter().map(|d| d.amount).collect();
    let scale = nice_axis(series_max(&amounts));

    let config = json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "7-Day Sales Trend",
                "data": amounts,
                "borderColor": SPARKLINE_COLOR,
                "backgroundColor": "rgba(16, 185, 129, 0.08)",
                "borderWidth": 2,
                "fill": true,
                "tension": 0.4,
                "pointRadius": 3,
                "pointBackgroundColor": SPARKLINE_COLOR,
                "pointBorderColor": "#fff",
                "pointBorderWidth": 2,
                "pointHoverRadius": 5,
            }],
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": true,
            "plugins": {
                "legend": { "display": false },
                "tooltip": tooltip_style(),
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "suggestedMax": scale.suggested_max,
                    "border": { "display": false },
                    "grid": { "color": GRID_COLOR, "drawBorder": false },
                    "ticks": {
                        "color": TICK_COLOR,
                        "font": { "size": 11 },
                        "stepSize": scale.step,
                    },
                },
                "x": x_scale(),
            },
        },
    });

    ChartSpec {
        config,
        tooltip_format: ValueFormat::Currency,
        tick_format: ValueFormat::Currency,
    }
}

/// `sales_by_day` keys, Monday first.
const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Monday-first totals looked up by exact full day name (`"Monday"`).
/// Other keys are ignored and missing days count as zero.
pub fn weekday_totals(sales_by_day: &HashMap<String, f64>) -> [f64; 7] {
    let ignored = sales_by_day
        .keys()
        .filter(|key| !DAY_NAMES.contains(&key.as_str()))
        .count();
    if ignored > 0 {
        log::warn!("Ignoring {} non-weekday keys in sales data", ignored);
    }
    DAY_NAMES.map(|day| sales_by_day.get(day).copied().unwrap_or(0.0))
}

/// Bar chart of transaction counts per weekday.
pub fn sales_by_day_spec(sales_by_day: &HashMap<String, f64>) -> ChartSpec {
    let totals = weekday_totals(sales_by_day);
    let step = bar_step(series_max(&totals));

    let mut labels = Vec::with_capacity(7);
    let mut day = Weekday::Mon;
    for _ in 0..7 {
        labels.push(day.to_string());
        day = day.succ();
    }

    let config = json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Sales Count",
                "data": totals,
                "backgroundColor": WEEKDAY_PALETTE.iter().map(|p| p.0).collect::<Vec<_>>(),
                "borderColor": WEEKDAY_PALETTE.iter().map(|p| p.1).collect::<Vec<_>>(),
                "hoverBackgroundColor": WEEKDAY_PALETTE.iter().map(|p| p.2).collect::<Vec<_>>(),
                "borderWidth": 1,
                "borderRadius": 8,
                "borderSkipped": false,
            }],
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": true,
            "indexAxis": "x",
            "plugins": {
                "legend": { "display": false },
                "tooltip": tooltip_style(),
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "border": { "display": false },
                    "grid": { "color": GRID_COLOR, "drawBorder": false },
                    "ticks": {
                        "color": TICK_COLOR,
                        "font": { "size": 11 },
                        "stepSize": step,
                    },
                },
                "x": x_scale(),
            },
        },
    });

    ChartSpec {
        config,
        tooltip_format: ValueFormat::Transactions,
        tick_format: ValueFormat::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(amounts: &[f64]) -> Vec<DailySales> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| DailySales {
                date: format!("2024-05-0{}", i + 1),
                amount: *a,
            })
            .collect()
    }

    #[test]
    fn sparkline_uses_nice_axis() {
        let spec = sparkline_spec(&week(&[12.0, 47.0, 30.0]));
        let y = &spec.config["options"]["scales"]["y"];
        assert_eq!(y["ticks"]["stepSize"], 20.0);
        assert_eq!(y["suggestedMax"], 60.0);
        assert_eq!(spec.config["data"]["labels"][1], "2024-05-02");
        assert_eq!(spec.tooltip_format, ValueFormat::Currency);
    }

    #[test]
    fn empty_sparkline_falls_back_to_default_axis() {
        let spec = sparkline_spec(&[]);
        let y = &spec.config["options"]["scales"]["y"];
        assert_eq!(y["ticks"]["stepSize"], 1.0);
        assert_eq!(y["suggestedMax"], 3.0);
    }

    #[test]
    fn weekday_totals_are_monday_first() {
        let mut by_day = HashMap::new();
        by_day.insert("Sunday".to_string(), 9.0);
        by_day.insert("Monday".to_string(), 4.0);
        by_day.insert("Someday".to_string(), 100.0);
        assert_eq!(weekday_totals(&by_day), [4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0]);
    }

    #[test]
    fn only_exact_day_names_count() {
        let mut by_day = HashMap::new();
        by_day.insert("Monday".to_string(), 4.0);
        by_day.insert("mon".to_string(), 10.0);
        by_day.insert("MONDAY".to_string(), 10.0);
        by_day.insert("Tue".to_string(), 3.0);
        assert_eq!(weekday_totals(&by_day), [4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_weekday_map_draws_seven_zero_bars() {
        let spec = sales_by_day_spec(&HashMap::new());
        assert_eq!(
            spec.config["data"]["datasets"][0]["data"],
            json!([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        );
        assert_eq!(spec.config["options"]["scales"]["y"]["ticks"]["stepSize"], 1.0);
    }

    #[test]
    fn bar_chart_labels_and_step() {
        let mut by_day = HashMap::new();
        by_day.insert("Friday".to_string(), 23.0);
        let spec = sales_by_day_spec(&by_day);
        assert_eq!(
            spec.config["data"]["labels"],
            json!(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
        );
        assert_eq!(spec.config["data"]["datasets"][0]["data"][4], 23.0);
        assert_eq!(spec.config["options"]["scales"]["y"]["ticks"]["stepSize"], 5.0);
        assert_eq!(spec.tooltip_format, ValueFormat::Transactions);
    }

    #[test]
    fn spec_serializes_format_hints() {
        let json = sparkline_spec(&week(&[1.0])).to_json().unwrap();
        assert!(json.contains(r#""tooltipFormat":"currency""#));
        assert!(json.contains(r#""tickFormat":"currency""#));
    }
}
