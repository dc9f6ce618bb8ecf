//! Typed wrappers around Chart.js interop via `js_sys::eval()`.
//!
//! Chart.js itself is loaded by the page. The glue in `assets/js/pos-charts.js`
//! is embedded at compile time, evaluated at global scope once Chart.js is
//! present, and exposed via `window.*`. This module serializes chart specs
//! and calls those globals.

use pos_core::chart::ChartSpec;

static POS_CHARTS_JS: &str = include_str!("../assets/js/pos-charts.js");

/// 100 ms polls before a render request is abandoned.
const MAX_RENDER_POLLS: u32 = 100;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('POS JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the chart glue with a wait-for-Chart.js polling loop.
///
/// The glue is stashed on `window` as a string and evaluated with an
/// indirect `eval` so its function declarations land at global scope
/// rather than inside the `setInterval` callback.
pub fn init_charts() {
    let store_js = match serde_json::to_string(POS_CHARTS_JS) {
        Ok(literal) => format!("window.__posChartScripts = {};", literal),
        Err(e) => {
            log::error!("Failed to encode chart glue: {}", e);
            return;
        }
    };
    call_js(&store_js);

    let init_js = r#"
        (function() {
            if (window.__posChartsReady || window.__posChartsWaiting) return;
            window.__posChartsWaiting = true;
            var waitForChart = setInterval(function() {
                if (typeof Chart !== 'undefined') {
                    clearInterval(waitForChart);
                    (0, eval)(window.__posChartScripts);
                    delete window.__posChartScripts;
                    if (typeof renderPosChart !== 'undefined') window.renderPosChart = renderPosChart;
                    if (typeof posFormatValue !== 'undefined') window.posFormatValue = posFormatValue;
                    window.__posChartsReady = true;
                    console.log('POS charts initialized');
                }
            }, 100);
        })();
    "#;
    call_js(init_js);
}

/// Render a chart spec onto a canvas.
///
/// Polls until Chart.js, the glue and the canvas element all exist, giving
/// up quietly after `MAX_RENDER_POLLS` attempts.
pub fn render_chart(canvas_id: &str, spec: &ChartSpec) {
    let spec_json = match spec.to_json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize chart '{}': {}", canvas_id, e);
            return;
        }
    };
    // Both values are embedded as JSON string literals, which are valid JS.
    let (id_literal, spec_literal) = match (
        serde_json::to_string(canvas_id),
        serde_json::to_string(&spec_json),
    ) {
        (Ok(id), Ok(spec)) => (id, spec),
        _ => {
            log::error!("Failed to encode chart call for '{}'", canvas_id);
            return;
        }
    };

    log::debug!("Scheduling chart render into #{}", canvas_id);
    call_js(&format!(
        r#"
        (function() {{
            var canvasId = {id_literal};
            var attempts = 0;
            var poll = setInterval(function() {{
                if (++attempts > {MAX_RENDER_POLLS}) {{
                    clearInterval(poll);
                    console.warn('[POS] gave up waiting for #' + canvasId);
                    return;
                }}
                if (window.__posChartsReady &&
                    typeof window.renderPosChart !== 'undefined' &&
                    document.getElementById(canvasId)) {{
                    clearInterval(poll);
                    try {{
                        window.renderPosChart(canvasId, {spec_literal});
                    }} catch(e) {{ console.error('[POS] renderPosChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy the Chart.js instance bound to a canvas, if any.
pub fn destroy_chart(canvas_id: &str) {
    if let Ok(id_literal) = serde_json::to_string(canvas_id) {
        call_js(&format!(
            "var c = document.getElementById({0}); \
             if (c && typeof Chart !== 'undefined' && Chart.getChart(c)) Chart.getChart(c).destroy();",
            id_literal
        ));
    }
}
