//! ChartRenderer: dashboard charts, KPI badges and the animated counter.

use crate::dom::{document, query_one, window, JsResultExt};
use crate::js_bridge;
use pos_core::chart::{
    sales_by_day_spec, sparkline_spec, DailySales, BAR_CANVAS_ID, SPARKLINE_CANVAS_ID,
};
use pos_core::counter::{
    counter_frame, parse_counter_target, SALES_COUNT_DURATION_MS, START_DELAY_MS,
};
use pos_core::kpi::{format_grouped, KpiIndicator};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Mount the 7-day sparkline onto `#salesSparklineChart`. An empty series
/// still draws, on the default 0..3 axis.
pub fn render_sparkline(series: &[DailySales]) {
    js_bridge::render_chart(SPARKLINE_CANVAS_ID, &sparkline_spec(series));
}

/// Mount the weekday bar chart onto `#salesByDayChart`. Missing days draw
/// as zero bars.
pub fn render_sales_by_day(sales_by_day: &HashMap<String, f64>) {
    js_bridge::render_chart(BAR_CANVAS_ID, &sales_by_day_spec(sales_by_day));
}

/// Fill the `.kpi-container` of the server-rendered sales card.
pub fn add_kpi_indicators(change_percent: Option<f64>) -> anyhow::Result<()> {
    let Some(indicator) = change_percent.and_then(KpiIndicator::new) else {
        return Ok(());
    };
    let doc = document()?;
    let card = doc
        .query_selector(r#"[data-kpi="sales"]"#)
        .js_context("KPI card lookup failed")?;
    if let Some(container) = card.and_then(|c| query_one(&c, ".kpi-container")) {
        container.set_inner_html(&indicator.to_html());
    }
    Ok(())
}

/// Count `element` up from 0 to `target` over `duration_ms`, one step per
/// animation frame, finishing on the exact target.
pub fn animate_counter(element: Element, target: i64, duration_ms: f64) -> anyhow::Result<()> {
    let win = window()?;
    let performance = win
        .performance()
        .ok_or_else(|| anyhow::anyhow!("performance API unavailable"))?;
    let start = performance.now();

    let frame_cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = frame_cb.clone();
    let frame_win = win.clone();

    *frame_cb.borrow_mut() = Some(Closure::new(move |now: f64| {
        let frame = counter_frame(target, now - start, duration_ms);
        element.set_text_content(Some(&format_grouped(frame.value as f64, 0)));
        if frame.done {
            // Drop the closure; the animation is over.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(cb) = next.borrow().as_ref() {
            let _ = frame_win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }));

    if let Some(cb) = frame_cb.borrow().as_ref() {
        win.request_animation_frame(cb.as_ref().unchecked_ref())
            .js_context("requestAnimationFrame failed")?;
    }
    Ok(())
}

/// After a short delay, animate `[data-metric="sales-count"]` up to `target`
/// (or the number currently rendered in it).
pub fn schedule_sales_counter(target: Option<i64>) -> anyhow::Result<()> {
    let win = window()?;
    let callback = Closure::once_into_js(move || {
        let element = match document()
            .ok()
            .and_then(|doc| doc.query_selector(r#"[data-metric="sales-count"]"#).ok().flatten())
        {
            Some(el) => el,
            None => return,
        };
        let text = element.text_content().unwrap_or_default();
        let Some(target) = target.or_else(|| parse_counter_target(&text)) else {
            log::debug!("Sales count '{}' is not numeric; not animating", text);
            return;
        };
        if let Err(e) = animate_counter(element, target, SALES_COUNT_DURATION_MS) {
            log::warn!("Counter animation failed: {}", e);
        }
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        START_DELAY_MS,
    )
    .js_context("setTimeout failed")?;
    Ok(())
}
