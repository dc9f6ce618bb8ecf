//! "Nice number" y-axis scaling for the small dashboard charts.

use serde::Serialize;

/// Number of gridline steps the sparkline y-axis aims for.
pub const TARGET_STEPS: f64 = 3.0;

/// Number of steps the weekday bar chart divides its maximum into.
pub const BAR_STEPS: f64 = 5.0;

/// Step size and suggested maximum handed to the charting library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScale {
    pub step: f64,
    pub suggested_max: f64,
}

/// Compute the axis scale for a series whose largest value is `max`.
///
/// A non-positive (or non-finite) maximum falls back to a step of 1 and a
/// suggested maximum of 3.
pub fn nice_axis(max: f64) -> AxisScale {
    let step = nice_step(max);
    AxisScale {
        step,
        suggested_max: (step * TARGET_STEPS).max(step),
    }
}

/// Round `ceil(max / 3)` up to 1, 2 or 5 times a power of ten.
pub fn nice_step(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let raw = (max / TARGET_STEPS).ceil();

    // raw >= 1 here, so walk the power of ten up instead of trusting log10
    let mut pow10 = 1.0;
    while pow10 * 10.0 <= raw {
        pow10 *= 10.0;
    }

    let leading = (raw / pow10).ceil();
    let nice_lead = if leading <= 1.0 {
        1.0
    } else if leading <= 2.0 {
        2.0
    } else if leading <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice_lead * pow10
}

/// Plain `ceil(max / 5)` step used by the weekday bar chart, never below 1.
pub fn bar_step(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    (max / BAR_STEPS).ceil().max(1.0)
}

/// Largest value in a series, or 0 for an empty one.
pub fn series_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_for_47_is_20() {
        let scale = nice_axis(47.0);
        assert_eq!(scale.step, 20.0);
        assert_eq!(scale.suggested_max, 60.0);
    }

    #[test]
    fn zero_max_uses_defaults() {
        let scale = nice_axis(0.0);
        assert_eq!(scale.step, 1.0);
        assert_eq!(scale.suggested_max, 3.0);
    }

    #[test]
    fn negative_and_nan_use_defaults() {
        assert_eq!(nice_step(-12.0), 1.0);
        assert_eq!(nice_step(f64::NAN), 1.0);
    }

    #[test]
    fn steps_snap_to_one_two_five() {
        assert_eq!(nice_step(3.0), 1.0);
        assert_eq!(nice_step(6.0), 2.0);
        assert_eq!(nice_step(12.0), 5.0);
        assert_eq!(nice_step(20.0), 10.0);
        assert_eq!(nice_step(3000.0), 1000.0);
        assert_eq!(nice_step(3001.0), 2000.0);
        assert_eq!(nice_step(12_500.0), 5000.0);
    }

    #[test]
    fn bar_step_divides_by_five() {
        assert_eq!(bar_step(23.0), 5.0);
        assert_eq!(bar_step(2.0), 1.0);
        assert_eq!(bar_step(0.0), 1.0);
    }

    #[test]
    fn series_max_of_empty_is_zero() {
        assert_eq!(series_max(&[]), 0.0);
        assert_eq!(series_max(&[4.0, 9.5, 2.0]), 9.5);
    }
}
