//! Progress math for the animated metric counter.

/// One-shot delay before the counter starts, in milliseconds.
pub const START_DELAY_MS: i32 = 100;

/// Animation length used for the sales-count card.
pub const SALES_COUNT_DURATION_MS: f64 = 1500.0;

/// What to display on one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub done: bool,
}

/// Value shown `elapsed_ms` into an animation from 0 to `target`.
///
/// Intermediate frames floor the interpolated value; once the duration is
/// used up the frame snaps to the exact target and reports `done`.
pub fn counter_frame(target: i64, elapsed_ms: f64, duration_ms: f64) -> CounterFrame {
    let progress = if duration_ms > 0.0 {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    } else {
        1.0
    };
    if progress >= 1.0 {
        return CounterFrame {
            value: target,
            done: true,
        };
    }
    CounterFrame {
        value: (target as f64 * progress).floor() as i64,
        done: false,
    }
}

/// Leading integer of an element's text, the way the page renders it
/// (`"1520 sales"` → 1520). `None` when there is no leading number.
pub fn parse_counter_target(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(
            counter_frame(1500, 0.0, 1500.0),
            CounterFrame {
                value: 0,
                done: false
            }
        );
    }

    #[test]
    fn intermediate_frames_floor() {
        let frame = counter_frame(10, 500.0, 1500.0);
        assert_eq!(frame.value, 3);
        assert!(!frame.done);
    }

    #[test]
    fn snaps_to_target_when_budget_exhausted() {
        assert_eq!(
            counter_frame(1234, 1600.0, 1500.0),
            CounterFrame {
                value: 1234,
                done: true
            }
        );
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        assert!(counter_frame(7, 0.0, 0.0).done);
    }

    #[test]
    fn values_never_decrease() {
        let mut last = 0;
        for step in 0..=30 {
            let frame = counter_frame(987, step as f64 * 50.0, 1500.0);
            assert!(frame.value >= last);
            last = frame.value;
        }
        assert_eq!(last, 987);
    }

    #[test]
    fn target_parses_leading_integer() {
        assert_eq!(parse_counter_target(" 1520 sales"), Some(1520));
        assert_eq!(parse_counter_target("42"), Some(42));
        assert_eq!(parse_counter_target("-8"), Some(-8));
        assert_eq!(parse_counter_target("1,204"), Some(1));
        assert_eq!(parse_counter_target("n/a"), None);
        assert_eq!(parse_counter_target(""), None);
    }
}
