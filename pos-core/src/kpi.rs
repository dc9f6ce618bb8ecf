//! KPI delta indicators and number formatting.

/// Currency symbol used on tooltips, ticks and KPI cards.
pub const CURRENCY_SYMBOL: &str = "₱";

/// Period-over-period change badge for a KPI card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiIndicator {
    change_percent: f64,
}

impl KpiIndicator {
    /// `None` for NaN or infinite deltas.
    pub fn new(change_percent: f64) -> Option<Self> {
        change_percent
            .is_finite()
            .then_some(Self { change_percent })
    }

    pub fn is_positive(&self) -> bool {
        self.change_percent >= 0.0
    }

    pub fn arrow(&self) -> &'static str {
        if self.is_positive() {
            "↑"
        } else {
            "↓"
        }
    }

    pub fn color_class(&self) -> &'static str {
        if self.is_positive() {
            "text-success"
        } else {
            "text-danger"
        }
    }

    /// Full class list of the badge span.
    pub fn css_classes(&self) -> String {
        format!("kpi-indicator {} fw-bold", self.color_class())
    }

    /// e.g. `↑ 12.5%`
    pub fn label(&self) -> String {
        format!("{} {:.1}%", self.arrow(), self.change_percent.abs())
    }

    /// Markup injected into a server-rendered `.kpi-container`.
    pub fn to_html(&self) -> String {
        format!(
            r#"<span class="{}">{}</span>"#,
            self.css_classes(),
            self.label()
        )
    }
}

/// Format with `,` thousands grouping and a fixed number of decimals.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Default upper bound on fraction digits for locale number formatting.
const MAX_FRACTION_DIGITS: usize = 3;

/// `₱` amount with at least `min_decimals` fraction digits and up to three,
/// e.g. `₱1,234.50` or `₱1,234.567`. Matches the chart tooltips.
pub fn format_currency(value: f64, min_decimals: usize) -> String {
    let max_decimals = min_decimals.max(MAX_FRACTION_DIGITS);
    let mut grouped = format_grouped(value, max_decimals);
    if let Some(dot) = grouped.find('.') {
        let keep = dot + 1 + min_decimals;
        while grouped.len() > keep && grouped.ends_with('0') {
            grouped.pop();
        }
        if grouped.ends_with('.') {
            grouped.pop();
        }
    }
    match grouped.strip_prefix('-') {
        Some(abs) => format!("-{}{}", CURRENCY_SYMBOL, abs),
        None => format!("{}{}", CURRENCY_SYMBOL, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_change_points_up() {
        let kpi = KpiIndicator::new(12.34).unwrap();
        assert_eq!(kpi.label(), "↑ 12.3%");
        assert_eq!(kpi.css_classes(), "kpi-indicator text-success fw-bold");
    }

    #[test]
    fn zero_counts_as_positive() {
        let kpi = KpiIndicator::new(0.0).unwrap();
        assert_eq!(kpi.arrow(), "↑");
        assert_eq!(kpi.label(), "↑ 0.0%");
    }

    #[test]
    fn negative_change_points_down() {
        let kpi = KpiIndicator::new(-4.06).unwrap();
        assert_eq!(kpi.label(), "↓ 4.1%");
        assert_eq!(
            kpi.to_html(),
            r#"<span class="kpi-indicator text-danger fw-bold">↓ 4.1%</span>"#
        );
    }

    #[test]
    fn non_finite_change_has_no_indicator() {
        assert!(KpiIndicator::new(f64::NAN).is_none());
        assert!(KpiIndicator::new(f64::INFINITY).is_none());
    }

    #[test]
    fn grouping() {
        assert_eq!(format_grouped(0.0, 0), "0");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(1000.0, 0), "1,000");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-98765.4, 1), "-98,765.4");
        assert_eq!(format_grouped(-0.001, 2), "0.00");
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(1234.5, 2), "₱1,234.50");
        assert_eq!(format_currency(-20.0, 2), "-₱20.00");
        assert_eq!(format_currency(500.0, 0), "₱500");
    }

    #[test]
    fn currency_shows_up_to_three_decimals() {
        assert_eq!(format_currency(1234.5678, 2), "₱1,234.568");
        assert_eq!(format_currency(99.125, 2), "₱99.125");
        assert_eq!(format_currency(12.0, 2), "₱12.00");
        assert_eq!(format_currency(0.5, 0), "₱0.5");
    }
}
