//! Display model for growth indicators and counters

use crate::analytics::{GrowthResult, Metric};
use serde::{Deserialize, Serialize};

/// Colour tone of an indicator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Danger,
}

impl Tone {
    /// CSS class applied to the indicator container
    pub fn container_class(&self) -> &'static str {
        match self {
            Tone::Success => "text-success fs-14 mb-0",
            Tone::Danger => "text-danger fs-14 mb-0",
        }
    }

    /// Arrow icon class
    pub fn icon(&self) -> &'static str {
        match self {
            Tone::Success => "ri-arrow-right-up-line",
            Tone::Danger => "ri-arrow-right-down-line",
        }
    }
}

/// Everything a renderer needs to draw one growth indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorView {
    pub sign: char,
    /// Magnitude with exactly two decimals, without sign or percent
    pub percent_text: String,
    pub tone: Tone,
}

impl IndicatorView {
    /// Signed text shown inside the percentage span, e.g. `+12.12`
    pub fn span_text(&self) -> String {
        format!("{}{}", self.sign, self.percent_text)
    }

    /// Complete label, e.g. `+12.12%`
    pub fn label(&self) -> String {
        format!("{}{}%", self.sign, self.percent_text)
    }

    /// HTML fragment for the indicator container
    pub fn inner_html(&self, span_id: &str) -> String {
        format!(
            r#"<i class="{} fs-13 align-middle"></i> <span id="{}">{}</span> %"#,
            self.tone.icon(),
            span_id,
            self.span_text()
        )
    }
}

impl From<GrowthResult> for IndicatorView {
    fn from(growth: GrowthResult) -> Self {
        Self {
            sign: growth.sign(),
            percent_text: format!("{:.2}", growth.magnitude_percent),
            tone: if growth.is_positive {
                Tone::Success
            } else {
                Tone::Danger
            },
        }
    }
}

/// Element ids a metric's widgets are drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTargets {
    pub counter_id: &'static str,
    pub container_id: &'static str,
    pub span_id: &'static str,
}

impl DisplayTargets {
    pub fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Earnings => Self {
                counter_id: "total-earning",
                container_id: "earning-growth-container",
                span_id: "earning-growth",
            },
            Metric::Bookings => Self {
                counter_id: "total-booking",
                container_id: "booking-growth-container",
                span_id: "booking-growth",
            },
            Metric::Customers => Self {
                counter_id: "total-customers",
                container_id: "customer-growth-container",
                span_id: "customer-growth",
            },
            Metric::Leads => Self {
                counter_id: "total-leads",
                container_id: "leads-growth-container",
                span_id: "leads-growth",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_growth;

    #[test]
    fn test_positive_indicator() {
        let view = IndicatorView::from(compute_growth(185_000.0, 165_000.0));
        assert_eq!(view.label(), "+12.12%");
        assert_eq!(view.span_text(), "+12.12");
        assert_eq!(view.tone, Tone::Success);
        assert_eq!(view.tone.container_class(), "text-success fs-14 mb-0");
    }

    #[test]
    fn test_negative_indicator() {
        let view = IndicatorView::from(compute_growth(50.0, 100.0));
        assert_eq!(view.label(), "-50.00%");
        assert_eq!(view.tone, Tone::Danger);
        assert_eq!(
            view.inner_html("booking-growth"),
            r#"<i class="ri-arrow-right-down-line fs-13 align-middle"></i> <span id="booking-growth">-50.00</span> %"#
        );
    }

    #[test]
    fn test_zero_base_indicator() {
        assert_eq!(IndicatorView::from(compute_growth(0.0, 0.0)).label(), "-100.00%");
        assert_eq!(IndicatorView::from(compute_growth(7.0, 0.0)).label(), "+100.00%");
        assert_eq!(IndicatorView::from(compute_growth(100.0, 100.0)).label(), "+0.00%");
    }

    #[test]
    fn test_targets() {
        let targets = DisplayTargets::for_metric(Metric::Customers);
        assert_eq!(targets.counter_id, "total-customers");
        assert_eq!(targets.span_id, "customer-growth");
    }
}
