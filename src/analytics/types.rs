//! Core data types for dashboard analytics
//!
//! - `Metric`: which business figure is being measured
//! - `Period`: the time bucket a value was aggregated over
//! - `MetricKey`: the `"<period>_<metric>"` key used by metric stores
//! - `MetricSample`: a single value read for one metric in one period

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A business metric shown on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Revenue, a currency amount
    Earnings,
    /// Number of bookings
    Bookings,
    /// Number of customers
    Customers,
    /// Number of leads
    Leads,
}

impl Metric {
    /// Get all metrics in display order
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Earnings,
            Metric::Bookings,
            Metric::Customers,
            Metric::Leads,
        ]
    }

    /// Key fragment used in store keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Earnings => "earnings",
            Metric::Bookings => "bookings",
            Metric::Customers => "customers",
            Metric::Leads => "leads",
        }
    }

    /// Whether values of this metric are whole counts
    pub fn is_count(&self) -> bool {
        !matches!(self, Metric::Earnings)
    }

    /// Parse a raw stored value for this metric.
    ///
    /// Only the leading numeric part is read, so `"89 bookings"` is 89.
    /// Counts take the integer prefix (`"1e3"` is 1, `"12.9"` is 12);
    /// currency amounts take the decimal prefix including any exponent.
    /// Returns `None` when there is no numeric prefix or the value is not
    /// finite.
    pub fn parse_value(&self, raw: &str) -> Option<f64> {
        let text = raw.trim_start();
        let end = if self.is_count() {
            integer_prefix_len(text)
        } else {
            decimal_prefix_len(text)
        }?;
        let value: f64 = text[..end].parse().ok()?;
        value.is_finite().then_some(value)
    }
}

/// Length of an optional sign followed by at least one digit
fn integer_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    (digits > 0).then_some(sign + digits)
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix
fn decimal_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let whole = count_digits(&bytes[end..]);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = count_digits(&bytes[end + 1..]);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    Some(end)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earnings" | "earning" => Ok(Metric::Earnings),
            "bookings" | "booking" => Ok(Metric::Bookings),
            "customers" | "customer" => Ok(Metric::Customers),
            "leads" | "lead" => Ok(Metric::Leads),
            other => Err(ParseKeyError::UnknownMetric(other.to_string())),
        }
    }
}

/// Time bucket a metric value belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Running total since the business started
    #[serde(rename = "alltime")]
    AllTime,
    /// The calendar month in progress
    #[serde(rename = "thismonth")]
    ThisMonth,
    /// The calendar month before this one
    #[serde(rename = "lastmonth")]
    LastMonth,
    /// Generic current reporting period
    Current,
    /// Generic previous reporting period
    Previous,
}

impl Period {
    /// Get all periods
    pub fn all() -> &'static [Period] {
        &[
            Period::AllTime,
            Period::ThisMonth,
            Period::LastMonth,
            Period::Current,
            Period::Previous,
        ]
    }

    /// Key prefix used in store keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::AllTime => "alltime",
            Period::ThisMonth => "thismonth",
            Period::LastMonth => "lastmonth",
            Period::Current => "current",
            Period::Previous => "previous",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alltime" | "all-time" | "all_time" => Ok(Period::AllTime),
            "thismonth" | "this-month" | "this_month" => Ok(Period::ThisMonth),
            "lastmonth" | "last-month" | "last_month" => Ok(Period::LastMonth),
            "current" => Ok(Period::Current),
            "previous" => Ok(Period::Previous),
            other => Err(ParseKeyError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Store key for one metric in one period, rendered as `"<period>_<metric>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricKey {
    pub period: Period,
    pub metric: Metric,
}

impl MetricKey {
    pub fn new(period: Period, metric: Metric) -> Self {
        Self { period, metric }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.period, self.metric)
    }
}

impl FromStr for MetricKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (period, metric) = s
            .rsplit_once('_')
            .ok_or_else(|| ParseKeyError::Malformed(s.to_string()))?;
        Ok(Self {
            period: period.parse()?,
            metric: metric.parse()?,
        })
    }
}

/// A single value observed for one metric in one period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    pub metric: Metric,
    pub period: Period,
    pub value: f64,
}

impl MetricSample {
    pub fn new(metric: Metric, period: Period, value: f64) -> Self {
        Self {
            metric,
            period,
            value,
        }
    }

    /// Store key this sample was read from
    pub fn key(&self) -> MetricKey {
        MetricKey::new(self.period, self.metric)
    }
}

/// Errors parsing metric, period or key names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyError {
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Malformed metric key: {0}")]
    Malformed(String),
}
