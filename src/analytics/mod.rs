//! Dashboard analytics core
//!
//! - **types**: metrics, periods and store keys
//! - **growth**: period-over-period growth calculation
//! - **format**: number formatting for display
//! - **counter**: counting-up animation frames
//!
//! Everything here is pure and synchronous.

pub mod counter;
pub mod format;
pub mod growth;
pub mod types;

pub use counter::CounterAnimation;
pub use format::{
    format_amount, format_sales_thousands, format_with_thousands_separator, signed_growth_label,
};
pub use growth::{compute_growth, round2, GrowthResult};
pub use types::{Metric, MetricKey, MetricSample, ParseKeyError, Period};
