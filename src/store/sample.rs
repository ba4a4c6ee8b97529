//! Sample data for trying out the dashboard
//!
//! Seeds a store with all-time, this-month and last-month figures and
//! offers the maintenance operations used while testing: clearing the
//! dashboard keys, updating one value and printing growth statistics.

use super::{MetricStore, StoreResult};
use crate::analytics::{signed_growth_label, Metric, MetricKey, Period};
use serde::{Deserialize, Serialize};

/// One value per metric for a single period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeriodValues {
    pub earnings: f64,
    pub bookings: f64,
    pub customers: f64,
    pub leads: f64,
}

impl PeriodValues {
    /// Value for `metric`
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Earnings => self.earnings,
            Metric::Bookings => self.bookings,
            Metric::Customers => self.customers,
            Metric::Leads => self.leads,
        }
    }
}

/// Sample figures for the three periods the dashboard reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleData {
    pub alltime: PeriodValues,
    pub this_month: PeriodValues,
    pub last_month: PeriodValues,
}

/// Signed month-over-month growth for one metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthStat {
    pub metric: Metric,
    pub label: String,
}

impl Default for SampleData {
    fn default() -> Self {
        Self {
            alltime: PeriodValues {
                earnings: 2_547_890.0,
                bookings: 1_234.0,
                customers: 567.0,
                leads: 892.0,
            },
            this_month: PeriodValues {
                earnings: 185_000.0,
                bookings: 89.0,
                customers: 45.0,
                leads: 76.0,
            },
            last_month: PeriodValues {
                earnings: 165_000.0,
                bookings: 78.0,
                customers: 38.0,
                leads: 65.0,
            },
        }
    }
}

impl SampleData {
    /// Periods seeded and cleared by the sample-data manager
    pub const PERIODS: [Period; 3] = [Period::AllTime, Period::ThisMonth, Period::LastMonth];

    /// Values for `period`, if it is one of the seeded periods
    pub fn values(&self, period: Period) -> Option<&PeriodValues> {
        match period {
            Period::AllTime => Some(&self.alltime),
            Period::ThisMonth => Some(&self.this_month),
            Period::LastMonth => Some(&self.last_month),
            Period::Current | Period::Previous => None,
        }
    }

    /// Every key the sample-data manager owns
    pub fn keys() -> impl Iterator<Item = MetricKey> {
        Self::PERIODS.into_iter().flat_map(|period| {
            Metric::all()
                .iter()
                .map(move |&metric| MetricKey::new(period, metric))
        })
    }

    /// Write all sample values into `store`
    pub fn initialize(&self, store: &dyn MetricStore) -> StoreResult<()> {
        for key in Self::keys() {
            if let Some(values) = self.values(key.period) {
                store.write(key, values.get(key.metric))?;
            }
        }
        tracing::info!("Sample data initialized ({} keys)", Self::PERIODS.len() * Metric::all().len());
        Ok(())
    }

    /// Remove every sample-data key from `store`
    pub fn clear(store: &dyn MetricStore) -> StoreResult<()> {
        for key in Self::keys() {
            store.remove(&key.to_string())?;
        }
        tracing::info!("All analytics data cleared");
        Ok(())
    }

    /// Set a single metric value
    pub fn update(
        store: &dyn MetricStore,
        metric: Metric,
        period: Period,
        value: f64,
    ) -> StoreResult<()> {
        let key = MetricKey::new(period, metric);
        store.write(key, value)?;
        tracing::info!("Updated {} to {}", key, value);
        Ok(())
    }

    /// Signed growth of this month over last month for every metric
    pub fn growth_stats(&self) -> Vec<GrowthStat> {
        Metric::all()
            .iter()
            .map(|&metric| GrowthStat {
                metric,
                label: signed_growth_label(
                    self.this_month.get(metric),
                    self.last_month.get(metric),
                ),
            })
            .collect()
    }
}
