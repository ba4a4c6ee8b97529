//! Dashboard controller
//!
//! Reads totals and period values from a [`MetricStore`], computes growth
//! for every metric and pushes the result to a [`Renderer`].
//!
//! ```text
//! MetricStore.read ─▶ compute_growth ─▶ Renderer.update_indicator
//! ```

pub mod indicator;
pub mod renderer;

pub use indicator::{DisplayTargets, IndicatorView, Tone};
pub use renderer::{RenderError, Renderer, TerminalRenderer};

use crate::analytics::{compute_growth, GrowthResult, Metric, MetricKey, Period};
use crate::store::MetricStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which periods feed the counters and the growth comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Period shown in the big counters
    #[serde(default = "default_totals_period")]
    pub totals_period: Period,

    /// Newer side of the growth comparison
    #[serde(default = "default_current_period")]
    pub current_period: Period,

    /// Older side of the growth comparison
    #[serde(default = "default_previous_period")]
    pub previous_period: Period,
}

fn default_totals_period() -> Period {
    Period::AllTime
}

fn default_current_period() -> Period {
    Period::ThisMonth
}

fn default_previous_period() -> Period {
    Period::LastMonth
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            totals_period: default_totals_period(),
            current_period: default_current_period(),
            previous_period: default_previous_period(),
        }
    }
}

impl DashboardConfig {
    /// Counters and growth both from the generic current/previous keys
    pub fn current_vs_previous() -> Self {
        Self {
            totals_period: Period::Current,
            current_period: Period::Current,
            previous_period: Period::Previous,
        }
    }
}

/// Everything shown for one metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSummary {
    pub metric: Metric,
    pub total: f64,
    pub current: f64,
    pub previous: f64,
    pub growth: GrowthResult,
}

impl MetricSummary {
    pub fn indicator(&self) -> IndicatorView {
        IndicatorView::from(self.growth)
    }
}

/// One full read of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub totals_period: Period,
    pub current_period: Period,
    pub previous_period: Period,
    pub metrics: Vec<MetricSummary>,
}

impl DashboardSnapshot {
    /// Summary for `metric`
    pub fn get(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

/// Dashboard controller owning its store
#[derive(Debug)]
pub struct Dashboard<S> {
    store: S,
    config: DashboardConfig,
}

impl<S: MetricStore> Dashboard<S> {
    pub fn new(store: S, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Summarise a single metric
    pub fn summarize(&self, metric: Metric) -> MetricSummary {
        let total = self.store.read(MetricKey::new(self.config.totals_period, metric));
        let current = self
            .store
            .read(MetricKey::new(self.config.current_period, metric));
        let previous = self
            .store
            .read(MetricKey::new(self.config.previous_period, metric));

        MetricSummary {
            metric,
            total,
            current,
            previous,
            growth: compute_growth(current, previous),
        }
    }

    /// Read every metric
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            generated_at: Utc::now(),
            totals_period: self.config.totals_period,
            current_period: self.config.current_period,
            previous_period: self.config.previous_period,
            metrics: Metric::all().iter().map(|&m| self.summarize(m)).collect(),
        }
    }

    /// Take a snapshot and draw it.
    ///
    /// Elements the renderer cannot draw are logged and skipped; a refresh
    /// always completes.
    pub fn refresh(&self, renderer: &mut dyn Renderer) -> DashboardSnapshot {
        if let Err(e) = self.store.reload() {
            tracing::warn!("Failed to reload metric store, using cached values: {}", e);
        }
        let snapshot = self.snapshot();

        for summary in &snapshot.metrics {
            let targets = DisplayTargets::for_metric(summary.metric);

            if let Err(e) = renderer.update_counter(targets.counter_id, summary.total) {
                tracing::warn!("Skipping counter for {}: {}", summary.metric, e);
            }

            let view = summary.indicator();
            if let Err(e) =
                renderer.update_indicator(targets.container_id, targets.span_id, &view)
            {
                tracing::warn!("Skipping growth indicator for {}: {}", summary.metric, e);
            }

            tracing::debug!(
                "{}: total={} current={} previous={} growth={}",
                summary.metric,
                summary.total,
                summary.current,
                summary.previous,
                summary.growth
            );
        }

        if let Err(e) = renderer.flush() {
            tracing::warn!("Failed to flush dashboard output: {}", e);
        }

        snapshot
    }
}
