//! # Pulseboard
//!
//! Business dashboard analytics - all-time counters and month-over-month
//! growth indicators for earnings, bookings, customers and leads.
//!
//! ## Modules
//!
//! - [`analytics`]: growth calculation, number formatting, counter animation
//! - [`store`]: key/value metric stores and sample data
//! - [`dashboard`]: controller tying stores to renderers
//! - [`charts`]: revenue and lead-source chart summaries
//! - [`scheduler`]: periodic refresh
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use pulseboard::analytics::{compute_growth, format_with_thousands_separator};
//! use pulseboard::dashboard::{Dashboard, DashboardConfig, TerminalRenderer};
//! use pulseboard::store::{MemoryStore, SampleData};
//!
//! let growth = compute_growth(185_000.0, 165_000.0);
//! assert_eq!(growth.to_string(), "+12.12%");
//! assert_eq!(format_with_thousands_separator(2_547_890), "2,547,890");
//!
//! let store = MemoryStore::new();
//! SampleData::default().initialize(&store).unwrap();
//!
//! let dashboard = Dashboard::new(store, DashboardConfig::default());
//! let mut renderer = TerminalRenderer::new(Vec::new());
//! let snapshot = dashboard.refresh(&mut renderer);
//! assert_eq!(snapshot.metrics.len(), 4);
//! ```

pub mod analytics;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod scheduler;
pub mod store;

// Re-export top-level types for convenience
pub use analytics::{
    compute_growth, format_amount, format_with_thousands_separator, CounterAnimation,
    GrowthResult, Metric, MetricKey, MetricSample, Period,
};

pub use store::{FileStore, MemoryStore, MetricStore, SampleData, StoreError, StoreResult};

pub use dashboard::{
    Dashboard, DashboardConfig, DashboardSnapshot, IndicatorView, MetricSummary, RenderError,
    Renderer, TerminalRenderer,
};

pub use charts::{FinancialYear, LeadSources, RevenueSeries, RevenueSummary, RevenueUpdate};

pub use scheduler::{RefreshScheduler, RefreshStatus, ScheduleConfig, SchedulerError};

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
