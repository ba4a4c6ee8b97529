//! Refresh Scheduler
//!
//! Re-runs the dashboard pipeline at a fixed interval. Stopping only
//! prevents further runs; a refresh already in progress always finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Configuration for periodic refresh
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Seconds between refreshes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Refresh once as soon as the scheduler starts
    #[serde(default = "default_run_immediately")]
    pub run_immediately: bool,
}

fn default_interval_secs() -> u64 {
    300 // 5 minutes
}

fn default_run_immediately() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            run_immediately: default_run_immediately(),
        }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Current state of the scheduler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshStatus {
    pub running: bool,
    pub runs: u64,
    pub last_run: Option<DateTime<Utc>>,
    pub next_run: Option<DateTime<Utc>>,
}

/// Scheduler errors
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Refresh interval must be greater than zero")]
    InvalidInterval,

    #[error("Scheduler is already running")]
    AlreadyRunning,
}

/// Runs a refresh task on a fixed interval
pub struct RefreshScheduler {
    config: ScheduleConfig,
    status: Arc<RwLock<RefreshStatus>>,
    /// Bumped on every start; a loop from an older start exits on its next tick
    generation: AtomicU64,
}

impl RefreshScheduler {
    /// Create a new scheduler
    pub fn new(config: ScheduleConfig) -> Result<Self, SchedulerError> {
        if config.interval_secs == 0 {
            return Err(SchedulerError::InvalidInterval);
        }
        Ok(Self {
            config,
            status: Arc::new(RwLock::new(RefreshStatus::default())),
            generation: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Snapshot of the current status
    pub async fn status(&self) -> RefreshStatus {
        self.status.read().await.clone()
    }

    /// Whether the scheduler will run again
    pub async fn is_running(&self) -> bool {
        self.status.read().await.running
    }

    /// Start the scheduler background task
    pub async fn start<F>(
        self: Arc<Self>,
        mut task: F,
    ) -> Result<tokio::task::JoinHandle<()>, SchedulerError>
    where
        F: FnMut() + Send + 'static,
    {
        let run = {
            let mut status = self.status.write().await;
            if status.running {
                return Err(SchedulerError::AlreadyRunning);
            }
            status.running = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        tracing::info!(
            "Starting refresh scheduler (every {}s)",
            self.config.interval_secs
        );

        let scheduler = self.clone();
        Ok(tokio::spawn(async move {
            let period = scheduler.config.interval();
            let mut interval = tokio::time::interval(period);

            // The first tick completes immediately.
            if !scheduler.config.run_immediately {
                interval.tick().await;
            }

            loop {
                interval.tick().await;

                if !scheduler.is_current(run).await {
                    break;
                }

                task();

                let mut status = scheduler.status.write().await;
                let now = Utc::now();
                status.runs += 1;
                status.last_run = Some(now);
                status.next_run = chrono::Duration::from_std(period).ok().map(|d| now + d);
                tracing::debug!("Refresh #{} complete", status.runs);
            }

            tracing::info!("Refresh scheduler stopped");
        }))
    }

    async fn is_current(&self, run: u64) -> bool {
        let status = self.status.read().await;
        status.running && self.generation.load(Ordering::SeqCst) == run
    }

    /// Stop the scheduler; no further refreshes are started
    pub async fn stop(&self) {
        let mut status = self.status.write().await;
        status.running = false;
        status.next_run = None;
    }
}
