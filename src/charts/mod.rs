//! Chart data summaries
//!
//! Only the numbers behind the charts live here; drawing them is up to the
//! front end.

pub mod lead_source;
pub mod revenue;

pub use lead_source::{LeadSourceUpdate, LeadSources, SourceShare};
pub use revenue::{
    FinancialYear, MonthEntry, RevenueSeries, RevenueSummary, RevenueUpdate, FY_MONTHS,
};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Chart data errors
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid chart data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{date} is outside {year}")]
    OutsideYear { date: NaiveDate, year: String },
}

pub type ChartResult<T> = Result<T, ChartError>;

/// Read a chart update from a JSON file
pub fn load_update<T: DeserializeOwned>(path: &Path) -> ChartResult<T> {
    let content = std::fs::read_to_string(path)?;
    let update = serde_json::from_str(&content)?;
    tracing::debug!("Loaded chart data from {:?}", path);
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_update_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sources.json");
        std::fs::write(&path, r#"{"labels": ["Direct"], "values": [3]}"#).unwrap();

        let update: LeadSourceUpdate = load_update(&path).unwrap();
        assert_eq!(update.values, Some(vec![3.0]));
    }

    #[test]
    fn test_load_update_errors() {
        let dir = tempdir().unwrap();
        let missing = load_update::<RevenueUpdate>(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(ChartError::Io(_))));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"bookings": [1, 2]}"#).unwrap();
        let bad = load_update::<RevenueUpdate>(&path);
        assert!(matches!(bad, Err(ChartError::Parse(_))));
    }
}
