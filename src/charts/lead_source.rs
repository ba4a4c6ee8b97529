//! Lead-source breakdown for the donut chart

use crate::analytics::round2;
use serde::{Deserialize, Serialize};

/// Lead counts per acquisition channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadSources {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One slice of the breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceShare {
    pub label: String,
    pub value: f64,
    pub percent: f64,
}

/// Partial replacement for [`LeadSources`]; absent fields are kept
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeadSourceUpdate {
    pub labels: Option<Vec<String>>,
    pub values: Option<Vec<f64>>,
}

impl LeadSources {
    /// Pair labels with values; extra entries on either side are dropped
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>, values: Vec<f64>) -> Self {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut values = values;
        let len = labels.len().min(values.len());
        labels.truncate(len);
        values.truncate(len);
        Self { labels, values }
    }

    /// Demonstration figures
    pub fn sample() -> Self {
        Self::new(
            ["Direct", "Social Media", "Email", "Referrals", "Website"],
            vec![44.0, 55.0, 41.0, 17.0, 15.0],
        )
    }

    /// Replace labels and/or values; lengths are re-paired afterwards
    pub fn apply(&mut self, update: LeadSourceUpdate) {
        let labels = update.labels.unwrap_or_else(|| std::mem::take(&mut self.labels));
        let values = update.values.unwrap_or_else(|| std::mem::take(&mut self.values));
        *self = Self::new(labels, values);
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Each source's percentage of the total, two decimals.
    /// All shares are zero when there are no leads.
    pub fn shares(&self) -> Vec<SourceShare> {
        let total = self.total();
        self.labels
            .iter()
            .zip(&self.values)
            .map(|(label, &value)| SourceShare {
                label: label.clone(),
                value,
                percent: if total > 0.0 {
                    round2(value / total * 100.0)
                } else {
                    0.0
                },
            })
            .collect()
    }
}
