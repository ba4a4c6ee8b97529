//! Financial-year revenue series
//!
//! Monthly bookings, sales, leads and booked leads over an April-March
//! financial year, plus the summary cards shown next to the chart.
//! A [`RevenueUpdate`] merges new figures into an existing series.

use super::{ChartError, ChartResult};
use crate::analytics::round2;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month labels in financial-year order
pub const FY_MONTHS: [&str; 12] = [
    "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb", "Mar",
];

/// Financial year running from April of `start_year` to March of the next
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FinancialYear {
    pub start_year: i32,
}

impl FinancialYear {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Financial year containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// First day of the year (1 April)
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, 4, 1)
    }

    /// Last day of the year (31 March)
    pub fn end(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31)
    }

    /// Index into [`FY_MONTHS`] of a calendar month (1-12)
    pub fn month_index(month: u32) -> Option<usize> {
        match month {
            4..=12 => Some((month - 4) as usize),
            1..=3 => Some((month + 8) as usize),
            _ => None,
        }
    }

    pub fn months(&self) -> &'static [&'static str; 12] {
        &FY_MONTHS
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY {}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}

/// Monthly values for one financial year.
///
/// Sales are in thousands of currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueSeries {
    pub year: FinancialYear,
    pub bookings: [f64; 12],
    pub sales: [f64; 12],
    pub leads: [f64; 12],
    pub booked_leads: [f64; 12],
}

/// Totals shown in the cards beside the revenue chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RevenueSummary {
    pub total_bookings: f64,
    pub total_sales: f64,
    pub total_leads: f64,
    /// Booked leads as a percentage of all leads
    pub conversion_rate: f64,
}

impl RevenueSeries {
    /// Empty series for `year`
    pub fn empty(year: FinancialYear) -> Self {
        Self {
            year,
            bookings: [0.0; 12],
            sales: [0.0; 12],
            leads: [0.0; 12],
            booked_leads: [0.0; 12],
        }
    }

    /// Demonstration figures for FY 2025-26
    pub fn sample() -> Self {
        Self {
            year: FinancialYear::new(2025),
            bookings: [34., 65., 46., 68., 49., 61., 42., 44., 78., 52., 63., 67.],
            sales: [
                22.89, 35.50, 28.75, 42.30, 31.20, 38.90, 25.60, 27.80, 45.20, 33.40, 39.80, 41.50,
            ],
            leads: [15., 12., 7., 9., 18., 14., 22., 19., 5., 25., 11., 16.],
            booked_leads: [8., 10., 5., 7., 12., 10., 15., 13., 4., 18., 8., 12.],
        }
    }

    pub fn summary(&self) -> RevenueSummary {
        let total_bookings: f64 = self.bookings.iter().sum();
        let total_sales: f64 = self.sales.iter().sum();
        let total_leads: f64 = self.leads.iter().sum();
        let total_booked: f64 = self.booked_leads.iter().sum();

        let conversion_rate = if total_leads > 0.0 {
            round2(total_booked / total_leads * 100.0)
        } else {
            0.0
        };

        RevenueSummary {
            total_bookings,
            total_sales: round2(total_sales),
            total_leads,
            conversion_rate,
        }
    }

    /// Merge `update` into this series.
    ///
    /// Moving to another year starts from an empty series, so figures from
    /// the old year never leak into the new one. Whole-year arrays are
    /// applied before single-month entries.
    pub fn apply(&mut self, update: RevenueUpdate) -> ChartResult<()> {
        if let Some(year) = update.year {
            if year != self.year {
                *self = Self::empty(year);
            }
        }

        for (target, values) in [
            (&mut self.bookings, update.bookings),
            (&mut self.sales, update.sales),
            (&mut self.leads, update.leads),
            (&mut self.booked_leads, update.booked_leads),
        ] {
            if let Some(values) = values {
                *target = values;
            }
        }

        for entry in update.months {
            if FinancialYear::containing(entry.date) != self.year {
                return Err(ChartError::OutsideYear {
                    date: entry.date,
                    year: self.year.to_string(),
                });
            }
            let Some(i) = FinancialYear::month_index(entry.date.month()) else {
                continue;
            };
            for (target, value) in [
                (&mut self.bookings[i], entry.bookings),
                (&mut self.sales[i], entry.sales),
                (&mut self.leads[i], entry.leads),
                (&mut self.booked_leads[i], entry.booked_leads),
            ] {
                if let Some(value) = value {
                    *target = value;
                }
            }
        }

        Ok(())
    }
}

/// Partial replacement for a [`RevenueSeries`]; absent fields are kept
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevenueUpdate {
    pub year: Option<FinancialYear>,
    pub bookings: Option<[f64; 12]>,
    pub sales: Option<[f64; 12]>,
    pub leads: Option<[f64; 12]>,
    pub booked_leads: Option<[f64; 12]>,
    pub months: Vec<MonthEntry>,
}

/// Figures for the month containing `date`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub bookings: Option<f64>,
    #[serde(default)]
    pub sales: Option<f64>,
    #[serde(default)]
    pub leads: Option<f64>,
    #[serde(default)]
    pub booked_leads: Option<f64>,
}
