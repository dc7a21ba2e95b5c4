//! Aggregate statistics over a screen report.

use crate::report::{ScreenReport, format_percent};
use serde::{Deserialize, Serialize};
use sicscan_data::Cik;
use std::fmt;

/// A company singled out by the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standout {
    /// Central Index Key.
    pub cik: Cik,

    /// Company name.
    pub name: String,

    /// Average year-over-year growth.
    pub average_yoy_growth: f64,
}

/// Cross-company statistics of average year-over-year growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSummary {
    /// Number of companies in the directory.
    pub total: usize,

    /// Companies with a growth summary.
    pub with_data: usize,

    /// Companies without a growth summary.
    pub without_data: usize,

    /// Mean of the average growth across companies with data.
    pub mean_average_growth: Option<f64>,

    /// Median of the average growth across companies with data.
    pub median_average_growth: Option<f64>,

    /// Company with the highest average growth.
    pub best: Option<Standout>,

    /// Company with the lowest average growth.
    pub worst: Option<Standout>,
}

impl ScreenSummary {
    /// Computes the summary of a report.
    ///
    /// # Examples
    ///
    /// ```
    /// use sicscan_output::{ScreenReport, ScreenSummary};
    /// use sicscan_data::Metric;
    ///
    /// let report = ScreenReport::new(Metric::Revenue, "NY", "7370", Vec::new());
    /// let summary = ScreenSummary::from_report(&report);
    ///
    /// assert_eq!(summary.total, 0);
    /// assert!(summary.mean_average_growth.is_none());
    /// ```
    pub fn from_report(report: &ScreenReport) -> Self {
        let mut standouts: Vec<Standout> = report
            .companies
            .iter()
            .filter_map(|c| {
                c.summary.as_ref().map(|s| Standout {
                    cik: c.entry.cik,
                    name: c.entry.name.clone(),
                    average_yoy_growth: s.average_yoy_growth,
                })
            })
            .collect();

        standouts.sort_by(|a, b| a.average_yoy_growth.total_cmp(&b.average_yoy_growth));

        let growths: Vec<f64> = standouts.iter().map(|s| s.average_yoy_growth).collect();
        let with_data = standouts.len();

        Self {
            total: report.companies.len(),
            with_data,
            without_data: report.companies.len() - with_data,
            mean_average_growth: mean(&growths),
            median_average_growth: median(&growths),
            worst: standouts.first().cloned(),
            best: standouts.pop(),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Median of values already sorted ascending.
fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

impl fmt::Display for ScreenSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Screen Summary: {} companies ({} with data, {} without)",
            self.total, self.with_data, self.without_data
        )?;
        if let Some(mean) = self.mean_average_growth {
            writeln!(f, "  Mean Ave YoY Growth: {}", format_percent(mean))?;
        }
        if let Some(median) = self.median_average_growth {
            writeln!(f, "  Median Ave YoY Growth: {}", format_percent(median))?;
        }
        if let Some(best) = &self.best {
            writeln!(
                f,
                "  Best: {} ({}) {}",
                best.name,
                best.cik,
                format_percent(best.average_yoy_growth)
            )?;
        }
        if let Some(worst) = &self.worst {
            writeln!(
                f,
                "  Worst: {} ({}) {}",
                worst.name,
                worst.cik,
                format_percent(worst.average_yoy_growth)
            )?;
        }
        Ok(())
    }
}
