//! Screening results and their console rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sicscan_data::{Directory, DirectoryEntry, Metric};
use sicscan_growth::GrowthSummary;
use std::fmt;

/// Width of the separator lines in text output.
const SEPARATOR_WIDTH: usize = 30;

/// Growth outcome of one directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyGrowth {
    /// Company as listed in the directory.
    pub entry: DirectoryEntry,

    /// Growth summary, absent when it could not be computed.
    pub summary: Option<GrowthSummary>,

    /// Why the summary is absent.
    pub failure: Option<String>,
}

impl CompanyGrowth {
    /// Creates a successful outcome.
    pub const fn success(entry: DirectoryEntry, summary: GrowthSummary) -> Self {
        Self {
            entry,
            summary: Some(summary),
            failure: None,
        }
    }

    /// Creates a failed outcome.
    pub fn failure(entry: DirectoryEntry, reason: impl fmt::Display) -> Self {
        Self {
            entry,
            summary: None,
            failure: Some(reason.to_string()),
        }
    }

    /// Returns true if a growth summary is available.
    pub const fn has_data(&self) -> bool {
        self.summary.is_some()
    }
}

/// Result of screening one jurisdiction and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Metric the growth was computed on.
    pub metric: Metric,

    /// State code that was screened.
    pub jurisdiction: String,

    /// SIC code that was screened.
    pub classification: String,

    /// When the report was produced.
    pub generated: DateTime<Utc>,

    /// One outcome per directory entry, in CIK order.
    pub companies: Vec<CompanyGrowth>,
}

impl ScreenReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        metric: Metric,
        jurisdiction: impl Into<String>,
        classification: impl Into<String>,
        companies: Vec<CompanyGrowth>,
    ) -> Self {
        Self {
            metric,
            jurisdiction: jurisdiction.into(),
            classification: classification.into(),
            generated: Utc::now(),
            companies,
        }
    }

    /// Companies to present: all of them, or only those with a growth summary.
    pub fn visible(&self, include_missing: bool) -> impl Iterator<Item = &CompanyGrowth> + '_ {
        self.companies
            .iter()
            .filter(move |c| include_missing || c.has_data())
    }

    /// Number of companies with a growth summary.
    pub fn with_data(&self) -> usize {
        self.companies.iter().filter(|c| c.has_data()).count()
    }
}

/// Formats a growth ratio as a percentage with two decimals.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Console rendering of a screen report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport {
    include_missing: bool,
}

impl TextReport {
    /// Creates a renderer. Companies without data are listed only if `include_missing` is set.
    pub const fn new(include_missing: bool) -> Self {
        Self { include_missing }
    }

    /// Renders the report as plain text.
    ///
    /// # Examples
    ///
    /// ```
    /// use sicscan_output::{ScreenReport, TextReport};
    /// use sicscan_data::Metric;
    ///
    /// let report = ScreenReport::new(Metric::Revenue, "NY", "7370", Vec::new());
    /// assert_eq!(TextReport::new(true).render(&report), "No company data found\n");
    /// ```
    pub fn render(&self, report: &ScreenReport) -> String {
        if report.companies.is_empty() {
            return "No company data found\n".to_string();
        }

        let separator = "-".repeat(SEPARATOR_WIDTH);
        let mut output = String::new();

        output.push_str(&format!("Found {} companies:\n", report.companies.len()));
        output.push_str(&separator);
        output.push('\n');

        for company in report.visible(self.include_missing) {
            output.push_str(&format!("Company Name: {}\n", company.entry.name));
            output.push_str(&format!("CIK: {}\n", company.entry.cik));
            match &company.summary {
                Some(summary) => {
                    output.push_str(&format!(
                        "Ave YoY Growth: {}\n",
                        format_percent(summary.average_yoy_growth)
                    ));
                    output.push_str(&format!(
                        "Prev YoY Growth: {}\n",
                        format_percent(summary.previous_yoy_growth)
                    ));
                }
                None => output.push_str("ERROR retrieving company data\n"),
            }
            output.push_str(&separator);
            output.push('\n');
        }

        output
    }

    /// Renders the report as an aligned table, one row per company.
    pub fn to_ascii_table(&self, report: &ScreenReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} Growth Screen: State {} / SIC {}\n",
            report.metric, report.jurisdiction, report.classification
        ));
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output.push_str(&format!(
            "{:<12} {:<36} {:>14} {:>14}\n",
            "CIK", "Company", "Ave YoY", "Prev YoY"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for company in report.visible(self.include_missing) {
            let name: String = company.entry.name.chars().take(36).collect();
            match &company.summary {
                Some(summary) => output.push_str(&format!(
                    "{:<12} {:<36} {:>14} {:>14}\n",
                    company.entry.cik.to_string(),
                    name,
                    format_percent(summary.average_yoy_growth),
                    format_percent(summary.previous_yoy_growth)
                )),
                None => output.push_str(&format!(
                    "{:<12} {:<36} {:>14} {:>14}\n",
                    company.entry.cik.to_string(),
                    name,
                    "n/a",
                    "n/a"
                )),
            }
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{} of {} companies with growth data\n",
            report.with_data(),
            report.companies.len()
        ));

        output
    }
}

/// Renders the per-year detail of one company's growth summary.
pub fn render_growth_detail(title: &str, summary: &GrowthSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{title}\n"));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{:<6} {:<6} {:>18} {:>18} {:>8}\n",
        "From", "To", "From Value", "To Value", "Growth"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for pair in &summary.pairs {
        let gap = if pair.span_years() > 1 { " *" } else { "" };
        output.push_str(&format!(
            "{:<6} {:<6} {:>18.0} {:>18.0} {:>8}{gap}\n",
            pair.from_year,
            pair.to_year,
            pair.from_value,
            pair.to_value,
            format_percent(pair.growth)
        ));
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Ave YoY Growth: {}\n",
        format_percent(summary.average_yoy_growth)
    ));
    output.push_str(&format!(
        "Prev YoY Growth: {}\n",
        format_percent(summary.previous_yoy_growth)
    ));
    if summary.has_gaps() {
        output.push_str("* pair spans missing fiscal years\n");
    }

    output
}

/// Renders a harvested directory, one block per company in CIK order.
pub fn render_directory(directory: &Directory) -> String {
    if directory.is_empty() {
        return "No company data found\n".to_string();
    }

    let mut output = format!("Found {} companies:\n", directory.len());
    for entry in directory.values() {
        output.push_str(&format!("  Company Name: {}\n", entry.name));
        output.push_str(&format!("  CIK: {}\n", entry.cik));
        if let Some(location) = &entry.location {
            output.push_str(&format!("  Location: {location}\n"));
        }
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');
    }
    output
}
