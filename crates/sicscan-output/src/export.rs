//! Export functionality for screening results.
//!
//! CSV output is flattened to one row per company (or per directory entry, or per
//! year-over-year pair); JSON output keeps the full structure.

use crate::report::{CompanyGrowth, ScreenReport};
use serde::Serialize;
use sicscan_data::Directory;
use sicscan_growth::GrowthSummary;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// One CSV row per company.
#[derive(Debug, Serialize)]
struct CompanyRow<'a> {
    cik: String,
    name: &'a str,
    location: Option<&'a str>,
    average_yoy_growth: Option<f64>,
    previous_yoy_growth: Option<f64>,
    first_year: Option<i32>,
    last_year: Option<i32>,
    error: Option<&'a str>,
}

impl<'a> From<&'a CompanyGrowth> for CompanyRow<'a> {
    fn from(company: &'a CompanyGrowth) -> Self {
        let summary = company.summary.as_ref();
        Self {
            cik: company.entry.cik.padded(),
            name: &company.entry.name,
            location: company.entry.location.as_deref(),
            average_yoy_growth: summary.map(|s| s.average_yoy_growth),
            previous_yoy_growth: summary.map(|s| s.previous_yoy_growth),
            first_year: summary.map(|s| s.first_year),
            last_year: summary.map(|s| s.last_year),
            error: company.failure.as_deref(),
        }
    }
}

/// Writes every record as a CSV row, header included.
fn to_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, ExportError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

impl Exporter for ScreenReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self.companies.iter().map(CompanyRow::from)),
            ExportFormat::Json => to_json(self, false),
            ExportFormat::PrettyJson => to_json(self, true),
        }
    }
}

impl Exporter for Directory {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(self.values()),
            ExportFormat::Json => to_json(&self.values().collect::<Vec<_>>(), false),
            ExportFormat::PrettyJson => to_json(&self.values().collect::<Vec<_>>(), true),
        }
    }
}

impl Exporter for GrowthSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => to_csv(&self.pairs),
            ExportFormat::Json => to_json(self, false),
            ExportFormat::PrettyJson => to_json(self, true),
        }
    }
}
