//! Filed observations of a financial metric.
//!
//! An [`Observation`] is one value of one metric as disclosed in one filing. A single fiscal year
//! usually appears many times: the original annual report, later amendments, and the comparative
//! columns of the following years' reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form type of the full-year annual report.
pub const ANNUAL_REPORT_FORM: &str = "10-K";

/// Sub-period of the fiscal year an observation is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiscalPeriod {
    /// First quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Fourth quarter.
    Q4,
    /// Full fiscal year.
    FY,
    /// First half.
    H1,
    /// Second half.
    H2,
    /// Any other period code reported by the filer.
    Other(String),
}

impl FiscalPeriod {
    /// Returns the period code as reported in company facts (e.g. "Q2", "FY").
    pub fn as_str(&self) -> &str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::FY => "FY",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::Other(code) => code,
        }
    }
}

impl FromStr for FiscalPeriod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let period = match s.trim().to_uppercase().as_str() {
            "Q1" => Self::Q1,
            "Q2" => Self::Q2,
            "Q3" => Self::Q3,
            "Q4" => Self::Q4,
            "FY" => Self::FY,
            "H1" => Self::H1,
            "H2" => Self::H2,
            _ => Self::Other(s.trim().to_string()),
        };
        Ok(period)
    }
}

impl From<&str> for FiscalPeriod {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(period) => period,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filing form type tag, e.g. "10-K", "10-Q", "10-K/A".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormType(String);

impl FormType {
    /// Creates a form type from its tag. Surrounding whitespace is dropped.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_string())
    }

    /// Returns the tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the annual report tag ([`ANNUAL_REPORT_FORM`]).
    pub fn is_annual_report(&self) -> bool {
        self.0 == ANNUAL_REPORT_FORM
    }
}

impl From<&str> for FormType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for FormType {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One filed disclosure of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Reported value in the source currency unit.
    pub value: f64,

    /// Fiscal year the observation is attributed to.
    pub fiscal_year: i32,

    /// Fiscal sub-period. Informational only.
    pub fiscal_period: FiscalPeriod,

    /// Form type of the filing that carried the value.
    pub form: FormType,

    /// Date the filing was submitted.
    pub filed: NaiveDate,

    /// Start of the reported period, if known.
    pub period_start: Option<NaiveDate>,

    /// End of the reported period, if known.
    pub period_end: Option<NaiveDate>,

    /// Accession number of the filing, if known.
    pub accession: Option<String>,

    /// Calendar frame assigned by the source (e.g. "CY2023"), if any.
    pub frame: Option<String>,
}

impl Observation {
    /// Creates an observation with the required fields only.
    pub fn new(
        value: f64,
        fiscal_year: i32,
        fiscal_period: FiscalPeriod,
        form: impl Into<FormType>,
        filed: NaiveDate,
    ) -> Self {
        Self {
            value,
            fiscal_year,
            fiscal_period,
            form: form.into(),
            filed,
            period_start: None,
            period_end: None,
            accession: None,
            frame: None,
        }
    }

    /// Sets the reported period.
    #[must_use]
    pub const fn with_period(mut self, start: Option<NaiveDate>, end: NaiveDate) -> Self {
        self.period_start = start;
        self.period_end = Some(end);
        self
    }

    /// Sets the accession number.
    #[must_use]
    pub fn with_accession(mut self, accession: impl Into<String>) -> Self {
        self.accession = Some(accession.into());
        self
    }

    /// Sets the calendar frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }
}
