//! Financial metrics and their us-gaap concept candidates.
//!
//! Filers tag the same line item with different concepts depending on the year and the
//! accounting standard they follow. Each [`Metric`] lists its candidates in order of preference.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Taxonomy the candidate concepts belong to.
pub const US_GAAP: &str = "us-gaap";

/// Currency unit observations are read in.
pub const USD: &str = "USD";

const REVENUE: &[&str] = &[
    "Revenues",
    "RevenueFromContractWithCustomerExcludingAssessedTax",
    "RevenueFromContractWithCustomerIncludingAssessedTax",
    "SalesRevenueNet",
];

const GROSS_PROFIT: &[&str] = &["GrossProfit"];

const NET_INCOME: &[&str] = &["NetIncomeLoss", "ProfitLoss"];

const OPERATING_INCOME: &[&str] = &["OperatingIncomeLoss"];

/// A financial metric that can be screened for growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Total revenue
    #[default]
    Revenue,
    /// Gross profit
    GrossProfit,
    /// Net income (loss)
    NetIncome,
    /// Operating income (loss)
    OperatingIncome,
}

impl Metric {
    /// All metrics.
    pub const ALL: [Self; 4] = [
        Self::Revenue,
        Self::GrossProfit,
        Self::NetIncome,
        Self::OperatingIncome,
    ];

    /// Candidate us-gaap concepts, most preferred first.
    pub const fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Revenue => REVENUE,
            Self::GrossProfit => GROSS_PROFIT,
            Self::NetIncome => NET_INCOME,
            Self::OperatingIncome => OPERATING_INCOME,
        }
    }

    /// Identifier used on the command line and in exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::GrossProfit => "gross-profit",
            Self::NetIncome => "net-income",
            Self::OperatingIncome => "operating-income",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::NetIncome => "Net Income",
            Self::OperatingIncome => "Operating Income",
        }
    }
}

impl FromStr for Metric {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| DataError::InvalidParameter(format!("unknown metric: {s}")))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
