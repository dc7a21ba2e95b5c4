//! Source traits for directory harvesting and observation retrieval.
//!
//! - [`DirectorySource`] - companies registered under a jurisdiction and classification
//! - [`ObservationSource`] - filed observations of a metric for one company

use crate::edgar::Cik;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sicscan_growth::Observation;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// One company listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Central Index Key
    pub cik: Cik,
    /// Registered company name
    pub name: String,
    /// State or country of registration, when listed
    pub location: Option<String>,
}

impl DirectoryEntry {
    /// Creates an entry.
    pub fn new(cik: Cik, name: impl Into<String>, location: Option<String>) -> Self {
        Self {
            cik,
            name: name.into(),
            location,
        }
    }
}

/// Directory of companies keyed by CIK, in ascending CIK order.
pub type Directory = BTreeMap<Cik, DirectoryEntry>;

/// Lists the companies of a jurisdiction and classification.
#[async_trait]
pub trait DirectorySource: Send + Sync + Debug {
    /// Returns every company registered under `jurisdiction` (state code, e.g. "NY") with
    /// `classification` (SIC code, e.g. "7370").
    ///
    /// A jurisdiction or classification with no companies yields an empty directory.
    async fn list_companies(&self, jurisdiction: &str, classification: &str) -> Result<Directory>;
}

/// Retrieves filed observations of a metric.
#[async_trait]
pub trait ObservationSource: Send + Sync + Debug {
    /// Returns the observations of the first concept in `candidates` the company reports.
    ///
    /// Candidates are tried in order; later candidates are ignored once one is found.
    async fn fetch_observations(&self, cik: &Cik, candidates: &[&str]) -> Result<Vec<Observation>>;
}
