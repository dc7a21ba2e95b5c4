//! SEC EDGAR data fetching and parsing.
//!
//! This module provides access to two EDGAR endpoints:
//! - the company browser, harvested into a CIK-keyed directory ([`EdgarDirectory`])
//! - XBRL company facts, read as metric observations ([`EdgarFacts`])
//!
//! # Example
//!
//! ```no_run
//! use sicscan_data::edgar::{EdgarDirectory, EdgarFacts};
//! use sicscan_data::{DirectorySource, EdgarClient, EdgarConfig, Metric};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new(EdgarConfig::default())?;
//!
//!     let directory = EdgarDirectory::new(client.clone())
//!         .list_companies("NY", "7370")
//!         .await?;
//!     println!("Found {} companies", directory.len());
//!
//!     let facts = EdgarFacts::new(client);
//!     if let Some(cik) = directory.keys().next() {
//!         let series = facts.fetch_metric(cik, Metric::Revenue).await?;
//!         println!("{}: {} observations", series.concept, series.observations.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cik;
pub mod client;
pub mod directory;
pub mod facts;
pub mod metric;

// Re-export main types
pub use cik::Cik;
pub use client::EdgarClient;
pub use directory::{DirectoryPage, EdgarDirectory, harvest_pages, parse_directory_page};
pub use facts::{CompanyFacts, EdgarFacts, MetricSeries};
pub use metric::Metric;
