#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sicscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod screen;

// Re-export main types from sub-crates
pub use sicscan_data as data;
pub use sicscan_growth as growth;
pub use sicscan_output as output;

pub use screen::{
    CompanyGrowth, EdgarScreener, ScreenConfig, ScreenError, ScreenProgress, ScreenReport,
    Screener,
};
pub use sicscan_data::{Cik, EdgarConfig, Metric};
pub use sicscan_growth::{GrowthConfig, GrowthSummary};
pub use sicscan_output::TextReport;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
