#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sicscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod edgar;
pub mod error;
pub mod source;

pub use config::EdgarConfig;
pub use edgar::{Cik, EdgarClient, Metric};
pub use error::{DataError, Result};
pub use source::{Directory, DirectoryEntry, DirectorySource, ObservationSource};

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
