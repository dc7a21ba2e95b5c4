#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sicscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod annual;
pub mod engine;
pub mod error;
pub mod observation;

pub use annual::AnnualFigures;
pub use engine::{GrowthConfig, GrowthEngine, GrowthSummary, YearOverYear, compute_growth};
pub use error::{GrowthError, Result};
pub use observation::{ANNUAL_REPORT_FORM, FiscalPeriod, FormType, Observation};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
