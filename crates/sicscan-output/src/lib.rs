#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sicscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{
    CompanyGrowth, ScreenReport, TextReport, format_percent, render_directory, render_growth_detail,
};
pub use summary::{ScreenSummary, Standout};
