//! Error types for growth computation.

use thiserror::Error;

/// Result type for growth computation.
pub type Result<T> = std::result::Result<T, GrowthError>;

/// Reasons a growth summary cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// Fewer than two authoritative annual figures remain after selection.
    #[error("Insufficient data: {annual_entries} annual figure(s), at least 2 required")]
    InsufficientData {
        /// Number of annual figures that were available
        annual_entries: usize,
    },

    /// A prior-year figure of zero makes the relative change undefined.
    #[error("Growth undefined: fiscal year {fiscal_year} has a value of zero")]
    DivisionUndefined {
        /// Fiscal year of the zero-valued figure
        fiscal_year: i32,
    },
}
