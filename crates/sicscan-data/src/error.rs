//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// No company facts exist for the CIK
    #[error("Company not found: CIK {0}")]
    CompanyNotFound(String),

    /// None of the candidate concepts is reported by the company
    #[error("Metric not found for CIK {cik}: none of [{candidates}] is reported")]
    MetricNotFound {
        /// CIK that was queried
        cik: String,
        /// Comma-separated candidate concepts
        candidates: String,
    },

    /// The concept is reported, but not in the requested unit
    #[error("Unit {unit} not found for concept {concept}")]
    UnitNotFound {
        /// Concept that was found
        concept: String,
        /// Unit that was requested
        unit: String,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Invalid CIK
    #[error("Invalid CIK: {0}")]
    InvalidCik(String),

    /// Invalid request parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl DataError {
    /// Returns true if the request never produced a usable response.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(DataError::Http("HTTP 503".to_string()).is_transport());
        assert!(!DataError::Parse("bad json".to_string()).is_transport());
        assert!(!DataError::CompanyNotFound("0000000001".to_string()).is_transport());
        assert!(!DataError::InvalidCik("abc".to_string()).is_transport());
    }

    #[test]
    fn test_metric_not_found_message() {
        let err = DataError::MetricNotFound {
            cik: "0001652044".to_string(),
            candidates: "Revenues, SalesRevenueNet".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Metric not found for CIK 0001652044: none of [Revenues, SalesRevenueNet] is reported"
        );
    }
}
