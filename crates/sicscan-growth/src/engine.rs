//! Year-over-year growth engine.
//!
//! Measures top-line momentum from a company's annual reports: the relative change between
//! consecutive authoritative annual figures, averaged over every available pair.
//!
//! Pairs are formed between consecutive *entries*, not consecutive calendar years. When a fiscal
//! year is missing, the pair spanning the gap is treated like any other pair; see
//! [`YearOverYear::span_years`] to detect it.

use crate::annual::AnnualFigures;
use crate::error::{GrowthError, Result};
use crate::observation::{ANNUAL_REPORT_FORM, Observation};
use serde::{Deserialize, Serialize};

/// Configuration for the growth engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Form types accepted as annual reports (default: ["10-K"])
    pub annual_forms: Vec<String>,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            annual_forms: vec![ANNUAL_REPORT_FORM.to_string()],
        }
    }
}

/// Relative change between two consecutive annual figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    /// Fiscal year of the earlier figure.
    pub from_year: i32,
    /// Fiscal year of the later figure.
    pub to_year: i32,
    /// Earlier figure.
    pub from_value: f64,
    /// Later figure.
    pub to_value: f64,
    /// `(to_value - from_value) / from_value`, as a ratio.
    pub growth: f64,
}

impl YearOverYear {
    /// Computes the change from `prev` to `curr`.
    ///
    /// # Errors
    ///
    /// Returns [`GrowthError::DivisionUndefined`] if `prev` is zero.
    pub fn between(prev: &Observation, curr: &Observation) -> Result<Self> {
        if prev.value == 0.0 {
            return Err(GrowthError::DivisionUndefined {
                fiscal_year: prev.fiscal_year,
            });
        }

        Ok(Self {
            from_year: prev.fiscal_year,
            to_year: curr.fiscal_year,
            from_value: prev.value,
            to_value: curr.value,
            growth: (curr.value - prev.value) / prev.value,
        })
    }

    /// Number of fiscal years the pair spans. Greater than 1 when years are missing in between.
    pub const fn span_years(&self) -> i32 {
        self.to_year - self.from_year
    }
}

/// Growth statistics for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Arithmetic mean of every year-over-year growth ratio.
    pub average_yoy_growth: f64,
    /// Growth ratio between the two most recent annual figures.
    pub previous_yoy_growth: f64,
    /// Every pair, in ascending fiscal year order.
    pub pairs: Vec<YearOverYear>,
    /// Earliest fiscal year used.
    pub first_year: i32,
    /// Latest fiscal year used.
    pub last_year: i32,
}

impl GrowthSummary {
    /// Builds the summary from the pairs. Requires at least one pair.
    fn from_pairs(pairs: Vec<YearOverYear>) -> Option<Self> {
        let first = pairs.first()?;
        let last = pairs.last()?;

        let average_yoy_growth = pairs.iter().map(|p| p.growth).sum::<f64>() / pairs.len() as f64;

        Some(Self {
            average_yoy_growth,
            previous_yoy_growth: last.growth,
            first_year: first.from_year,
            last_year: last.to_year,
            pairs,
        })
    }

    /// Returns true if any pair spans more than one fiscal year.
    pub fn has_gaps(&self) -> bool {
        self.pairs.iter().any(|p| p.span_years() > 1)
    }
}

/// Computes year-over-year growth from a company's filed observations.
#[derive(Debug, Clone, Default)]
pub struct GrowthEngine {
    config: GrowthConfig,
}

impl GrowthEngine {
    /// Creates an engine accepting only "10-K" as the annual report form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom configuration.
    pub const fn with_config(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Returns true if the observation was filed on an accepted annual form.
    ///
    /// Configured forms are compared without surrounding whitespace, as form tags are.
    pub fn is_annual(&self, obs: &Observation) -> bool {
        self.config
            .annual_forms
            .iter()
            .any(|form| form.trim() == obs.form.as_str())
    }

    /// Keeps one authoritative annual figure per fiscal year.
    pub fn select_annual(&self, observations: &[Observation]) -> AnnualFigures {
        AnnualFigures::select(observations, |obs| self.is_annual(obs))
    }

    /// Computes the growth summary.
    ///
    /// # Errors
    ///
    /// - [`GrowthError::InsufficientData`] if fewer than two fiscal years have an annual figure.
    /// - [`GrowthError::DivisionUndefined`] if a figure preceding another one is zero.
    pub fn compute(&self, observations: &[Observation]) -> Result<GrowthSummary> {
        let figures = self.select_annual(observations);
        Self::summarize(&figures)
    }

    /// Computes the growth summary from already selected annual figures.
    ///
    /// # Errors
    ///
    /// Same as [`GrowthEngine::compute`].
    pub fn summarize(figures: &AnnualFigures) -> Result<GrowthSummary> {
        if figures.len() < 2 {
            return Err(GrowthError::InsufficientData {
                annual_entries: figures.len(),
            });
        }

        let ordered: Vec<&Observation> = figures.iter().map(|(_, obs)| obs).collect();
        let pairs = ordered
            .windows(2)
            .map(|w| YearOverYear::between(w[0], w[1]))
            .collect::<Result<Vec<_>>>()?;

        GrowthSummary::from_pairs(pairs).ok_or(GrowthError::InsufficientData {
            annual_entries: figures.len(),
        })
    }
}

/// Computes the growth summary with the default configuration.
///
/// # Errors
///
/// See [`GrowthEngine::compute`].
pub fn compute_growth(observations: &[Observation]) -> Result<GrowthSummary> {
    GrowthEngine::new().compute(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::FiscalPeriod;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn annual(value: f64, year: i32) -> Observation {
        let filed = NaiveDate::from_ymd_opt(year + 1, 2, 15).unwrap();
        Observation::new(value, year, FiscalPeriod::FY, "10-K", filed)
    }

    #[test]
    fn test_config_defaults() {
        let config = GrowthConfig::default();
        assert_eq!(config.annual_forms, vec!["10-K".to_string()]);
    }

    #[test]
    fn test_custom_config_accepts_amendments() {
        let engine = GrowthEngine::with_config(GrowthConfig {
            annual_forms: vec!["10-K".to_string(), "10-K/A".to_string()],
        });
        let filed = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let amendment = Observation::new(1.0, 2023, FiscalPeriod::FY, "10-K/A", filed);

        assert!(engine.is_annual(&amendment));
        assert!(!GrowthEngine::new().is_annual(&amendment));
        assert_eq!(engine.config().annual_forms.len(), 2);
    }

    #[test]
    fn test_configured_forms_ignore_surrounding_whitespace() {
        let engine = GrowthEngine::with_config(GrowthConfig {
            annual_forms: vec![" 10-K".to_string(), "20-F ".to_string()],
        });
        let filed = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert!(engine.is_annual(&annual(1.0, 2023)));
        assert!(engine.is_annual(&Observation::new(1.0, 2023, FiscalPeriod::FY, "20-F", filed)));
        assert!(!engine.is_annual(&Observation::new(1.0, 2023, FiscalPeriod::FY, "10-Q", filed)));
    }

    #[test]
    fn test_two_years() {
        let summary = compute_growth(&[annual(200.0, 2022), annual(250.0, 2023)]).unwrap();

        assert_relative_eq!(summary.previous_yoy_growth, 0.25);
        assert_relative_eq!(summary.average_yoy_growth, 0.25);
        assert_eq!(summary.pairs.len(), 1);
        assert_eq!(summary.first_year, 2022);
        assert_eq!(summary.last_year, 2023);
        assert!(!summary.has_gaps());
    }

    #[test]
    fn test_negative_prior_year_is_divided_as_is() {
        let summary = compute_growth(&[annual(-50.0, 2022), annual(25.0, 2023)]).unwrap();

        // (25 - -50) / -50
        assert_relative_eq!(summary.previous_yoy_growth, -1.5);
    }

    #[test]
    fn test_zero_current_value_is_valid() {
        let summary = compute_growth(&[annual(40.0, 2022), annual(0.0, 2023)]).unwrap();
        assert_relative_eq!(summary.previous_yoy_growth, -1.0);
    }

    #[test]
    fn test_zero_in_middle_fails() {
        let result = compute_growth(&[annual(10.0, 2021), annual(0.0, 2022), annual(5.0, 2023)]);
        assert_eq!(
            result,
            Err(GrowthError::DivisionUndefined { fiscal_year: 2022 })
        );
    }

    #[test]
    fn test_large_magnitudes() {
        let summary = compute_growth(&[annual(2.5e12, 2022), annual(2.75e12, 2023)]).unwrap();
        assert_relative_eq!(summary.previous_yoy_growth, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_year_over_year_span() {
        let pair = YearOverYear::between(&annual(100.0, 2020), &annual(110.0, 2023)).unwrap();
        assert_eq!(pair.span_years(), 3);
        assert_relative_eq!(pair.growth, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_summarize_single_figure() {
        let obs = [annual(100.0, 2023)];
        let figures = GrowthEngine::new().select_annual(&obs);
        assert_eq!(
            GrowthEngine::summarize(&figures),
            Err(GrowthError::InsufficientData { annual_entries: 1 })
        );
    }
}
