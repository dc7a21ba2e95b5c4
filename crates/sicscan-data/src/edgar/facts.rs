//! XBRL company facts.
//!
//! The SEC publishes every XBRL fact a company has filed at:
//! `https://data.sec.gov/api/xbrl/companyfacts/CIK{cik_padded}.json`
//!
//! Facts are grouped by taxonomy, concept and unit. One fact is one value as disclosed in one
//! filing, so a fiscal year typically appears several times.

use crate::edgar::metric::{US_GAAP, USD};
use crate::edgar::{Cik, EdgarClient, Metric};
use crate::error::{DataError, Result};
use crate::source::ObservationSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use sicscan_growth::{FiscalPeriod, Observation};
use std::collections::HashMap;
use tracing::debug;

/// Observations of the concept that resolved a metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    /// Concept the observations were read from
    pub concept: String,
    /// USD observations that carry a fiscal year, form and filing date
    pub observations: Vec<Observation>,
}

/// Parsed company facts document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFacts {
    #[serde(default)]
    entity_name: Option<String>,
    #[serde(default)]
    facts: HashMap<String, HashMap<String, ConceptFacts>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConceptFacts {
    #[serde(default)]
    units: HashMap<String, Vec<RawFact>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFact {
    val: f64,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    accn: Option<String>,
    #[serde(default)]
    fy: Option<i32>,
    #[serde(default)]
    fp: Option<String>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    filed: Option<String>,
    #[serde(default)]
    frame: Option<String>,
}

impl RawFact {
    /// Converts to an observation. Facts without fiscal year, form or filing date are dropped.
    fn to_observation(&self) -> Option<Observation> {
        let fiscal_year = self.fy?;
        let form = self.form.as_deref()?;
        let filed = parse_date(self.filed.as_deref()?)?;
        let fiscal_period = FiscalPeriod::from(self.fp.as_deref().unwrap_or_default());

        let mut obs = Observation::new(self.val, fiscal_year, fiscal_period, form, filed);
        if let Some(end) = self.end.as_deref().and_then(parse_date) {
            obs = obs.with_period(self.start.as_deref().and_then(parse_date), end);
        }
        if let Some(accn) = &self.accn {
            obs = obs.with_accession(accn.as_str());
        }
        if let Some(frame) = &self.frame {
            obs = obs.with_frame(frame.as_str());
        }
        Some(obs)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl CompanyFacts {
    /// Parses a company facts JSON document.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DataError::Parse(format!("Failed to parse company facts: {e}")))
    }

    /// Registered entity name.
    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    /// Resolves the first candidate us-gaap concept the company reports and returns its USD
    /// observations.
    ///
    /// # Errors
    ///
    /// - `DataError::MetricNotFound` if no candidate is reported.
    /// - `DataError::UnitNotFound` if the resolved concept has no USD values.
    pub fn resolve(&self, cik: &Cik, candidates: &[&str]) -> Result<MetricSeries> {
        let found = self.facts.get(US_GAAP).and_then(|concepts| {
            candidates
                .iter()
                .find_map(|name| concepts.get(*name).map(|facts| (*name, facts)))
        });

        let Some((concept, concept_facts)) = found else {
            return Err(DataError::MetricNotFound {
                cik: cik.padded(),
                candidates: candidates.join(", "),
            });
        };

        let raw = concept_facts
            .units
            .get(USD)
            .ok_or_else(|| DataError::UnitNotFound {
                concept: concept.to_string(),
                unit: USD.to_string(),
            })?;

        let observations: Vec<Observation> =
            raw.iter().filter_map(RawFact::to_observation).collect();

        let skipped = raw.len() - observations.len();
        if skipped > 0 {
            debug!(%cik, concept, skipped, "Skipped facts without fiscal year, form or filing date");
        }

        Ok(MetricSeries {
            concept: concept.to_string(),
            observations,
        })
    }
}

/// Company facts retrieval from SEC EDGAR.
#[derive(Debug, Clone)]
pub struct EdgarFacts {
    client: EdgarClient,
}

impl EdgarFacts {
    /// Creates a company facts source on top of the client.
    pub const fn new(client: EdgarClient) -> Self {
        Self { client }
    }

    /// Fetches the company facts document of a CIK.
    ///
    /// # Errors
    ///
    /// `DataError::CompanyNotFound` if EDGAR has no facts for the CIK, transport errors, or
    /// `DataError::Parse` on a malformed document.
    pub async fn fetch_company_facts(&self, cik: &Cik) -> Result<CompanyFacts> {
        let url = format!("{}/CIK{}.json", self.client.config().facts_url, cik.padded());

        let body = self
            .client
            .get_text(&url, &[])
            .await?
            .ok_or_else(|| DataError::CompanyNotFound(cik.padded()))?;

        CompanyFacts::parse_json(&body)
    }

    /// Fetches the observations of a metric, along with the concept that resolved it.
    pub async fn fetch_metric(&self, cik: &Cik, metric: Metric) -> Result<MetricSeries> {
        self.fetch_company_facts(cik)
            .await?
            .resolve(cik, metric.candidates())
    }
}

#[async_trait]
impl ObservationSource for EdgarFacts {
    async fn fetch_observations(&self, cik: &Cik, candidates: &[&str]) -> Result<Vec<Observation>> {
        let series = self.fetch_company_facts(cik).await?.resolve(cik, candidates)?;
        debug!(
            %cik,
            concept = series.concept.as_str(),
            count = series.observations.len(),
            "Observations fetched"
        );
        Ok(series.observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTS: &str = r#"{
        "cik": 1837686,
        "entityName": "Example Corp",
        "facts": {
            "dei": {
                "EntityCommonStockSharesOutstanding": {
                    "label": "Entity Common Stock, Shares Outstanding",
                    "units": { "shares": [ { "end": "2025-07-31", "val": 1000, "fy": 2025, "fp": "Q2", "form": "10-Q", "filed": "2025-08-04" } ] }
                }
            },
            "us-gaap": {
                "Revenues": {
                    "label": "Revenues",
                    "description": null,
                    "units": {
                        "USD": [
                            { "start": "2025-04-01", "end": "2025-06-30", "val": 81503000, "accn": "0001837686-25-000093", "fy": 2025, "fp": "Q2", "form": "10-Q", "filed": "2025-08-04", "frame": "CY2025Q2" },
                            { "start": "2024-01-01", "end": "2024-12-31", "val": 300000000, "accn": "0001837686-25-000010", "fy": 2024, "fp": "FY", "form": "10-K", "filed": "2025-02-20" },
                            { "start": "2023-01-01", "end": "2023-12-31", "val": 250000000, "accn": "0001837686-25-000010", "fy": 2024, "fp": "FY", "form": "10-K", "filed": "2025-02-20" },
                            { "end": "2019-12-31", "val": 1.5, "form": "10-K", "filed": "2020-02-01" }
                        ]
                    }
                },
                "SalesRevenueNet": {
                    "units": { "USD": [ { "end": "2015-12-31", "val": 42, "fy": 2015, "fp": "FY", "form": "10-K", "filed": "2016-03-01" } ] }
                },
                "GrossProfit": {
                    "units": { "EUR": [ { "end": "2024-12-31", "val": 10, "fy": 2024, "fp": "FY", "form": "10-K", "filed": "2025-02-20" } ] }
                }
            }
        }
    }"#;

    fn cik() -> Cik {
        "1837686".parse().unwrap()
    }

    #[test]
    fn test_parse_entity_name() {
        let facts = CompanyFacts::parse_json(FACTS).unwrap();
        assert_eq!(facts.entity_name(), Some("Example Corp"));
    }

    #[test]
    fn test_first_candidate_wins() {
        let facts = CompanyFacts::parse_json(FACTS).unwrap();
        let series = facts
            .resolve(&cik(), Metric::Revenue.candidates())
            .unwrap();

        assert_eq!(series.concept, "Revenues");
        // The fact without a fiscal year is dropped
        assert_eq!(series.observations.len(), 3);
    }

    #[test]
    fn test_later_candidate_used_when_earlier_missing() {
        let facts = CompanyFacts::parse_json(FACTS).unwrap();
        let series = facts
            .resolve(&cik(), &["NotReported", "SalesRevenueNet", "Revenues"])
            .unwrap();

        assert_eq!(series.concept, "SalesRevenueNet");
        assert_eq!(series.observations[0].value, 42.0);
    }

    #[test]
    fn test_observation_fields() {
        let facts = CompanyFacts::parse_json(FACTS).unwrap();
        let series = facts.resolve(&cik(), &["Revenues"]).unwrap();
        let quarterly = &series.observations[0];

        assert_eq!(quarterly.value, 81_503_000.0);
        assert_eq!(quarterly.fiscal_year, 2025);
        assert_eq!(quarterly.fiscal_period, FiscalPeriod::Q2);
        assert_eq!(quarterly.form.as_str(), "10-Q");
        assert_eq!(quarterly.filed, NaiveDate::from_ymd_opt(2025, 8, 4).unwrap());
        assert_eq!(quarterly.period_start, NaiveDate::from_ymd_opt(2025, 4, 1));
        assert_eq!(quarterly.period_end, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert_eq!(quarterly.accession.as_deref(), Some("0001837686-25-000093"));
        assert_eq!(quarterly.frame.as_deref(), Some("CY2025Q2"));
    }

    #[test]
    fn test_metric_not_found() {
        let facts = CompanyFacts::parse_json(FACTS).unwrap();
        let result = facts.resolve(&cik(), Metric::NetIncome.candidates());
        assert!(matches!(result, Err(DataError::MetricNotFound { .. })));
    }

    #[test]
    fn test_unit_not_found() {
        let facts = CompanyFacts::parse_json(FACTS).unwrap();
        let result = facts.resolve(&cik(), Metric::GrossProfit.candidates());
        assert!(matches!(
            result,
            Err(DataError::UnitNotFound { ref concept, .. }) if concept == "GrossProfit"
        ));
    }

    #[test]
    fn test_missing_taxonomy() {
        let facts = CompanyFacts::parse_json(r#"{"cik": 1, "entityName": "Shell", "facts": {}}"#).unwrap();
        assert!(matches!(
            facts.resolve(&cik(), &["Revenues"]),
            Err(DataError::MetricNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            CompanyFacts::parse_json("<html>"),
            Err(DataError::Parse(_))
        ));
    }
}
