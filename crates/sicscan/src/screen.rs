//! Directory-wide growth screening.
//!
//! A [`Screener`] harvests the companies of a state and SIC code, then fetches and evaluates each
//! one in CIK order. A company that cannot be evaluated is kept in the report without a summary;
//! only a directory failure stops the screen.

use serde::{Deserialize, Serialize};
use sicscan_data::edgar::{EdgarDirectory, EdgarFacts};
use sicscan_data::{
    Cik, DataError, Directory, DirectoryEntry, DirectorySource, EdgarClient, EdgarConfig, Metric,
    ObservationSource,
};
use sicscan_growth::{GrowthConfig, GrowthEngine, GrowthError, GrowthSummary};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use sicscan_output::{CompanyGrowth, ScreenReport};

/// Errors that can occur while screening.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Directory or observation retrieval failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Growth could not be computed from the observations.
    #[error(transparent)]
    Growth(#[from] GrowthError),
}

impl ScreenError {
    /// Returns true if EDGAR never produced a usable response.
    pub const fn is_transport(&self) -> bool {
        match self {
            Self::Data(e) => e.is_transport(),
            Self::Growth(_) => false,
        }
    }
}

/// Screening settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Metric to compute growth on
    pub metric: Metric,
    /// Annual figure selection settings
    pub growth: GrowthConfig,
}

/// Progress of a running screen, reported after each company.
#[derive(Debug, Clone, Copy)]
pub struct ScreenProgress<'a> {
    /// Companies evaluated so far, this one included
    pub completed: usize,
    /// Companies in the directory
    pub total: usize,
    /// Company just evaluated
    pub entry: &'a DirectoryEntry,
    /// Whether a growth summary was computed
    pub succeeded: bool,
}

/// Screens a directory for growth.
#[derive(Debug)]
pub struct Screener<D, O> {
    directory: D,
    observations: O,
    engine: GrowthEngine,
    metric: Metric,
}

/// Screener backed by SEC EDGAR.
pub type EdgarScreener = Screener<EdgarDirectory, EdgarFacts>;

impl EdgarScreener {
    /// Creates a screener on top of one shared EDGAR client.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Network` if the HTTP client cannot be built.
    pub fn edgar(edgar: EdgarConfig, config: ScreenConfig) -> Result<Self, DataError> {
        let client = EdgarClient::new(edgar)?;
        Ok(Self::new(
            EdgarDirectory::new(client.clone()),
            EdgarFacts::new(client),
            config,
        ))
    }
}

impl<D, O> Screener<D, O>
where
    D: DirectorySource,
    O: ObservationSource,
{
    /// Creates a screener from its sources.
    pub fn new(directory: D, observations: O, config: ScreenConfig) -> Self {
        Self {
            directory,
            observations,
            engine: GrowthEngine::with_config(config.growth),
            metric: config.metric,
        }
    }

    /// Metric the screener evaluates.
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Directory source.
    pub const fn directory_source(&self) -> &D {
        &self.directory
    }

    /// Harvests the directory, then screens every company in it.
    ///
    /// # Errors
    ///
    /// Returns the directory failure. Per-company failures are recorded in the report.
    pub async fn run<F>(
        &self,
        jurisdiction: &str,
        classification: &str,
        on_progress: F,
    ) -> Result<ScreenReport, ScreenError>
    where
        F: FnMut(ScreenProgress<'_>),
    {
        let directory = self
            .directory
            .list_companies(jurisdiction, classification)
            .await?;
        info!(
            jurisdiction,
            classification,
            companies = directory.len(),
            metric = self.metric.as_str(),
            "Screening directory"
        );

        let companies = self.screen_directory(&directory, on_progress).await;
        Ok(ScreenReport::new(
            self.metric,
            jurisdiction,
            classification,
            companies,
        ))
    }

    /// Evaluates every company of the directory in CIK order.
    ///
    /// Never fails: a company that cannot be evaluated gets no summary and the reason.
    pub async fn screen_directory<F>(
        &self,
        directory: &Directory,
        mut on_progress: F,
    ) -> Vec<CompanyGrowth>
    where
        F: FnMut(ScreenProgress<'_>),
    {
        let total = directory.len();
        let mut companies = Vec::with_capacity(total);

        for (index, entry) in directory.values().enumerate() {
            let outcome = match self.evaluate(&entry.cik).await {
                Ok(summary) => CompanyGrowth::success(entry.clone(), summary),
                Err(e) if e.is_transport() => {
                    warn!(cik = %entry.cik, error = %e, "Company request failed");
                    CompanyGrowth::failure(entry.clone(), &e)
                }
                Err(e) => {
                    debug!(
                        cik = %entry.cik,
                        name = entry.name.as_str(),
                        error = %e,
                        "Growth unavailable"
                    );
                    CompanyGrowth::failure(entry.clone(), &e)
                }
            };

            on_progress(ScreenProgress {
                completed: index + 1,
                total,
                entry,
                succeeded: outcome.has_data(),
            });
            companies.push(outcome);
        }

        let with_data = companies.iter().filter(|c| c.has_data()).count();
        info!(total, with_data, "Screen complete");
        companies
    }

    /// Fetches the observations of one company and computes its growth.
    ///
    /// # Errors
    ///
    /// `ScreenError::Data` if the observations cannot be fetched, `ScreenError::Growth` if no
    /// growth can be computed from them.
    pub async fn evaluate(&self, cik: &Cik) -> Result<GrowthSummary, ScreenError> {
        let observations = self
            .observations
            .fetch_observations(cik, self.metric.candidates())
            .await?;
        Ok(self.engine.compute(&observations)?)
    }
}
