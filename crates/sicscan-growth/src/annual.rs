//! Authoritative annual figure selection.
//!
//! Company facts carry every disclosure of a metric: quarterly reports, the annual report, its
//! amendments, and the comparative columns of later reports. [`AnnualFigures`] keeps exactly one
//! observation per fiscal year, taken from annual report filings only.

use crate::observation::Observation;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// One authoritative observation per fiscal year, ordered by fiscal year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnualFigures {
    by_year: BTreeMap<i32, Observation>,
}

impl AnnualFigures {
    /// Selects the authoritative figure of each fiscal year.
    ///
    /// Only observations accepted by `is_annual` are considered. Within a fiscal year the latest
    /// filing wins. When two filings share the filing date, the one whose reported period ends
    /// later wins, then the greater accession number, then the greater value. The result does not
    /// depend on the order of `observations`.
    pub fn select<'a, I, F>(observations: I, is_annual: F) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
        F: Fn(&Observation) -> bool,
    {
        let mut by_year: BTreeMap<i32, Observation> = BTreeMap::new();

        for obs in observations.into_iter().filter(|o| is_annual(*o)) {
            match by_year.entry(obs.fiscal_year) {
                Entry::Vacant(slot) => {
                    slot.insert(obs.clone());
                }
                Entry::Occupied(mut slot) => {
                    if supersedes(obs, slot.get()) {
                        slot.insert(obs.clone());
                    }
                }
            }
        }

        Self { by_year }
    }

    /// Number of fiscal years with a figure.
    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    /// Returns true if no fiscal year has a figure.
    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }

    /// Returns the figure for a fiscal year.
    pub fn get(&self, fiscal_year: i32) -> Option<&Observation> {
        self.by_year.get(&fiscal_year)
    }

    /// Figures in ascending fiscal year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Observation)> + '_ {
        self.by_year.iter().map(|(year, obs)| (*year, obs))
    }
}

/// Returns true if `candidate` should replace `current` as the figure of their fiscal year.
fn supersedes(candidate: &Observation, current: &Observation) -> bool {
    candidate
        .filed
        .cmp(&current.filed)
        .then_with(|| candidate.period_end.cmp(&current.period_end))
        .then_with(|| candidate.accession.cmp(&current.accession))
        .then_with(|| candidate.value.total_cmp(&current.value))
        == Ordering::Greater
}
