//! Typed per-item outcomes aggregated into a per-run report.
//!
//! The continue-on-item-failure / abort-on-global-failure policy is carried
//! by these types instead of blanket catches: anything fatal aborts the run
//! before the item loop, and everything inside the loop lands here.

use crate::sheets::CellAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Cell written.
    Updated { address: CellAddress, value: String },
    /// Row belongs to another team; deliberately skipped, not logged.
    OwnerMismatch { owner: String },
    /// No sheet row matched the line-item name.
    RowNotFound,
    /// The store had no record for this item on the reporting date.
    NoData,
    /// Reading the live Owner cell failed.
    OwnerReadFailed { error: String },
    /// The single-cell update failed.
    WriteFailed { error: String },
}

#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<(String, ItemOutcome)>,
}

impl RunReport {
    pub fn record(&mut self, item: &str, outcome: ItemOutcome) {
        self.outcomes.push((item.to_string(), outcome));
    }

    pub fn outcomes(&self) -> &[(String, ItemOutcome)] {
        &self.outcomes
    }

    pub fn outcome_for(&self, item: &str) -> Option<&ItemOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == item)
            .map(|(_, outcome)| outcome)
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Updated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::OwnerMismatch { .. }))
    }

    pub fn missing(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::RowNotFound | ItemOutcome::NoData))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                ItemOutcome::OwnerReadFailed { .. } | ItemOutcome::WriteFailed { .. }
            )
        })
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} updated, {} skipped, {} missing, {} failed of {} items",
            self.updated(),
            self.skipped(),
            self.missing(),
            self.failed(),
            self.outcomes.len()
        )
    }
}
