use serde::Serialize;

use crate::domain::a004_debt_report::{DebtRecord, DebtTotals};
use crate::shared::aggregate::aggregate;
use crate::shared::sort::{sort_by_state, Ranked, SortDirection, SortState};
use crate::shared::summary_view::PeriodSummary;

/// Default ordering of the summary table: largest closing debt first
pub fn default_sort() -> SortState {
    SortState::new("last_debt", SortDirection::Descending)
}

/// Debt summary for one period, rebuilt on every fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtSummary {
    pub month: u32,
    pub year: i32,
    pub agent_summaries: Vec<DebtRecord>,
    pub totals: DebtTotals,
}

impl DebtSummary {
    pub fn from_records(month: u32, year: i32, records: Vec<DebtRecord>) -> Self {
        let totals = aggregate(&records);
        Self {
            month,
            year,
            agent_summaries: records,
            totals,
        }
    }

    /// Keeps only the records of `month/year` from a full list
    pub fn for_period(month: u32, year: i32, all: &[DebtRecord]) -> Self {
        let records = all
            .iter()
            .filter(|r| r.is_in_period(month, year))
            .cloned()
            .collect();
        Self::from_records(month, year, records)
    }

    pub fn is_empty(&self) -> bool {
        self.agent_summaries.is_empty()
    }

    pub fn agent_count(&self) -> usize {
        self.agent_summaries.len()
    }

    pub fn sorted(&self, state: &SortState) -> Vec<Ranked<DebtRecord>> {
        sort_by_state(&self.agent_summaries, state)
    }

    pub fn period_label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }
}

impl PeriodSummary for DebtSummary {
    fn is_empty(&self) -> bool {
        DebtSummary::is_empty(self)
    }

    fn period_label(&self) -> String {
        DebtSummary::period_label(self)
    }
}
