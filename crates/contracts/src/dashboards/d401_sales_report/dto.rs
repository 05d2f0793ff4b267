use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::a005_receipt::{ReceiptKind, StoredReceipt};
use crate::shared::aggregate::{aggregate, Summable};
use crate::shared::collation::compare_vi;
use crate::shared::sort::{sort_by_state, Ranked, SortDirection, SortState, Sortable};
use crate::shared::summary_view::PeriodSummary;

/// Largest revenue first
pub fn default_sales_sort() -> SortState {
    SortState::new("total_amount", SortDirection::Descending)
}

/// One agent's export sales over a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSales {
    pub agent_id: i32,
    pub agent_name: String,
    pub export_count: i64,
    pub total_amount: i64,
    /// Share of the month's revenue in hundredths of a percent (1234 = 12.34%)
    pub ratio_bp: i64,
}

impl AgentSales {
    /// "12.34"
    pub fn ratio_label(&self) -> String {
        let sign = if self.ratio_bp < 0 { "-" } else { "" };
        let bp = self.ratio_bp.unsigned_abs();
        format!("{}{}.{:02}", sign, bp / 100, bp % 100)
    }

    pub fn tier(&self) -> RatioTier {
        RatioTier::of(self.ratio_bp)
    }
}

/// Colour band of a revenue share: 20% and up, 10% and up, below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioTier {
    Major,
    Regular,
    Minor,
}

impl RatioTier {
    pub fn of(ratio_bp: i64) -> Self {
        if ratio_bp >= 2_000 {
            RatioTier::Major
        } else if ratio_bp >= 1_000 {
            RatioTier::Regular
        } else {
            RatioTier::Minor
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RatioTier::Major => "badge badge--success",
            RatioTier::Regular => "badge badge--warning",
            RatioTier::Minor => "badge badge--danger",
        }
    }
}

/// `part / whole` in basis points, rounded half away from zero; zero when
/// there is no revenue
fn ratio_bp(part: i64, whole: i64) -> i64 {
    if whole == 0 {
        return 0;
    }
    let scaled = i128::from(part) * 10_000;
    let whole = i128::from(whole);
    let half = whole.abs() / 2;
    let rounded = if (scaled >= 0) == (whole > 0) {
        (scaled.abs() + half) / whole.abs()
    } else {
        -((scaled.abs() + half) / whole.abs())
    };
    i64::try_from(rounded).unwrap_or(0)
}

impl Sortable for AgentSales {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "agent_id" => self.agent_id.cmp(&other.agent_id),
            "agent_name" => compare_vi(&self.agent_name, &other.agent_name),
            "export_count" => self.export_count.cmp(&other.export_count),
            "total_amount" => self.total_amount.cmp(&other.total_amount),
            "ratio" => self.ratio_bp.cmp(&other.ratio_bp),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub total_revenue: i64,
    pub export_count: i64,
    pub agent_count: i64,
}

impl Summable for AgentSales {
    type Totals = SalesTotals;

    fn accumulate(&self, totals: &mut SalesTotals) {
        totals.total_revenue = totals.total_revenue.saturating_add(self.total_amount);
        totals.export_count = totals.export_count.saturating_add(self.export_count);
        totals.agent_count = totals.agent_count.saturating_add(1);
    }
}

/// Báo cáo doanh số: export revenue of one month, per agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub month: u32,
    pub year: i32,
    pub agent_sales: Vec<AgentSales>,
    pub totals: SalesTotals,
}

impl SalesSummary {
    /// Groups the export receipts dated in `month/year` by agent. Imports,
    /// receipts of other months and receipts without an agent are skipped;
    /// an agent with no export in the month has no row.
    pub fn for_period(month: u32, year: i32, receipts: &[StoredReceipt]) -> Self {
        let mut by_agent: BTreeMap<i32, AgentSales> = BTreeMap::new();
        for receipt in receipts {
            if receipt.kind != ReceiptKind::Export || !receipt.is_in_period(month, year) {
                continue;
            }
            let Some(agent) = &receipt.agent else { continue };
            let row = by_agent.entry(agent.agent_id).or_insert_with(|| AgentSales {
                agent_id: agent.agent_id,
                agent_name: agent.agent_name.clone(),
                export_count: 0,
                total_amount: 0,
                ratio_bp: 0,
            });
            row.export_count = row.export_count.saturating_add(1);
            row.total_amount = row.total_amount.saturating_add(receipt.total_amount);
        }

        let mut agent_sales: Vec<AgentSales> = by_agent.into_values().collect();
        let totals: SalesTotals = aggregate(&agent_sales);
        for row in &mut agent_sales {
            row.ratio_bp = ratio_bp(row.total_amount, totals.total_revenue);
        }

        Self {
            month,
            year,
            agent_sales,
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.agent_sales.is_empty()
    }

    pub fn agent_count(&self) -> usize {
        self.agent_sales.len()
    }

    pub fn sorted(&self, state: &SortState) -> Vec<Ranked<AgentSales>> {
        sort_by_state(&self.agent_sales, state)
    }

    pub fn period_label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }
}

impl PeriodSummary for SalesSummary {
    fn is_empty(&self) -> bool {
        SalesSummary::is_empty(self)
    }

    fn period_label(&self) -> String {
        SalesSummary::period_label(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_agent::AgentRef;
    use crate::shared::summary_view::SummaryView;
    use chrono::NaiveDate;

    fn receipt(id: i32, kind: ReceiptKind, agent: Option<(i32, &str)>, date: (i32, u32, u32), total: i64) -> StoredReceipt {
        StoredReceipt {
            kind,
            receipt_id: id,
            create_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            agent: agent.map(|(agent_id, name)| AgentRef {
                agent_id,
                agent_name: name.into(),
            }),
            total_amount: total,
            paid_amount: 0,
            lines: Vec::new(),
        }
    }

    fn june() -> Vec<StoredReceipt> {
        let a = Some((1, "Đại lý An"));
        let b = Some((2, "Đại lý Bình"));
        vec![
            receipt(1, ReceiptKind::Export, a, (2024, 6, 1), 300_000),
            receipt(2, ReceiptKind::Export, b, (2024, 6, 3), 100_000),
            receipt(3, ReceiptKind::Export, a, (2024, 6, 20), 200_000),
            receipt(4, ReceiptKind::Export, b, (2024, 7, 1), 999_000),
            receipt(5, ReceiptKind::Import, None, (2024, 6, 2), 777_000),
            receipt(6, ReceiptKind::Export, None, (2024, 6, 2), 5_000),
        ]
    }

    #[test]
    fn test_groups_exports_per_agent() {
        let summary = SalesSummary::for_period(6, 2024, &june());

        assert_eq!(summary.agent_count(), 2);
        assert_eq!(
            summary.totals,
            SalesTotals {
                total_revenue: 600_000,
                export_count: 3,
                agent_count: 2,
            }
        );
        let an = &summary.agent_sales[0];
        assert_eq!((an.agent_id, an.export_count, an.total_amount), (1, 2, 500_000));
        assert_eq!(an.ratio_label(), "83.33");
        assert_eq!(summary.agent_sales[1].ratio_label(), "16.67");
    }

    #[test]
    fn test_default_sort_ranks_by_revenue() {
        let summary = SalesSummary::for_period(6, 2024, &june());
        let rows = summary.sorted(&default_sales_sort());
        let ids: Vec<(usize, i32)> = rows.iter().map(|r| (r.stt, r.item.agent_id)).collect();
        assert_eq!(ids, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_empty_month() {
        let summary = SalesSummary::for_period(1, 2025, &june());
        assert!(summary.is_empty());
        assert_eq!(summary.totals, SalesTotals::default());
        assert_eq!(
            SummaryView::of(false, &summary),
            SummaryView::Empty {
                period: "1/2025".to_string()
            }
        );
    }

    #[test]
    fn test_ratio_rounding() {
        assert_eq!(ratio_bp(1, 3), 3_333);
        assert_eq!(ratio_bp(2, 3), 6_667);
        assert_eq!(ratio_bp(1, 8), 1_250);
        assert_eq!(ratio_bp(5, 0), 0);
        assert_eq!(ratio_bp(i64::MAX, i64::MAX), 10_000);
    }

    #[test]
    fn test_ratio_tiers() {
        assert_eq!(RatioTier::of(2_000), RatioTier::Major);
        assert_eq!(RatioTier::of(1_999), RatioTier::Regular);
        assert_eq!(RatioTier::of(1_000), RatioTier::Regular);
        assert_eq!(RatioTier::of(999), RatioTier::Minor);
    }
}
