use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::a001_agent::AgentRef;
use crate::shared::aggregate::Summable;
use crate::shared::collation::compare_vi;
use crate::shared::serde_utils::zero_if_null;
use crate::shared::sort::Sortable;

// ============================================================================
// Wire shape
// ============================================================================

/// Debt report exactly as the backend sends it. The agent arrives either
/// nested (`agent: {agentId, agentName}`) or flat (`agentId`, `agentName`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtReportDto {
    #[serde(default, alias = "debt_report_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub debt_report_id: Option<i32>,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub month: u32,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub year: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentRef>,

    #[serde(default, alias = "agentID", alias = "agent_id", skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i32>,

    #[serde(default, alias = "agent_name", skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,

    #[serde(default, alias = "first_debt", deserialize_with = "zero_if_null")]
    pub first_debt: i64,

    #[serde(default, alias = "arisen_debt", deserialize_with = "zero_if_null")]
    pub arisen_debt: i64,

    #[serde(default, alias = "last_debt", deserialize_with = "zero_if_null")]
    pub last_debt: i64,
}

// ============================================================================
// Canonical record
// ============================================================================

/// Báo cáo công nợ: one agent's debt movement over one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DebtReportDto", into = "DebtReportDto")]
pub struct DebtRecord {
    pub debt_report_id: Option<i32>,
    pub agent_id: i32,
    pub agent_name: String,
    pub month: u32,
    pub year: i32,
    pub first_debt: i64,
    pub arisen_debt: i64,
    pub last_debt: i64,
}

impl From<DebtReportDto> for DebtRecord {
    fn from(dto: DebtReportDto) -> Self {
        let (agent_id, agent_name) = match dto.agent {
            Some(agent) => (agent.agent_id, agent.agent_name),
            None => (dto.agent_id.unwrap_or_default(), String::new()),
        };
        let agent_name = if agent_name.is_empty() {
            dto.agent_name.unwrap_or_default()
        } else {
            agent_name
        };

        Self {
            debt_report_id: dto.debt_report_id,
            agent_id,
            agent_name,
            month: dto.month,
            year: dto.year,
            first_debt: dto.first_debt,
            arisen_debt: dto.arisen_debt,
            last_debt: dto.last_debt,
        }
    }
}

impl From<DebtRecord> for DebtReportDto {
    fn from(record: DebtRecord) -> Self {
        Self {
            debt_report_id: record.debt_report_id,
            month: record.month,
            year: record.year,
            agent: Some(AgentRef {
                agent_id: record.agent_id,
                agent_name: record.agent_name,
            }),
            agent_id: None,
            agent_name: None,
            first_debt: record.first_debt,
            arisen_debt: record.arisen_debt,
            last_debt: record.last_debt,
        }
    }
}

/// Composite identity used for lookup and deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebtReportKey {
    pub agent_id: i32,
    pub month: u32,
    pub year: i32,
}

impl DebtRecord {
    pub fn key(&self) -> DebtReportKey {
        DebtReportKey {
            agent_id: self.agent_id,
            month: self.month,
            year: self.year,
        }
    }

    /// Whether `last_debt == first_debt + arisen_debt`. Fetched data is
    /// displayed as-is even when this does not hold.
    pub fn is_balanced(&self) -> bool {
        self.first_debt.checked_add(self.arisen_debt) == Some(self.last_debt)
    }

    pub fn is_in_period(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    pub fn period_label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }
}

impl Sortable for DebtRecord {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "agent_id" => self.agent_id.cmp(&other.agent_id),
            "agent_name" => compare_vi(&self.agent_name, &other.agent_name),
            "first_debt" => self.first_debt.cmp(&other.first_debt),
            "arisen_debt" => self.arisen_debt.cmp(&other.arisen_debt),
            "last_debt" => self.last_debt.cmp(&other.last_debt),
            "period" => (self.year, self.month).cmp(&(other.year, other.month)),
            _ => Ordering::Equal,
        }
    }
}

// ============================================================================
// Totals
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtTotals {
    pub total_first_debt: i64,
    pub total_arisen_debt: i64,
    pub total_last_debt: i64,
}

impl Summable for DebtRecord {
    type Totals = DebtTotals;

    fn accumulate(&self, totals: &mut DebtTotals) {
        totals.total_first_debt = totals.total_first_debt.saturating_add(self.first_debt);
        totals.total_arisen_debt = totals.total_arisen_debt.saturating_add(self.arisen_debt);
        totals.total_last_debt = totals.total_last_debt.saturating_add(self.last_debt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::aggregate::aggregate;

    fn record(first: i64, arisen: i64, last: i64) -> DebtRecord {
        DebtRecord {
            debt_report_id: None,
            agent_id: 1,
            agent_name: "A".into(),
            month: 5,
            year: 2024,
            first_debt: first,
            arisen_debt: arisen,
            last_debt: last,
        }
    }

    #[test]
    fn test_nested_agent_shape() {
        let json = r#"{"debtReportId":3,"month":5,"year":2024,
            "agent":{"agentId":7,"agentName":"Đại lý Minh Anh","phone":"0909"},
            "firstDebt":1000,"arisenDebt":500,"lastDebt":1500}"#;
        let rec: DebtRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.debt_report_id, Some(3));
        assert_eq!(rec.agent_id, 7);
        assert_eq!(rec.agent_name, "Đại lý Minh Anh");
        assert!(rec.is_balanced());
    }

    #[test]
    fn test_flat_agent_shape_and_nulls() {
        let json = r#"{"month":5,"year":2024,"agentID":8,"agentName":"B","firstDebt":null}"#;
        let rec: DebtRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.agent_id, 8);
        assert_eq!(rec.agent_name, "B");
        assert_eq!(rec.first_debt, 0);
        assert_eq!(rec.last_debt, 0);
    }

    #[test]
    fn test_serializes_server_shape() {
        let json = serde_json::to_value(record(1, 2, 3)).unwrap();
        assert_eq!(json["agent"]["agentId"], 1);
        assert_eq!(json["firstDebt"], 1);
        assert_eq!(json["lastDebt"], 3);
        assert!(json.get("agentId").is_none());
        assert!(json.get("debtReportId").is_none());
    }

    #[test]
    fn test_unbalanced_record_is_reported() {
        assert!(!record(1000, 500, 1400).is_balanced());
    }

    #[test]
    fn test_aggregate_mixed_signs() {
        let records = vec![record(1000, 500, 1500), record(-200, 100, -100)];
        assert_eq!(
            aggregate(&records),
            DebtTotals {
                total_first_debt: 800,
                total_arisen_debt: 600,
                total_last_debt: 1400,
            }
        );
    }

    #[test]
    fn test_total_last_debt_matches_field_sum() {
        let records: Vec<DebtRecord> = (0..20)
            .map(|i| record(i * 7 - 40, i * 3, i * 10 - 40))
            .collect();
        let expected: i64 = records.iter().map(|r| r.last_debt).sum();
        assert_eq!(aggregate(&records).total_last_debt, expected);

        let empty: Vec<DebtRecord> = Vec::new();
        assert_eq!(aggregate(&empty), DebtTotals::default());
    }
}
