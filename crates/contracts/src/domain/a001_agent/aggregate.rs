use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::shared::collation::compare_vi;
use crate::shared::serde_utils::zero_if_null;
use crate::shared::sort::Sortable;

// ============================================================================
// Agent
// ============================================================================

/// Đại lý: a dealer buying goods on credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(alias = "agentID", alias = "agent_id", alias = "id")]
    pub agent_id: i32,

    #[serde(default, alias = "agent_name", alias = "name")]
    pub agent_name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// Current outstanding debt, VND
    #[serde(default, alias = "debt_money", deserialize_with = "zero_if_null")]
    pub debt_money: i64,
}

impl Agent {
    pub fn to_ref(&self) -> AgentRef {
        AgentRef {
            agent_id: self.agent_id,
            agent_name: self.agent_name.clone(),
        }
    }
}

impl Sortable for Agent {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "agent_id" => self.agent_id.cmp(&other.agent_id),
            "agent_name" => compare_vi(&self.agent_name, &other.agent_name),
            "debt_money" => self.debt_money.cmp(&other.debt_money),
            _ => Ordering::Equal,
        }
    }
}

// ============================================================================
// AgentRef
// ============================================================================

/// Minimal agent reference embedded in other payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRef {
    #[serde(alias = "agentID", alias = "agent_id", alias = "id")]
    pub agent_id: i32,

    #[serde(default, alias = "agent_name", alias = "name")]
    pub agent_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_field_variants() {
        let canonical: Agent =
            serde_json::from_str(r#"{"agentId":4,"agentName":"Đại lý Hòa Bình","debtMoney":1200}"#)
                .unwrap();
        let upper: Agent =
            serde_json::from_str(r#"{"agentID":4,"agentName":"Đại lý Hòa Bình","debtMoney":1200}"#)
                .unwrap();
        let bare: Agent =
            serde_json::from_str(r#"{"id":4,"agentName":"Đại lý Hòa Bình","debtMoney":1200}"#).unwrap();
        assert_eq!(canonical, upper);
        assert_eq!(canonical, bare);
        assert_eq!(canonical.phone, None);
    }

    #[test]
    fn test_null_debt_is_zero() {
        let agent: Agent = serde_json::from_str(r#"{"agentId":1,"debtMoney":null}"#).unwrap();
        assert_eq!(agent.debt_money, 0);
        assert_eq!(agent.agent_name, "");
    }

    #[test]
    fn test_serializes_canonical_names() {
        let json = serde_json::to_value(AgentRef {
            agent_id: 2,
            agent_name: "A".into(),
        })
        .unwrap();
        assert_eq!(json["agentId"], 2);
        assert_eq!(json["agentName"], "A");
    }
}
