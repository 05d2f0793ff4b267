//! Receipts already stored by the backend, as listed in the receipt history

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::cmp::Ordering;

use super::aggregate::ReceiptKind;
use crate::domain::a001_agent::AgentRef;
use crate::domain::a003_product::Product;
use crate::shared::aggregate::Summable;
use crate::shared::collation::compare_vi;
use crate::shared::serde_utils::zero_if_null;
use crate::shared::sort::{SortDirection, SortState, Sortable};

// ============================================================================
// Wire shape
// ============================================================================

/// Product line of a stored receipt; import and export lines differ only in
/// field names (`quantityImport`/`importPrice` vs `quantityExport`/`exportPrice`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLineDto {
    #[serde(default)]
    pub product: Option<Product>,

    #[serde(
        default,
        alias = "quantityImport",
        alias = "quantityExport",
        deserialize_with = "zero_if_null"
    )]
    pub quantity: i64,

    #[serde(
        default,
        alias = "importPrice",
        alias = "exportPrice",
        deserialize_with = "zero_if_null"
    )]
    pub unit_price: i64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub into_money: i64,
}

/// Receipt as returned by the list and by-id endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReceiptDto {
    #[serde(default, alias = "importReceiptId", alias = "exportReceiptId", alias = "id")]
    pub receipt_id: Option<i32>,

    #[serde(default)]
    pub create_date: Option<NaiveDate>,

    #[serde(default)]
    pub agent: Option<AgentRef>,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: i64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub paid_amount: i64,

    #[serde(
        default,
        alias = "importDetails",
        alias = "exportDetails",
        deserialize_with = "zero_if_null"
    )]
    pub details: Vec<StoredLineDto>,
}

// ============================================================================
// Canonical record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLine {
    pub product_name: String,
    pub unit_name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub into_money: i64,
}

impl From<StoredLineDto> for StoredLine {
    fn from(dto: StoredLineDto) -> Self {
        let (product_name, unit_name) = match &dto.product {
            Some(p) => (p.product_name.clone(), p.unit_name().to_string()),
            None => (String::new(), String::new()),
        };
        Self {
            product_name,
            unit_name,
            quantity: dto.quantity,
            unit_price: dto.unit_price,
            into_money: dto.into_money,
        }
    }
}

/// Phiếu nhập or phiếu xuất as stored. Lines are only filled when the
/// receipt was fetched by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub kind: ReceiptKind,
    pub receipt_id: i32,
    pub create_date: Option<NaiveDate>,
    /// Exports only
    pub agent: Option<AgentRef>,
    pub total_amount: i64,
    /// Exports only
    pub paid_amount: i64,
    pub lines: Vec<StoredLine>,
}

impl StoredReceipt {
    /// `None` when the payload carries no id
    pub fn from_dto(kind: ReceiptKind, dto: StoredReceiptDto) -> Option<Self> {
        Some(Self {
            kind,
            receipt_id: dto.receipt_id?,
            create_date: dto.create_date,
            agent: dto.agent,
            total_amount: dto.total_amount,
            paid_amount: dto.paid_amount,
            lines: dto.details.into_iter().map(StoredLine::from).collect(),
        })
    }

    pub fn agent_id(&self) -> Option<i32> {
        self.agent.as_ref().map(|a| a.agent_id)
    }

    pub fn agent_name(&self) -> &str {
        self.agent.as_ref().map(|a| a.agent_name.as_str()).unwrap_or("")
    }

    /// Still owed on an export; zero for imports
    pub fn remaining_amount(&self) -> i64 {
        match self.kind {
            ReceiptKind::Import => 0,
            ReceiptKind::Export => self.total_amount.saturating_sub(self.paid_amount),
        }
    }

    pub fn payment_status(&self) -> Option<PaymentStatus> {
        match self.kind {
            ReceiptKind::Import => None,
            ReceiptKind::Export => Some(PaymentStatus::of(self.total_amount, self.paid_amount)),
        }
    }

    /// dd/mm/yyyy, empty without a date
    pub fn date_label(&self) -> String {
        self.create_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    pub fn is_in_period(&self, month: u32, year: i32) -> bool {
        self.create_date
            .is_some_and(|d| d.month() == month && d.year() == year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    pub fn of(total_amount: i64, paid_amount: i64) -> Self {
        if paid_amount >= total_amount {
            PaymentStatus::Paid
        } else if paid_amount > 0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Đã thanh toán",
            PaymentStatus::Partial => "Thanh toán một phần",
            PaymentStatus::Unpaid => "Chưa thanh toán",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "badge badge--success",
            PaymentStatus::Partial => "badge badge--warning",
            PaymentStatus::Unpaid => "badge badge--danger",
        }
    }
}

impl Sortable for StoredReceipt {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "receipt_id" => self.receipt_id.cmp(&other.receipt_id),
            "create_date" => self.create_date.cmp(&other.create_date),
            "agent_name" => compare_vi(self.agent_name(), other.agent_name()),
            "total_amount" => self.total_amount.cmp(&other.total_amount),
            "paid_amount" => self.paid_amount.cmp(&other.paid_amount),
            "remaining_amount" => self.remaining_amount().cmp(&other.remaining_amount()),
            _ => Ordering::Equal,
        }
    }
}

/// Newest receipt first
pub fn default_history_sort() -> SortState {
    SortState::new("receipt_id", SortDirection::Descending)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryTotals {
    pub receipt_count: i64,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub remaining_amount: i64,
}

impl Summable for StoredReceipt {
    type Totals = HistoryTotals;

    fn accumulate(&self, totals: &mut HistoryTotals) {
        totals.receipt_count = totals.receipt_count.saturating_add(1);
        totals.total_amount = totals.total_amount.saturating_add(self.total_amount);
        totals.paid_amount = totals.paid_amount.saturating_add(self.paid_amount);
        totals.remaining_amount = totals
            .remaining_amount
            .saturating_add(self.remaining_amount());
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Search box and agent picker above the history table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptFilter {
    pub query: String,
    pub agent_id: Option<i32>,
}

impl ReceiptFilter {
    /// Query matches part of the receipt id or, case-insensitively, of the
    /// agent name
    pub fn matches(&self, receipt: &StoredReceipt) -> bool {
        if self.agent_id.is_some() && receipt.agent_id() != self.agent_id {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || receipt.receipt_id.to_string().contains(&query)
            || receipt.agent_name().to_lowercase().contains(&query)
    }

    pub fn apply(&self, receipts: &[StoredReceipt]) -> Vec<StoredReceipt> {
        receipts.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::aggregate::aggregate;
    use crate::shared::sort::sort_by_state;

    fn export(
        id: i32,
        agent: Option<(i32, &str)>,
        date: &str,
        total: i64,
        paid: i64,
    ) -> StoredReceipt {
        StoredReceipt {
            kind: ReceiptKind::Export,
            receipt_id: id,
            create_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            agent: agent.map(|(agent_id, name)| AgentRef {
                agent_id,
                agent_name: name.into(),
            }),
            total_amount: total,
            paid_amount: paid,
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_export_payload() {
        let json = r#"{
            "exportReceiptId": 12,
            "createDate": "2024-06-15",
            "agent": {"agentID": 3, "agentName": "Đại lý Sao Mai", "phone": "0901"},
            "totalAmount": 500000,
            "paidAmount": 200000,
            "remainingAmount": 300000,
            "exportDetails": [
                {"product": {"productID": 4, "productName": "Gạo", "unit": {"unitID": 2, "unitName": "kg"}},
                 "quantityExport": 10, "exportPrice": 50000, "intoMoney": 500000}
            ]
        }"#;
        let dto: StoredReceiptDto = serde_json::from_str(json).unwrap();
        let receipt = StoredReceipt::from_dto(ReceiptKind::Export, dto).unwrap();

        assert_eq!(receipt.receipt_id, 12);
        assert_eq!(receipt.agent_name(), "Đại lý Sao Mai");
        assert_eq!(receipt.remaining_amount(), 300_000);
        assert_eq!(receipt.payment_status(), Some(PaymentStatus::Partial));
        assert_eq!(receipt.date_label(), "15/06/2024");
        assert_eq!(
            receipt.lines,
            vec![StoredLine {
                product_name: "Gạo".into(),
                unit_name: "kg".into(),
                quantity: 10,
                unit_price: 50_000,
                into_money: 500_000,
            }]
        );
    }

    #[test]
    fn test_import_payload() {
        let json = r#"{"importReceiptId": 5, "createDate": "2024-01-02", "totalAmount": 90000,
            "importDetails": [{"product": null, "quantityImport": 3, "importPrice": 30000, "intoMoney": 90000}]}"#;
        let dto: StoredReceiptDto = serde_json::from_str(json).unwrap();
        let receipt = StoredReceipt::from_dto(ReceiptKind::Import, dto).unwrap();

        assert_eq!(receipt.receipt_id, 5);
        assert_eq!(receipt.agent, None);
        assert_eq!(receipt.remaining_amount(), 0);
        assert_eq!(receipt.payment_status(), None);
        assert_eq!(receipt.lines[0].quantity, 3);
        assert_eq!(receipt.lines[0].product_name, "");
    }

    #[test]
    fn test_payload_without_id_is_dropped() {
        let dto: StoredReceiptDto =
            serde_json::from_str(r#"{"totalAmount": 1, "exportDetails": null}"#).unwrap();
        assert!(dto.details.is_empty());
        assert_eq!(StoredReceipt::from_dto(ReceiptKind::Export, dto), None);
    }

    #[test]
    fn test_payment_status() {
        assert_eq!(PaymentStatus::of(100, 100), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::of(100, 150), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::of(100, 1), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::of(100, 0), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::of(0, 0), PaymentStatus::Paid);
    }

    #[test]
    fn test_filter() {
        let receipts = vec![
            export(101, Some((1, "Đại lý Hòa Bình")), "2024-06-01", 10, 0),
            export(102, Some((2, "Cửa hàng Minh")), "2024-06-02", 20, 20),
            export(215, Some((1, "Đại lý Hòa Bình")), "2024-07-01", 30, 5),
        ];

        let by_name = ReceiptFilter {
            query: " hòa BÌNH ".into(),
            agent_id: None,
        };
        assert_eq!(by_name.apply(&receipts).len(), 2);

        let by_id = ReceiptFilter {
            query: "10".into(),
            agent_id: None,
        };
        let ids: Vec<i32> = by_id.apply(&receipts).iter().map(|r| r.receipt_id).collect();
        assert_eq!(ids, vec![101, 102]);

        let by_agent = ReceiptFilter {
            query: "21".into(),
            agent_id: Some(1),
        };
        assert_eq!(by_agent.apply(&receipts)[0].receipt_id, 215);
        assert_eq!(ReceiptFilter::default().apply(&receipts).len(), 3);
    }

    #[test]
    fn test_history_order_and_totals() {
        let receipts = vec![
            export(7, None, "2024-06-01", 100, 40),
            export(9, None, "2024-05-01", 300, 300),
            export(8, None, "2024-06-03", 50, 0),
        ];
        let rows = sort_by_state(&receipts, &default_history_sort());
        let ids: Vec<i32> = rows.iter().map(|r| r.item.receipt_id).collect();
        assert_eq!(ids, vec![9, 8, 7]);
        assert_eq!(rows[0].stt, 1);

        let totals = aggregate(&receipts);
        assert_eq!(totals.receipt_count, 3);
        assert_eq!(totals.total_amount, 450);
        assert_eq!(totals.remaining_amount, 110);
        assert!(receipts[0].is_in_period(6, 2024));
        assert!(!receipts[1].is_in_period(6, 2024));
    }
}
