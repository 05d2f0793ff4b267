use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::a003_product::Product;
use crate::shared::aggregate::Summable;
use crate::shared::collation::compare_vi;
use crate::shared::serde_utils::zero_if_null;
use crate::shared::sort::Sortable;

// ============================================================================
// Kind
// ============================================================================

/// Phiếu nhập (goods in from a supplier) or phiếu xuất (goods out to an agent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    Import,
    Export,
}

impl ReceiptKind {
    pub fn title(self) -> &'static str {
        match self {
            ReceiptKind::Import => "Phiếu nhập hàng",
            ReceiptKind::Export => "Phiếu xuất hàng",
        }
    }

    /// File name prefix of an exported sheet
    pub fn file_prefix(self) -> &'static str {
        match self {
            ReceiptKind::Import => "PhieuNhap",
            ReceiptKind::Export => "PhieuXuat",
        }
    }

    /// Price a newly added line starts with
    pub fn default_price(self, product: &Product) -> i64 {
        match self {
            ReceiptKind::Import => product.import_price,
            ReceiptKind::Export => product.export_price,
        }
    }
}

// ============================================================================
// Line item
// ============================================================================

/// One product line of a receipt being composed.
///
/// Fields are private so that `total_price` can only change together with
/// quantity or price.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLineItem {
    product: Product,
    quantity: u32,
    unit_price: i64,
    total_price: i64,
}

/// `quantity * unit_price`, or `None` when it does not fit in an `i64`
pub fn line_total(quantity: u32, unit_price: i64) -> Option<i64> {
    i64::from(quantity).checked_mul(unit_price)
}

impl ReceiptLineItem {
    /// `None` when the line total overflows
    pub fn new(product: Product, quantity: u32, unit_price: i64) -> Option<Self> {
        Some(Self {
            product,
            quantity,
            unit_price,
            total_price: line_total(quantity, unit_price)?,
        })
    }

    pub fn product_id(&self) -> i32 {
        self.product.product_id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    /// Returns `false` and leaves the line untouched when the new total overflows
    pub fn set_quantity(&mut self, quantity: u32) -> bool {
        self.rederive(quantity, self.unit_price)
    }

    /// Returns `false` and leaves the line untouched when the new total overflows
    pub fn set_unit_price(&mut self, unit_price: i64) -> bool {
        self.rederive(self.quantity, unit_price)
    }

    fn rederive(&mut self, quantity: u32, unit_price: i64) -> bool {
        match line_total(quantity, unit_price) {
            Some(total) => {
                self.quantity = quantity;
                self.unit_price = unit_price;
                self.total_price = total;
                true
            }
            None => false,
        }
    }
}

impl Sortable for ReceiptLineItem {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "product_name" => compare_vi(&self.product.product_name, &other.product.product_name),
            "quantity" => self.quantity.cmp(&other.quantity),
            "unit_price" => self.unit_price.cmp(&other.unit_price),
            "total_price" => self.total_price.cmp(&other.total_price),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiptTotals {
    pub total_quantity: i64,
    pub total_amount: i64,
}

impl Summable for ReceiptLineItem {
    type Totals = ReceiptTotals;

    fn accumulate(&self, totals: &mut ReceiptTotals) {
        totals.total_quantity = totals.total_quantity.saturating_add(i64::from(self.quantity));
        totals.total_amount = totals.total_amount.saturating_add(self.total_price);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDetailRequest {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[serde(rename = "quantityImport")]
    pub quantity_import: u32,
}

/// Body of `POST /api/import-receipts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImportReceiptRequest {
    pub create_date: NaiveDate,
    pub import_details: Vec<ImportDetailRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDetailRequest {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[serde(rename = "quantityExport")]
    pub quantity_export: u32,
}

/// Body of `POST /api/export-receipts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExportReceiptRequest {
    pub create_date: NaiveDate,
    pub agent_id: i32,
    pub paid_amount: i64,
    pub export_details: Vec<ExportDetailRequest>,
}

/// What the console reads back from a created receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReceipt {
    #[serde(default, alias = "importReceiptId", alias = "exportReceiptId", alias = "id")]
    pub receipt_id: Option<i32>,

    #[serde(default)]
    pub create_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: i64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub paid_amount: i64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub remaining_amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            product_id: 1,
            product_name: "Gạo".into(),
            unit: None,
            import_price: 15_000,
            export_price: 16_500,
            inventory_quantity: 100,
        }
    }

    #[test]
    fn test_total_follows_every_update() {
        let mut line = ReceiptLineItem::new(product(), 3, 15_000).unwrap();
        assert_eq!(line.total_price(), 45_000);

        for (quantity, price) in [(1, 0), (7, 15_000), (250, 99_999), (4, 1)] {
            assert!(line.set_quantity(quantity));
            assert_eq!(line.total_price(), i64::from(line.quantity()) * line.unit_price());
            assert!(line.set_unit_price(price));
            assert_eq!(line.total_price(), i64::from(quantity) * price);
        }
    }

    #[test]
    fn test_overflowing_total_is_refused() {
        assert!(ReceiptLineItem::new(product(), 2, 5_000_000_000_000_000_000).is_none());

        let mut line = ReceiptLineItem::new(product(), 2, 4_000_000_000_000_000_000).unwrap();
        let before = line.clone();
        assert!(!line.set_quantity(3));
        assert!(!line.set_unit_price(i64::MAX));
        assert_eq!(line, before);
        assert_eq!(line.total_price(), 8_000_000_000_000_000_000);
    }

    #[test]
    fn test_totals_saturate() {
        let lines = vec![
            ReceiptLineItem::new(product(), 1, i64::MAX).unwrap(),
            ReceiptLineItem::new(product(), 1, 1).unwrap(),
        ];
        let totals = crate::shared::aggregate::aggregate(&lines);
        assert_eq!(totals.total_amount, i64::MAX);
        assert_eq!(totals.total_quantity, 2);
    }

    #[test]
    fn test_request_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let import = CreateImportReceiptRequest {
            create_date: date,
            import_details: vec![ImportDetailRequest {
                product_id: 4,
                quantity_import: 10,
            }],
        };
        let json = serde_json::to_value(&import).unwrap();
        assert_eq!(json["createDate"], "2024-06-01");
        assert_eq!(json["importDetails"][0]["productID"], 4);
        assert_eq!(json["importDetails"][0]["quantityImport"], 10);

        let export = CreateExportReceiptRequest {
            create_date: date,
            agent_id: 2,
            paid_amount: 5_000,
            export_details: vec![ExportDetailRequest {
                product_id: 4,
                quantity_export: 1,
            }],
        };
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["agentId"], 2);
        assert_eq!(json["paidAmount"], 5_000);
        assert_eq!(json["exportDetails"][0]["quantityExport"], 1);
    }

    #[test]
    fn test_created_receipt_ids() {
        let import: CreatedReceipt =
            serde_json::from_str(r#"{"importReceiptId":12,"createDate":"2024-06-01","totalAmount":30000}"#)
                .unwrap();
        assert_eq!(import.receipt_id, Some(12));
        assert_eq!(import.total_amount, 30_000);

        let export: CreatedReceipt = serde_json::from_str(
            r#"{"exportReceiptId":5,"totalAmount":100,"paidAmount":40,"remainingAmount":60}"#,
        )
        .unwrap();
        assert_eq!(export.receipt_id, Some(5));
        assert_eq!(export.remaining_amount, 60);
    }
}
