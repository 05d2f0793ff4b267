use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::a002_unit::Unit;
use crate::shared::collation::compare_vi;
use crate::shared::serde_utils::zero_if_null;
use crate::shared::sort::Sortable;

/// Mặt hàng: a product with its prices and stock on hand.
///
/// Every id/name/price spelling the backend uses across endpoints is accepted
/// here so consumers only ever see the canonical fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "productID", alias = "product_id", alias = "id")]
    pub product_id: i32,

    #[serde(default, alias = "product_name", alias = "name")]
    pub product_name: String,

    #[serde(default)]
    pub unit: Option<Unit>,

    #[serde(default, alias = "import_price", deserialize_with = "zero_if_null")]
    pub import_price: i64,

    #[serde(default, alias = "export_price", deserialize_with = "zero_if_null")]
    pub export_price: i64,

    #[serde(
        default,
        alias = "inventory_quantity",
        alias = "inventory",
        deserialize_with = "zero_if_null"
    )]
    pub inventory_quantity: i64,
}

impl Product {
    pub fn unit_name(&self) -> &str {
        self.unit.as_ref().map(|u| u.unit_name.as_str()).unwrap_or("")
    }

    /// "Tên (đơn vị)" as shown in pickers
    pub fn display_name(&self) -> String {
        match self.unit_name() {
            "" => self.product_name.clone(),
            unit => format!("{} ({})", self.product_name, unit),
        }
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "product_id" => self.product_id.cmp(&other.product_id),
            "product_name" => compare_vi(&self.product_name, &other.product_name),
            "unit_name" => compare_vi(self.unit_name(), other.unit_name()),
            "import_price" => self.import_price.cmp(&other.import_price),
            "export_price" => self.export_price.cmp(&other.export_price),
            "inventory_quantity" => self.inventory_quantity.cmp(&other.inventory_quantity),
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> Product {
        Product {
            product_id: 9,
            product_name: "Nước suối".into(),
            unit: Some(Unit {
                unit_id: 1,
                unit_name: "Thùng".into(),
            }),
            import_price: 80_000,
            export_price: 82_000,
            inventory_quantity: 40,
        }
    }

    #[test]
    fn test_id_spellings_normalise() {
        let variants = [
            r#"{"productId":9,"productName":"Nước suối","unit":{"unitId":1,"unitName":"Thùng"},"importPrice":80000,"exportPrice":82000,"inventoryQuantity":40}"#,
            r#"{"productID":9,"productName":"Nước suối","unit":{"unitId":1,"unitName":"Thùng"},"importPrice":80000,"exportPrice":82000,"inventoryQuantity":40}"#,
            r#"{"product_id":9,"product_name":"Nước suối","unit":{"unit_id":1,"unit_name":"Thùng"},"import_price":80000,"export_price":82000,"inventory_quantity":40}"#,
            r#"{"id":9,"name":"Nước suối","unit":{"id":1,"name":"Thùng"},"importPrice":80000,"exportPrice":82000,"inventoryQuantity":40}"#,
        ];
        for json in variants {
            let product: Product = serde_json::from_str(json).unwrap();
            assert_eq!(product, canonical(), "{}", json);
        }
    }

    #[test]
    fn test_missing_numbers_are_zero() {
        let product: Product =
            serde_json::from_str(r#"{"productId":3,"productName":"Muối","exportPrice":null}"#)
                .unwrap();
        assert_eq!(product.import_price, 0);
        assert_eq!(product.export_price, 0);
        assert_eq!(product.inventory_quantity, 0);
        assert_eq!(product.display_name(), "Muối");
    }

    #[test]
    fn test_display_name_with_unit() {
        assert_eq!(canonical().display_name(), "Nước suối (Thùng)");
    }
}
