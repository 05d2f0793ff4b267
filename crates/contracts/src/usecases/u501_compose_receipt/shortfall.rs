//! Inventory shortfall details pulled out of a failed export submission.
//!
//! A structured `details` object in the error body wins. Otherwise the
//! message text is matched against the phrasings the backend is known to
//! use. Failing to parse is not an error: the caller just offers no
//! "adjust to available" action.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::shared::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryShortfall {
    pub product_id: Option<i32>,
    pub product_name: Option<String>,
    pub requested: i64,
    pub available: i64,
    pub shortage: i64,
}

impl InventoryShortfall {
    pub fn new(requested: i64, available: i64) -> Self {
        Self {
            product_id: None,
            product_name: None,
            requested,
            available,
            shortage: requested - available,
        }
    }
}

/// Each pattern names its `requested` and `available` groups since the
/// backend is not consistent about which number comes first.
static MESSAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"Tồn kho:\s*(?P<available>\d+),\s*Yêu cầu:\s*(?P<requested>\d+)",
        r"Tồn kho hiện tại:\s*(?P<available>\d+),\s*yêu cầu xuất:\s*(?P<requested>\d+)",
        r"Số lượng xuất \((?P<requested>\d+)\) vượt quá tồn kho \((?P<available>\d+)\)",
        r"Số lượng tồn kho không đủ.*?(?P<requested>\d+).*?(?P<available>\d+)",
        r"không đủ.*?yêu cầu\s*(?P<requested>\d+).*?có\s*(?P<available>\d+)",
        r"(?i)inventory.*?requested\s*(?P<requested>\d+).*?available\s*(?P<available>\d+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static PRODUCT_ID: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"sản phẩm ID:\s*(\d+)").ok());

static PRODUCT_NAME: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"sản phẩm '([^']+)'").ok());

const INVENTORY_HINTS: [&str; 5] = ["tồn kho", "không đủ", "vượt quá", "insufficient", "inventory"];

/// Whether a message looks like an inventory problem at all
fn is_inventory_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    INVENTORY_HINTS.iter().any(|hint| lower.contains(hint))
}

fn number(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads `{requested, available, productId?}` (or the `*Quantity` spellings)
pub fn from_details(details: &Value) -> Option<InventoryShortfall> {
    let requested = number(details.get("requested")).or_else(|| number(details.get("requestedQuantity")))?;
    let available = number(details.get("available")).or_else(|| number(details.get("availableQuantity")))?;

    let mut shortfall = InventoryShortfall::new(requested, available);
    shortfall.product_id = number(details.get("productId"))
        .or_else(|| number(details.get("productID")))
        .and_then(|id| i32::try_from(id).ok());
    shortfall.product_name = details
        .get("productName")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(shortfall)
}

pub fn from_message(message: &str) -> Option<InventoryShortfall> {
    if !is_inventory_message(message) {
        return None;
    }
    let caps = MESSAGE_PATTERNS.iter().find_map(|re| re.captures(message))?;
    let requested = caps.name("requested")?.as_str().parse().ok()?;
    let available = caps.name("available")?.as_str().parse().ok()?;

    let mut shortfall = InventoryShortfall::new(requested, available);
    shortfall.product_id = PRODUCT_ID
        .as_ref()
        .and_then(|re| re.captures(message))
        .and_then(|c| c.get(1)?.as_str().parse().ok());
    shortfall.product_name = PRODUCT_NAME
        .as_ref()
        .and_then(|re| re.captures(message))
        .and_then(|c| Some(c.get(1)?.as_str().to_string()));
    Some(shortfall)
}

pub fn from_error(error: &ApiError) -> Option<InventoryShortfall> {
    if let Some(found) = error.details().and_then(from_details) {
        return Some(found);
    }
    error.server_message().and_then(from_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_details_preferred() {
        let err = ApiError::Validation {
            message: "Số lượng xuất (99) vượt quá tồn kho (1)".into(),
            details: Some(json!({"productId": 4, "requested": 10, "available": 3})),
        };
        let found = from_error(&err).unwrap();
        assert_eq!(found.product_id, Some(4));
        assert_eq!(found.requested, 10);
        assert_eq!(found.available, 3);
        assert_eq!(found.shortage, 7);
    }

    #[test]
    fn test_server_phrasing_with_name() {
        let found = from_message(
            "Không đủ hàng tồn kho cho sản phẩm 'Bia Sài Gòn'. Tồn kho: 5, Yêu cầu: 12",
        )
        .unwrap();
        assert_eq!(found.product_name.as_deref(), Some("Bia Sài Gòn"));
        assert_eq!((found.requested, found.available, found.shortage), (12, 5, 7));
    }

    #[test]
    fn test_server_phrasing_with_id() {
        let found = from_message(
            "Không đủ hàng tồn kho cho sản phẩm ID: 8. Tồn kho hiện tại: 2, yêu cầu xuất: 6",
        )
        .unwrap();
        assert_eq!(found.product_id, Some(8));
        assert_eq!((found.requested, found.available), (6, 2));
    }

    #[test]
    fn test_other_phrasings() {
        let found = from_message("Số lượng xuất (15) vượt quá tồn kho (10)").unwrap();
        assert_eq!((found.requested, found.available), (15, 10));

        let found = from_message("Insufficient inventory: requested 9, available 4").unwrap();
        assert_eq!((found.requested, found.available), (9, 4));
    }

    #[test]
    fn test_unparseable_message() {
        assert_eq!(from_message("Số lượng tồn kho không đủ!"), None);
        assert!(is_inventory_message("Số lượng tồn kho không đủ!"));
        assert!(!is_inventory_message("Đại lý không tồn tại"));
        assert_eq!(from_error(&ApiError::Timeout), None);
    }

    #[test]
    fn test_unrelated_rejection_is_not_a_shortfall() {
        let err = ApiError::Validation {
            message: "Đại lý 3 đã vượt mức nợ: yêu cầu 12 có 5".into(),
            details: None,
        };
        assert!(!is_inventory_message("Đại lý 3 đã vượt mức nợ: yêu cầu 12 có 5"));
        assert_eq!(from_error(&err), None);
    }
}
