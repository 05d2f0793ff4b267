use serde::{Deserialize, Serialize};

/// Đơn vị tính (unit of measure) of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[serde(alias = "unitID", alias = "unit_id", alias = "id")]
    pub unit_id: i32,

    #[serde(default, alias = "unit_name", alias = "name")]
    pub unit_name: String,
}
