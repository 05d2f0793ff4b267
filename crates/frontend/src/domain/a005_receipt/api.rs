use contracts::domain::a005_receipt::{ReceiptKind, StoredReceipt, StoredReceiptDto};
use contracts::shared::api::{endpoints, ApiError};

use crate::shared::api_utils::ApiClient;

/// Every stored receipt of one kind, lines omitted. Rows without an id are
/// skipped.
pub async fn fetch_all(client: &ApiClient, kind: ReceiptKind) -> Result<Vec<StoredReceipt>, ApiError> {
    let path = match kind {
        ReceiptKind::Import => endpoints::import_receipts(),
        ReceiptKind::Export => endpoints::export_receipts(),
    };
    let rows = client.get_list::<StoredReceiptDto>(&path).await?;
    let total = rows.len();
    let receipts: Vec<StoredReceipt> = rows
        .into_iter()
        .filter_map(|dto| StoredReceipt::from_dto(kind, dto))
        .collect();
    if receipts.len() < total {
        log::warn!("Skipped {} receipts without an id", total - receipts.len());
    }
    Ok(receipts)
}

/// One receipt with its lines
pub async fn fetch_one(
    client: &ApiClient,
    kind: ReceiptKind,
    receipt_id: i32,
) -> Result<StoredReceipt, ApiError> {
    let path = match kind {
        ReceiptKind::Import => endpoints::import_receipt(receipt_id),
        ReceiptKind::Export => endpoints::export_receipt(receipt_id),
    };
    let dto = client.get::<StoredReceiptDto>(&path).await?;
    StoredReceipt::from_dto(kind, dto)
        .ok_or_else(|| ApiError::Decode(format!("receipt {} has no id", receipt_id)))
}
