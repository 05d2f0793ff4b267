use contracts::domain::a005_receipt::{
    CreateExportReceiptRequest, CreateImportReceiptRequest, CreatedReceipt,
};
use contracts::shared::api::{endpoints, ApiError};

use crate::shared::api_utils::{ApiClient, Method};

pub async fn submit_import(
    client: &ApiClient,
    request: &CreateImportReceiptRequest,
) -> Result<Option<CreatedReceipt>, ApiError> {
    client
        .send_json(Method::Post, &endpoints::import_receipts(), request)
        .await
}

pub async fn submit_export(
    client: &ApiClient,
    request: &CreateExportReceiptRequest,
) -> Result<Option<CreatedReceipt>, ApiError> {
    client
        .send_json(Method::Post, &endpoints::export_receipts(), request)
        .await
}
