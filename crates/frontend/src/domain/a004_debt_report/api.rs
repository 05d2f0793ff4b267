use contracts::domain::a004_debt_report::{DebtRecord, DebtReportKey};
use contracts::shared::api::{endpoints, ApiError};

use crate::shared::api_utils::{ApiClient, Method};

/// Every debt report; the caller filters by period
pub async fn fetch_all(client: &ApiClient) -> Result<Vec<DebtRecord>, ApiError> {
    client.get_list::<DebtRecord>(&endpoints::debt_reports_all()).await
}

/// Single report by its composite key
pub async fn fetch_one(client: &ApiClient, key: DebtReportKey) -> Result<DebtRecord, ApiError> {
    client
        .get::<DebtRecord>(&endpoints::debt_report(key.month, key.year, key.agent_id))
        .await
}

pub async fn create(client: &ApiClient, record: &DebtRecord) -> Result<(), ApiError> {
    client
        .send_json::<_, serde_json::Value>(Method::Post, &endpoints::debt_reports(), record)
        .await
        .map(|_| ())
}

pub async fn update(client: &ApiClient, record: &DebtRecord) -> Result<(), ApiError> {
    client
        .send_json::<_, serde_json::Value>(Method::Put, &endpoints::debt_reports(), record)
        .await
        .map(|_| ())
}

pub async fn delete(client: &ApiClient, key: DebtReportKey) -> Result<(), ApiError> {
    client
        .send_empty(
            Method::Delete,
            &endpoints::debt_report(key.month, key.year, key.agent_id),
        )
        .await
}

/// Asks the backend to (re)compute every agent's report for the period
pub async fn summarize(client: &ApiClient, month: u32, year: i32) -> Result<(), ApiError> {
    client
        .send_empty(Method::Post, &endpoints::summarize_debt_reports(month, year))
        .await
}
