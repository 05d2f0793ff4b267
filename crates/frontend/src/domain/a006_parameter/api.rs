use contracts::domain::a006_parameter::Parameter;
use contracts::shared::api::{endpoints, ApiError};

use crate::shared::api_utils::{ApiClient, Method};

pub async fn fetch_all(client: &ApiClient) -> Result<Vec<Parameter>, ApiError> {
    client.get_list::<Parameter>(&endpoints::parameters_all()).await
}

pub async fn fetch_by_key(client: &ApiClient, param_key: &str) -> Result<Parameter, ApiError> {
    client
        .get::<Parameter>(&endpoints::parameter_by_key(param_key))
        .await
}

/// Updates an existing parameter; returns the stored value when the backend echoes it
pub async fn update(client: &ApiClient, parameter: &Parameter) -> Result<Option<Parameter>, ApiError> {
    client
        .send_json::<_, Parameter>(Method::Put, &endpoints::parameters(), parameter)
        .await
}

pub async fn create(client: &ApiClient, parameter: &Parameter) -> Result<Option<Parameter>, ApiError> {
    client
        .send_json::<_, Parameter>(Method::Post, &endpoints::parameters(), parameter)
        .await
}
