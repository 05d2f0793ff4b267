use contracts::domain::a001_agent::Agent;
use contracts::shared::api::{endpoints, ApiError};

use crate::shared::api_utils::ApiClient;

/// Fetch all agents
pub async fn fetch_agents(client: &ApiClient) -> Result<Vec<Agent>, ApiError> {
    client.get_list::<Agent>(&endpoints::agents()).await
}
