use contracts::domain::a003_product::Product;
use contracts::shared::api::{endpoints, ApiError};

use crate::shared::api_utils::ApiClient;

/// Fetch all products with their current inventory
pub async fn fetch_products(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
    client.get_list::<Product>(&endpoints::products()).await
}
