use contracts::domain::a001_agent::aggregate::Agent;
use contracts::domain::a003_product::aggregate::Product;
use leptos::prelude::*;

/// Product and agent catalogues shared by every screen.
///
/// Created once in `App` and provided as context. A successful fetch replaces
/// a whole catalogue; the last writer wins.
#[derive(Clone, Copy)]
pub struct CatalogStore {
    pub products: RwSignal<Vec<Product>>,
    pub agents: RwSignal<Vec<Agent>>,
    pub agents_loaded: RwSignal<bool>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            products: RwSignal::new(Vec::new()),
            agents: RwSignal::new(Vec::new()),
            agents_loaded: RwSignal::new(false),
        }
    }

    pub fn replace_products(&self, products: Vec<Product>) {
        self.products.set(products);
    }

    pub fn replace_agents(&self, agents: Vec<Agent>) {
        self.agents.set(agents);
        self.agents_loaded.set(true);
    }

    pub fn product(&self, product_id: i32) -> Option<Product> {
        self.products
            .with(|items| items.iter().find(|p| p.product_id == product_id).cloned())
    }

    pub fn agent_name(&self, agent_id: i32) -> Option<String> {
        self.agents.with(|items| {
            items
                .iter()
                .find(|a| a.agent_id == agent_id)
                .map(|a| a.agent_name.clone())
        })
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
