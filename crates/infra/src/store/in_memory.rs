use async_trait::async_trait;

use shopadvisor_core::{CapabilityError, Product, ProductFilter};

use super::catalog::demo_catalog;
use super::{DocumentStore, StoreError};

/// Read-only in-memory product store for stub mode and tests.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    products: Vec<Product>,
}

impl InMemoryDocumentStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Store seeded with the built-in demo catalog.
    pub fn with_demo_catalog() -> Self {
        Self::new(demo_catalog())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn connect(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.products.len() as u64)
    }

    async fn find(&self, filter: &ProductFilter, limit: usize) -> Result<Vec<Product>, StoreError> {
        let mut matches: Vec<Product> = self.products.iter().filter(|p| filter.matches(p)).cloned().collect();
        matches.sort_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.price.cmp(&b.price)));
        matches.truncate(limit);
        Ok(matches)
    }
}
