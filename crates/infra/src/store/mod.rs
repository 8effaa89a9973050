//! Document store capability: product lookup by filter.

use async_trait::async_trait;
use thiserror::Error;

use shopadvisor_core::{CapabilityError, Product, ProductFilter};

pub mod catalog;
pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

/// Failure of a store operation after (or instead of) a successful connect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store connectivity error: {0}")]
    Connectivity(String),

    #[error("store query error: {0}")]
    Query(String),

    #[error("store decode error: {0}")]
    Decode(String),
}

/// External document store holding product documents.
///
/// `connect` is invoked once by the readiness gate, followed by a `count`
/// confidence check; request handling only calls `find` once the gate
/// reported the store ready.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Short name used in logs and health output.
    fn name(&self) -> &'static str;

    /// Validate the connection string and establish the connection.
    async fn connect(&self) -> Result<(), CapabilityError>;

    /// Number of product documents.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Products matching `filter`, best rated first, at most `limit`.
    async fn find(&self, filter: &ProductFilter, limit: usize) -> Result<Vec<Product>, StoreError>;
}
