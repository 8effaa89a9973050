//! Infrastructure layer: configuration, document store adapters, and the
//! readiness gate that brings external capabilities online.

pub mod config;
pub mod readiness;
pub mod store;

pub use config::{AppConfig, ServiceMode};
pub use readiness::{GateState, ReadinessGate, ReadinessResult};
pub use store::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError};
