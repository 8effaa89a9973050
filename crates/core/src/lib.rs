//! `shopadvisor-core` — shopping domain building blocks.
//!
//! This crate contains **pure** types and formatting rules (no I/O, no runtime).
//! External capabilities (text generation, document storage) live in the `ai`
//! and `infra` crates and only share the error taxonomy defined here.

pub mod affiliate;
pub mod error;
pub mod id;
pub mod language;
pub mod product;
pub mod query;

pub use affiliate::{AffiliateLink, AffiliateLinkBuilder};
pub use error::{CapabilityError, DomainError, DomainResult};
pub use id::RequestId;
pub use language::Language;
pub use product::{Product, ProductFilter, sample_products};
pub use query::ShoppingQuery;
