//! LexQuest — catalog loading and the in-memory content repository.
//!
//! The catalog (levels, the duel pool and scenario chains) is authored as a
//! YAML document, validated once at startup and served read-only.

pub mod catalog;
pub mod repository;

pub use catalog::{Catalog, CatalogError};
pub use repository::InMemoryContentRepository;
