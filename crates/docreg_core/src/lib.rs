//! Core logic for the Northfield docs overlay.
//!
//! A static content catalog is layered with user overrides and user-added
//! documents, both persisted to a durable local key-value store, and merged
//! into the registry the docs pages render.

pub mod access;
pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;

pub use access::{parse_role, role_allows, DocsCapability, Role, RoleParseError};
pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, DocsConfig, StorageKeys};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Category, Document, DocumentId, DocumentPatch, NewDocument};
pub use model::summary::summarize_markdown;
pub use registry::merge_registry;
pub use service::docs_service::{DocsService, DocsServiceError, DocumentOrigin, UpdateOutcome};
pub use store::{
    AddedDocumentSet, AddedDocumentStore, KvStore, MemoryKvStore, OverrideMap, OverrideStore,
    SqliteKvStore, StoreError, StoreResult,
};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
