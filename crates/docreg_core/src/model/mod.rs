//! Document domain model shared by catalog, stores and registry merge.
//!
//! # Responsibility
//! - Define the canonical document/category shapes rendered by callers.
//! - Define the typed patch used for user overrides.
//!
//! # Invariants
//! - A document id is never changed by applying a patch.
//! - Category item order is insertion order.

pub mod document;
pub mod summary;
