//! Use-case services over the overlay stores.
//!
//! # Responsibility
//! - Route mutations to the right overlay store.
//! - Expose the merged registry to presentation callers.

pub mod docs_service;
