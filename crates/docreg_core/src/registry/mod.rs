//! Effective registry: static catalog + overrides + added documents.

pub mod merge;

pub use merge::merge_registry;
