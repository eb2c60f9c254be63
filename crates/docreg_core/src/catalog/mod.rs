//! Static content catalog.
//!
//! # Responsibility
//! - Hold the immutable baseline categories and documents.
//! - Answer id lookups used by update routing and collision checks.
//!
//! # Invariants
//! - Category names are unique and non-blank.
//! - Document ids are unique across the whole catalog.
//! - Contents never change after construction.

use crate::model::document::{Category, Document, DocumentId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod builtin;

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    BlankCategoryName,
    DuplicateCategory(String),
    DuplicateDocumentId(DocumentId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCategoryName => write!(f, "catalog category name must not be blank"),
            Self::DuplicateCategory(name) => write!(f, "catalog category is duplicated: {name}"),
            Self::DuplicateDocumentId(id) => write!(f, "catalog document id is duplicated: {id}"),
        }
    }
}

impl Error for CatalogError {}

/// Immutable baseline registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog, rejecting blank names and duplicated names or ids.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CatalogError::BlankCategoryName);
            }
            if !names.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
            for document in &category.items {
                if !ids.insert(&document.id) {
                    return Err(CatalogError::DuplicateDocumentId(document.id.clone()));
                }
            }
        }
        Ok(Self { categories })
    }

    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Catalog compiled into this crate.
    pub fn builtin() -> Self {
        Self {
            categories: builtin::categories(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|category| category.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns the category name and baseline document for `id`.
    pub fn find(&self, id: &DocumentId) -> Option<(&str, &Document)> {
        self.categories.iter().find_map(|category| {
            category
                .find(id)
                .map(|document| (category.name.as_str(), document))
        })
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.find(id).is_some()
    }
}
