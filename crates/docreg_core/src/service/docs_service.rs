//! Docs registry service: the only mutation entry point for callers.
//!
//! # Responsibility
//! - Own the static catalog and both overlay stores.
//! - Route updates: added documents first, then static overrides.
//! - Compute the merged registry on demand.
//!
//! # Invariants
//! - An added document id never collides with a static or added id.
//! - Updating an id unknown to both tiers changes nothing.
//! - A failed durable write of an update, delete or reset keeps the
//!   in-memory edit and is reported as `DocsServiceError::Persist` so callers
//!   can warn the user. A failed add is rolled back.

use crate::catalog::Catalog;
use crate::config::StorageKeys;
use crate::model::document::{Category, Document, DocumentId, DocumentPatch, NewDocument};
use crate::model::summary::summarize_markdown;
use crate::registry::merge_registry;
use crate::store::{
    AddedDocumentSet, AddedDocumentStore, KvStore, OverrideMap, OverrideStore, StoreError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for docs mutations.
#[derive(Debug)]
pub enum DocsServiceError {
    /// Category name is blank.
    EmptyCategory,
    /// Requested id already names a static or added document.
    DuplicateDocumentId(DocumentId),
    /// Mutation applied in memory but could not be written durably.
    Persist(StoreError),
}

impl Display for DocsServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "category name must not be blank"),
            Self::DuplicateDocumentId(id) => write!(f, "document id already exists: {id}"),
            Self::Persist(err) => write!(f, "edit was not saved: {err}"),
        }
    }
}

impl Error for DocsServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DocsServiceError {
    fn from(value: StoreError) -> Self {
        Self::Persist(value)
    }
}

/// Which tier an update landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An added document was edited in place.
    Added,
    /// A static document's override was created or extended.
    Overridden,
    /// No document has this id; nothing changed.
    NotFound,
}

/// Where the effective version of a document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Static,
    Overridden,
    Added,
}

/// Docs registry facade over a durable key-value store.
pub struct DocsService<S: KvStore + Clone> {
    catalog: Catalog,
    overrides: OverrideStore<S>,
    added: AddedDocumentStore<S>,
}

impl<S: KvStore + Clone> DocsService<S> {
    /// Loads both overlays from `kv` under `keys`.
    pub fn new(catalog: Catalog, kv: S, keys: &StorageKeys) -> Self {
        let overrides = OverrideStore::load(kv.clone(), keys.overrides.as_str());
        let added = AddedDocumentStore::load(kv, keys.added.as_str());
        info!(
            "event=docs_load module=service status=ok categories={} overrides={} added_buckets={}",
            catalog.len(),
            overrides.get().len(),
            added.buckets().len()
        );
        Self {
            catalog,
            overrides,
            added,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &OverrideMap {
        self.overrides.get()
    }

    pub fn added_documents(&self) -> &AddedDocumentSet {
        self.added.buckets()
    }

    /// Merged, render-ready registry.
    pub fn registry(&self) -> Vec<Category> {
        merge_registry(&self.catalog, self.overrides.get(), self.added.buckets())
    }

    /// Effective version of one document.
    pub fn get_document(&self, id: &DocumentId) -> Option<Document> {
        if let Some((_, document)) = self.added.find(id) {
            return Some(document.clone());
        }
        let (_, document) = self.catalog.find(id)?;
        Some(match self.overrides.get_one(id) {
            Some(patch) => document.patched(patch),
            None => document.clone(),
        })
    }

    pub fn document_origin(&self, id: &DocumentId) -> Option<DocumentOrigin> {
        if self.added.contains(id) {
            return Some(DocumentOrigin::Added);
        }
        if !self.catalog.contains(id) {
            return None;
        }
        if self.overrides.get_one(id).is_some() {
            Some(DocumentOrigin::Overridden)
        } else {
            Some(DocumentOrigin::Static)
        }
    }

    /// Creates a user document under `category`.
    ///
    /// A missing id is generated; a missing description is summarized from
    /// the body. On `Persist` the document is not added, so a retry cannot
    /// leave duplicates behind.
    pub fn add_document(
        &mut self,
        category: &str,
        request: NewDocument,
    ) -> Result<Document, DocsServiceError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(DocsServiceError::EmptyCategory);
        }

        let id = request.id.unwrap_or_else(DocumentId::generate);
        if self.catalog.contains(&id) || self.added.contains(&id) {
            return Err(DocsServiceError::DuplicateDocumentId(id));
        }

        let description = request
            .description
            .unwrap_or_else(|| summarize_markdown(&request.content));
        let document = Document::new(id, request.title, request.content, description);

        self.added.add(category, document.clone())?;
        info!(
            "event=doc_add module=service status=ok category={category} doc_id={}",
            document.id
        );
        Ok(document)
    }

    /// Applies `patch` to the added document `id`, or to the override of
    /// static document `id`.
    pub fn update_document(
        &mut self,
        id: &DocumentId,
        patch: &DocumentPatch,
    ) -> Result<UpdateOutcome, DocsServiceError> {
        let outcome = if self.added.update(id, patch)? {
            UpdateOutcome::Added
        } else if self.catalog.contains(id) {
            self.overrides.set(id, patch)?;
            UpdateOutcome::Overridden
        } else {
            UpdateOutcome::NotFound
        };

        info!("event=doc_update module=service status=ok doc_id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Removes added document `id` and any override keyed by `id`.
    ///
    /// Returns whether anything was removed.
    pub fn delete_document(&mut self, id: &DocumentId) -> Result<bool, DocsServiceError> {
        let removed = self.added.remove(id)?.is_some();
        let cleared = self.overrides.clear(id)?;
        info!(
            "event=doc_delete module=service status=ok doc_id={id} removed_added={removed} cleared_override={cleared}"
        );
        Ok(removed || cleared)
    }

    /// Drops the override of a static document, restoring the baseline.
    pub fn reset_document(&mut self, id: &DocumentId) -> Result<bool, DocsServiceError> {
        let cleared = self.overrides.clear(id)?;
        info!("event=doc_reset module=service status=ok doc_id={id} cleared={cleared}");
        Ok(cleared)
    }

    /// Re-reads both overlays from the durable store.
    pub fn reload(&mut self) {
        self.overrides.reload();
        self.added.reload();
    }
}
