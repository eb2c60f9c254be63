//! Added-document store: user-created documents grouped by category name.
//!
//! # Invariants
//! - Bucket item order is insertion order.
//! - Empty buckets are dropped, never persisted.
//! - A document id appears at most once across all buckets; later
//!   duplicates in stored data are dropped on load.
//! - Loading never fails; unreadable buckets or documents are dropped.

use super::{KvStore, StoreResult};
use crate::model::document::{Document, DocumentId, DocumentPatch};
use log::{debug, warn};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Category name -> documents created under that category.
pub type AddedDocumentSet = BTreeMap<String, Vec<Document>>;

pub struct AddedDocumentStore<S: KvStore> {
    kv: S,
    key: String,
    buckets: AddedDocumentSet,
}

impl<S: KvStore> AddedDocumentStore<S> {
    pub fn load(kv: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let buckets = read_buckets(&kv, &key);
        Self { kv, key, buckets }
    }

    pub fn reload(&mut self) {
        self.buckets = read_buckets(&self.kv, &self.key);
    }

    pub fn buckets(&self) -> &AddedDocumentSet {
        &self.buckets
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.find(id).is_some()
    }

    /// Returns the category name and document for `id`.
    pub fn find(&self, id: &DocumentId) -> Option<(&str, &Document)> {
        self.buckets.iter().find_map(|(category, items)| {
            items
                .iter()
                .find(|document| &document.id == id)
                .map(|document| (category.as_str(), document))
        })
    }

    /// Appends `document` to `category`, creating the bucket when absent.
    ///
    /// A failed write rolls the insert back, so memory never holds a
    /// document the caller was told was not added.
    pub fn add(&mut self, category: &str, document: Document) -> StoreResult<()> {
        let id = document.id.clone();
        self.buckets
            .entry(category.to_string())
            .or_default()
            .push(document);

        if let Err(err) = self.persist() {
            if let Some(items) = self.buckets.get_mut(category) {
                items.pop();
                if items.is_empty() {
                    self.buckets.remove(category);
                }
            }
            return Err(err);
        }
        debug!("event=added_insert module=store status=ok category={category} doc_id={id}");
        Ok(())
    }

    /// Applies `patch` to the added document `id`.
    ///
    /// Returns `false` without writing when no bucket holds `id`.
    pub fn update(&mut self, id: &DocumentId, patch: &DocumentPatch) -> StoreResult<bool> {
        let Some(document) = self
            .buckets
            .values_mut()
            .flat_map(|items| items.iter_mut())
            .find(|document| &document.id == id)
        else {
            return Ok(false);
        };
        document.apply(patch);
        debug!("event=added_update module=store status=ok doc_id={id}");
        self.persist()?;
        Ok(true)
    }

    /// Deletes `id` from whichever bucket holds it.
    ///
    /// Every copy of `id` is removed; the first one is returned.
    pub fn remove(&mut self, id: &DocumentId) -> StoreResult<Option<Document>> {
        let mut removed = None;
        for items in self.buckets.values_mut() {
            items.retain(|document| {
                if &document.id != id {
                    return true;
                }
                if removed.is_none() {
                    removed = Some(document.clone());
                }
                false
            });
        }
        if removed.is_none() {
            return Ok(None);
        }
        self.buckets.retain(|_, items| !items.is_empty());
        debug!("event=added_remove module=store status=ok doc_id={id}");
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> StoreResult<()> {
        let serialized = serde_json::to_string(&self.buckets)?;
        self.kv.set(&self.key, &serialized).map_err(|err| {
            warn!(
                "event=added_persist module=store status=error key={} error={}",
                self.key, err
            );
            err
        })
    }
}

fn read_buckets(kv: &impl KvStore, key: &str) -> AddedDocumentSet {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return AddedDocumentSet::new(),
        Err(err) => {
            warn!("event=added_load module=store status=error key={key} error={err}");
            return AddedDocumentSet::new();
        }
    };

    let object = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            warn!("event=added_load module=store status=corrupt key={key} reason=not_an_object");
            return AddedDocumentSet::new();
        }
        Err(err) => {
            warn!("event=added_load module=store status=corrupt key={key} error={err}");
            return AddedDocumentSet::new();
        }
    };

    let mut buckets = AddedDocumentSet::new();
    let mut seen_ids = HashSet::new();
    for (category, value) in object {
        if category.trim().is_empty() {
            warn!("event=added_load module=store status=dropped key={key} reason=blank_category");
            continue;
        }
        let Value::Array(values) = value else {
            warn!("event=added_load module=store status=dropped key={key} category={category} reason=not_an_array");
            continue;
        };
        let items: Vec<Document> = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Document>(value) {
                Ok(document) if !seen_ids.insert(document.id.clone()) => {
                    warn!(
                        "event=added_load module=store status=dropped key={key} category={category} doc_id={} reason=duplicate_id",
                        document.id
                    );
                    None
                }
                Ok(document) => Some(document),
                Err(err) => {
                    warn!("event=added_load module=store status=dropped key={key} category={category} error={err}");
                    None
                }
            })
            .collect();
        if !items.is_empty() {
            buckets.insert(category, items);
        }
    }
    buckets
}
