//! Override store: per-document field patches over the static catalog.
//!
//! # Responsibility
//! - Load, hold and persist the `DocumentId -> DocumentPatch` map.
//!
//! # Invariants
//! - `set` shallow-merges into the existing patch; newer fields win.
//! - Every mutation writes the whole map to the durable store.
//! - Loading never fails; corrupt entries are dropped one by one.

use super::{KvStore, StoreResult};
use crate::model::document::{DocumentId, DocumentPatch};
use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;

pub type OverrideMap = BTreeMap<DocumentId, DocumentPatch>;

pub struct OverrideStore<S: KvStore> {
    kv: S,
    key: String,
    entries: OverrideMap,
}

impl<S: KvStore> OverrideStore<S> {
    /// Loads overrides stored under `key`.
    pub fn load(kv: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = read_overrides(&kv, &key);
        Self { kv, key, entries }
    }

    /// Replaces in-memory state with what the durable store holds now.
    pub fn reload(&mut self) {
        self.entries = read_overrides(&self.kv, &self.key);
    }

    pub fn get(&self) -> &OverrideMap {
        &self.entries
    }

    pub fn get_one(&self, id: &DocumentId) -> Option<&DocumentPatch> {
        self.entries.get(id)
    }

    /// Merges `patch` into the override for `id` and persists.
    ///
    /// In-memory state keeps the merge even when the write fails.
    pub fn set(&mut self, id: &DocumentId, patch: &DocumentPatch) -> StoreResult<()> {
        if patch.is_empty() && !self.entries.contains_key(id) {
            return Ok(());
        }
        self.entries.entry(id.clone()).or_default().merge(patch);
        debug!("event=override_set module=store status=ok doc_id={id}");
        self.persist()
    }

    /// Removes the override for `id`. Returns whether one existed.
    pub fn clear(&mut self, id: &DocumentId) -> StoreResult<bool> {
        if self.entries.remove(id).is_none() {
            return Ok(false);
        }
        debug!("event=override_clear module=store status=ok doc_id={id}");
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> StoreResult<()> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.kv.set(&self.key, &serialized).map_err(|err| {
            warn!(
                "event=override_persist module=store status=error key={} error={}",
                self.key, err
            );
            err
        })
    }
}

fn read_overrides(kv: &impl KvStore, key: &str) -> OverrideMap {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return OverrideMap::new(),
        Err(err) => {
            warn!("event=override_load module=store status=error key={key} error={err}");
            return OverrideMap::new();
        }
    };

    let object = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            warn!("event=override_load module=store status=corrupt key={key} reason=not_an_object");
            return OverrideMap::new();
        }
        Err(err) => {
            warn!("event=override_load module=store status=corrupt key={key} error={err}");
            return OverrideMap::new();
        }
    };

    let mut entries = OverrideMap::new();
    for (id, value) in object {
        match serde_json::from_value::<DocumentPatch>(value) {
            Ok(patch) if !patch.is_empty() => {
                entries.insert(DocumentId::new(id), patch);
            }
            Ok(_) => {}
            Err(err) => {
                warn!("event=override_load module=store status=dropped key={key} doc_id={id} error={err}");
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::OverrideStore;
    use crate::model::document::{DocumentId, DocumentPatch};
    use crate::store::{KvStore, MemoryKvStore};

    const KEY: &str = "overrides";

    #[test]
    fn set_merges_fields_and_survives_reload() {
        let kv = MemoryKvStore::new();
        let mut store = OverrideStore::load(kv.clone(), KEY);
        let id = DocumentId::new("e1");

        store.set(&id, &DocumentPatch::title("A")).expect("set title");
        store
            .set(&id, &DocumentPatch::content("body"))
            .expect("set content");

        let reloaded = OverrideStore::load(kv, KEY);
        assert_eq!(
            reloaded.get_one(&id),
            Some(&DocumentPatch::title("A").with_content("body"))
        );
        assert_eq!(reloaded.get(), store.get());
    }

    #[test]
    fn clear_removes_override_and_is_idempotent() {
        let kv = MemoryKvStore::new();
        let mut store = OverrideStore::load(kv.clone(), KEY);
        let id = DocumentId::new("e1");
        store.set(&id, &DocumentPatch::title("A")).expect("set");

        assert!(store.clear(&id).expect("clear"));
        assert!(!store.clear(&id).expect("second clear"));
        assert!(OverrideStore::load(kv, KEY).get().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_as_empty() {
        let kv = MemoryKvStore::new();
        kv.set(KEY, "{not json").expect("seed");
        assert!(OverrideStore::load(kv.clone(), KEY).get().is_empty());

        kv.set(KEY, "[1,2,3]").expect("seed array");
        assert!(OverrideStore::load(kv, KEY).get().is_empty());
    }

    #[test]
    fn corrupt_entries_are_dropped_individually() {
        let kv = MemoryKvStore::new();
        kv.set(
            KEY,
            r#"{"good":{"title":"ok"},"bad":{"title":42},"worse":"text","empty":{}}"#,
        )
        .expect("seed");

        let store = OverrideStore::load(kv, KEY);
        assert_eq!(store.get().len(), 1);
        assert_eq!(
            store.get_one(&DocumentId::new("good")),
            Some(&DocumentPatch::title("ok"))
        );
    }

    #[test]
    fn empty_patch_for_unknown_id_writes_nothing() {
        let kv = MemoryKvStore::new();
        let mut store = OverrideStore::load(kv.clone(), KEY);
        store
            .set(&DocumentId::new("e1"), &DocumentPatch::default())
            .expect("noop set");
        assert!(kv.is_empty());
    }
}
