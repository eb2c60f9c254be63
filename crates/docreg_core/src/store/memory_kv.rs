//! In-process `KvStore`.
//!
//! Clones share the same entries, so rebuilding overlay stores over a clone
//! behaves like a page reload against the same profile.

use super::{KvStore, StoreError, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    limit_bytes: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once total key+value bytes would
    /// exceed `limit_bytes`, like a browser storage quota.
    pub fn with_limit(limit_bytes: usize) -> Self {
        Self {
            entries: Rc::default(),
            limit_bytes: Some(limit_bytes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(limit_bytes) = self.limit_bytes {
            let required_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if required_bytes > limit_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    limit_bytes,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::store::{KvStore, StoreError};

    #[test]
    fn clones_share_entries() {
        let kv = MemoryKvStore::new();
        let reloaded = kv.clone();
        kv.set("k", "v").expect("set");
        assert_eq!(reloaded.get("k").expect("get").as_deref(), Some("v"));
    }

    #[test]
    fn limit_rejects_oversized_writes_and_keeps_previous_value() {
        let kv = MemoryKvStore::with_limit(8);
        kv.set("k", "1234").expect("fits");

        let err = kv.set("k", "123456789").expect_err("must exceed quota");
        assert!(matches!(err, StoreError::QuotaExceeded { limit_bytes: 8, .. }));
        assert_eq!(kv.get("k").expect("get").as_deref(), Some("1234"));
    }
}
