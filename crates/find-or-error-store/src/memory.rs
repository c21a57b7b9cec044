//! In-memory storage implementation.

use std::collections::{BTreeMap, HashMap};

use find_or_error_core::DocumentId;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::keys;
use crate::query::Query;
use crate::Store;

/// A `Store` kept entirely in process memory.
///
/// Documents of a collection are ordered by id, matching the key order of
/// [`RocksStore`](crate::RocksStore).
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<DocumentId, Value>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the collections currently holding documents.
    #[must_use]
    pub fn collection_names(&self) -> Vec<String> {
        self.collections
            .read()
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Store for MemoryStore {
    fn put_document(&self, collection: &str, id: &DocumentId, document: &Value) -> Result<()> {
        keys::validate_collection(collection)?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(*id, document.clone());
        Ok(())
    }

    fn get_document(&self, collection: &str, id: &DocumentId) -> Result<Option<Value>> {
        keys::validate_collection(collection)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    fn find_document(&self, collection: &str, query: &Query) -> Result<Option<Value>> {
        keys::validate_collection(collection)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|documents| documents.values().find(|doc| query.matches(doc)))
            .cloned())
    }

    fn list_documents(&self, collection: &str) -> Result<Vec<Value>> {
        keys::validate_collection(collection)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    fn count_documents(&self, collection: &str) -> Result<u64> {
        keys::validate_collection(collection)?;
        Ok(self
            .collections
            .read()
            .get(collection)
            .map_or(0, |documents| documents.len() as u64))
    }

    fn delete_document(&self, collection: &str, id: &DocumentId) -> Result<()> {
        keys::validate_collection(collection)?;
        self.collections
            .write()
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn drop_collection(&self, collection: &str) -> Result<u64> {
        keys::validate_collection(collection)?;
        Ok(self
            .collections
            .write()
            .remove(collection)
            .map_or(0, |documents| documents.len() as u64))
    }

    fn clean(&self) -> Result<()> {
        self.collections.write().clear();
        Ok(())
    }
}
