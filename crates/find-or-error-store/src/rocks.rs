//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Documents are stored CBOR-encoded in the [`cf::DOCUMENTS`] column family.

use std::path::Path;
use std::sync::Arc;

use find_or_error_core::DocumentId;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::keys;
use crate::query::Query;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, true)
    }

    /// Open a `RocksDB` database, creating it only if `create_if_missing` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_with<P: AsRef<Path>>(path: P, create_if_missing: bool) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(create_if_missing);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(path = %path.as_ref().display(), "Opened RocksDB document store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Flush pending writes to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&self) -> Result<()> {
        let cf = self.cf(cf::DOCUMENTS)?;
        self.db
            .flush_cf(&cf)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Visit every `(key, value)` pair under a prefix until `visit` returns false.
    fn scan_prefix<F>(&self, prefix: &[u8], mut visit: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Result<bool>,
    {
        let cf = self.cf(cf::DOCUMENTS)?;
        let iter = self.db.iterator_cf(
            &cf,
            IteratorMode::From(prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            // Stop if we're past the prefix
            if !key.starts_with(prefix) {
                break;
            }

            if !visit(&key[..], &value[..])? {
                break;
            }
        }

        Ok(())
    }

    /// Delete every key under a prefix, returning how many were deleted.
    fn delete_prefix(&self, prefix: &[u8]) -> Result<u64> {
        let cf = self.cf(cf::DOCUMENTS)?;

        let mut batch = WriteBatch::default();
        let mut count = 0u64;
        self.scan_prefix(prefix, |key, _| {
            batch.delete_cf(&cf, key);
            count += 1;
            Ok(true)
        })?;

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(count)
    }
}

impl Store for RocksStore {
    fn put_document(&self, collection: &str, id: &DocumentId, document: &Value) -> Result<()> {
        keys::validate_collection(collection)?;
        let cf = self.cf(cf::DOCUMENTS)?;
        let value = Self::serialize(document)?;

        self.db
            .put_cf(&cf, keys::document_key(collection, id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(collection, id = %id, "Stored document");

        Ok(())
    }

    fn get_document(&self, collection: &str, id: &DocumentId) -> Result<Option<Value>> {
        keys::validate_collection(collection)?;
        let cf = self.cf(cf::DOCUMENTS)?;

        self.db
            .get_cf(&cf, keys::document_key(collection, id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn find_document(&self, collection: &str, query: &Query) -> Result<Option<Value>> {
        keys::validate_collection(collection)?;

        let mut found = None;
        self.scan_prefix(&keys::collection_prefix(collection), |_, data| {
            let document: Value = Self::deserialize(data)?;
            if query.matches(&document) {
                found = Some(document);
                return Ok(false);
            }
            Ok(true)
        })?;

        Ok(found)
    }

    fn list_documents(&self, collection: &str) -> Result<Vec<Value>> {
        keys::validate_collection(collection)?;

        let mut documents = Vec::new();
        self.scan_prefix(&keys::collection_prefix(collection), |_, data| {
            documents.push(Self::deserialize(data)?);
            Ok(true)
        })?;

        Ok(documents)
    }

    fn count_documents(&self, collection: &str) -> Result<u64> {
        keys::validate_collection(collection)?;

        let mut count = 0u64;
        self.scan_prefix(&keys::collection_prefix(collection), |_, _| {
            count += 1;
            Ok(true)
        })?;

        Ok(count)
    }

    fn delete_document(&self, collection: &str, id: &DocumentId) -> Result<()> {
        keys::validate_collection(collection)?;
        let cf = self.cf(cf::DOCUMENTS)?;
        let key = keys::document_key(collection, id);

        let exists = self
            .db
            .get_pinned_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if !exists {
            return Err(StoreError::NotFound);
        }

        self.db
            .delete_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(collection, id = %id, "Deleted document");

        Ok(())
    }

    fn drop_collection(&self, collection: &str) -> Result<u64> {
        keys::validate_collection(collection)?;

        let removed = self.delete_prefix(&keys::collection_prefix(collection))?;

        tracing::info!(collection, removed, "Dropped collection");

        Ok(removed)
    }

    fn clean(&self) -> Result<()> {
        let removed = self.delete_prefix(&[])?;

        tracing::info!(removed, "Cleaned document store");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn create_test_document(id: &DocumentId, name: &str) -> Value {
        json!({ "_id": id.to_hex(), "name": name, "count": 0 })
    }

    #[test]
    fn document_crud() {
        let (store, _dir) = create_test_store();
        let id = DocumentId::generate();
        let doc = create_test_document(&id, "first");

        // Create
        store.put_document("Example", &id, &doc).unwrap();

        // Read
        let retrieved = store.get_document("Example", &id).unwrap().unwrap();
        assert_eq!(retrieved, doc);

        // Update
        let updated = create_test_document(&id, "renamed");
        store.put_document("Example", &id, &updated).unwrap();
        assert_eq!(
            store.get_document("Example", &id).unwrap().unwrap()["name"],
            "renamed"
        );

        // Delete
        store.delete_document("Example", &id).unwrap();
        assert!(store.get_document("Example", &id).unwrap().is_none());
    }

    #[test]
    fn delete_missing_document() {
        let (store, _dir) = create_test_store();
        let result = store.delete_document("Example", &DocumentId::generate());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn collections_are_isolated() {
        let (store, _dir) = create_test_store();
        let id = DocumentId::generate();

        store
            .put_document("Example", &id, &create_test_document(&id, "a"))
            .unwrap();
        store
            .put_document("ExampleB", &DocumentId::generate(), &json!({ "name": "b" }))
            .unwrap();

        assert!(store.get_document("ExampleB", &id).unwrap().is_none());
        assert_eq!(store.count_documents("Example").unwrap(), 1);
        assert_eq!(store.count_documents("ExampleB").unwrap(), 1);
        assert_eq!(store.list_documents("Example").unwrap().len(), 1);
    }

    #[test]
    fn find_document_by_query() {
        let (store, _dir) = create_test_store();
        let first = DocumentId::from_bytes([1u8; 12]);
        let second = DocumentId::from_bytes([2u8; 12]);

        store
            .put_document("Example", &second, &create_test_document(&second, "b"))
            .unwrap();
        store
            .put_document("Example", &first, &create_test_document(&first, "a"))
            .unwrap();

        let found = store
            .find_document("Example", &Query::new().where_eq("name", "b"))
            .unwrap()
            .unwrap();
        assert_eq!(found["_id"], second.to_hex());

        let found = store
            .find_document("Example", &Query::by_id(&first))
            .unwrap()
            .unwrap();
        assert_eq!(found["name"], "a");

        // Empty query returns the lowest id
        let found = store.find_document("Example", &Query::new()).unwrap().unwrap();
        assert_eq!(found["_id"], first.to_hex());

        assert!(store
            .find_document("Example", &Query::new().where_eq("name", "c"))
            .unwrap()
            .is_none());
        assert!(store
            .find_document("Other", &Query::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn drop_collection_and_clean() {
        let (store, _dir) = create_test_store();

        for _ in 0..3 {
            let id = DocumentId::generate();
            store
                .put_document("Example", &id, &create_test_document(&id, "a"))
                .unwrap();
        }
        let other = DocumentId::generate();
        store
            .put_document("Other", &other, &create_test_document(&other, "b"))
            .unwrap();

        assert_eq!(store.drop_collection("Example").unwrap(), 3);
        assert_eq!(store.count_documents("Example").unwrap(), 0);
        assert_eq!(store.count_documents("Other").unwrap(), 1);

        store.clean().unwrap();
        assert_eq!(store.count_documents("Other").unwrap(), 0);
    }

    #[test]
    fn invalid_collection_rejected() {
        let (store, _dir) = create_test_store();
        let id = DocumentId::generate();
        let result = store.put_document("", &id, &json!({}));
        assert!(matches!(result, Err(StoreError::InvalidCollection(_))));
    }

    #[test]
    fn reopen_keeps_documents() {
        let dir = TempDir::new().unwrap();
        let id = DocumentId::generate();

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store
                .put_document("Example", &id, &create_test_document(&id, "kept"))
                .unwrap();
            store.flush().unwrap();
        }

        let store = RocksStore::open_with(dir.path(), false).unwrap();
        let doc = store.get_document("Example", &id).unwrap().unwrap();
        assert_eq!(doc["name"], "kept");
    }

    #[test]
    fn open_missing_without_create_fails() {
        let dir = TempDir::new().unwrap();
        let result = RocksStore::open_with(dir.path().join("absent"), false);
        assert!(matches!(result, Err(StoreError::Database(_))));
    }
}
