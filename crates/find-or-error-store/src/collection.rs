//! Typed collections exposed as find-or-error models.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use find_or_error::Model;
use find_or_error_core::DocumentId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::query::Query;
use crate::schema::ID_FIELD;
use crate::Store;

/// A value stored in a [`Collection`].
///
/// The document must serialize to a JSON object. Its id is written under
/// `_id` on insert, so [`Query::by_id`] matches it whether or not the type
/// serializes the field itself.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The identifier this document is stored under.
    fn id(&self) -> DocumentId;
}

/// A named, typed view over one collection of a [`Store`].
///
/// The collection name doubles as the model name in find-or-error messages.
pub struct Collection<D, S> {
    name: String,
    store: Arc<S>,
    _document: PhantomData<fn() -> D>,
}

impl<D: Document, S: Store> Collection<D, S> {
    /// Create a collection handle.
    #[must_use]
    pub fn new(name: impl Into<String>, store: Arc<S>) -> Self {
        Self {
            name: name.into(),
            store,
            _document: PhantomData,
        }
    }

    /// The collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save a document, replacing any document with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the document is not a JSON object.
    pub fn insert(&self, document: &D) -> Result<DocumentId> {
        let id = document.id();
        let mut value =
            serde_json::to_value(document).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let Value::Object(fields) = &mut value else {
            return Err(StoreError::Serialization(format!(
                "{} document does not serialize to an object",
                self.name
            )));
        };
        fields.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        self.store.put_document(&self.name, &id, &value)?;
        Ok(id)
    }

    /// Get a document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the stored document cannot be decoded.
    pub fn get(&self, id: &DocumentId) -> Result<Option<D>> {
        self.store
            .get_document(&self.name, id)?
            .map(Self::decode)
            .transpose()
    }

    /// Get the first document matching a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the stored document cannot be decoded.
    pub fn find(&self, query: &Query) -> Result<Option<D>> {
        self.store
            .find_document(&self.name, query)?
            .map(Self::decode)
            .transpose()
    }

    /// List every document in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a stored document cannot be decoded.
    pub fn list(&self) -> Result<Vec<D>> {
        self.store
            .list_documents(&self.name)?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    /// Count the documents in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn count(&self) -> Result<u64> {
        self.store.count_documents(&self.name)
    }

    /// Delete a document by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document doesn't exist.
    pub fn delete(&self, id: &DocumentId) -> Result<()> {
        self.store.delete_document(&self.name, id)
    }

    /// Remove every document in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn clear(&self) -> Result<u64> {
        self.store.drop_collection(&self.name)
    }

    fn decode(value: Value) -> Result<D> {
        serde_json::from_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl<D, S> Clone for Collection<D, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: Arc::clone(&self.store),
            _document: PhantomData,
        }
    }
}

impl<D, S> fmt::Debug for Collection<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<D: Document, S: Store + 'static> Model for Collection<D, S> {
    type Id = DocumentId;
    type Query = Query;
    type Document = D;
    type Error = StoreError;

    fn model_name(&self) -> &str {
        &self.name
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<D>> {
        self.get(id)
    }

    async fn find_one(&self, query: &Query) -> Result<Option<D>> {
        self.find(query)
    }
}
