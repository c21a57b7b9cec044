//! Document storage for find-or-error models.
//!
//! Documents are JSON objects grouped into named collections and keyed by
//! [`DocumentId`]. A [`Collection`] gives a typed view over one collection and
//! implements [`find_or_error::Model`], so the find-or-error operations can be
//! attached to it.
//!
//! Two backends implement [`Store`]:
//!
//! - [`RocksStore`]: persistent, one `RocksDB` column family holding every
//!   collection under a `collection || 0x00` key prefix
//! - [`MemoryStore`]: in-process maps, for tests and ephemeral data
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use find_or_error::{FindOrErrorExt, FindOrErrorModel};
//! use find_or_error_store::{connect, Collection, Document, DocumentId, StoreConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Example {
//!     #[serde(rename = "_id")]
//!     id: DocumentId,
//! }
//!
//! impl Document for Example {
//!     fn id(&self) -> DocumentId {
//!         self.id
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(connect(&StoreConfig::from_env())?);
//! let examples = Collection::<Example, _>::new("Example", store).find_or_error_default();
//!
//! let doc = examples.find_by_id_or_error(&DocumentId::generate()).await;
//! assert!(doc.is_err());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collection;
pub mod config;
pub mod database;
pub mod error;
pub mod keys;
pub mod memory;
pub mod query;
pub mod rocks;
pub mod schema;

pub use collection::{Collection, Document};
pub use config::StoreConfig;
pub use database::{connect, disconnect};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use query::Query;
pub use rocks::RocksStore;

pub use find_or_error_core::DocumentId;

use serde_json::Value;

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing). Lookups return `Ok(None)` when
/// nothing matches; `Err` is reserved for failures of the store itself.
pub trait Store: Send + Sync {
    /// Insert or replace a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection name is invalid or the database operation fails.
    fn put_document(&self, collection: &str, id: &DocumentId, document: &Value) -> Result<()>;

    /// Get a document by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_document(&self, collection: &str, id: &DocumentId) -> Result<Option<Value>>;

    /// Get the first document, in id order, matching a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_document(&self, collection: &str, query: &Query) -> Result<Option<Value>>;

    /// List every document of a collection, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_documents(&self, collection: &str) -> Result<Vec<Value>>;

    /// Count the documents of a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_documents(&self, collection: &str) -> Result<u64>;

    /// Delete a document by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document doesn't exist.
    fn delete_document(&self, collection: &str, id: &DocumentId) -> Result<()>;

    /// Remove every document of a collection, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn drop_collection(&self, collection: &str) -> Result<u64>;

    /// Remove every document of every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn clean(&self) -> Result<()>;
}
