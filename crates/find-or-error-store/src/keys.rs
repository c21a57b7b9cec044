//! Key encoding utilities for `RocksDB`.
//!
//! Document keys are `collection || 0x00 || document_id`, so every document of
//! a collection sits under one prefix and sorts by id.

use find_or_error_core::ids::DOCUMENT_ID_LEN;
use find_or_error_core::DocumentId;

use crate::error::{Result, StoreError};

const SEPARATOR: u8 = 0;

/// Check that a collection name can be used as a key prefix.
///
/// # Errors
///
/// Returns `StoreError::InvalidCollection` if the name is empty or contains a NUL byte.
pub fn validate_collection(collection: &str) -> Result<()> {
    if collection.is_empty() || collection.as_bytes().contains(&SEPARATOR) {
        return Err(StoreError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}

/// Encode a collection prefix for scanning all documents of a collection.
#[must_use]
pub fn collection_prefix(collection: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(collection.len() + 1);
    key.extend_from_slice(collection.as_bytes());
    key.push(SEPARATOR);
    key
}

/// Encode a document key: `collection || 0x00 || document_id`.
#[must_use]
pub fn document_key(collection: &str, id: &DocumentId) -> Vec<u8> {
    let mut key = collection_prefix(collection);
    key.extend_from_slice(id.as_bytes());
    key
}

/// Extract the document ID from a document key.
///
/// Returns `None` if the key is too short to hold an id.
#[must_use]
pub fn extract_document_id(key: &[u8]) -> Option<DocumentId> {
    let start = key.len().checked_sub(DOCUMENT_ID_LEN)?;
    let bytes: [u8; DOCUMENT_ID_LEN] = key[start..].try_into().ok()?;
    Some(DocumentId::from_bytes(bytes))
}
