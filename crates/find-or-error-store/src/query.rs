//! Field-equality queries over JSON documents.

use std::collections::BTreeMap;

use find_or_error_core::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::ID_FIELD;

/// A conjunction of field predicates.
///
/// A document matches when every listed field exists and equals the given
/// value. Field names may use dots to reach into nested objects
/// (`"owner.name"`). The empty query matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    fields: BTreeMap<String, Value>,
}

impl Query {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A query matching the document with the given id.
    #[must_use]
    pub fn by_id(id: &DocumentId) -> Self {
        Self::new().where_eq(ID_FIELD, id.to_hex())
    }

    /// Add an equality predicate.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns true if the query has no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check whether a document satisfies every predicate.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| lookup_path(document, field) == Some(expected))
    }
}

fn lookup_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |value, segment| value.as_object()?.get(segment))
}
