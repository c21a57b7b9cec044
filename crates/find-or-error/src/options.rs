//! Per-model configuration of the errors raised on a missing document.

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, NotFoundError};

/// Builds the error for a failed lookup from the lookup key and the model name.
pub type ErrorFactory<K> = Arc<dyn Fn(&K, &str) -> BoxError + Send + Sync>;

/// Error factories for one model.
///
/// Both factories are optional. A lookup without a factory fails with a
/// [`NotFoundError`] carrying the default message. Options are fixed once
/// attached; clones share the same factories.
pub struct FindOrErrorOptions<Id, Q> {
    find_by_id_error: Option<ErrorFactory<Id>>,
    find_one_error: Option<ErrorFactory<Q>>,
}

impl<Id, Q> FindOrErrorOptions<Id, Q> {
    /// Options with no factories: both lookups use the default messages.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            find_by_id_error: None,
            find_one_error: None,
        }
    }

    /// Set the factory used when `find_by_id_or_error` finds nothing.
    #[must_use]
    pub fn find_by_id_error<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Id, &str) -> BoxError + Send + Sync + 'static,
    {
        self.find_by_id_error = Some(Arc::new(factory));
        self
    }

    /// Set the factory used when `find_one_or_error` finds nothing.
    #[must_use]
    pub fn find_one_error<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Q, &str) -> BoxError + Send + Sync + 'static,
    {
        self.find_one_error = Some(Arc::new(factory));
        self
    }

    /// Returns true if a `find_by_id` factory is configured.
    #[must_use]
    pub const fn has_find_by_id_error(&self) -> bool {
        self.find_by_id_error.is_some()
    }

    /// Returns true if a `find_one` factory is configured.
    #[must_use]
    pub const fn has_find_one_error(&self) -> bool {
        self.find_one_error.is_some()
    }

    /// Build the error for a missing query match.
    pub(crate) fn query_error(&self, query: &Q, model: &str) -> BoxError {
        match &self.find_one_error {
            Some(factory) => factory(query, model),
            None => Box::new(NotFoundError::by_query(model)),
        }
    }
}

impl<Id: fmt::Display, Q> FindOrErrorOptions<Id, Q> {
    /// Build the error for a missing identifier.
    pub(crate) fn id_error(&self, id: &Id, model: &str) -> BoxError {
        match &self.find_by_id_error {
            Some(factory) => factory(id, model),
            None => Box::new(NotFoundError::by_id(model, id)),
        }
    }
}

impl<Id, Q> Default for FindOrErrorOptions<Id, Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, Q> Clone for FindOrErrorOptions<Id, Q> {
    fn clone(&self) -> Self {
        Self {
            find_by_id_error: self.find_by_id_error.clone(),
            find_one_error: self.find_one_error.clone(),
        }
    }
}

impl<Id, Q> fmt::Debug for FindOrErrorOptions<Id, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOrErrorOptions")
            .field("find_by_id_error", &self.has_find_by_id_error())
            .field("find_one_error", &self.has_find_one_error())
            .finish()
    }
}
