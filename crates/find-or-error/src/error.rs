//! Error types for find-or-error lookups.

use std::fmt;

use thiserror::Error;

/// A boxed error as produced by an error factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which lookup failed to find a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// `find_by_id_or_error`.
    ById,
    /// `find_one_or_error`.
    ByQuery,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById => f.write_str("id"),
            Self::ByQuery => f.write_str("query"),
        }
    }
}

/// The error built when no factory is configured for a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NotFoundError {
    model: String,
    kind: LookupKind,
    message: String,
}

impl NotFoundError {
    /// `Couldn't find {model} by id "{id}"`.
    #[must_use]
    pub fn by_id(model: &str, id: &impl fmt::Display) -> Self {
        Self {
            model: model.to_string(),
            kind: LookupKind::ById,
            message: format!("Couldn't find {model} by id \"{id}\""),
        }
    }

    /// `Couldn't find {model} by query`.
    #[must_use]
    pub fn by_query(model: &str) -> Self {
        Self {
            model: model.to_string(),
            kind: LookupKind::ByQuery,
            message: format!("Couldn't find {model} by query"),
        }
    }

    /// Name of the model that was searched.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The lookup that came back empty.
    #[must_use]
    pub const fn kind(&self) -> LookupKind {
        self.kind
    }

    /// The rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure of a `*_or_error` lookup.
///
/// `E` is the error type of the underlying model.
#[derive(Debug, Error)]
pub enum FindError<E> {
    /// No document matched. Holds the constructed error, either the
    /// caller's factory output or a [`NotFoundError`].
    #[error("{0}")]
    NotFound(BoxError),

    /// The underlying lookup failed.
    #[error(transparent)]
    Store(E),
}

impl<E> FindError<E> {
    /// Returns true if no document matched.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The constructed not-found error, if that is what this is.
    ///
    /// Downcast it to recover a concrete type:
    ///
    /// ```
    /// use find_or_error::{FindError, NotFoundError};
    ///
    /// let err: FindError<std::io::Error> =
    ///     FindError::NotFound(Box::new(NotFoundError::by_query("Example")));
    /// let not_found = err
    ///     .not_found()
    ///     .and_then(|e| e.downcast_ref::<NotFoundError>())
    ///     .unwrap();
    /// assert_eq!(not_found.model(), "Example");
    /// ```
    #[must_use]
    pub fn not_found(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::NotFound(err) => Some(err.as_ref()),
            Self::Store(_) => None,
        }
    }

    /// The underlying store error, if that is what this is.
    #[must_use]
    pub const fn store(&self) -> Option<&E> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }

    /// Consume the error, returning the store error if there is one.
    #[must_use]
    pub fn into_store(self) -> Option<E> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messages() {
        assert_eq!(
            NotFoundError::by_id("Example", &"5f0c").to_string(),
            "Couldn't find Example by id \"5f0c\""
        );
        assert_eq!(
            NotFoundError::by_query("Example").to_string(),
            "Couldn't find Example by query"
        );
    }

    #[test]
    fn not_found_error_fields() {
        let err = NotFoundError::by_id("Example", &7);
        assert_eq!(err.model(), "Example");
        assert_eq!(err.kind(), LookupKind::ById);
        assert_eq!(err.message(), "Couldn't find Example by id \"7\"");
        assert_eq!(NotFoundError::by_query("Example").kind(), LookupKind::ByQuery);
    }

    #[test]
    fn find_error_display() {
        let not_found: FindError<std::io::Error> =
            FindError::NotFound("No Example here".into());
        assert_eq!(not_found.to_string(), "No Example here");
        assert!(not_found.is_not_found());
        assert!(not_found.store().is_none());

        let store: FindError<std::io::Error> =
            FindError::Store(std::io::Error::other("connection reset"));
        assert_eq!(store.to_string(), "connection reset");
        assert!(!store.is_not_found());
        assert!(store.not_found().is_none());
        assert_eq!(
            store.into_store().map(|e| e.kind()),
            Some(std::io::ErrorKind::Other)
        );
    }

    #[test]
    fn lookup_kind_display() {
        assert_eq!(LookupKind::ById.to_string(), "id");
        assert_eq!(LookupKind::ByQuery.to_string(), "query");
    }
}
