//! The model interface the policy is attached to.

use std::fmt;

use async_trait::async_trait;

/// A named collection of documents with two single-document lookups.
///
/// Both lookups must return `Ok(None)` when nothing matches and reserve `Err`
/// for genuine store failures. `None` is the only absence marker: any
/// `Some(_)` is a found document, whatever its content.
#[async_trait]
pub trait Model: Send + Sync {
    /// Identifier accepted by [`Model::find_by_id`].
    ///
    /// Rendered with `Display` in the default not-found message.
    type Id: fmt::Display + Send + Sync + 'static;

    /// Structured query accepted by [`Model::find_one`].
    type Query: Send + Sync + 'static;

    /// Document returned by both lookups.
    type Document: Send + 'static;

    /// Failure raised by the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human-readable model name, used verbatim in error messages.
    fn model_name(&self) -> &str;

    /// Look a document up by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Document>, Self::Error>;

    /// Look up the first document matching a query.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    async fn find_one(&self, query: &Self::Query)
        -> Result<Option<Self::Document>, Self::Error>;
}
