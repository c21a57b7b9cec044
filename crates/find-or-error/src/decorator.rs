//! Attaching the find-or-error operations to a model.

use std::fmt;

use async_trait::async_trait;
use futures::TryFutureExt;

use crate::combinator::exists_or_else;
use crate::error::{FindError, LookupKind};
use crate::model::Model;
use crate::options::FindOrErrorOptions;

/// Lookups that fail instead of returning nothing.
///
/// Each call issues exactly one primitive lookup and resolves to either the
/// found document, unchanged, or a single error.
#[async_trait]
pub trait FindOrErrorModel: Model {
    /// Find a document by identifier, failing if there is none.
    ///
    /// # Errors
    ///
    /// Returns `FindError::NotFound` if no document has this identifier,
    /// or `FindError::Store` if the underlying lookup fails.
    async fn find_by_id_or_error(
        &self,
        id: &Self::Id,
    ) -> Result<Self::Document, FindError<Self::Error>>;

    /// Find the first document matching a query, failing if there is none.
    ///
    /// # Errors
    ///
    /// Returns `FindError::NotFound` if nothing matches the query,
    /// or `FindError::Store` if the underlying lookup fails.
    async fn find_one_or_error(
        &self,
        query: &Self::Query,
    ) -> Result<Self::Document, FindError<Self::Error>>;
}

/// A model with the find-or-error operations attached.
///
/// The wrapped model's own lookups stay available through the [`Model`]
/// implementation, which delegates to it.
pub struct FindOrError<M: Model> {
    model: M,
    options: FindOrErrorOptions<M::Id, M::Query>,
}

impl<M: Model> FindOrError<M> {
    /// Attach the operations to `model` with the given options.
    #[must_use]
    pub const fn new(model: M, options: FindOrErrorOptions<M::Id, M::Query>) -> Self {
        Self { model, options }
    }

    /// Get a reference to the wrapped model.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Get the options this model was decorated with.
    #[must_use]
    pub const fn options(&self) -> &FindOrErrorOptions<M::Id, M::Query> {
        &self.options
    }

    /// Unwrap the model, dropping the options.
    #[must_use]
    pub fn into_inner(self) -> M {
        self.model
    }
}

impl<M: Model> fmt::Debug for FindOrError<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOrError")
            .field("model", &self.model.model_name())
            .field("options", &self.options)
            .finish()
    }
}

#[async_trait]
impl<M: Model> Model for FindOrError<M> {
    type Id = M::Id;
    type Query = M::Query;
    type Document = M::Document;
    type Error = M::Error;

    fn model_name(&self) -> &str {
        self.model.model_name()
    }

    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Document>, Self::Error> {
        self.model.find_by_id(id).await
    }

    async fn find_one(
        &self,
        query: &Self::Query,
    ) -> Result<Option<Self::Document>, Self::Error> {
        self.model.find_one(query).await
    }
}

#[async_trait]
impl<M: Model> FindOrErrorModel for FindOrError<M> {
    async fn find_by_id_or_error(
        &self,
        id: &Self::Id,
    ) -> Result<Self::Document, FindError<Self::Error>> {
        let pending = self.model.find_by_id(id).map_err(FindError::Store);

        exists_or_else(pending, || {
            let model = self.model.model_name();
            tracing::debug!(model, kind = %LookupKind::ById, id = %id, "Document not found");
            FindError::NotFound(self.options.id_error(id, model))
        })
        .await
    }

    async fn find_one_or_error(
        &self,
        query: &Self::Query,
    ) -> Result<Self::Document, FindError<Self::Error>> {
        let pending = self.model.find_one(query).map_err(FindError::Store);

        exists_or_else(pending, || {
            let model = self.model.model_name();
            tracing::debug!(model, kind = %LookupKind::ByQuery, "Document not found");
            FindError::NotFound(self.options.query_error(query, model))
        })
        .await
    }
}

/// Attach the find-or-error operations to any [`Model`].
pub trait FindOrErrorExt: Model + Sized {
    /// Decorate this model with the given error factories.
    #[must_use]
    fn find_or_error(self, options: FindOrErrorOptions<Self::Id, Self::Query>) -> FindOrError<Self> {
        FindOrError::new(self, options)
    }

    /// Decorate this model using the default error messages.
    #[must_use]
    fn find_or_error_default(self) -> FindOrError<Self> {
        FindOrError::new(self, FindOrErrorOptions::new())
    }
}

impl<M: Model> FindOrErrorExt for M {}
