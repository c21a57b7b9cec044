//! Lookups that reject instead of returning nothing.
//!
//! A [`Model`] exposes two primitive lookups, `find_by_id` and `find_one`, both
//! returning `Ok(None)` when no document matches. Attaching the policy with
//! [`FindOrErrorExt::find_or_error`] yields a [`FindOrError`] whose
//! `find_by_id_or_error` / `find_one_or_error` operations return the document
//! unchanged, or a [`FindError::NotFound`] built either by a caller-supplied
//! factory or from the default message template:
//!
//! - `Couldn't find {model} by id "{id}"`
//! - `Couldn't find {model} by query`
//!
//! Errors from the primitives come back as [`FindError::Store`], untouched.
//!
//! # Example
//!
//! ```
//! use find_or_error::{FindOrErrorExt, FindOrErrorModel, FindOrErrorOptions, Model};
//!
//! # async fn example<M>(model: M, id: M::Id) -> Result<(), Box<dyn std::error::Error>>
//! # where
//! #     M: Model + 'static,
//! #     M::Id: 'static,
//! #     M::Query: 'static,
//! # {
//! let model = model.find_or_error(
//!     FindOrErrorOptions::new()
//!         .find_by_id_error(|id, model| format!("No {model} by id \"{id}\"").into()),
//! );
//!
//! match model.find_by_id_or_error(&id).await {
//!     Ok(_document) => {}
//!     Err(err) if err.is_not_found() => println!("{err}"),
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combinator;
pub mod decorator;
pub mod error;
pub mod model;
pub mod options;

pub use combinator::{exists_or_else, exists_or_error};
pub use decorator::{FindOrError, FindOrErrorExt, FindOrErrorModel};
pub use error::{BoxError, FindError, LookupKind, NotFoundError};
pub use model::Model;
pub use options::{ErrorFactory, FindOrErrorOptions};
