//! Core types shared by the find-or-error crates.
//!
//! Currently this is the [`DocumentId`] used to key documents in the store.
//!
//! # Example
//!
//! ```
//! use find_or_error_core::DocumentId;
//!
//! let id = DocumentId::generate();
//! let parsed = DocumentId::from_hex(&id.to_hex()).unwrap();
//! assert_eq!(id, parsed);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;

pub use ids::{DocumentId, IdError};
