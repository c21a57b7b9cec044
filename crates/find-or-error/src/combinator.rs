//! Turning a pending optional value into a pending value or an error.

use std::future::Future;

/// Await `pending` and turn an absent value into `error`.
///
/// A present value is returned unchanged and an error already produced by
/// `pending` passes through untouched.
///
/// # Errors
///
/// Returns `error` if `pending` resolves to `Ok(None)`, or the error of
/// `pending` if it fails.
pub async fn exists_or_error<T, E, F>(pending: F, error: E) -> Result<T, E>
where
    F: Future<Output = Result<Option<T>, E>>,
{
    exists_or_else(pending, move || error).await
}

/// Like [`exists_or_error`], but builds the error only when the value is absent.
///
/// # Errors
///
/// Returns `make_error()` if `pending` resolves to `Ok(None)`, or the error of
/// `pending` if it fails.
pub async fn exists_or_else<T, E, F, G>(pending: F, make_error: G) -> Result<T, E>
where
    F: Future<Output = Result<Option<T>, E>>,
    G: FnOnce() -> E,
{
    match pending.await? {
        Some(value) => Ok(value),
        None => Err(make_error()),
    }
}
