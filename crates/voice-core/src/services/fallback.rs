//! Degrade-to-default policy for calls into external services.

use std::fmt::Display;
use std::future::Future;

/// Await `call`; on error, log it and return `fallback()` instead.
///
/// This is the single place where a dependency failure is absorbed. The
/// caller never sees the error, only the substitute value.
pub async fn or_fallback<T, E, Fut, F>(operation: &'static str, call: Fut, fallback: F) -> T
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    F: FnOnce() -> T,
{
    match call.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(operation, error = %e, "External call failed, using fallback");
            fallback()
        }
    }
}
