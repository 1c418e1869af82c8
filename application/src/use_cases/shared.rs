//! Shared utilities for use cases.
//!
//! Cancellation checking and timeout wrapping used by the cycle use case.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Whether the optional token has been cancelled.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

/// Await `future`, giving up after `limit` when one is set.
///
/// Returns `None` on timeout.
pub(crate) async fn with_optional_timeout<F: Future>(
    limit: Option<Duration>,
    future: F,
) -> Option<F::Output> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, future).await.ok(),
        None => Some(future.await),
    }
}

/// Await `future` unless the token is cancelled first.
///
/// Returns `None` on cancellation.
pub(crate) async fn race_cancellation<F: Future>(
    token: &Option<CancellationToken>,
    future: F,
) -> Option<F::Output> {
    match token {
        Some(token) => tokio::select! {
            _ = token.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}
