//! Cancellation capability
//!
//! An environment exposes a [`CancellationToken`]; long-running operations
//! observe it at every I/O boundary. [`cancellable`] is the helper backends
//! use to do that.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{FileError, FileResult};

/// Environment capability: a cancellation signal
pub trait HasCancel {
    /// Token observed by operations run in this environment
    fn cancel_token(&self) -> &CancellationToken;

    /// Whether cancellation has been requested
    fn is_cancelled(&self) -> bool {
        self.cancel_token().is_cancelled()
    }
}

/// Fail with `Canceled` if `token` has already fired
#[inline]
pub fn ensure_not_cancelled(token: &CancellationToken) -> FileResult<()> {
    if token.is_cancelled() {
        Err(FileError::Canceled)
    } else {
        Ok(())
    }
}

/// Run `work` unless `token` fires first.
///
/// A token that has already fired fails the call before `work` is polled,
/// so no effect of `work` can be observed. If the token fires while `work`
/// is suspended, `work` is dropped at that await point and the call fails
/// with `Canceled`.
pub async fn cancellable<T, F>(token: &CancellationToken, work: F) -> FileResult<T>
where
    F: Future<Output = FileResult<T>>,
{
    ensure_not_cancelled(token)?;
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(FileError::Canceled),
        result = work => result,
    }
}
