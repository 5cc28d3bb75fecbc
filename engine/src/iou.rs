//! Deferred chain state

use inquest_domain::InquiryError;
use futures::future::BoxFuture;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Placeholder for chain state that has not settled yet
///
/// Holds the continuation of an asynchronous chain as a boxed future.
/// Continuations are strictly sequential: a deferred step chained with
/// [`Iou::defer`] begins only after everything before it has settled, which
/// is what keeps accumulators in declaration order regardless of per-step
/// latency. Once settled, nothing is pending by construction.
pub struct Iou<S> {
    inner: BoxFuture<'static, S>,
}

impl<S: Send + 'static> Iou<S> {
    /// State that is already settled
    pub fn settled(state: S) -> Self {
        Self {
            inner: Box::pin(std::future::ready(state)),
        }
    }

    /// State that settles once `future` does
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = S> + Send + 'static,
    {
        Self {
            inner: Box::pin(future),
        }
    }

    /// Chain a continuation onto the settled state
    pub fn defer<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
    {
        let inner = self.inner;
        Self {
            inner: Box::pin(async move { f(inner.await).await }),
        }
    }

    /// Chain a synchronous continuation onto the settled state
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(S) -> S + Send + 'static,
    {
        self.defer(|state| std::future::ready(f(state)))
    }

    /// Drive the chain to completion
    pub async fn settle(self) -> S {
        self.inner.await
    }

    /// Drive the chain to completion, waiting at most `limit`
    ///
    /// Bounds only how long the caller waits; an in-flight check is not
    /// cancelled, the chain is simply no longer awaited.
    pub async fn settle_within(self, limit: Duration) -> Result<S, InquiryError> {
        match tokio::time::timeout(limit, self.inner).await {
            Ok(state) => Ok(state),
            Err(_) => {
                warn!(limit_ms = limit.as_millis() as u64, "inquiry did not settle in time");
                Err(InquiryError::Timeout(limit))
            }
        }
    }
}
