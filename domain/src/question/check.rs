//! Check functions and the classification of what they produce

use crate::error::InquiryError;
use crate::outcome::Outcome;
use crate::record::InquiryRecord;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// What a check produced, classified before accumulation
///
/// Every check result falls into one of these shapes; the chain decides how
/// to accumulate each one:
///
/// - an [`Outcome`] is accumulated directly by its tag;
/// - a nested chain's record has its fail and pass accumulators merged into
///   the parent at the current position (one level of flattening);
/// - a bare value is promoted to a single-element Pass;
/// - an error raised inside a nested chain propagates and is never absorbed
///   into the fail accumulator.
#[derive(Debug)]
pub enum Finding<T, V> {
    Outcome(Outcome<V>),
    Nested(Box<InquiryRecord<T, V>>),
    Value(V),
    Error(InquiryError),
}

impl<T, V> Finding<T, V> {
    /// Promote a bare value; it accumulates as a single-element Pass
    pub fn value(value: V) -> Self {
        Finding::Value(value)
    }

    /// Merge a nested chain's accumulators into the parent
    pub fn nested(record: InquiryRecord<T, V>) -> Self {
        Finding::Nested(Box::new(record))
    }
}

impl<T, V> From<Outcome<V>> for Finding<T, V> {
    fn from(outcome: Outcome<V>) -> Self {
        Finding::Outcome(outcome)
    }
}

impl<T, V> From<InquiryError> for Finding<T, V> {
    fn from(error: InquiryError) -> Self {
        Finding::Error(error)
    }
}

/// How a deferred check settles: resolution with a finding, or rejection
/// carrying an outcome. A rejection carrying `Fail(x)` accumulates exactly
/// as if the check had resolved with `Fail(x)`.
pub type Settlement<T, V> = Result<Finding<T, V>, Outcome<V>>;

/// Conversion into a [`Settlement`], so deferred checks can resolve with an
/// `Outcome`, a `Finding`, or a `Result` using the rejection channel.
pub trait IntoSettlement<T, V> {
    fn into_settlement(self) -> Settlement<T, V>;
}

impl<T, V> IntoSettlement<T, V> for Outcome<V> {
    fn into_settlement(self) -> Settlement<T, V> {
        Ok(Finding::Outcome(self))
    }
}

impl<T, V> IntoSettlement<T, V> for Finding<T, V> {
    fn into_settlement(self) -> Settlement<T, V> {
        Ok(self)
    }
}

impl<T, V, O> IntoSettlement<T, V> for Result<O, Outcome<V>>
where
    O: Into<Finding<T, V>>,
{
    fn into_settlement(self) -> Settlement<T, V> {
        self.map(Into::into)
    }
}

pub type ImmediateFn<T, V> = dyn Fn(&T) -> Finding<T, V> + Send + Sync;
pub type DeferredFn<T, V> = dyn Fn(&T) -> BoxFuture<'static, Settlement<T, V>> + Send + Sync;
pub type CurriedFn<T, V> = dyn Fn(&V, &T) -> Finding<T, V> + Send + Sync;

/// A check runnable against a subject
///
/// - `Immediate` checks answer synchronously.
/// - `Deferred` checks suspend the chain until their future settles.
/// - `Curried` checks take an item as well as the subject and are run once
///   per item by `inquire_map`.
pub enum Check<T, V> {
    Immediate(Arc<ImmediateFn<T, V>>),
    Deferred(Arc<DeferredFn<T, V>>),
    Curried(Arc<CurriedFn<T, V>>),
}

impl<T, V> Check<T, V> {
    /// A synchronous check
    pub fn immediate<F, O>(f: F) -> Self
    where
        F: Fn(&T) -> O + Send + Sync + 'static,
        O: Into<Finding<T, V>>,
    {
        Check::Immediate(Arc::new(move |subject| f(subject).into()))
    }

    /// An asynchronous check; the chain suspends until it settles
    pub fn deferred<F, Fut, O>(f: F) -> Self
    where
        F: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoSettlement<T, V>,
    {
        Check::Deferred(Arc::new(move |subject| {
            let settling = f(subject);
            Box::pin(async move { settling.await.into_settlement() })
        }))
    }

    /// A per-item check for `inquire_map`; the orchestrator applies it to
    /// `(item, subject)` for each item in order
    pub fn curried<F, O>(f: F) -> Self
    where
        F: Fn(&V, &T) -> O + Send + Sync + 'static,
        O: Into<Finding<T, V>>,
    {
        Check::Curried(Arc::new(move |item, subject| f(item, subject).into()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Check::Immediate(_) => "immediate",
            Check::Deferred(_) => "deferred",
            Check::Curried(_) => "curried",
        }
    }
}

impl<T, V> Clone for Check<T, V> {
    fn clone(&self) -> Self {
        match self {
            Check::Immediate(f) => Check::Immediate(Arc::clone(f)),
            Check::Deferred(f) => Check::Deferred(Arc::clone(f)),
            Check::Curried(f) => Check::Curried(Arc::clone(f)),
        }
    }
}

impl<T, V> fmt::Debug for Check<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check::{}", self.kind())
    }
}
