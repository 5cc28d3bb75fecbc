//! Asynchronous inquiry chains

use crate::dispatch;
use crate::inquiry::Inquiry;
use crate::iou::Iou;
use inquest_domain::{InquiryError, InquiryRecord, Outcome, Probe, Questionset};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

pub(crate) type ChainState<T, V> = Result<InquiryRecord<T, V>, InquiryError>;

/// An asynchronous chain of checks over one subject
///
/// The surface mirrors [`Inquiry`], and additionally accepts deferred
/// checks. Steps are strictly sequential: a deferred check is started only
/// after everything declared before it has settled, so the accumulators
/// always follow declaration order regardless of per-check latency. As in
/// the synchronous chain, misuse poisons the state and surfaces at the
/// terminal combinator.
pub struct AsyncInquiry<T, V> {
    state: Iou<ChainState<T, V>>,
}

/// What [`AsyncInquiry::faulted`] settles into: the failure handler's
/// verdict, or the still-open chain when nothing failed
pub enum Faulted<T, V, R> {
    Fault(R),
    Clear(Inquiry<T, V>),
}

impl<T, V> AsyncInquiry<T, V>
where
    T: Send + 'static,
    V: Clone + Send + 'static,
{
    /// Start a chain around a subject
    pub fn subject(subject: T) -> Self {
        Self {
            state: Iou::settled(Ok(InquiryRecord::new(subject))),
        }
    }

    /// Start a fresh chain around another chain's subject, discarding its
    /// accumulators, registry and audit trail
    pub fn subject_from(other: AsyncInquiry<T, V>) -> Self {
        Self {
            state: other.state.map(|state| {
                state.map(|record| InquiryRecord::with_subject(record.subject))
            }),
        }
    }

    /// Lift an existing record into a chain
    pub fn of(record: InquiryRecord<T, V>) -> Self {
        Self {
            state: Iou::settled(Ok(record)),
        }
    }

    /// Queue one step behind everything declared so far
    fn step<F, Fut>(self, f: F) -> Self
    where
        F: FnOnce(InquiryRecord<T, V>) -> Fut + Send + 'static,
        Fut: Future<Output = ChainState<T, V>> + Send + 'static,
    {
        Self {
            state: self.state.defer(move |state| async move {
                match state {
                    Ok(record) => f(record).await,
                    Err(error) => Err(error),
                }
            }),
        }
    }

    fn step_sync<F>(self, f: F) -> Self
    where
        F: FnOnce(InquiryRecord<T, V>) -> ChainState<T, V> + Send + 'static,
    {
        self.step(|record| std::future::ready(f(record)))
    }

    /// Attach a registry of named checks for later lookups by name
    pub fn using(self, questionset: Questionset<T, V>) -> Self {
        self.step_sync(|mut record| {
            record.questionset = questionset;
            Ok(record)
        })
    }

    /// Attach an audit callback, invoked once per named check as it records
    pub fn informant(self, f: impl Fn(&str, &Outcome<V>) + Send + Sync + 'static) -> Self {
        self.step_sync(|mut record| {
            record.informant = Some(Arc::new(f));
            Ok(record)
        })
    }

    /// Run one check against the subject and accumulate what it produced.
    /// A deferred check suspends the chain until it settles; checks declared
    /// after it wait their turn.
    pub fn inquire(self, probe: impl Into<Probe<T, V>>) -> Self {
        let probe = probe.into();
        self.step(move |mut record| async move {
            let (label, check) = dispatch::resolve(&record, probe)?;
            dispatch::run_check_async(&mut record, label.as_deref(), &check).await?;
            Ok(record)
        })
    }

    /// Run a curried check once per item, accumulating per-item outcomes in
    /// item order
    pub fn inquire_map(
        self,
        probe: impl Into<Probe<T, V>>,
        items: impl IntoIterator<Item = V>,
    ) -> Self {
        let probe = probe.into();
        let items: Vec<V> = items.into_iter().collect();
        self.step(move |mut record| async move {
            let (label, check) = dispatch::resolve(&record, probe)?;
            dispatch::run_map(&mut record, label.as_deref(), &check, items)?;
            Ok(record)
        })
    }

    /// Run every check in the attached registry, in registration order
    pub fn inquire_all(self) -> Self {
        self.step(|mut record| async move {
            let questions: Vec<_> = record.questionset.iter().cloned().collect();
            for question in questions {
                dispatch::run_check_async(&mut record, Some(question.label()), question.check())
                    .await?;
            }
            Ok(record)
        })
    }

    /// Hand the record to `f` if any failure has settled so far.
    /// The handler owns the record and may rewrite any part of it.
    pub fn breakpoint(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> InquiryRecord<T, V> + Send + 'static,
    ) -> Self {
        self.step_sync(|record| {
            if record.fail.is_empty() {
                Ok(record)
            } else {
                trace!(failures = record.fail.len(), "breakpoint fired");
                Ok(f(record))
            }
        })
    }

    /// Counterpart of [`AsyncInquiry::breakpoint`] for settled passes
    pub fn milestone(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> InquiryRecord<T, V> + Send + 'static,
    ) -> Self {
        self.step_sync(|record| {
            if record.pass.is_empty() {
                Ok(record)
            } else {
                trace!(passes = record.pass.len(), "milestone fired");
                Ok(f(record))
            }
        })
    }

    /// Exchange the accumulators, retagging their contents
    pub fn swap(self) -> Self {
        self.step_sync(|record| Ok(record.swapped()))
    }

    /// Rewrite the record in place
    pub fn map(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> InquiryRecord<T, V> + Send + 'static,
    ) -> Self {
        self.step_sync(|record| Ok(f(record)))
    }

    /// Continue the chain with one produced from the current record
    pub fn chain(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> AsyncInquiry<T, V> + Send + 'static,
    ) -> Self {
        Self {
            state: self.state.defer(move |state| async move {
                match state {
                    Ok(record) => f(record).state.settle().await,
                    Err(error) => Err(error),
                }
            }),
        }
    }

    /// Settle the whole chain and surrender the record, or the error that
    /// poisoned it
    pub async fn join(self) -> Result<InquiryRecord<T, V>, InquiryError> {
        self.state.settle().await
    }

    /// Settle the whole chain, then settle into exactly one handler: the
    /// failure handler when anything failed, the pass handler otherwise
    pub async fn conclude<R>(
        self,
        on_fail: impl FnOnce(Outcome<V>) -> R,
        on_pass: impl FnOnce(Outcome<V>) -> R,
    ) -> Result<R, InquiryError> {
        let record = self.state.settle().await?;
        if record.fail.is_empty() {
            Ok(on_pass(record.pass))
        } else {
            Ok(on_fail(record.fail))
        }
    }

    /// Settle the chain; run the failure handler if anything failed,
    /// otherwise hand back the still-open chain for further composition
    pub async fn faulted<R>(
        self,
        on_fail: impl FnOnce(Outcome<V>) -> R,
    ) -> Result<Faulted<T, V, R>, InquiryError> {
        let record = self.state.settle().await?;
        if record.fail.is_empty() {
            Ok(Faulted::Clear(Inquiry::of(record)))
        } else {
            Ok(Faulted::Fault(on_fail(record.fail)))
        }
    }

    /// Settle on the passes alone, whatever failed
    pub async fn suffice<R>(
        self,
        on_pass: impl FnOnce(Outcome<V>) -> R,
    ) -> Result<R, InquiryError> {
        let record = self.state.settle().await?;
        Ok(on_pass(record.pass))
    }

    /// Settle on both accumulators at once, as one sequence with the
    /// failures first
    pub async fn zip<R>(self, f: impl FnOnce(Vec<V>) -> R) -> Result<R, InquiryError> {
        let record = self.state.settle().await?;
        let mut values = record.fail.join();
        values.extend(record.pass.join());
        Ok(f(values))
    }

    /// Settle the chain into its synchronous counterpart, waiting at most
    /// `limit`. An error raised inside the chain is carried by the returned
    /// [`Inquiry`] and surfaces at its terminal combinator.
    pub async fn settle(self, limit: Duration) -> Result<Inquiry<T, V>, InquiryError> {
        let state = self.state.settle_within(limit).await?;
        Ok(Inquiry::from_state(state))
    }
}
