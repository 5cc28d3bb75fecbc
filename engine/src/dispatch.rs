//! Probe resolution and check execution shared by both orchestrators

use futures::future::BoxFuture;
use inquest_domain::{Check, Finding, InquiryError, InquiryRecord, Probe, Settlement};
use tracing::debug;

/// Label used in errors and logs for checks that were not invoked by name
pub(crate) const INLINE: &str = "<inline>";

/// Resolve an `inquire` argument to a runnable check and the name to audit
/// it under, if any. Inline checks carry no name; named lookups that match
/// nothing are a programmer error, never a recorded failure.
pub(crate) fn resolve<T, V>(
    record: &InquiryRecord<T, V>,
    probe: Probe<T, V>,
) -> Result<(Option<String>, Check<T, V>), InquiryError> {
    match probe {
        Probe::Check(check) => Ok((None, check)),
        Probe::Named(name) => match record.questionset.find(&name) {
            Some(check) => {
                let check = check.clone();
                Ok((Some(name), check))
            }
            None => Err(InquiryError::UnknownQuestion(name)),
        },
        Probe::Question(question) => {
            let (matcher, check) = question.into_parts();
            Ok((Some(matcher.label().to_string()), check))
        }
    }
}

/// Run one check synchronously and accumulate what it produced
pub(crate) fn run_check_sync<T, V: Clone>(
    record: &mut InquiryRecord<T, V>,
    label: Option<&str>,
    check: &Check<T, V>,
) -> Result<(), InquiryError> {
    let Some(subject) = record.subject.as_ref() else {
        return Ok(());
    };
    let finding = match check {
        Check::Immediate(f) => f(subject),
        Check::Deferred(_) => {
            return Err(InquiryError::DeferredQuestion(
                label.unwrap_or(INLINE).to_string(),
            ));
        }
        Check::Curried(_) => {
            return Err(InquiryError::CurriedQuestion(
                label.unwrap_or(INLINE).to_string(),
            ));
        }
    };
    record.apply_finding(label, finding)?;
    trace_recorded(record, label);
    Ok(())
}

/// Run one check, suspending the chain while a deferred check settles.
/// A rejection carrying an outcome accumulates exactly as a resolution
/// with that outcome.
pub(crate) async fn run_check_async<T, V: Clone>(
    record: &mut InquiryRecord<T, V>,
    label: Option<&str>,
    check: &Check<T, V>,
) -> Result<(), InquiryError> {
    // The subject borrow must end before the await below
    enum Step<T, V> {
        Now(Finding<T, V>),
        Settling(BoxFuture<'static, Settlement<T, V>>),
    }
    let step = {
        let Some(subject) = record.subject.as_ref() else {
            return Ok(());
        };
        match check {
            Check::Immediate(f) => Step::Now(f(subject)),
            Check::Deferred(f) => Step::Settling(f(subject)),
            Check::Curried(_) => {
                return Err(InquiryError::CurriedQuestion(
                    label.unwrap_or(INLINE).to_string(),
                ));
            }
        }
    };
    let finding = match step {
        Step::Now(finding) => finding,
        Step::Settling(settling) => match settling.await {
            Ok(finding) => finding,
            Err(outcome) => Finding::Outcome(outcome),
        },
    };
    record.apply_finding(label, finding)?;
    trace_recorded(record, label);
    Ok(())
}

/// Run a curried check once per item, in item order
pub(crate) fn run_map<T, V: Clone>(
    record: &mut InquiryRecord<T, V>,
    label: Option<&str>,
    check: &Check<T, V>,
    items: Vec<V>,
) -> Result<(), InquiryError> {
    let Check::Curried(f) = check else {
        return Err(InquiryError::NotCurried(
            label.unwrap_or(INLINE).to_string(),
        ));
    };
    for item in items {
        let Some(subject) = record.subject.as_ref() else {
            break;
        };
        let finding = f(&item, subject);
        record.apply_finding(label, finding)?;
    }
    trace_recorded(record, label);
    Ok(())
}

fn trace_recorded<T, V>(record: &InquiryRecord<T, V>, label: Option<&str>) {
    debug!(
        question = label.unwrap_or(INLINE),
        failures = record.fail.len(),
        passes = record.pass.len(),
        "check recorded"
    );
}
