//! Synchronous inquiry chains

use crate::dispatch;
use inquest_domain::{
    Finding, InquiryError, InquiryRecord, Outcome, Probe, Questionset,
};
use std::sync::Arc;
use tracing::trace;

/// A synchronous chain of checks over one subject
///
/// Checks run in declaration order and never short-circuit: a recorded
/// failure is data, and every later check still runs. The chain carries a
/// poisoned state instead when something is misused (an unknown name, a
/// deferred check in a synchronous chain); once poisoned, remaining steps
/// are skipped and the error surfaces at the terminal combinator.
pub struct Inquiry<T, V> {
    state: Result<InquiryRecord<T, V>, InquiryError>,
}

impl<T, V> Inquiry<T, V> {
    /// Start a chain around a subject
    pub fn subject(subject: T) -> Self {
        Self {
            state: Ok(InquiryRecord::new(subject)),
        }
    }

    /// Start a fresh chain around another chain's subject, discarding its
    /// accumulators, registry and audit trail
    pub fn subject_from(other: Inquiry<T, V>) -> Self {
        Self {
            state: other
                .state
                .map(|record| InquiryRecord::with_subject(record.subject)),
        }
    }

    /// Lift an existing record into a chain
    pub fn of(record: InquiryRecord<T, V>) -> Self {
        Self { state: Ok(record) }
    }

    pub(crate) fn from_state(state: Result<InquiryRecord<T, V>, InquiryError>) -> Self {
        Self { state }
    }

    pub(crate) fn into_state(self) -> Result<InquiryRecord<T, V>, InquiryError> {
        self.state
    }

    /// Surrender the record, or the error that poisoned the chain
    pub fn join(self) -> Result<InquiryRecord<T, V>, InquiryError> {
        self.state
    }
}

impl<T, V: Clone> Inquiry<T, V> {
    fn and_then(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> Result<InquiryRecord<T, V>, InquiryError>,
    ) -> Self {
        Self {
            state: self.state.and_then(f),
        }
    }

    /// Attach a registry of named checks for later lookups by name
    pub fn using(self, questionset: Questionset<T, V>) -> Self {
        self.and_then(|mut record| {
            record.questionset = questionset;
            Ok(record)
        })
    }

    /// Attach an audit callback, invoked once per named check as it records
    pub fn informant(self, f: impl Fn(&str, &Outcome<V>) + Send + Sync + 'static) -> Self {
        self.and_then(|mut record| {
            record.informant = Some(Arc::new(f));
            Ok(record)
        })
    }

    /// Run one check against the subject and accumulate what it produced
    pub fn inquire(self, probe: impl Into<Probe<T, V>>) -> Self {
        let probe = probe.into();
        self.and_then(|mut record| {
            let (label, check) = dispatch::resolve(&record, probe)?;
            dispatch::run_check_sync(&mut record, label.as_deref(), &check)?;
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
        self.and_then(|mut record| {
            let (label, check) = dispatch::resolve(&record, probe)?;
            dispatch::run_map(&mut record, label.as_deref(), &check, items)?;
            Ok(record)
        })
    }

    /// Run every check in the attached registry, in registration order
    pub fn inquire_all(self) -> Self {
        self.and_then(|mut record| {
            let questions: Vec<_> = record.questionset.iter().cloned().collect();
            for question in questions {
                dispatch::run_check_sync(&mut record, Some(question.label()), question.check())?;
            }
            Ok(record)
        })
    }

    /// Hand the record to `f` if any failure has been recorded so far.
    /// The handler owns the record and may rewrite any part of it.
    pub fn breakpoint(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> InquiryRecord<T, V>,
    ) -> Self {
        self.and_then(|record| {
            if record.fail.is_empty() {
                Ok(record)
            } else {
                trace!(failures = record.fail.len(), "breakpoint fired");
                Ok(f(record))
            }
        })
    }

    /// Counterpart of [`Inquiry::breakpoint`] for recorded passes
    pub fn milestone(
        self,
        f: impl FnOnce(InquiryRecord<T, V>) -> InquiryRecord<T, V>,
    ) -> Self {
        self.and_then(|record| {
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
        self.and_then(|record| Ok(record.swapped()))
    }

    /// Rewrite the record in place
    pub fn map(self, f: impl FnOnce(InquiryRecord<T, V>) -> InquiryRecord<T, V>) -> Self {
        self.and_then(|record| Ok(f(record)))
    }

    /// Continue the chain with one produced from the current record
    pub fn chain(self, f: impl FnOnce(InquiryRecord<T, V>) -> Inquiry<T, V>) -> Self {
        Self {
            state: self.state.and_then(|record| f(record).state),
        }
    }

    /// Settle into exactly one handler: the failure handler when anything
    /// failed, the pass handler otherwise
    pub fn fork<R>(
        self,
        on_fail: impl FnOnce(Outcome<V>) -> R,
        on_pass: impl FnOnce(Outcome<V>) -> R,
    ) -> Result<R, InquiryError> {
        let record = self.state?;
        if record.fail.is_empty() {
            Ok(on_pass(record.pass))
        } else {
            Ok(on_fail(record.fail))
        }
    }

    /// [`Inquiry::fork`] with the handlers in pass-first order
    pub fn fold<R>(
        self,
        on_pass: impl FnOnce(Outcome<V>) -> R,
        on_fail: impl FnOnce(Outcome<V>) -> R,
    ) -> Result<R, InquiryError> {
        self.fork(on_fail, on_pass)
    }

    /// Settle on the passes alone, whatever failed
    pub fn suffice<R>(self, on_pass: impl FnOnce(Outcome<V>) -> R) -> Result<R, InquiryError> {
        let record = self.state?;
        Ok(on_pass(record.pass))
    }

    /// Settle on both accumulators at once, as one sequence with the
    /// failures first
    pub fn zip<R>(self, f: impl FnOnce(Vec<V>) -> R) -> Result<R, InquiryError> {
        let record = self.state?;
        let mut values = record.fail.join();
        values.extend(record.pass.join());
        Ok(f(values))
    }
}

/// A finished chain nests into an enclosing one as a single finding; the
/// poison travels with it.
impl<T, V> From<Inquiry<T, V>> for Finding<T, V> {
    fn from(inquiry: Inquiry<T, V>) -> Self {
        match inquiry.into_state() {
            Ok(record) => Finding::nested(record),
            Err(error) => Finding::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquest_domain::{Check, Question, Questionset};
    use regex::Regex;
    use serde_json::json;
    use std::cell::Cell;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Applicant {
        name: &'static str,
        age: u32,
    }

    fn applicant() -> Applicant {
        Applicant {
            name: "test",
            age: 14,
        }
    }

    fn old_enough(a: &Applicant) -> Outcome<String> {
        if a.age > 13 {
            Outcome::pass_one("old enough".to_string())
        } else {
            Outcome::fail_one("not old enough".to_string())
        }
    }

    fn name_spelled_right(a: &Applicant) -> Outcome<String> {
        if a.name == "Ron" {
            Outcome::pass_one("spelled correctly".to_string())
        } else {
            Outcome::fail_one("name wasn't spelled correctly".to_string())
        }
    }

    fn find_height(_: &Applicant) -> Outcome<String> {
        Outcome::pass_one("height checked".to_string())
    }

    fn math_grade(_: &Applicant) -> Outcome<String> {
        Outcome::fail_one("failed at math".to_string())
    }

    fn sentence_set() -> Questionset<String, String> {
        Questionset::of([
            Question::of(
                "does it start with a capital letter?",
                Check::immediate(|text: &String| {
                    if text.chars().next().is_some_and(|c| c.is_uppercase()) {
                        Outcome::pass_one("starts with a capital".to_string())
                    } else {
                        Outcome::fail_one("does not start with a capital".to_string())
                    }
                }),
            ),
            Question::of(
                "are there 10 words or more?",
                Check::immediate(|text: &String| {
                    if text.split_whitespace().count() >= 10 {
                        Outcome::pass_one("10 words or more".to_string())
                    } else {
                        Outcome::fail_one("less than 10 words".to_string())
                    }
                }),
            ),
            Question::of(
                Regex::new("are there any line ?breaks\\?").unwrap(),
                Check::immediate(|text: &String| {
                    if text.contains('\n') {
                        Outcome::fail_one("there are line breaks".to_string())
                    } else {
                        Outcome::pass_one("no line breaks".to_string())
                    }
                }),
            ),
        ])
    }

    #[test]
    fn test_fork_runs_fail_handler_with_failures_in_order() {
        let verdict = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(find_height))
            .inquire(Probe::check(name_spelled_right))
            .inquire(Probe::check(math_grade))
            .fork(
                |fail| fail.to_string(),
                |_| unreachable!("failures were recorded"),
            )
            .unwrap();

        assert_eq!(
            verdict,
            "Fail(name wasn't spelled correctly,failed at math)"
        );
    }

    #[test]
    fn test_fork_runs_pass_handler_when_nothing_failed() {
        let verdict = Inquiry::subject(Applicant {
            name: "Ron",
            age: 14,
        })
        .inquire(Probe::check(old_enough))
        .inquire(Probe::check(find_height))
        .inquire(Probe::check(name_spelled_right))
        .fork(
            |_| unreachable!("nothing failed"),
            |pass| pass.to_string(),
        )
        .unwrap();

        assert_eq!(
            verdict,
            "Pass(old enough,height checked,spelled correctly)"
        );
    }

    #[test]
    fn test_fold_takes_handlers_in_pass_first_order() {
        let fail_runs = Cell::new(0);
        let pass_runs = Cell::new(0);

        let verdict = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(math_grade))
            .fold(
                |pass| {
                    pass_runs.set(pass_runs.get() + 1);
                    pass.to_string()
                },
                |fail| {
                    fail_runs.set(fail_runs.get() + 1);
                    fail.to_string()
                },
            )
            .unwrap();

        assert_eq!(verdict, "Fail(failed at math)");
        assert_eq!(fail_runs.get(), 1);
        assert_eq!(pass_runs.get(), 0);
    }

    #[test]
    fn test_nested_inquiry_flattens_at_current_position() {
        fn evaluate_grades(a: &Applicant) -> Inquiry<Applicant, String> {
            Inquiry::subject(a.clone())
                .inquire(Probe::check(find_height))
                .inquire(Probe::check(math_grade))
        }

        let record = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(evaluate_grades))
            .inquire(Probe::check(name_spelled_right))
            .join()
            .unwrap();

        assert_eq!(record.pass.values(), &["old enough", "height checked"]);
        assert_eq!(
            record.fail.values(),
            &["failed at math", "name wasn't spelled correctly"]
        );
    }

    #[test]
    fn test_breakpoint_fires_on_failure_and_may_clear_it() {
        let reached = Cell::new(0);

        let record = Inquiry::subject(Applicant {
            name: "Ron",
            age: 11,
        })
        .inquire(Probe::check(old_enough))
        .breakpoint(|mut record| {
            reached.set(reached.get() + 1);
            record.fail = Outcome::fail(Vec::<String>::new());
            record
        })
        .inquire(Probe::check(name_spelled_right))
        .inquire(Probe::check(math_grade))
        .join()
        .unwrap();

        assert_eq!(reached.get(), 1);
        assert_eq!(record.fail.values(), &["failed at math"]);
    }

    #[test]
    fn test_breakpoint_skipped_when_nothing_failed() {
        let record = Inquiry::subject(applicant())
            .inquire(Probe::check(find_height))
            .breakpoint(|_| unreachable!("no failures recorded"))
            .join()
            .unwrap();

        assert_eq!(record.pass.values(), &["height checked"]);
    }

    #[test]
    fn test_milestone_fires_on_pass() {
        let reached = Cell::new(0);

        let record = Inquiry::subject(applicant())
            .inquire(Probe::check(math_grade))
            .milestone(|_| unreachable!("no passes recorded"))
            .inquire(Probe::check(find_height))
            .milestone(|record| {
                reached.set(reached.get() + 1);
                record
            })
            .join()
            .unwrap();

        assert_eq!(reached.get(), 1);
        assert_eq!(record.pass.values(), &["height checked"]);
    }

    #[test]
    fn test_identity_breakpoint_leaves_record_unchanged() {
        let plain = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(math_grade))
            .join()
            .unwrap();

        let with_breakpoint = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(math_grade))
            .breakpoint(|record| record)
            .join()
            .unwrap();

        assert_eq!(plain.fail, with_breakpoint.fail);
        assert_eq!(plain.pass, with_breakpoint.pass);
    }

    #[test]
    fn test_inquire_map_partitions_items() {
        let planets = [
            "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        ]
        .map(String::from);

        let starts_with = Probe::curried(|word: &String, letter: &String| {
            if word.starts_with(letter.as_str()) {
                Outcome::pass_one(word.clone())
            } else {
                Outcome::fail_one(word.clone())
            }
        });

        let record = Inquiry::subject("M".to_string())
            .inquire_map(starts_with, planets)
            .join()
            .unwrap();

        assert_eq!(record.pass.values(), &["Mercury", "Mars"]);
        assert_eq!(
            record.fail.values(),
            &["Venus", "Earth", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn test_zip_joins_failures_before_passes() {
        let zipped = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(math_grade))
            .inquire(Probe::check(find_height))
            .zip(|values| values)
            .unwrap();

        assert_eq!(zipped, ["failed at math", "old enough", "height checked"]);
    }

    #[test]
    fn test_inquire_by_name_uses_the_registry() {
        let verdict = Inquiry::subject("A short sentence.".to_string())
            .using(sentence_set())
            .inquire("does it start with a capital letter?")
            .inquire("are there 10 words or more?")
            .inquire("are there any linebreaks?")
            .fork(|fail| fail.to_string(), |pass| pass.to_string())
            .unwrap();

        assert_eq!(verdict, "Fail(less than 10 words)");
    }

    #[test]
    fn test_inquire_all_runs_registry_in_order() {
        let record = Inquiry::subject("A short sentence.".to_string())
            .using(sentence_set())
            .inquire_all()
            .join()
            .unwrap();

        assert_eq!(
            record.pass.values(),
            &["starts with a capital", "no line breaks"]
        );
        assert_eq!(record.fail.values(), &["less than 10 words"]);
        assert_eq!(record.receipt.len(), 3);
    }

    #[test]
    fn test_informant_and_receipt_follow_declaration_order() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_by_informant = Arc::clone(&seen);

        let record = Inquiry::subject("A short sentence.".to_string())
            .using(sentence_set())
            .informant(move |name, outcome| {
                seen_by_informant
                    .lock()
                    .unwrap()
                    .push(format!("{name}: {outcome}"));
            })
            .inquire("are there 10 words or more?")
            .inquire("does it start with a capital letter?")
            .join()
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "are there 10 words or more?: Fail(less than 10 words)",
                "does it start with a capital letter?: Pass(starts with a capital)",
            ]
        );
        assert_eq!(
            record.receipt.entries()[0].0,
            "are there 10 words or more?"
        );
        assert_eq!(
            record.receipt.entries()[1].0,
            "does it start with a capital letter?"
        );
    }

    #[test]
    fn test_unknown_name_poisons_the_chain() {
        let result = Inquiry::subject("text".to_string())
            .using(sentence_set())
            .inquire("was this ever registered?")
            .inquire("does it start with a capital letter?")
            .join();

        match result {
            Err(InquiryError::UnknownQuestion(name)) => {
                assert_eq!(name, "was this ever registered?");
            }
            other => panic!("expected UnknownQuestion, got {other:?}"),
        }
    }

    #[test]
    fn test_deferred_check_is_rejected_synchronously() {
        let probe: Probe<i32, String> =
            Probe::deferred(|_: &i32| async { Outcome::pass_one("later".to_string()) });
        let result = Inquiry::subject(1).inquire(probe).join();

        assert!(matches!(result, Err(InquiryError::DeferredQuestion(_))));
    }

    #[test]
    fn test_suffice_keeps_passes_despite_failures() {
        let pass = Inquiry::subject(Applicant {
            name: "Ron",
            age: 14,
        })
        .inquire(Probe::check(old_enough))
        .inquire(Probe::check(find_height))
        .inquire(Probe::check(math_grade))
        .inquire(Probe::check(name_spelled_right))
        .suffice(|pass| pass.join())
        .unwrap();

        assert_eq!(pass, ["old enough", "height checked", "spelled correctly"]);
    }

    #[test]
    fn test_bare_value_promotes_to_a_pass() {
        let pass = Inquiry::subject(1)
            .inquire(Probe::check(|n: &i32| Finding::<i32, i32>::value(n + 1)))
            .suffice(|pass| pass.join())
            .unwrap();

        assert_eq!(pass, [2]);
    }

    #[test]
    fn test_swap_retags_both_accumulators() {
        let record = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(math_grade))
            .swap()
            .join()
            .unwrap();

        assert_eq!(record.fail.values(), &["old enough"]);
        assert!(record.fail.is_fail());
        assert_eq!(record.pass.values(), &["failed at math"]);
        assert!(record.pass.is_pass());
    }

    #[test]
    fn test_subject_from_starts_clean() {
        let loaded = Inquiry::subject(applicant())
            .inquire(Probe::check(old_enough))
            .inquire(Probe::check(math_grade));

        let record = Inquiry::subject_from(loaded).join().unwrap();

        assert_eq!(record.subject, Some(applicant()));
        assert!(record.fail.is_empty());
        assert!(record.pass.is_empty());
    }

    #[test]
    fn test_chain_left_identity() {
        fn bump(mut record: InquiryRecord<i32, String>) -> Inquiry<i32, String> {
            record.subject = record.subject.map(|n| n + 1);
            Inquiry::of(record)
        }

        let chained = Inquiry::of(InquiryRecord::new(41)).chain(bump).join().unwrap();
        let direct = bump(InquiryRecord::new(41)).join().unwrap();

        assert_eq!(chained.subject, direct.subject);
        assert_eq!(chained.fail, direct.fail);
        assert_eq!(chained.pass, direct.pass);
    }

    #[test]
    fn test_chain_right_identity() {
        let record = Inquiry::<i32, String>::subject(41)
            .chain(|record| Inquiry::of(record))
            .join()
            .unwrap();

        assert_eq!(record.subject, Some(41));
    }

    #[test]
    fn test_chain_associativity() {
        fn double(mut record: InquiryRecord<i32, String>) -> Inquiry<i32, String> {
            record.subject = record.subject.map(|n| n * 2);
            Inquiry::of(record)
        }
        fn bump(mut record: InquiryRecord<i32, String>) -> Inquiry<i32, String> {
            record.subject = record.subject.map(|n| n + 1);
            Inquiry::of(record)
        }

        let grouped_left = Inquiry::subject(10)
            .chain(double)
            .chain(bump)
            .join()
            .unwrap();
        let grouped_right = Inquiry::subject(10)
            .chain(|record| double(record).chain(bump))
            .join()
            .unwrap();

        assert_eq!(grouped_left.subject, grouped_right.subject);
    }

    #[test]
    fn test_heterogeneous_values_via_json() {
        let measurement = json!({ "height": 110, "unit": "cm" });
        let expected = measurement.clone();

        let pass = Inquiry::subject(json!({ "name": "test", "age": 14 }))
            .inquire(Probe::check(move |_: &serde_json::Value| {
                Outcome::pass_one(measurement.clone())
            }))
            .suffice(|pass| pass.join())
            .unwrap();

        assert_eq!(pass, [expected]);
    }
}
