//! Chain state threaded through an inquiry

use crate::error::InquiryError;
use crate::outcome::Outcome;
use crate::question::{Finding, Questionset};
use crate::receipt::Receipt;
use std::fmt;
use std::sync::Arc;

/// Audit callback, invoked once per named check with the name and outcome
pub type Informant<V> = Arc<dyn Fn(&str, &Outcome<V>) + Send + Sync>;

/// The state an inquiry chain threads through its checks
///
/// `fail` and `pass` start empty and only grow as checks run. The subject is
/// read-only to ordinary checks; breakpoint and milestone handlers are the
/// only sanctioned mutation points: they take ownership of the record, may
/// replace any field, and hand it back.
///
/// The subject lives in an `Option`: public constructors always supply
/// `Some`, and a handler that clears it leaves later checks with nothing to
/// run against.
pub struct InquiryRecord<T, V> {
    pub subject: Option<T>,
    pub fail: Outcome<V>,
    pub pass: Outcome<V>,
    pub informant: Option<Informant<V>>,
    pub questionset: Questionset<T, V>,
    pub receipt: Receipt<V>,
}

impl<T, V> InquiryRecord<T, V> {
    /// Fresh state around a subject, with empty accumulators
    pub fn new(subject: T) -> Self {
        Self::with_subject(Some(subject))
    }

    pub fn with_subject(subject: Option<T>) -> Self {
        Self {
            subject,
            fail: Outcome::Fail(Vec::new()),
            pass: Outcome::Pass(Vec::new()),
            informant: None,
            questionset: Questionset::new(),
            receipt: Receipt::new(),
        }
    }

    /// The accumulation rule: a Fail-tagged outcome extends `fail`, a
    /// Pass-tagged outcome extends `pass`, the other accumulator untouched.
    /// The only place cross-tag combination is decided.
    pub fn absorb(&mut self, outcome: Outcome<V>) {
        match outcome {
            Outcome::Fail(values) => self.fail.extend(values),
            Outcome::Pass(values) => self.pass.extend(values),
        }
    }

    /// Accumulate a named outcome: notify the informant, append to the
    /// receipt, then apply the accumulation rule
    pub fn absorb_named(&mut self, name: &str, outcome: Outcome<V>)
    where
        V: Clone,
    {
        if let Some(informant) = &self.informant {
            informant(name, &outcome);
        }
        self.receipt.record(name, outcome.clone());
        self.absorb(outcome);
    }

    /// Merge a nested chain's accumulators into this record at the current
    /// position, flattening one nesting level
    pub fn merge_nested(&mut self, nested: InquiryRecord<T, V>) {
        self.fail.extend(nested.fail.join());
        self.pass.extend(nested.pass.join());
    }

    /// Classify and accumulate what a check produced. `label` is present
    /// when the check was invoked by name.
    pub fn apply_finding(
        &mut self,
        label: Option<&str>,
        finding: Finding<T, V>,
    ) -> Result<(), InquiryError>
    where
        V: Clone,
    {
        match finding {
            Finding::Outcome(outcome) => {
                self.note(label, outcome);
                Ok(())
            }
            Finding::Value(value) => {
                self.note(label, Outcome::pass_one(value));
                Ok(())
            }
            Finding::Nested(nested) => {
                self.merge_nested(*nested);
                Ok(())
            }
            Finding::Error(error) => Err(error),
        }
    }

    fn note(&mut self, label: Option<&str>, outcome: Outcome<V>)
    where
        V: Clone,
    {
        match label {
            Some(name) => self.absorb_named(name, outcome),
            None => self.absorb(outcome),
        }
    }

    /// Fail and pass exchanged, tags rewrapped
    pub fn swapped(self) -> Self {
        let Self {
            subject,
            fail,
            pass,
            informant,
            questionset,
            receipt,
        } = self;
        Self {
            subject,
            fail: Outcome::Fail(pass.join()),
            pass: Outcome::Pass(fail.join()),
            informant,
            questionset,
            receipt,
        }
    }
}

impl<T: Clone, V: Clone> Clone for InquiryRecord<T, V> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
            fail: self.fail.clone(),
            pass: self.pass.clone(),
            informant: self.informant.clone(),
            questionset: self.questionset.clone(),
            receipt: self.receipt.clone(),
        }
    }
}

impl<T: fmt::Debug, V: fmt::Debug> fmt::Debug for InquiryRecord<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InquiryRecord")
            .field("subject", &self.subject)
            .field("fail", &self.fail)
            .field("pass", &self.pass)
            .field("informant", &self.informant.is_some())
            .field("questionset", &self.questionset)
            .field("receipt", &self.receipt)
            .finish()
    }
}
