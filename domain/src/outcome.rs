//! Pass/Fail outcome algebra
//!
//! An [`Outcome`] is the result of one check: a tagged, ordered accumulation
//! of values. Outcomes are immutable once constructed; combining two
//! outcomes produces a new one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The polarity of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Pass,
    Fail,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Pass => "Pass",
            Tag::Fail => "Fail",
        }
    }
}

/// A Pass- or Fail-tagged accumulation of values produced by checks
///
/// # Example
///
/// ```
/// use inquest_domain::Outcome;
///
/// let pass = Outcome::pass(["old enough", "spelled correctly"]);
/// assert!(pass.is_pass());
/// assert_eq!(pass.to_string(), "Pass(old enough,spelled correctly)");
///
/// let fail = Outcome::fail_one("failed at math");
/// assert_eq!(fail.join(), vec!["failed at math"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<V> {
    Pass(Vec<V>),
    Fail(Vec<V>),
}

impl<V> Outcome<V> {
    /// Create a passing outcome from an ordered sequence of values
    pub fn pass(values: impl IntoIterator<Item = V>) -> Self {
        Outcome::Pass(values.into_iter().collect())
    }

    /// Create a failing outcome from an ordered sequence of values
    pub fn fail(values: impl IntoIterator<Item = V>) -> Self {
        Outcome::Fail(values.into_iter().collect())
    }

    /// Promote a single value to a passing outcome
    pub fn pass_one(value: V) -> Self {
        Outcome::Pass(vec![value])
    }

    /// Promote a single value to a failing outcome
    pub fn fail_one(value: V) -> Self {
        Outcome::Fail(vec![value])
    }

    pub fn tag(&self) -> Tag {
        match self {
            Outcome::Pass(_) => Tag::Pass,
            Outcome::Fail(_) => Tag::Fail,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    /// The accumulated values, in the order they were recorded
    pub fn values(&self) -> &[V] {
        match self {
            Outcome::Pass(values) | Outcome::Fail(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Unwrap the accumulated values
    pub fn join(self) -> Vec<V> {
        match self {
            Outcome::Pass(values) | Outcome::Fail(values) => values,
        }
    }

    /// Apply `f` to the wrapped sequence and rewrap with the same tag
    pub fn map<W>(self, f: impl FnOnce(Vec<V>) -> Vec<W>) -> Outcome<W> {
        match self {
            Outcome::Pass(values) => Outcome::Pass(f(values)),
            Outcome::Fail(values) => Outcome::Fail(f(values)),
        }
    }

    /// Invoke `f` with the raw wrapped sequence
    pub fn chain<R>(self, f: impl FnOnce(Vec<V>) -> R) -> R {
        f(self.join())
    }

    /// Invoke exactly one handler with the raw wrapped sequence, chosen by tag
    pub fn fold<R>(
        self,
        on_pass: impl FnOnce(Vec<V>) -> R,
        on_fail: impl FnOnce(Vec<V>) -> R,
    ) -> R {
        match self {
            Outcome::Pass(values) => on_pass(values),
            Outcome::Fail(values) => on_fail(values),
        }
    }

    /// Combine two outcomes of the same tag, left elements first
    ///
    /// Cross-tag combination is decided by the chain's accumulation rule,
    /// never by `Outcome` switching tags on its own.
    ///
    /// # Panics
    /// Panics if `other` carries a different tag.
    pub fn concat(self, other: Outcome<V>) -> Outcome<V> {
        match (self, other) {
            (Outcome::Pass(mut left), Outcome::Pass(right)) => {
                left.extend(right);
                Outcome::Pass(left)
            }
            (Outcome::Fail(mut left), Outcome::Fail(right)) => {
                left.extend(right);
                Outcome::Fail(left)
            }
            (left, right) => panic!(
                "cannot concat {} outcome with {} outcome",
                left.tag().as_str(),
                right.tag().as_str()
            ),
        }
    }

    /// Append raw values, keeping the tag. The accumulation primitive used
    /// by the chain record.
    pub(crate) fn extend(&mut self, values: Vec<V>) {
        match self {
            Outcome::Pass(existing) | Outcome::Fail(existing) => existing.extend(values),
        }
    }
}

impl<V: fmt::Display> fmt::Display for Outcome<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.tag().as_str())?;
        for (i, value) in self.values().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}
