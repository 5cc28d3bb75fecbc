//! The closed set of shapes `inquire` accepts

use super::check::{Check, Finding, IntoSettlement};
use super::set::Question;
use std::fmt;
use std::future::Future;

/// What an `inquire` call is given: an inline check, the name of a
/// registered check, or a named check object
pub enum Probe<T, V> {
    Check(Check<T, V>),
    Named(String),
    Question(Question<T, V>),
}

impl<T, V> Probe<T, V> {
    /// An inline synchronous check
    pub fn check<F, O>(f: F) -> Self
    where
        F: Fn(&T) -> O + Send + Sync + 'static,
        O: Into<Finding<T, V>>,
    {
        Probe::Check(Check::immediate(f))
    }

    /// An inline asynchronous check
    pub fn deferred<F, Fut, O>(f: F) -> Self
    where
        F: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
        O: IntoSettlement<T, V>,
    {
        Probe::Check(Check::deferred(f))
    }

    /// An inline per-item check for `inquire_map`
    pub fn curried<F, O>(f: F) -> Self
    where
        F: Fn(&V, &T) -> O + Send + Sync + 'static,
        O: Into<Finding<T, V>>,
    {
        Probe::Check(Check::curried(f))
    }

    /// Look the check up by name in the attached questionset
    pub fn named(name: impl Into<String>) -> Self {
        Probe::Named(name.into())
    }
}

impl<T, V> From<&str> for Probe<T, V> {
    fn from(name: &str) -> Self {
        Probe::named(name)
    }
}

impl<T, V> From<String> for Probe<T, V> {
    fn from(name: String) -> Self {
        Probe::Named(name)
    }
}

impl<T, V> From<Question<T, V>> for Probe<T, V> {
    fn from(question: Question<T, V>) -> Self {
        Probe::Question(question)
    }
}

impl<T, V> From<Check<T, V>> for Probe<T, V> {
    fn from(check: Check<T, V>) -> Self {
        Probe::Check(check)
    }
}

impl<T, V> fmt::Debug for Probe<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::Check(check) => write!(f, "Probe::Check({check:?})"),
            Probe::Named(name) => write!(f, "Probe::Named({name})"),
            Probe::Question(question) => write!(f, "Probe::Question({})", question.label()),
        }
    }
}
