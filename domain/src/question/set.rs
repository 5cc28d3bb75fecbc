//! Named-check registry

use super::check::Check;
use super::matcher::Matcher;
use std::fmt;

/// A single named check: one matcher paired with one check
///
/// Exists so a single named check can be handed to anything that accepts a
/// [`Questionset`], and asked directly through `inquire`.
pub struct Question<T, V> {
    matcher: Matcher,
    check: Check<T, V>,
}

impl<T, V> Question<T, V> {
    pub fn of(matcher: impl Into<Matcher>, check: Check<T, V>) -> Self {
        Self {
            matcher: matcher.into(),
            check,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn check(&self) -> &Check<T, V> {
        &self.check
    }

    /// The name recorded in receipts and audit entries
    pub fn label(&self) -> &str {
        self.matcher.label()
    }

    pub fn into_parts(self) -> (Matcher, Check<T, V>) {
        (self.matcher, self.check)
    }
}

impl<T, V> Clone for Question<T, V> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            check: self.check.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Question<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("matcher", &self.matcher)
            .field("check", &self.check)
            .finish()
    }
}

/// An ordered registry of named checks
///
/// Lookup returns the first entry whose matcher accepts the name; duplicate
/// names are kept and first match wins. Concatenation preserves
/// left-then-right order.
pub struct Questionset<T, V> {
    entries: Vec<Question<T, V>>,
}

impl<T, V> Questionset<T, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Construct from an ordered sequence of questions
    pub fn of(questions: impl IntoIterator<Item = Question<T, V>>) -> Self {
        Self {
            entries: questions.into_iter().collect(),
        }
    }

    /// First check whose matcher accepts `name`, if any
    ///
    /// An unmatched name is a programmer error; the orchestrator reports it
    /// as `InquiryError::UnknownQuestion`, never as a recorded failure.
    pub fn find(&self, name: &str) -> Option<&Check<T, V>> {
        self.entries
            .iter()
            .find(|entry| entry.matcher.matches(name))
            .map(Question::check)
    }

    /// Order-preserving union: all of `self`'s entries, then all of `other`'s
    pub fn concat(mut self, other: Questionset<T, V>) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Question<T, V>> {
        self.entries.iter()
    }
}

impl<T, V> Default for Questionset<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> Clone for Questionset<T, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Questionset<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(Question::label))
            .finish()
    }
}

impl<T, V> From<Question<T, V>> for Questionset<T, V> {
    fn from(question: Question<T, V>) -> Self {
        Questionset::of([question])
    }
}
