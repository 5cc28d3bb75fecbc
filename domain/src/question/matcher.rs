//! Name matchers for the question registry

use regex::Regex;
use std::fmt;

/// How a registry entry recognizes the name it is asked by
///
/// Either an exact name or a pattern. A pattern must accept the whole
/// candidate name, not a substring, so lookups stay unambiguous.
#[derive(Debug, Clone)]
pub enum Matcher {
    Name(String),
    Pattern { label: String, regex: Regex },
}

impl Matcher {
    /// Match by exact name
    pub fn name(name: impl Into<String>) -> Self {
        Matcher::Name(name.into())
    }

    /// Match by pattern, anchored to the whole candidate name
    pub fn pattern(regex: Regex) -> Self {
        let label = regex.as_str().to_string();
        // Anchoring a valid pattern cannot fail to compile; fall back to the
        // original just in case.
        let regex = Regex::new(&format!("^(?:{label})$")).unwrap_or(regex);
        Matcher::Pattern { label, regex }
    }

    /// Whether this matcher accepts the candidate name
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Matcher::Name(name) => name == candidate,
            Matcher::Pattern { regex, .. } => regex.is_match(candidate),
        }
    }

    /// The name, or the pattern source, used for receipts and audit entries
    pub fn label(&self) -> &str {
        match self {
            Matcher::Name(name) => name,
            Matcher::Pattern { label, .. } => label,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<&str> for Matcher {
    fn from(name: &str) -> Self {
        Matcher::name(name)
    }
}

impl From<String> for Matcher {
    fn from(name: String) -> Self {
        Matcher::Name(name)
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Matcher::pattern(regex)
    }
}
