//! Domain layer for inquest
//!
//! This crate contains the pure data model of an inquiry chain. It has no
//! dependency on an async runtime or any orchestration concern.
//!
//! # Core Concepts
//!
//! ## Outcome
//!
//! Every check answers with a Pass- or Fail-tagged accumulation of values.
//! Outcomes of the same tag concatenate positionally; cross-tag combination
//! is decided only by the chain's accumulation rule.
//!
//! ## Questions
//!
//! A check becomes reusable by registering it under a name (or pattern) in a
//! [`Questionset`]. Named invocations are audited: reported to the chain's
//! informant callback and appended to its [`Receipt`].
//!
//! ## The record
//!
//! An [`InquiryRecord`] is the state a chain threads through its checks:
//! the subject, the two accumulators, the registry, and the audit trail.
//! Recorded failures are data, not errors; every declared check runs even
//! after earlier failures. [`InquiryError`] covers the loud cases instead:
//! unknown names, misused check kinds, and settlement timeouts.

pub mod error;
pub mod outcome;
pub mod question;
pub mod receipt;
pub mod record;

// Re-export commonly used types
pub use error::InquiryError;
pub use outcome::{Outcome, Tag};
pub use question::{
    Check, Finding, IntoSettlement, Matcher, Probe, Question, Questionset, Settlement,
};
pub use receipt::Receipt;
pub use record::{Informant, InquiryRecord};
