//! Question registry domain
//!
//! A check becomes reusable by giving it a name: a [`Question`] pairs a
//! [`Matcher`] with a [`Check`], and a [`Questionset`] is an ordered
//! registry of them. A chain attaches a questionset once and then asks
//! checks by name; every named invocation is reported to the informant and
//! appended to the receipt.

pub mod check;
pub mod matcher;
pub mod probe;
pub mod set;

// Re-export main types
pub use check::{Check, CurriedFn, DeferredFn, Finding, ImmediateFn, IntoSettlement, Settlement};
pub use matcher::Matcher;
pub use probe::Probe;
pub use set::{Question, Questionset};
