//! Orchestration layer for inquest
//!
//! Two chain builders over the domain model:
//!
//! - [`Inquiry`] runs immediate checks synchronously.
//! - [`AsyncInquiry`] additionally accepts deferred checks, keeping the
//!   accumulators in declaration order however long each check takes, and
//!   can settle back into an [`Inquiry`] with [`AsyncInquiry::settle`].
//!
//! # Example
//!
//! ```
//! use inquest_engine::{Inquiry, Outcome, Probe};
//!
//! let verdict = Inquiry::subject(14)
//!     .inquire(Probe::check(|age: &u32| {
//!         if *age > 13 {
//!             Outcome::pass_one("old enough".to_string())
//!         } else {
//!             Outcome::fail_one("not old enough".to_string())
//!         }
//!     }))
//!     .fork(|fail| fail.to_string(), |pass| pass.to_string())
//!     .unwrap();
//!
//! assert_eq!(verdict, "Pass(old enough)");
//! ```

pub mod async_inquiry;
mod dispatch;
pub mod inquiry;
pub mod iou;

pub use async_inquiry::{AsyncInquiry, Faulted};
pub use inquiry::Inquiry;
pub use iou::Iou;

// Re-export the domain surface so callers need a single dependency
pub use inquest_domain::{
    Check, Finding, Informant, InquiryError, InquiryRecord, IntoSettlement, Matcher, Outcome,
    Probe, Question, Questionset, Receipt, Settlement, Tag,
};
