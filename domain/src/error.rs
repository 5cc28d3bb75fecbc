//! Domain error types

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the inquiry chain itself, as opposed to recorded
/// failures.
///
/// A `Fail` outcome is ordinary data accumulated by the chain. The variants
/// here are programmer errors or orchestration faults: they poison the chain
/// (later steps are skipped) and surface at the terminal combinator, never
/// inside the `fail` accumulator.
#[derive(Error, Debug)]
pub enum InquiryError {
    #[error("no question in the set matches `{0}`")]
    UnknownQuestion(String),

    #[error("question `{0}` expects an item and cannot be asked directly")]
    CurriedQuestion(String),

    #[error("question `{0}` does not take an item and cannot be mapped over items")]
    NotCurried(String),

    #[error("question `{0}` is asynchronous and cannot run in a synchronous chain")]
    DeferredQuestion(String),

    #[error("inquiry did not settle within {0:?}")]
    Timeout(Duration),
}

impl InquiryError {
    /// Check if this error represents an elapsed settlement deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, InquiryError::Timeout(_))
    }
}
