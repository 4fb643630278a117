//! Submission effect abstraction
//!
//! The form controller only needs something it can hand a typed record to
//! and await; what the effect does with it is outside the form's concern.

mod effect;
mod simulated;

pub use effect::{Submission, SubmissionReceipt, SubmitEffect, SubmitError};
pub use simulated::SimulatedSubmit;

#[cfg(test)]
pub use effect::MockSubmitEffect;
