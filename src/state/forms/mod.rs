//! Form state layer
//!
//! The controller owns the record, errors and submitting flag of one form;
//! the view wraps it with focus and cursor state for the terminal.

mod controller;
pub mod field;
mod form_state;

pub use controller::{FormController, SubmitOutcome, SubmitStart};
pub use form_state::{Form, FormView};
