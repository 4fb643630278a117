//! Concrete form definitions
//!
//! Each form supplies its [`Schema`] and converts a validated record into a
//! typed output that the submit effect receives.

mod registration;
mod signup;

pub use registration::{Gender, RegistrationForm, UserRegistration};
pub use signup::{Signup, SignupForm};

use crate::error::FormError;
use crate::schema::Schema;
use crate::submit::Submission;
use crate::validator::ValidRecord;

/// A form: its schema plus the typed shape of an accepted record
pub trait FormSchema {
    type Output: Into<Submission> + Clone + std::fmt::Debug + Send + 'static;

    /// Human readable form title
    const TITLE: &'static str;

    fn schema() -> Schema;

    fn extract(record: &ValidRecord) -> Result<Self::Output, FormError>;
}
