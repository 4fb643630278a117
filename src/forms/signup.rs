//! Signup form with password confirmation

use super::FormSchema;
use crate::error::FormError;
use crate::schema::{Constraint, CrossFieldRule, FieldKind, FieldSpec, Schema};
use crate::validator::ValidRecord;
use serde::Serialize;

pub const MIN_PASSWORD_LENGTH: usize = 10;

/// An accepted signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signup {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SignupForm;

impl FormSchema for SignupForm {
    type Output = Signup;

    const TITLE: &'static str = "Signup";

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("email", "Email", FieldKind::Email)
                .constraint(Constraint::EmailFormat, "Invalid email"),
            FieldSpec::new("Password", "Password", FieldKind::Secret).constraint(
                Constraint::MinLength(MIN_PASSWORD_LENGTH),
                "password must be at least 10 characters",
            ),
            FieldSpec::new("ConfirmPassword", "Confirm Password", FieldKind::Secret),
        ])
        .rule(CrossFieldRule::equals(
            "Password",
            "ConfirmPassword",
            "Passwords do not match",
        ))
    }

    fn extract(record: &ValidRecord) -> Result<Self::Output, FormError> {
        Ok(Signup {
            email: record.text("email")?.to_string(),
            password: record.text("Password")?.to_string(),
        })
    }
}
