//! Per-field constraints

use super::value::FieldValue;

/// A predicate over a single field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Text length in characters is at least `n`
    MinLength(usize),
    /// Text length in characters is at most `n`
    MaxLength(usize),
    /// Text looks like an email address
    EmailFormat,
    /// Text is one of the listed values
    OneOf(Vec<String>),
    /// At least `n` choices are selected
    MinSelected(usize),
    /// At most `n` choices are selected
    MaxSelected(usize),
}

impl Constraint {
    /// Evaluate against a value. Constraints that don't apply to the
    /// value's shape hold trivially.
    pub fn holds(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::MinLength(n), FieldValue::Text(s)) => s.chars().count() >= *n,
            (Self::MaxLength(n), FieldValue::Text(s)) => s.chars().count() <= *n,
            (Self::EmailFormat, FieldValue::Text(s)) => is_email(s),
            (Self::OneOf(allowed), FieldValue::Text(s)) => allowed.iter().any(|a| a == s),
            (Self::MinSelected(n), FieldValue::Choices(set)) => set.len() >= *n,
            (Self::MaxSelected(n), FieldValue::Choices(set)) => set.len() <= *n,
            _ => true,
        }
    }
}

/// A constraint paired with the message reported when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintCheck {
    pub constraint: Constraint,
    pub message: String,
}

/// Simple email check: one `@` with a non-empty local part and a dotted
/// domain whose labels are all non-empty.
fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
