//! Cross-field rules

use super::value::Record;

/// How the two fields of a rule are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    NotEquals,
}

/// A constraint over two fields. The error is attached to `target`,
/// which need not be either compared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossFieldRule {
    pub field: String,
    pub other: String,
    pub comparison: Comparison,
    pub target: String,
    pub message: String,
}

impl CrossFieldRule {
    /// `field` must equal `other`; failures are reported on `other`
    pub fn equals(field: &str, other: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            other: other.to_string(),
            comparison: Comparison::Equals,
            target: other.to_string(),
            message: message.to_string(),
        }
    }

    /// `field` must differ from `other`; failures are reported on `other`
    pub fn not_equals(field: &str, other: &str, message: &str) -> Self {
        Self {
            comparison: Comparison::NotEquals,
            ..Self::equals(field, other, message)
        }
    }

    /// Report failures on a different field
    pub fn attach_to(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }

    pub fn evaluate(&self, record: &Record) -> bool {
        let same = record.get(&self.field) == record.get(&self.other);
        match self.comparison {
            Comparison::Equals => same,
            Comparison::NotEquals => !same,
        }
    }
}
