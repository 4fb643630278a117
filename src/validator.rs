//! Record validation against a schema
//!
//! [`validate`] is a pure function: the same record and schema always yield
//! the same [`ValidationResult`].

use crate::error::FormError;
use crate::schema::{FieldValue, FileHandle, Record, Schema};
use std::collections::{BTreeMap, BTreeSet};

/// Violated-constraint messages keyed by field name.
/// Every present entry holds at least one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    by_field: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.by_field
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.by_field.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_field
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl<const N: usize> From<[(&str, Vec<&str>); N]> for FieldErrors {
    fn from(entries: [(&str, Vec<&str>); N]) -> Self {
        let mut errors = Self::new();
        for (field, messages) in entries {
            for message in messages {
                errors.push(field, message);
            }
        }
        errors
    }
}

/// A record that passed validation, with typed accessors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    record: Record,
}

impl ValidRecord {
    fn value(&self, field: &str) -> Result<&FieldValue, FormError> {
        self.record
            .get(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    pub fn text(&self, field: &str) -> Result<&str, FormError> {
        self.value(field)?
            .as_text()
            .ok_or_else(|| FormError::KindMismatch {
                field: field.to_string(),
                expected: crate::schema::FieldKind::Text,
            })
    }

    pub fn choices(&self, field: &str) -> Result<&BTreeSet<String>, FormError> {
        self.value(field)?
            .as_choices()
            .ok_or_else(|| FormError::KindMismatch {
                field: field.to_string(),
                expected: crate::schema::FieldKind::MultiChoice,
            })
    }

    pub fn file(&self, field: &str) -> Result<&FileHandle, FormError> {
        self.value(field)?
            .as_file()
            .ok_or_else(|| FormError::KindMismatch {
                field: field.to_string(),
                expected: crate::schema::FieldKind::FileReference,
            })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// Outcome of checking a record against its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(ValidRecord),
    Rejected(FieldErrors),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(errors) => Some(errors),
        }
    }
}

/// Validate a record against a schema.
///
/// Per field, in declared order: an empty required field reports only its
/// required message; otherwise every failing constraint is reported.
/// Cross-field rules run afterwards and report on their target field.
/// Fields missing from the record are treated as empty; a value of the
/// wrong shape for its field reports only the mismatch.
pub fn validate(record: &Record, schema: &Schema) -> ValidationResult {
    let mut errors = FieldErrors::new();
    let mut typed = schema.empty_record();

    for spec in &schema.fields {
        let empty = FieldValue::empty_for(spec.kind);
        let value = match record.get(&spec.name) {
            Some(value) => {
                if let Err(err) = typed.set(&schema.fields, &spec.name, value.clone()) {
                    errors.push(&spec.name, err.to_string());
                    continue;
                }
                value
            }
            None => &empty,
        };

        if value.is_empty() && spec.required {
            errors.push(&spec.name, spec.required_message.as_str());
            continue;
        }

        for check in &spec.constraints {
            if !check.constraint.holds(value) {
                errors.push(&spec.name, check.message.as_str());
            }
        }
    }

    for rule in &schema.rules {
        if !rule.evaluate(record) {
            errors.push(&rule.target, rule.message.as_str());
        }
    }

    tracing::debug!(fields_with_errors = errors.len(), "validated record");

    if errors.is_empty() {
        ValidationResult::Accepted(ValidRecord { record: typed })
    } else {
        ValidationResult::Rejected(errors)
    }
}
