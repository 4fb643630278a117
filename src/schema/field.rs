//! Field specifications

use super::constraint::{Constraint, ConstraintCheck};
use std::fmt;

/// The input shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Secret,
    MultilineText,
    SingleChoice,
    MultiChoice,
    FileReference,
}

impl FieldKind {
    /// Whether the field is edited by typing characters
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Secret | Self::MultilineText | Self::FileReference
        )
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Secret => "secret",
            Self::MultilineText => "multiline text",
            Self::SingleChoice => "single choice",
            Self::MultiChoice => "multi choice",
            Self::FileReference => "file reference",
        };
        f.write_str(name)
    }
}

/// A selectable option of a choice field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Declarative description of one form field and its rules
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub required_message: String,
    pub constraints: Vec<ConstraintCheck>,
    pub options: Vec<ChoiceOption>,
}

impl FieldSpec {
    /// Create an optional field with no constraints
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            required_message: format!("{label} is required"),
            constraints: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Mark the field required, reporting `message` when it is empty
    pub fn required(mut self, message: &str) -> Self {
        self.required = true;
        self.required_message = message.to_string();
        self
    }

    /// Append a constraint; constraints are evaluated in the order added
    pub fn constraint(mut self, constraint: Constraint, message: &str) -> Self {
        self.constraints.push(ConstraintCheck {
            constraint,
            message: message.to_string(),
        });
        self
    }

    pub fn options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    /// Label shown for an option value, falling back to the raw value
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }
}
