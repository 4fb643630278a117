//! Declarative form schemas
//!
//! A schema is plain data: an ordered list of [`FieldSpec`]s, each with its
//! own constraints, plus [`CrossFieldRule`]s evaluated over the whole record.

mod constraint;
mod field;
mod rule;
mod value;

pub use constraint::{Constraint, ConstraintCheck};
pub use field::{ChoiceOption, FieldKind, FieldSpec};
pub use rule::{Comparison, CrossFieldRule};
pub use value::{FieldValue, FileHandle, Record};

/// Field specs and cross-field rules for one form
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
    pub rules: Vec<CrossFieldRule>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// A record with every field at its empty value
    pub fn empty_record(&self) -> Record {
        Record::empty(&self.fields)
    }
}
