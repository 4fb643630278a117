//! Field values and the record that holds them

use super::field::{FieldKind, FieldSpec};
use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Opaque reference to a user-selected file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choices(BTreeSet<String>),
    File(Option<FileHandle>),
}

impl FieldValue {
    /// The empty value for a field kind
    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::MultiChoice => FieldValue::Choices(BTreeSet::new()),
            FieldKind::FileReference => FieldValue::File(None),
            _ => FieldValue::Text(String::new()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Choices(values.into_iter().map(Into::into).collect())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        FieldValue::File(Some(FileHandle::new(path)))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Choices(set) => set.is_empty(),
            FieldValue::File(handle) => handle.is_none(),
        }
    }

    /// Whether this value has the shape a field kind expects
    pub fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Choices(_), FieldKind::MultiChoice)
                | (FieldValue::File(_), FieldKind::FileReference)
                | (
                    FieldValue::Text(_),
                    FieldKind::Text
                        | FieldKind::Email
                        | FieldKind::Secret
                        | FieldKind::MultilineText
                        | FieldKind::SingleChoice
                )
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&BTreeSet<String>> {
        match self {
            FieldValue::Choices(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            FieldValue::File(handle) => handle.as_ref(),
            _ => None,
        }
    }
}

/// Current values of every field of one form instance.
///
/// The key set is fixed at construction to the schema's field names, so
/// writes can only replace values, never add or remove fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Build a record holding the empty value for every field
    pub fn empty(fields: &[FieldSpec]) -> Self {
        let values = fields
            .iter()
            .map(|spec| (spec.name.clone(), FieldValue::empty_for(spec.kind)))
            .collect();
        Self { values }
    }

    /// Build a record from explicit values; fields not listed stay empty
    pub fn with_values<'a, I>(fields: &[FieldSpec], values: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (&'a str, FieldValue)>,
    {
        let mut record = Self::empty(fields);
        for (name, value) in values {
            record.set(fields, name, value)?;
        }
        Ok(record)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Overwrite one field, checking the name and value shape against the schema
    pub fn set(
        &mut self,
        fields: &[FieldSpec],
        name: &str,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let spec = fields
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        if !value.fits(spec.kind) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: spec.kind,
            });
        }

        self.values.insert(spec.name.clone(), value);
        Ok(())
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }
}
