//! Domain error types

use crate::schema::FieldKind;
use thiserror::Error;

/// Errors from writing to a form record or reading a validated one
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` expects a {expected} value")]
    KindMismatch { field: String, expected: FieldKind },

    #[error("field `{field}` holds unexpected value `{value}`")]
    UnexpectedValue { field: String, value: String },
}
