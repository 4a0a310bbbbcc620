use thiserror::Error;

use crate::value::ValueType;

/// All errors produced while editing or rendering a widget.
#[derive(Debug, Error, PartialEq)]
pub enum StudioError {
    /// The key is not part of the widget's snapshot.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// The value has a different primitive type than the field declares.
    #[error("field {field} expects a {expected}, got a {got}")]
    TypeMismatch {
        field: String,
        expected: ValueType,
        got: ValueType,
    },
    /// The value has the right type but is not acceptable for the field.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    /// The widget has no handler for this action.
    #[error("{action} is not supported by the {widget} widget")]
    UnsupportedAction { action: String, widget: String },
    /// General message.
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, StudioError>;

/// Shorthand constructors.
impl StudioError {
    pub fn unknown_field(key: &str) -> Self {
        Self::UnknownField(key.to_string())
    }

    pub fn type_mismatch(field: &str, expected: ValueType, got: ValueType) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected,
            got,
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
