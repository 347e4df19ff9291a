use thiserror::Error;

use crate::{Value, ValueType};

/// A record class is missing one of the declarations its capabilities rely on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{0} does not define its fields")]
    MissingFields(String),

    #[error("{0} does not define its types")]
    MissingTypes(String),

    #[error("{class} declares {fields} fields but {types} types")]
    Misaligned {
        class: String,
        fields: usize,
        types: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("{value} should be of type {expected}. Got type {actual}")]
    Mismatch {
        value: Value,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("{0} class is immutable")]
    Immutable(String),

    #[error("{class} has no field '{field}'")]
    UnknownField { class: String, field: String },

    #[error("{class}.{field} was never assigned")]
    Unset { class: String, field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Immutability,
    Attribute,
}

impl RecordError {
    /// Validation covers type mismatches only. Naming a field the class does
    /// not declare, or reading one that was never bound, is an attribute error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::Configuration(_) => ErrorKind::Configuration,
            RecordError::Mismatch { .. } => ErrorKind::Validation,
            RecordError::Immutable(_) => ErrorKind::Immutability,
            RecordError::UnknownField { .. } | RecordError::Unset { .. } => ErrorKind::Attribute,
        }
    }

    pub fn mismatch(value: &Value, expected: ValueType) -> RecordError {
        RecordError::Mismatch {
            value: value.clone(),
            expected,
            actual: value.value_type(),
        }
    }
}
