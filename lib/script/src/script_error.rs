use ariadne::{Label, Report, ReportKind};
use record::{ErrorKind, RecordError};
use thiserror::Error;

use crate::Span;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScriptError {
    #[error("{0}")]
    Record(RecordError, Span),

    #[error("Reference to undefined name '{0}'")]
    UnknownName(String, Span),

    #[error("Unknown type '{0}'")]
    UnknownType(String, Span),

    #[error("Unknown capability '{0}', expected one of fixed, typed, immutable")]
    UnknownCapability(String, Span),

    #[error("Cannot call '{0}', only record classes can be called")]
    NotCallable(String, Span),

    #[error("Cannot access property '{0}' on a value that is not a record")]
    NotARecord(String, Span),

    #[error("Record has no value for '{0}'")]
    NoSuchProperty(String, Span),

    #[error("Records and classes cannot be used as field values")]
    RecordAsArgument(Span),
}

impl ScriptError {
    pub fn span(&self) -> Span {
        match self {
            ScriptError::Record(_, span)
            | ScriptError::UnknownName(_, span)
            | ScriptError::UnknownType(_, span)
            | ScriptError::UnknownCapability(_, span)
            | ScriptError::NotCallable(_, span)
            | ScriptError::NotARecord(_, span)
            | ScriptError::NoSuchProperty(_, span)
            | ScriptError::RecordAsArgument(span) => *span,
        }
    }

    pub fn into_report(&self) -> Report {
        let msg = self.to_string();
        let span = self.span();
        let title = match self {
            ScriptError::Record(err, _) => match err.kind() {
                ErrorKind::Configuration => "ConfigurationError",
                ErrorKind::Validation => "ValidationError",
                ErrorKind::Immutability => "ImmutabilityError",
                ErrorKind::Attribute => "AttributeError",
            },
            _ => "RuntimeError",
        };

        let label = Label::new(span.to_range());
        Report::build(ReportKind::Error, (), span.start)
            .with_message(title)
            .with_label(label.with_message(msg))
            .finish()
    }
}
