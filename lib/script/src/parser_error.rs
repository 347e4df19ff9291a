use ariadne::{Label, Report, ReportKind};
use thiserror::Error;

use crate::Token;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserError {
    #[error("{0}, found '{1}'")]
    ExpectedToken(String, Token),
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(Token),
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(Token),
    #[error("Illegal input: {0}")]
    Illegal(Token),
}

impl ParserError {
    pub fn token(&self) -> &Token {
        match self {
            ParserError::ExpectedToken(_, tok)
            | ParserError::UnexpectedToken(tok)
            | ParserError::InvalidNumber(tok)
            | ParserError::Illegal(tok) => tok,
        }
    }

    pub fn into_report(&self) -> Report {
        let msg = self.to_string();
        let span = self.token().span;
        let label = Label::new(span.to_range());
        Report::build(ReportKind::Error, (), span.start)
            .with_message("Parser Error")
            .with_label(label.with_message(msg))
            .finish()
    }
}
