//! The error taxonomy shared by every pipeline stage.
//!
//! Every error is fatal: there is no accumulation and no recovery, so unlike
//! `leo_errors` there is no `Handler` to buffer diagnostics — a stage simply
//! returns `Result<T>` and the first `Err` aborts the run.

use std::fmt;
use timon_span::Span;

/// One error per taxonomy kind in the specification: lexing, parsing, name
/// resolution, type checking, arithmetic, and call arity. Implements
/// `std::error::Error` by hand rather than via `thiserror`'s derive, since
/// the `KIND at LINE:COL: message` rendering is shared across every variant
/// rather than per-variant `#[error("...")]` strings.
#[derive(Debug)]
pub enum Error {
    Lex { span: Span, message: String },
    Parse { span: Span, message: String },
    Name { span: Span, message: String },
    Type { span: Span, message: String },
    Arithmetic { span: Span, message: String },
    Arity { span: Span, message: String },
}

impl Error {
    pub fn lex(span: Span, message: impl Into<String>) -> Self {
        Error::Lex { span, message: message.into() }
    }

    pub fn parse(span: Span, message: impl Into<String>) -> Self {
        Error::Parse { span, message: message.into() }
    }

    pub fn name(span: Span, message: impl Into<String>) -> Self {
        Error::Name { span, message: message.into() }
    }

    pub fn type_(span: Span, message: impl Into<String>) -> Self {
        Error::Type { span, message: message.into() }
    }

    pub fn arithmetic(span: Span, message: impl Into<String>) -> Self {
        Error::Arithmetic { span, message: message.into() }
    }

    pub fn arity(span: Span, message: impl Into<String>) -> Self {
        Error::Arity { span, message: message.into() }
    }

    pub fn span(&self) -> Span {
        match self {
            Error::Lex { span, .. }
            | Error::Parse { span, .. }
            | Error::Name { span, .. }
            | Error::Type { span, .. }
            | Error::Arithmetic { span, .. }
            | Error::Arity { span, .. } => *span,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Error::Lex { .. } => "LexError",
            Error::Parse { .. } => "ParseError",
            Error::Name { .. } => "NameError",
            Error::Type { .. } => "TypeError",
            Error::Arithmetic { .. } => "ArithmeticError",
            Error::Arity { .. } => "ArityError",
        }
    }

    fn message(&self) -> &str {
        match self {
            Error::Lex { message, .. }
            | Error::Parse { message, .. }
            | Error::Name { message, .. }
            | Error::Type { message, .. }
            | Error::Arithmetic { message, .. }
            | Error::Arity { message, .. } => message,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind(), self.span().start, self.message())
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use timon_span::Position;

    #[test]
    fn display_matches_kind_at_line_col_message_format() {
        let span = Span::at(Position { line: 3, column: 7, offset: 0 });
        let err = Error::arithmetic(span, "division by zero");
        assert_eq!(err.to_string(), "ArithmeticError at 3:7: division by zero");
    }
}
