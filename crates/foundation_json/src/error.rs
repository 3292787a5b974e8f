use core::fmt;

use serde::{de, ser};

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when JSON encoding or decoding fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
}

/// What went wrong. Framework-level failures (schema mismatches, wrong
/// value types) arrive as [`ErrorKind::Message`]; the rest come from the
/// codec itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("{0}")]
    Message(String),
    #[error("unexpected end of input")]
    Eof,
    #[error("syntax error")]
    Syntax,
    #[error("expected `true` or `false`")]
    ExpectedBoolean,
    #[error("expected integer")]
    ExpectedInteger,
    #[error("expected floating point number")]
    ExpectedFloat,
    #[error("expected string")]
    ExpectedString,
    #[error("expected `null`")]
    ExpectedNull,
    #[error("expected `[`")]
    ExpectedArray,
    #[error("expected `,` between array elements")]
    ExpectedArrayComma,
    #[error("expected `]`")]
    ExpectedArrayEnd,
    #[error("expected `{{`")]
    ExpectedMap,
    #[error("expected `:` after object key")]
    ExpectedMapColon,
    #[error("expected `,` between object entries")]
    ExpectedMapComma,
    #[error("expected `}}`")]
    ExpectedMapEnd,
    #[error("trailing characters after JSON value")]
    TrailingCharacters,
    #[error("number out of range for the target type")]
    NumberOutOfRange,
    #[error("invalid escape sequence in string")]
    InvalidEscape,
    #[error("non-finite floating point numbers are unsupported")]
    NonFiniteFloat,
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
    #[error("error writing output")]
    Fmt,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Human-readable rendering of the error.
    pub fn description(&self) -> String {
        self.kind.to_string()
    }

    fn message<T: fmt::Display>(message: T) -> Self {
        Self::new(ErrorKind::Message(message.to_string()))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::new(ErrorKind::Fmt)
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::message(msg)
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::message(msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn schema_errors_become_messages() {
        let err = Error::missing_field("b");
        assert_eq!(err.kind(), &ErrorKind::Message("missing field `b`".into()));
        assert_eq!(err.description(), "missing field `b`");
        assert_eq!(err.to_string(), err.description());
    }

    #[test]
    fn codec_errors_describe_themselves() {
        assert_eq!(
            Error::new(ErrorKind::TrailingCharacters).to_string(),
            "trailing characters after JSON value"
        );
        assert_eq!(Error::new(ErrorKind::ExpectedMap).to_string(), "expected `{`");
        assert_eq!(Error::from(fmt::Error).kind(), &ErrorKind::Fmt);
    }
}
