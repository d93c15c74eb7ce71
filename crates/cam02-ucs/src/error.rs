use std::fmt;
use std::num::ParseIntError;

/// Failure to read a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Number of digits after the optional `#`, when it is not 6
    WrongLength(usize),
    BadDigit(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::BadDigit(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::WrongLength(n) => {
                write!(f, "expected 6 hex digits, found {n}")
            }
            ParseColorError::BadDigit(err) => write!(f, "bad hex digit: {err}"),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::BadDigit(err) => Some(err),
            ParseColorError::WrongLength(_) => None,
        }
    }
}
