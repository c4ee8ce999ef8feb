use std::fmt;

use thiserror::Error;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("Error serializing or deserializing json: {err}")]
    SerdeJson {
        #[from]
        err: serde_json::Error,
    },
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Plane document is not a JSON object")]
    NotAPlane,
    #[error("Error interpreting UTF-8 string: {err}")]
    FromUtf8Error {
        #[from]
        err: std::string::FromUtf8Error,
    },
    #[error("Plane document failed validation ({} issue(s))", .0.len())]
    Validation(Vec<ValidationIssue>),
}

/// A single problem found while strictly importing a plane document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MalformedName { row: usize, name: String },
    MalformedTolerances { row: usize, name: String, raw: String },
    ToleranceOutOfRange { row: usize, name: String, value: u8 },
    DuplicateName { name: String },
    NotInCatalog { row: usize, name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedName { row, name } => {
                write!(f, "maneuver #{row}: malformed name {name:?}")
            }
            Self::MalformedTolerances { row, name, raw } => {
                write!(f, "maneuver #{row} ({name}): malformed tolerances {raw:?}")
            }
            Self::ToleranceOutOfRange { row, name, value } => {
                write!(f, "maneuver #{row} ({name}): tolerance {value} out of range")
            }
            Self::DuplicateName { name } => write!(f, "maneuver {name} listed more than once"),
            Self::NotInCatalog { row, name } => {
                write!(f, "maneuver #{row}: {name} is not a catalog maneuver")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl std::convert::From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind }
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(x: serde_json::Error) -> Error {
        Error { kind: x.into() }
    }
}

impl std::convert::From<std::string::FromUtf8Error> for Error {
    fn from(x: std::string::FromUtf8Error) -> Error {
        Error { kind: x.into() }
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(x: std::io::Error) -> Error {
        Error { kind: x.into() }
    }
}

pub type IResult<T> = Result<T, Error>;

pub fn failure_from_kind(kind: ErrorKind) -> Error {
    Error { kind }
}
