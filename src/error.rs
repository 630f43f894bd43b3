//! Errors raised when constructing individual commit components.
//!
//! Parsing and validating a whole message never fails; these errors only come
//! from the standalone constructors such as [`Type::parse`][crate::Type::parse].

use std::fmt;

/// The error returned when a standalone component is malformed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    context: Option<String>,
}

impl Error {
    /// Create a new error from a `ErrorKind`.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    pub(crate) fn set_context(mut self, context: impl fmt::Display) -> Self {
        self.context = Some(context.to_string());
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if let Some(context) = self.context.as_deref() {
            write!(f, ": {context:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// All possible error kinds returned when constructing a component.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The commit type is not a run of alphanumeric characters.
    InvalidType,

    /// The scope is empty or contains a closing parenthesis.
    InvalidScope,

    /// The name does not match any semantic-versioning impact.
    UnknownImpact,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidType => "invalid type format",
            ErrorKind::InvalidScope => "invalid scope format",
            ErrorKind::UnknownImpact => "unknown semver impact",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
