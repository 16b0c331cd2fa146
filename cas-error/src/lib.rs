//! Contains the common [`ErrorKind`] trait used by all errors to describe what went wrong, and the
//! [`Error`] type that carries any of them.
//!
//! Errors in the expression engine are always reported at the point of detection and never leave
//! a partially built expression behind. Callers that translate errors into some other reporting
//! mechanism (exceptions, tagged results, ...) should dispatch on [`ErrorCategory`], which
//! separates bad input from numerically out-of-domain values and from exceeded encoding limits.

use std::{any::Any, fmt::{self, Debug, Display}};

/// The broad class an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input caused by a caller mistake, such as an empty symbol name or a zero
    /// denominator.
    InvalidArgument,

    /// A value that is numerically out of domain, such as a non-finite floating-point number.
    Domain,

    /// The capacity of the binary encoding was exceeded, such as a name or a payload that is too
    /// large for the offset / extent fields.
    Range,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Domain => write!(f, "domain error"),
            Self::Range => write!(f, "range error"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the category of this error.
    fn category(&self) -> ErrorCategory;

    /// The message describing the error.
    fn message(&self) -> String;

    /// Optional help text, describing what the user can do to fix the error.
    fn help(&self) -> Option<String> {
        None
    }

    /// Returns `self` as [`Any`], so that the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;
}

/// An error produced by some operation, holding its [`ErrorKind`].
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: impl ErrorKind + 'static) -> Self {
        Self { kind: Box::new(kind) }
    }

    /// Returns the category of the contained error kind.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns true if the contained error kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the contained error kind if it is of type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.category(), self.kind.message())?;
        if let Some(help) = self.kind.help() {
            write!(f, " (help: {})", help)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl<K: ErrorKind + 'static> From<K> for Error {
    fn from(kind: K) -> Self {
        Self::new(kind)
    }
}
