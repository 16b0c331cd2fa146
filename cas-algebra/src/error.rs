//! Errors that can occur while constructing or simplifying expressions.
//!
//! Each kind falls into one of the three [`ErrorCategory`](cas_error::ErrorCategory) variants:
//! invalid arguments (caller mistakes), domain errors (values that are numerically out of domain)
//! and range errors (the capacity of the binary encoding was exceeded).

use cas_attrs::ErrorKind;
use cas_error::ErrorKind;

/// A symbol, constant or function was given an empty name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = InvalidArgument, message = "names must not be empty")]
pub struct EmptyName;

/// A name contains a NUL byte, which is reserved as the terminator of long names.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidArgument,
    message = format!("name `{}` contains a NUL byte", name.escape_default()),
)]
pub struct NulInName {
    /// The offending name.
    pub name: String,
}

/// A rational number was constructed with a zero denominator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = InvalidArgument, message = "denominator of a rational number must not be zero")]
pub struct ZeroDenominator;

/// A floating-point value was `NaN` or infinite.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("floating-point value `{}` is not finite", value),
)]
pub struct NonFiniteFloat {
    /// The offending value.
    pub value: f64,
}

/// An integer does not fit into the fixed-width field it is requested as.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("integer `{}` does not fit into {}", value, target),
)]
pub struct IntegerOutOfRange {
    /// The integer, printed in decimal.
    pub value: String,

    /// The name of the target type.
    pub target: &'static str,
}

/// A fixed-arity composite was given the wrong number of operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidArgument,
    message = format!("{} must be created with exactly {} operands, got {}", kind, expected, found),
)]
pub struct WrongOperandCount {
    /// The kind of composite being constructed.
    pub kind: &'static str,

    /// The number of operands required.
    pub expected: usize,

    /// The number of operands given.
    pub found: usize,
}

/// A complex number was constructed from parts that are not real numbers.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidArgument,
    message = "complex numbers must be created from two real numbers",
    help = "build non-numeric complex expressions as a sum with the imaginary unit instead",
)]
pub struct ComplexPartNotReal;

/// Attempted to compute `0^0`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(category = InvalidArgument, message = "`0^0` is undefined")]
pub struct ZeroToZero;

/// Attempted to raise zero to a negative exponent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = "division by zero",
    help = "zero raised to a negative exponent has no value",
)]
pub struct ZeroToNegative;

/// A name is too long to be stored.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Range,
    message = format!("name of {} bytes is too long, the limit is {} bytes", len, max),
)]
pub struct NameTooLong {
    /// The length of the name, in bytes.
    pub len: usize,

    /// The maximum supported length, in bytes.
    pub max: usize,
}

/// The remote data of a node does not fit into the extent field.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Range,
    message = format!("extent of {} blobs exceeds the limit of {}", extent, max),
)]
pub struct ExtentOverflow {
    /// The extent that was requested.
    pub extent: usize,

    /// The largest extent that can be stored.
    pub max: usize,
}

/// The distance from a header to its remote data does not fit into the offset field.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Range,
    message = format!("offset of {} blobs exceeds the limit of {}", offset, max),
    help = "split the expression into smaller sub-expressions",
)]
pub struct OffsetOverflow {
    /// The offset that was requested.
    pub offset: usize,

    /// The largest offset that can be stored.
    pub max: usize,
}

/// A sum, product or function has too many operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Range,
    message = format!("{} operands exceed the limit of {}", count, max),
)]
pub struct OperandCountOverflow {
    /// The number of operands given.
    pub count: usize,

    /// The maximum number of operands.
    pub max: usize,
}

/// A large integer has too many limbs to be stored.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Range,
    message = format!("large integer of {} limbs exceeds the limit of {}", limbs, max),
)]
pub struct LimbCountOverflow {
    /// The number of 64-bit limbs of the integer.
    pub limbs: usize,

    /// The maximum number of limbs.
    pub max: usize,
}

/// The function is not a known builtin.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidArgument,
    message = format!("the `{}` function does not exist", name),
    help = if suggestions.is_empty() {
        "see `funcs::BUILTINS` for a list of available functions".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", suggestions[0])
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function that was looked up.
    pub name: String,

    /// Builtins with similar names.
    pub suggestions: Vec<&'static str>,
}
