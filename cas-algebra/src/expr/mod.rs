//! Owned expressions and borrowed views into them.
//!
//! An [`Expr`] owns the [blob sequence](crate::blob) of one complete expression tree. Everything
//! that reads an expression goes through an [`ExprView`], a `Copy` handle pointing at the root of
//! some (sub-)expression inside such a buffer. Views are cheap and never allocate; an `Expr` is
//! only created when a new tree is built.
//!
//! # Construction
//!
//! Leaves are created with the numeric [`From`] implementations and the named constructors:
//!
//! ```
//! use cas_algebra::{blob::{Domain, Kind}, Expr};
//!
//! let n = Expr::from(42);
//! let half = Expr::rational(2, 4).unwrap();
//! let x = Expr::symbol_with("x", Domain::Real).unwrap();
//! let cos = Expr::function("cos", &[x.view()]).unwrap();
//!
//! assert_eq!(half, Expr::rational(1, 2).unwrap());
//! assert_eq!(cos.view().kind(), Kind::Function);
//! ```
//!
//! [`Expr::composite`] assembles sums, products, powers and complex numbers from operands
//! **without** simplification. Use the constructors of the [`simplify`](crate::simplify) module, or
//! the arithmetic operators, to build expressions in canonical form instead.
//!
//! # Equality
//!
//! The [`PartialEq`] implementations compare the encoded values. Two expressions are equal if
//! they have the same structure and the same leaves; `2*a` and `a*2` are different expressions
//! unless both were simplified, in which case they are identical.

mod ops;
mod view;

pub use view::ExprView;

use cas_error::Error;
use crate::{
    blob::{self, Blob, Buffer, Domain, Kind},
    error::{ComplexPartNotReal, WrongOperandCount, ZeroDenominator},
    funcs::{self, Evaluator},
    predicate::{ComplexDomain, Number, Predicate, Tag},
    primitive::rational,
};
use rug::{Integer, Rational};
use std::fmt;

/// An owned expression.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Expr {
    buf: Buffer,
}

impl Expr {
    /// Wraps a buffer holding a complete expression with its root at index zero.
    pub(crate) fn from_buffer(buf: Buffer) -> Self {
        Self { buf }
    }

    /// Returns the blobs of the expression.
    pub fn blobs(&self) -> &[Blob] {
        &self.buf
    }

    /// Returns an untagged view of the expression.
    pub fn view(&self) -> ExprView<'_> {
        ExprView::from(self)
    }

    /// Returns a view tagged with `T`, asserting the tag in checked builds.
    pub fn view_as<T: Tag>(&self) -> ExprView<'_, T> {
        ExprView::from(self)
    }

    /// Returns true if the expression satisfies the predicate.
    pub fn satisfies<P: Predicate>(&self, predicate: P) -> bool {
        self.view().satisfies(predicate)
    }

    /// Creates an integer of any size.
    pub fn integer(n: impl Into<Integer>) -> Result<Self, Error> {
        blob::construct_integer(&n.into()).map(Self::from_buffer)
    }

    /// Creates the rational number `num / denom` in lowest terms.
    pub fn rational(num: impl Into<Integer>, denom: impl Into<Integer>) -> Result<Self, Error> {
        let denom = denom.into();
        if denom == 0 {
            return Err(ZeroDenominator.into());
        }
        Self::from_rational(rational(num.into(), denom))
    }

    /// Creates an exact rational number, demoting it to an integer if its denominator is one.
    pub fn from_rational(n: Rational) -> Result<Self, Error> {
        blob::construct_rational(&n).map(Self::from_buffer)
    }

    /// Creates a floating-point number. The value must be finite.
    pub fn float(value: f64) -> Result<Self, Error> {
        blob::construct_float(value).map(Self::from_buffer)
    }

    /// Creates an unconstrained symbol.
    pub fn symbol(name: &str) -> Result<Self, Error> {
        Self::symbol_with(name, Domain::Complex)
    }

    /// Creates a symbol constrained to the given domain.
    pub fn symbol_with(name: &str, domain: Domain) -> Result<Self, Error> {
        blob::construct_symbol(name, domain).map(Self::from_buffer)
    }

    /// Creates a named constant with a finite value, such as `pi`.
    pub fn constant(name: &str, value: f64) -> Result<Self, Error> {
        blob::construct_constant(name, value).map(Self::from_buffer)
    }

    /// Creates a call to one of the [builtin functions](funcs::BUILTINS).
    pub fn function(name: &str, args: &[ExprView<'_>]) -> Result<Self, Error> {
        let builtin = funcs::builtin(name)?;
        if builtin.eval.arity() != args.len() {
            return Err(WrongOperandCount {
                kind: builtin.name,
                expected: builtin.eval.arity(),
                found: args.len(),
            }.into());
        }

        Self::call(builtin.name, builtin.id, args)
    }

    /// Creates a call to a function of one argument with a custom evaluator.
    pub fn unary(name: &str, eval: fn(f64) -> f64, arg: ExprView<'_>) -> Result<Self, Error> {
        let id = funcs::register(Evaluator::Unary(eval));
        Self::call(name, id, &[arg])
    }

    /// Creates a call to a function of two arguments with a custom evaluator.
    pub fn binary(
        name: &str,
        eval: fn(f64, f64) -> f64,
        lhs: ExprView<'_>,
        rhs: ExprView<'_>,
    ) -> Result<Self, Error> {
        let id = funcs::register(Evaluator::Binary(eval));
        Self::call(name, id, &[lhs, rhs])
    }

    fn call(name: &str, id: funcs::EvalId, args: &[ExprView<'_>]) -> Result<Self, Error> {
        let args = args.iter().map(|arg| arg.blobs()).collect::<Vec<_>>();
        blob::construct_function(name, id, &args).map(Self::from_buffer)
    }

    /// Creates the complex number `re + im*i` from two real numbers, without simplification.
    pub fn complex(re: impl Into<Expr>, im: impl Into<Expr>) -> Result<Self, Error> {
        let (re, im) = (re.into(), im.into());
        Self::composite(Kind::ComplexNumber, &[re.view(), im.view()])
    }

    /// Assembles a sum, product, power or complex number from its operands, **without**
    /// simplification.
    ///
    /// A power needs exactly two operands (base and exponent), and a complex number exactly two
    /// real numbers (real and imaginary part).
    pub fn composite(kind: Kind, operands: &[ExprView<'_>]) -> Result<Self, Error> {
        debug_assert!(matches!(kind, Kind::Sum | Kind::Product | Kind::Power | Kind::ComplexNumber));

        if matches!(kind, Kind::Power | Kind::ComplexNumber) && operands.len() != 2 {
            return Err(WrongOperandCount {
                kind: kind.name(),
                expected: 2,
                found: operands.len(),
            }.into());
        }

        if kind == Kind::ComplexNumber
            && !operands.iter().all(|op| op.satisfies(Number & !ComplexDomain))
        {
            return Err(ComplexPartNotReal.into());
        }

        let operands = operands.iter().map(|op| op.blobs()).collect::<Vec<_>>();
        blob::construct_composite(kind, &operands).map(Self::from_buffer)
    }
}

impl From<i16> for Expr {
    fn from(n: i16) -> Self {
        Self::from_buffer(blob::construct_word(n.into()))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::from_buffer(blob::construct_word(n.into()))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::from_buffer(blob::construct_word(n))
    }
}

impl<T: Tag> From<ExprView<'_, T>> for Expr {
    fn from(view: ExprView<'_, T>) -> Self {
        view.to_expr()
    }
}

impl<T: Tag> PartialEq<ExprView<'_, T>> for Expr {
    fn eq(&self, other: &ExprView<'_, T>) -> bool {
        blob::equal(self.blobs(), other.blobs())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self)
    }
}

#[cfg(test)]
mod tests {
    use cas_error::ErrorCategory;
    use crate::{
        error::{NonFiniteFloat, UnknownFunction},
        primitive::int,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integers_pick_encoding() {
        assert_eq!(Expr::from(i16::MAX as i32).view().kind(), Kind::SmallInt);
        assert_eq!(Expr::from(i16::MAX as i32 + 1).view().kind(), Kind::LargeInt);
        assert_eq!(Expr::from(i16::MIN as i32 - 1).view().kind(), Kind::LargeInt);
        assert_eq!(Expr::integer(int(-5)).unwrap(), Expr::from(-5));
        assert_eq!(Expr::from(70_000i64).view().integer(), int(70_000));
    }

    #[test]
    fn rationals_are_normalized() {
        assert_eq!(Expr::rational(9, 6).unwrap().view().small_rational(), (3, 2));
        assert_eq!(Expr::rational(-2, -3).unwrap().view().small_rational(), (2, 3));
        assert_eq!(Expr::rational(8, 4).unwrap(), Expr::from(2));
        assert_eq!(Expr::rational(8, 4).unwrap().view().kind(), Kind::SmallInt);

        let large = Expr::rational(int(1) << 80u32, 6).unwrap();
        assert_eq!(large.view().kind(), Kind::LargeRational);
        assert_eq!(large.view().rational(), rational(int(1) << 79u32, 3));
    }

    #[test]
    fn invalid_leaves() {
        let err = Expr::rational(1, 0).unwrap_err();
        assert!(err.is::<ZeroDenominator>());
        assert_eq!(err.category(), ErrorCategory::InvalidArgument);

        let err = Expr::float(f64::INFINITY).unwrap_err();
        assert!(err.is::<NonFiniteFloat>());
        assert_eq!(err.category(), ErrorCategory::Domain);

        assert!(Expr::symbol("").is_err());
        assert!(Expr::constant("c", f64::NAN).is_err());
    }

    #[test]
    fn functions() {
        let x = Expr::symbol("x").unwrap();
        let sin = Expr::function("sin", &[x.view()]).unwrap();
        assert_eq!(sin.view().name(), "sin");
        assert_eq!(sin.view().n_operands(), 1);
        assert_eq!(sin.view().first_operand(), x);

        let err = Expr::function("atan2", &[x.view()]).unwrap_err();
        assert!(err.is::<WrongOperandCount>());

        let err = Expr::function("sine", &[x.view()]).unwrap_err();
        assert!(err.is::<UnknownFunction>());

        fn halve(x: f64) -> f64 {
            x / 2.0
        }
        let custom = Expr::unary("halve", halve, x.view()).unwrap();
        assert_eq!(custom.view().name(), "halve");
        let eval = funcs::evaluator(custom.view().evaluator()).unwrap();
        assert_eq!(eval.apply(&[3.0]), Some(1.5));
    }

    #[test]
    fn raw_composites() {
        let a = Expr::symbol("a").unwrap();
        let b = Expr::symbol("b").unwrap();

        // no simplification takes place
        let sum = Expr::composite(Kind::Sum, &[b.view(), a.view(), a.view()]).unwrap();
        assert_eq!(sum.view().n_operands(), 3);
        assert_eq!(sum.view().first_operand(), b);

        let err = Expr::composite(Kind::Power, &[a.view()]).unwrap_err();
        assert!(err.is::<WrongOperandCount>());

        let err = Expr::composite(Kind::ComplexNumber, &[a.view(), b.view()]).unwrap_err();
        assert!(err.is::<ComplexPartNotReal>());

        let z = Expr::complex(1, Expr::rational(1, 2).unwrap()).unwrap();
        assert_eq!(z.view().real_part(), Expr::from(1));
        assert_eq!(z.view().imag_part(), Expr::rational(1, 2).unwrap());
    }
}
