//! Arithmetic on numeric leaves.
//!
//! Exact numbers (integers and rationals of any size) are combined exactly with [`rug::Rational`],
//! and the result is re-encoded in the most compact form. A floating-point operand makes the
//! whole operation floating-point; exact values are never approximated otherwise. Complex
//! numbers are split into their real and imaginary parts and combined with the rectangular-form
//! formulas.

use cas_error::Error;
use crate::{
    blob::Kind,
    expr::{Expr, ExprView},
    predicate::{self, Tag},
    primitive::finite,
};
use rug::Rational;
use std::cmp::Ordering;

/// A real number, exact or floating-point.
#[derive(Debug, Clone, PartialEq)]
pub enum Real {
    Exact(Rational),
    Float(f64),
}

impl Real {
    /// Reads a real number.
    pub fn from_view<T: Tag>(e: ExprView<'_, T>) -> Self {
        match e.kind() {
            Kind::FloatingPoint => Self::Float(e.floating_point()),
            kind if kind.is_rational() => Self::Exact(e.rational()),
            kind => unreachable!("{} is not a real number", kind.name()),
        }
    }

    /// Returns the value as a double.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Exact(n) => n.to_f64(),
            Self::Float(n) => *n,
        }
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(n) => n.cmp0() == Ordering::Equal,
            Self::Float(n) => *n == 0.0,
        }
    }

    /// Returns true if the value is less than zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Exact(n) => n.cmp0() == Ordering::Less,
            Self::Float(n) => *n < 0.0,
        }
    }

    /// Encodes the value as an expression.
    pub fn to_expr(&self) -> Result<Expr, Error> {
        match self {
            Self::Exact(n) => Expr::from_rational(n.clone()),
            Self::Float(n) => Expr::float(*n),
        }
    }

    fn add(&self, rhs: &Self) -> Self {
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(Rational::from(a + b)),
            (a, b) => Self::Float(a.to_f64() + b.to_f64()),
        }
    }

    fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    fn mul(&self, rhs: &Self) -> Self {
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(Rational::from(a * b)),
            (a, b) => Self::Float(a.to_f64() * b.to_f64()),
        }
    }

    pub(crate) fn neg(&self) -> Self {
        match self {
            Self::Exact(n) => Self::Exact(Rational::from(-n)),
            Self::Float(n) => Self::Float(-n),
        }
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => Some(a.cmp(b)),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

/// A real or complex number.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Real(Real),
    Complex(Real, Real),
}

impl Numeric {
    /// Reads any number.
    pub fn from_view<T: Tag>(e: ExprView<'_, T>) -> Self {
        if e.kind() == Kind::ComplexNumber {
            Self::Complex(Real::from_view(e.real_part()), Real::from_view(e.imag_part()))
        } else {
            Self::Real(Real::from_view(e))
        }
    }

    /// Returns the real and imaginary parts. The imaginary part of a real number is an exact zero.
    pub fn into_parts(self) -> (Real, Real) {
        match self {
            Self::Real(re) => (re, Real::Exact(Rational::new())),
            Self::Complex(re, im) => (re, im),
        }
    }

    /// Encodes the value as an expression. A complex value with a zero imaginary part becomes a
    /// real number.
    pub fn to_expr(&self) -> Result<Expr, Error> {
        match self {
            Self::Real(re) => re.to_expr(),
            Self::Complex(re, im) if im.is_zero() => re.to_expr(),
            Self::Complex(re, im) => {
                let (re, im) = (re.to_expr()?, im.to_expr()?);
                Expr::composite(Kind::ComplexNumber, &[re.view(), im.view()])
            },
        }
    }
}

fn combine(
    lhs: ExprView<'_>,
    rhs: ExprView<'_>,
    real: impl Fn(&Real, &Real) -> Real,
    complex: impl Fn((Real, Real), (Real, Real)) -> (Real, Real),
) -> Result<Expr, Error> {
    debug_assert!(lhs.is::<predicate::Number>() && rhs.is::<predicate::Number>());

    let result = match (Numeric::from_view(lhs), Numeric::from_view(rhs)) {
        (Numeric::Real(a), Numeric::Real(b)) => Numeric::Real(real(&a, &b)),
        (a, b) => {
            let (re, im) = complex(a.into_parts(), b.into_parts());
            Numeric::Complex(re, im)
        },
    };
    result.to_expr()
}

/// Adds two numbers.
pub fn add(lhs: ExprView<'_>, rhs: ExprView<'_>) -> Result<Expr, Error> {
    combine(lhs, rhs, Real::add, |(a, b), (c, d)| (a.add(&c), b.add(&d)))
}

/// Subtracts `rhs` from `lhs`.
pub fn sub(lhs: ExprView<'_>, rhs: ExprView<'_>) -> Result<Expr, Error> {
    combine(lhs, rhs, Real::sub, |(a, b), (c, d)| (a.sub(&c), b.sub(&d)))
}

/// Multiplies two numbers.
pub fn mul(lhs: ExprView<'_>, rhs: ExprView<'_>) -> Result<Expr, Error> {
    combine(lhs, rhs, Real::mul, |(a, b), (c, d)| {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        (a.mul(&c).sub(&b.mul(&d)), a.mul(&d).add(&b.mul(&c)))
    })
}

/// Returns the reciprocal of an exact rational number, which must not be zero.
pub fn recip(n: ExprView<'_>) -> Result<Expr, Error> {
    debug_assert!(n.is::<predicate::Rational>());
    Expr::from_rational(n.rational().recip())
}

/// Returns true if the value of a floating-point number is integral.
pub fn is_integral(value: f64) -> bool {
    finite(value).is_ok() && value.fract() == 0.0
}

#[cfg(test)]
mod tests {
    use crate::primitive::{int, rational};
    use pretty_assertions::assert_eq;
    use super::*;

    fn exact(num: i64, denom: i64) -> Expr {
        Expr::rational(num, denom).unwrap()
    }

    #[test]
    fn exact_sum_is_reduced() {
        let sum = add(exact(1, 6).view(), exact(1, 3).view()).unwrap();
        assert_eq!(sum, exact(1, 2));

        let sum = add(exact(1, 2).view(), exact(1, 2).view()).unwrap();
        assert_eq!(sum.view().kind(), Kind::SmallInt);
        assert_eq!(sum, Expr::from(1));
    }

    #[test]
    fn crosses_small_boundary() {
        let max = Expr::from(i16::MAX);
        let sum = add(max.view(), Expr::from(1).view()).unwrap();
        assert_eq!(sum.view().kind(), Kind::LargeInt);
        assert_eq!(sum.view().integer(), int(i16::MAX) + 1);

        let back = sub(sum.view(), Expr::from(1).view()).unwrap();
        assert_eq!(back.view().kind(), Kind::SmallInt);
    }

    #[test]
    fn large_product() {
        let big = Expr::integer(int(1) << 64u32).unwrap();
        let product = mul(big.view(), exact(1, 3).view()).unwrap();
        assert_eq!(product.view().rational(), rational(int(1) << 64u32, 3));
    }

    #[test]
    fn float_contaminates() {
        let product = mul(Expr::float(0.5).unwrap().view(), Expr::from(3).view()).unwrap();
        assert_eq!(product, Expr::float(1.5).unwrap());
    }

    #[test]
    fn complex_arithmetic() {
        let i = Expr::complex(0, 1).unwrap();
        let minus_one = mul(i.view(), i.view()).unwrap();
        assert_eq!(minus_one, Expr::from(-1));

        let z = Expr::complex(1, 2).unwrap();
        let w = Expr::complex(3, -1).unwrap();
        assert_eq!(add(z.view(), w.view()).unwrap(), Expr::complex(4, 1).unwrap());
        assert_eq!(mul(z.view(), w.view()).unwrap(), Expr::complex(5, 5).unwrap());

        // imaginary parts cancel
        let conj = Expr::complex(1, -2).unwrap();
        assert_eq!(add(z.view(), conj.view()).unwrap(), Expr::from(2));
    }

    #[test]
    fn reciprocal() {
        assert_eq!(recip(exact(-2, 3).view()).unwrap(), exact(-3, 2));
        assert_eq!(recip(Expr::from(4).view()).unwrap(), exact(1, 4));
    }

    #[test]
    fn ordering_is_exact() {
        let a = Real::Exact(rational((int(1) << 80u32) + 1, 1));
        let b = Real::Exact(rational(int(1) << 80u32, 1));
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Greater));
        assert_eq!(Real::Float(0.5).partial_cmp(&Real::Exact(rational(1, 3))), Some(Ordering::Greater));
    }
}
