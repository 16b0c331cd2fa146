//! Simplification of powers.
//!
//! The rules are tried in order. Rules that produce numbers come first, since nothing else
//! applies to a number. Nested powers are only combined where this is valid for every value of
//! the inner base: if the outer exponent is an integer, or if the inner base is positive.

use cas_error::Error;
use crate::{
    blob::Kind,
    consts::{I, ONE, ONE_HALF, ZERO},
    error::{ZeroToNegative, ZeroToZero},
    expr::{Expr, ExprView},
    number::{self, is_integral, Numeric, Real},
    predicate::{
        is,
        ComplexDomain,
        FloatingPoint,
        Integer,
        Negative,
        Number,
        One,
        Positive,
        Power,
        Rational,
        Small,
        Zero,
    },
    primitive::complex,
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer as BigInt, Rational as BigRational};
use super::{product::simplify_product, record, step::Step};

/// Simplifies `base^exp`.
pub(crate) fn simplify_power(
    base: ExprView<'_>,
    exp: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    if is::<One>(base) {
        record(Step::PowerOfOne, steps);
        return Ok(ONE.clone());
    } else if is::<Zero>(base) && is::<Zero>(exp) {
        return Err(ZeroToZero.into());
    } else if is::<Zero>(exp) {
        record(Step::ZeroExponent, steps);
        return Ok(ONE.clone());
    } else if is::<One>(exp) {
        record(Step::UnitExponent, steps);
        return Ok(base.to_expr());
    }

    if is::<Zero>(base) {
        if exp.is::<Negative>() {
            return Err(ZeroToNegative.into());
        }
        record(Step::PowerOfZero, steps);
        return Ok(ZERO.clone());
    }

    // complex exponentiation is left to numeric evaluation
    if is::<ComplexDomain>(base) || is::<ComplexDomain>(exp) {
        return raw(base, exp);
    }

    let real_numbers = is::<Number>(base) && is::<Number>(exp);
    if real_numbers && (is::<FloatingPoint>(base) || is::<FloatingPoint>(exp)) {
        let (b, e) = (Real::from_view(base), Real::from_view(exp));
        if b.is_negative() && !is_integral(e.to_f64()) {
            record(Step::ComplexPower, steps);
            return complex_power(b.to_f64(), e.to_f64());
        }

        record(Step::EvaluatePower, steps);
        return Expr::float(b.to_f64().powf(e.to_f64()));
    }

    if base.satisfies(Rational) && exp.satisfies(Integer & Small) {
        record(Step::IntegerPower, steps);
        return integer_power(base, exp.small_int(), steps);
    }

    if base.satisfies(Power) && exp.satisfies(Integer) {
        record(Step::PowerOfPower, steps);
        return power_of_power(base, exp, steps);
    }

    if base.satisfies(Rational) && exp.satisfies(Rational & !Integer) {
        if let Some(root) = root(base, exp, steps)? {
            return Ok(root);
        }
    }

    if base.satisfies(Power) && base.first_operand().satisfies(Positive) {
        record(Step::PowerOfPower, steps);
        return power_of_power(base, exp, steps);
    }

    raw(base, exp)
}

fn raw(base: ExprView<'_>, exp: ExprView<'_>) -> Result<Expr, Error> {
    Expr::composite(Kind::Power, &[base, exp])
}

/// Evaluates the principal value of `base^exp` for a negative base.
fn complex_power(base: f64, exp: f64) -> Result<Expr, Error> {
    let value = complex(base).pow(&complex(exp));
    let (re, im) = (value.real().to_f64(), value.imag().to_f64());
    Numeric::Complex(Real::Float(re), Real::Float(im)).to_expr()
}

/// Raises a rational number to an integer power by repeated squaring.
fn integer_power(
    base: ExprView<'_>,
    exp: i16,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    let mut n = exp.unsigned_abs();
    let mut square = base.to_expr();
    let mut result = ONE.clone();

    loop {
        if n & 1 == 1 {
            let product = simplify_product(&[result.view(), square.view()], steps)?;
            result = product;
        }

        n >>= 1;
        if n == 0 {
            break;
        }

        let product = simplify_product(&[square.view(), square.view()], steps)?;
        square = product;
    }

    if exp < 0 {
        number::recip(result.view())
    } else {
        Ok(result)
    }
}

/// `(a^b)^c = a^(b*c)`
fn power_of_power(
    base: ExprView<'_>,
    exp: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    let (inner_base, inner_exp) = (base.first_operand(), base.second_operand());
    let exp = simplify_product(&[inner_exp, exp], steps)?;
    simplify_power(inner_base, exp.view(), steps)
}

/// Returns the exact `n`-th root of a non-negative integer, if there is one.
fn exact_root(value: &BigInt, n: u32) -> Option<BigInt> {
    let root = value.clone().root(n);
    (root.clone().pow(n) == *value).then_some(root)
}

/// Extracts the root of a rational base with a non-integer rational exponent. Returns [`None`] if
/// the root is not rational.
///
/// The square root of a negative rational is written as `i` times the root of its negation, which
/// is only done if that root is exact.
fn root(
    base: ExprView<'_>,
    exp: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Option<Expr>, Error> {
    let value = base.rational();
    if value.cmp0().is_lt() {
        if exp != ONE_HALF.view() {
            return Ok(None);
        }

        let negated = Expr::from_rational(BigRational::from(-&value))?;
        let root = simplify_power(negated.view(), exp, steps)?;
        if !root.satisfies(Rational) {
            return Ok(None);
        }

        record(Step::ImaginaryRoot, steps);
        return simplify_product(&[I.view(), root.view()], steps).map(Some);
    }

    let exp = exp.rational();
    let Some(n) = exp.denom().to_u32() else {
        return Ok(None);
    };
    let (Some(numer), Some(denom)) = (exact_root(value.numer(), n), exact_root(value.denom(), n)) else {
        return Ok(None);
    };

    record(Step::Root, steps);
    let root = Expr::from_rational(BigRational::from((numer, denom)))?;
    let power = Expr::integer(exp.numer().clone())?;
    simplify_power(root.view(), power.view(), steps).map(Some)
}
