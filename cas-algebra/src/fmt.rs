//! Human-readable printing of expressions.
//!
//! [`Expr`] and [`ExprView`] implement [`Display`] with conventional infix notation. Operands are
//! parenthesized only where operator precedence requires it, and a few shapes get special
//! treatment:
//!
//! - A summand with a negative numeric coefficient is printed as a subtraction: `a - 2*b`.
//! - Factors with a negative numeric exponent are moved into a denominator, along with the
//!   denominator of a fractional coefficient: `2*a/(3*b)`.
//! - An exponent of `1/2` prints as a square root: `sqrt(x)`.
//! - Complex numbers print in rectangular form with `i` as the imaginary unit: `1 - 2*i`.
//!
//! ```
//! use cas_algebra::Expr;
//!
//! let a = Expr::symbol("a").unwrap();
//! let b = Expr::symbol("b").unwrap();
//! let quotient = (&(&Expr::from(2) * &a).unwrap() / &b).unwrap();
//! assert_eq!(quotient.to_string(), "2*a/b");
//! ```

use crate::{
    blob::Kind,
    consts::{MINUS_ONE, ONE_HALF},
    expr::{Expr, ExprView},
    number::Real,
    operands::split_as_power,
    predicate::{Constant, FloatingPoint, Function, Integer, Negative, One, Positive, Rational, Symbol, Tag},
};
use std::fmt::{self, Display, Formatter};

/// The precedence of a product. Sums bind weaker, powers and atoms stronger.
const PRODUCT: u8 = 2;

fn precedence(e: ExprView<'_>) -> u8 {
    match e.kind() {
        Kind::Sum | Kind::ComplexNumber => 1,
        Kind::Product => PRODUCT,
        Kind::Power => 3,
        _ => 4,
    }
}

/// Returns true if the base or exponent of a power can be printed without parentheses.
fn is_scalar_power_part(e: ExprView<'_>) -> bool {
    e.satisfies(Symbol | Constant | Function | (Integer & Positive))
}

fn is_negative_real(e: ExprView<'_>) -> bool {
    e.satisfies((Rational | FloatingPoint) & Negative)
}

/// Negates a real number.
fn negate(n: ExprView<'_>) -> Result<Expr, fmt::Error> {
    Real::from_view(n).neg().to_expr().map_err(|_| fmt::Error)
}

/// Builds `base^exp` without simplification, or just `base` for a unit exponent.
fn power(base: ExprView<'_>, exp: Expr) -> Result<Expr, fmt::Error> {
    if exp.satisfies(One) {
        Ok(base.to_expr())
    } else {
        Expr::composite(Kind::Power, &[base, exp.view()]).map_err(|_| fmt::Error)
    }
}

fn write_expr(f: &mut Formatter<'_>, e: ExprView<'_>) -> fmt::Result {
    match e.kind() {
        Kind::ShortSymbol | Kind::LongSymbol | Kind::Constant => f.write_str(&e.name()),
        Kind::SmallInt
        | Kind::SmallRational
        | Kind::FloatingPoint
        | Kind::LargeInt
        | Kind::LargeRational => write!(f, "{}", Real::from_view(e)),
        Kind::ComplexNumber => write_complex(f, e),
        Kind::Sum => write_sum(f, e),
        Kind::Product => write_product(f, &e.operands().map(ExprView::to_expr).collect::<Vec<_>>()),
        Kind::Power => write_power(f, e.first_operand(), e.second_operand()),
        Kind::Function => write_function(f, e),
    }
}

fn write_complex(f: &mut Formatter<'_>, e: ExprView<'_>) -> fmt::Result {
    let (re, im) = (Real::from_view(e.real_part()), Real::from_view(e.imag_part()));

    // an exact zero real part is left out, a floating-point one is not
    let pure = matches!(re, Real::Exact(_)) && re.is_zero();
    if !pure {
        write!(f, "{}", re)?;
    }

    let im = match (im.is_negative(), pure) {
        (true, true) => {
            f.write_str("-")?;
            im.neg()
        },
        (true, false) => {
            f.write_str(" - ")?;
            im.neg()
        },
        (false, true) => im,
        (false, false) => {
            f.write_str(" + ")?;
            im
        },
    };

    if im == Real::Exact(1.into()) {
        f.write_str("i")
    } else {
        write!(f, "{}*i", im)
    }
}

/// If the summand is a product with a negative numeric coefficient, returns the factors of its
/// negation.
fn negated_product(e: ExprView<'_>) -> Result<Option<Vec<Expr>>, fmt::Error> {
    if e.kind() != Kind::Product || !is_negative_real(e.first_operand()) {
        return Ok(None);
    }

    let coefficient = negate(e.first_operand())?;
    let mut factors = Vec::with_capacity(e.n_operands());
    if !coefficient.satisfies(One) {
        factors.push(coefficient);
    }
    factors.extend(e.operands().skip(1).map(ExprView::to_expr));
    Ok(Some(factors))
}

fn write_sum(f: &mut Formatter<'_>, e: ExprView<'_>) -> fmt::Result {
    let mut terms = e.operands();
    if let Some(first) = terms.next() {
        write_expr(f, first)?;
    }

    for term in terms {
        match negated_product(term)? {
            Some(factors) => {
                f.write_str(" - ")?;
                write_product(f, &factors)?;
            },
            None => {
                f.write_str(" + ")?;
                write_expr(f, term)?;
            },
        }
    }

    Ok(())
}

/// Splits the factors of a product into a numerator and a denominator.
fn split_fraction(factors: &[Expr]) -> Result<(Vec<Expr>, Vec<Expr>), fmt::Error> {
    let mut num = Vec::with_capacity(factors.len());
    let mut denom = Vec::new();

    for factor in factors {
        let (base, exp) = split_as_power(factor.view());
        if is_negative_real(exp) {
            denom.push(power(base, negate(exp)?)?);
        } else {
            num.push(factor.clone());
        }
    }

    // `8/3*a` prints as `8*a/3`
    if let Some(first) = num.first_mut() {
        if first.satisfies(Rational & !Integer) {
            let (n, d) = first.view().rational().into_numer_denom();
            *first = Expr::integer(n).map_err(|_| fmt::Error)?;
            denom.insert(0, Expr::integer(d).map_err(|_| fmt::Error)?);
        }
    }

    Ok((num, denom))
}

fn write_product(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let (num, denom) = split_fraction(factors)?;

    match num.as_slice() {
        [] => f.write_str("1")?,
        [factor] if precedence(factor.view()) < PRODUCT => write!(f, "({})", factor)?,
        _ => write_factors(f, &num)?,
    }

    match denom.as_slice() {
        [] => Ok(()),
        [factor] if precedence(factor.view()) > PRODUCT => write!(f, "/{}", factor),
        [factor] => write!(f, "/({})", factor),
        _ => {
            f.write_str("/(")?;
            write_factors(f, &denom)?;
            f.write_str(")")
        },
    }
}

/// Writes factors separated by `*`, without moving any of them into a denominator.
fn write_factors(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let (first, rest) = match factors.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    if rest.is_empty() {
        return write!(f, "{}", first);
    }

    if *first == *MINUS_ONE {
        f.write_str("-")?;
    } else if !first.satisfies(One) {
        write_factor(f, first)?;
        f.write_str("*")?;
    }

    for (i, factor) in rest.iter().enumerate() {
        if i > 0 {
            f.write_str("*")?;
        }
        write_factor(f, factor)?;
    }

    Ok(())
}

fn write_factor(f: &mut Formatter<'_>, factor: &Expr) -> fmt::Result {
    if precedence(factor.view()) < PRODUCT {
        write!(f, "({})", factor)
    } else {
        write!(f, "{}", factor)
    }
}

fn write_power(f: &mut Formatter<'_>, base: ExprView<'_>, exp: ExprView<'_>) -> fmt::Result {
    if exp == *ONE_HALF {
        return write!(f, "sqrt({})", base);
    }

    if is_negative_real(exp) {
        let denom = power(base, negate(exp)?)?;
        return if precedence(denom.view()) > PRODUCT {
            write!(f, "1/{}", denom)
        } else {
            write!(f, "1/({})", denom)
        };
    }

    if is_scalar_power_part(base) {
        write!(f, "{}", base)?;
    } else {
        write!(f, "({})", base)?;
    }

    if exp.satisfies(One) {
        Ok(())
    } else if is_scalar_power_part(exp) {
        write!(f, "^{}", exp)
    } else {
        write!(f, "^({})", exp)
    }
}

fn write_function(f: &mut Formatter<'_>, e: ExprView<'_>) -> fmt::Result {
    write!(f, "{}(", e.name())?;
    for (i, arg) in e.operands().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_expr(f, arg)?;
    }
    f.write_str(")")
}

impl Display for Real {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{}", n),
            // debug formatting keeps the decimal point of integral values
            Self::Float(n) => write!(f, "{:?}", n),
        }
    }
}

impl<T: Tag> Display for ExprView<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(f, self.erase())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(f, self.view())
    }
}
