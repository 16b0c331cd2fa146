//! Composable predicates over expressions.
//!
//! Every predicate is a zero-sized type implementing [`Predicate`]. Predicates combine with the
//! `&`, `|` and `!` operators into new predicate types, so a shape like "a rational number that is
//! not an integer" is written once and reused:
//!
//! ```
//! use cas_algebra::{predicate::{Integer, Rational}, Expr};
//!
//! let fraction = Rational & !Integer;
//! assert!(Expr::rational(3, 2).unwrap().view().satisfies(fraction));
//! assert!(!Expr::from(3).view().satisfies(fraction));
//! ```
//!
//! Predicates that also implement [`Default`] are [`Tag`]s and can be attached to an
//! [`ExprView`] to record a shape that has already been established.

use crate::{
    blob::{self, Domain, Kind},
    eval::eval_real,
    expr::ExprView,
    operands::operands_of,
};
use std::ops::{BitAnd, BitOr, Not as NotOp};

/// A boolean test on a single expression.
pub trait Predicate: Copy {
    /// Returns true if the expression satisfies the predicate.
    fn test(self, e: ExprView<'_>) -> bool;
}

/// A predicate that can be attached to an [`ExprView`] as a type-level tag.
pub trait Tag: Predicate + Default + 'static {}

impl<P: Predicate + Default + 'static> Tag for P {}

/// Returns true if the expression satisfies the tag `P`.
pub fn is<P: Tag>(e: ExprView<'_>) -> bool {
    P::default().test(e)
}

/// Returns true if all of the expressions satisfy the tag `P`.
pub fn are_all<P: Tag>(exprs: &[ExprView<'_>]) -> bool {
    exprs.iter().all(|&e| is::<P>(e))
}

/// Returns true if at least one of the expressions satisfies the tag `P`.
pub fn is_one_of<P: Tag>(exprs: &[ExprView<'_>]) -> bool {
    exprs.iter().any(|&e| is::<P>(e))
}

/// Both predicates hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct And<A, B>(pub A, pub B);

/// At least one of the predicates holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Or<A, B>(pub A, pub B);

/// The predicate does not hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Not<A>(pub A);

impl<A: Predicate, B: Predicate> Predicate for And<A, B> {
    fn test(self, e: ExprView<'_>) -> bool {
        self.0.test(e) && self.1.test(e)
    }
}

impl<A: Predicate, B: Predicate> Predicate for Or<A, B> {
    fn test(self, e: ExprView<'_>) -> bool {
        self.0.test(e) || self.1.test(e)
    }
}

impl<A: Predicate> Predicate for Not<A> {
    fn test(self, e: ExprView<'_>) -> bool {
        !self.0.test(e)
    }
}

/// Implements the `&`, `|` and `!` operators for predicate types.
macro_rules! combinators {
    ($($name:ident $(<$($param:ident),+>)?),* $(,)?) => {
        $(
            impl<$($($param: Predicate,)+)? R: Predicate> BitAnd<R> for $name $(<$($param),+>)? {
                type Output = And<Self, R>;

                fn bitand(self, rhs: R) -> Self::Output {
                    And(self, rhs)
                }
            }

            impl<$($($param: Predicate,)+)? R: Predicate> BitOr<R> for $name $(<$($param),+>)? {
                type Output = Or<Self, R>;

                fn bitor(self, rhs: R) -> Self::Output {
                    Or(self, rhs)
                }
            }

            impl $(<$($param: Predicate),+>)? NotOp for $name $(<$($param),+>)? {
                type Output = Not<Self>;

                fn not(self) -> Self::Output {
                    Not(self)
                }
            }
        )*
    };
}

/// Declares unit predicates that test the kind of the root node.
macro_rules! kind_predicates {
    ($($(#[$attr:meta])* $name:ident => $test:expr),* $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl Predicate for $name {
                fn test(self, e: ExprView<'_>) -> bool {
                    let test: fn(Kind) -> bool = $test;
                    test(e.kind())
                }
            }
        )*
    };
}

kind_predicates! {
    /// Any number, real or complex.
    Number => Kind::is_number,

    /// A small or large integer.
    Integer => Kind::is_integer,

    /// An exact rational number, including integers.
    Rational => Kind::is_rational,

    /// A floating-point number.
    FloatingPoint => Kind::is_floating_point,

    /// A node that fits into a single blob: a small integer, small rational or short symbol.
    Small => Kind::is_self_contained,

    /// An exact number that needs remote data: a large integer or large rational.
    Large => |kind| matches!(kind, Kind::LargeInt | Kind::LargeRational),

    /// A sum, product, power or function.
    Composite => Kind::is_composite,

    /// Anything that is not a composite.
    Scalar => |kind| !kind.is_composite(),

    /// A symbol, short or long.
    Symbol => Kind::is_symbol,

    /// A named constant.
    Constant => |kind| kind == Kind::Constant,

    /// A sum.
    Sum => |kind| kind == Kind::Sum,

    /// A product.
    Product => |kind| kind == Kind::Product,

    /// A power.
    Power => |kind| kind == Kind::Power,

    /// A function of one or two arguments.
    Function => |kind| kind == Kind::Function,

    /// A complex number.
    ComplexDomain => Kind::is_complex,
}

/// Every expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl Predicate for Any {
    fn test(self, _: ExprView<'_>) -> bool {
        true
    }
}

/// An expression that is known to be real.
///
/// Numbers other than complex numbers and constants are real, as are symbols constrained to a
/// real domain. Sums and products are real if all of their operands are. A power is real if its
/// base is positive and its exponent real, or if its base is real and its exponent an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealDomain;

impl Predicate for RealDomain {
    fn test(self, e: ExprView<'_>) -> bool {
        match e.kind() {
            Kind::ComplexNumber | Kind::Function => false,
            Kind::ShortSymbol | Kind::LongSymbol => blob::domain(e.header()).is_real(),
            Kind::Sum | Kind::Product => operands_of(e).all(|op| self.test(op)),
            Kind::Power => {
                let (base, exp) = (e.first_operand(), e.second_operand());
                (Positive.test(base) && self.test(exp)) || (self.test(base) && Integer.test(exp))
            },
            _ => true,
        }
    }
}

/// An expression that can be evaluated to a number: numbers, constants, and composites or
/// functions of those. Any symbol makes an expression non-evaluable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericallyEvaluable;

impl Predicate for NumericallyEvaluable {
    fn test(self, e: ExprView<'_>) -> bool {
        match e.kind() {
            Kind::ShortSymbol | Kind::LongSymbol => false,
            kind if kind.is_composite() => operands_of(e).all(|op| self.test(op)),
            _ => true,
        }
    }
}

/// An expression that is known to be strictly positive.
///
/// Numerically evaluable expressions are positive if they evaluate to a real value greater than
/// zero. Otherwise, symbols constrained to the positive reals are positive, as are sums and
/// products of positive operands and powers of a positive base with a real exponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positive;

impl Predicate for Positive {
    fn test(self, e: ExprView<'_>) -> bool {
        if NumericallyEvaluable.test(e) {
            return eval_real(e).is_some_and(|value| value > 0.0);
        }

        match e.kind() {
            Kind::ShortSymbol | Kind::LongSymbol => blob::domain(e.header()) == Domain::PositiveReal,
            Kind::Sum | Kind::Product => operands_of(e).all(|op| self.test(op)),
            Kind::Power => self.test(e.first_operand()) && RealDomain.test(e.second_operand()),
            _ => false,
        }
    }
}

/// A numerically evaluable expression with a real value less than zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Negative;

impl Predicate for Negative {
    fn test(self, e: ExprView<'_>) -> bool {
        NumericallyEvaluable.test(e) && eval_real(e).is_some_and(|value| value < 0.0)
    }
}

/// The exact integer zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;

impl Predicate for Zero {
    fn test(self, e: ExprView<'_>) -> bool {
        e.kind() == Kind::SmallInt && blob::small_int(e.header()) == 0
    }
}

/// The exact integer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct One;

impl Predicate for One {
    fn test(self, e: ExprView<'_>) -> bool {
        e.kind() == Kind::SmallInt && blob::small_int(e.header()) == 1
    }
}

combinators! {
    Any,
    Number,
    Integer,
    Rational,
    FloatingPoint,
    Small,
    Large,
    Composite,
    Scalar,
    Symbol,
    Constant,
    Sum,
    Product,
    Power,
    Function,
    RealDomain,
    ComplexDomain,
    NumericallyEvaluable,
    Positive,
    Negative,
    Zero,
    One,
    And<A, B>,
    Or<A, B>,
    Not<A>,
}

#[cfg(test)]
mod tests {
    use crate::{blob::Domain, Expr};
    use pretty_assertions::assert_eq;
    use super::*;

    fn symbol(name: &str, domain: Domain) -> Expr {
        Expr::symbol_with(name, domain).unwrap()
    }

    #[test]
    fn numbers() {
        let half = Expr::rational(1, 2).unwrap();
        let float = Expr::float(2.5).unwrap();
        let large = Expr::from(1_000_000);

        assert!(is::<And<Number, Rational>>(half.view()));
        assert!(!is::<Integer>(half.view()));
        assert!(is::<And<Small, Rational>>(half.view()));
        assert!(is::<And<Large, Integer>>(large.view()));
        assert!(is::<FloatingPoint>(float.view()));
        assert!(!is::<Rational>(float.view()));
        assert!(is::<Scalar>(float.view()));
    }

    #[test]
    fn operators_compose() {
        let a = symbol("a", Domain::Complex);
        let two = Expr::from(2);

        let shape = Symbol | (Integer & !Zero);
        assert!(a.view().satisfies(shape));
        assert!(two.view().satisfies(shape));
        assert!(!Expr::from(0).view().satisfies(shape));
        assert!(!Expr::float(2.0).unwrap().view().satisfies(shape));
    }

    #[test]
    fn all_and_one_of() {
        let a = symbol("a", Domain::Complex);
        let two = Expr::from(2);
        let three = Expr::from(3);

        assert!(are_all::<Number>(&[two.view(), three.view()]));
        assert!(!are_all::<Number>(&[two.view(), a.view()]));
        assert!(is_one_of::<Symbol>(&[two.view(), a.view()]));
        assert!(!is_one_of::<Symbol>(&[two.view(), three.view()]));
    }

    #[test]
    fn real_domain() {
        let x = symbol("x", Domain::Real);
        let z = symbol("z", Domain::Complex);
        let p = symbol("p", Domain::PositiveReal);
        let half = Expr::rational(1, 2).unwrap();

        assert!(is::<RealDomain>(x.view()));
        assert!(!is::<RealDomain>(z.view()));
        assert!(is::<RealDomain>(Expr::composite(Kind::Sum, &[x.view(), p.view()]).unwrap().view()));
        assert!(!is::<RealDomain>(Expr::composite(Kind::Sum, &[x.view(), z.view()]).unwrap().view()));

        // a real base needs an integer exponent, a positive one only needs a real exponent
        let x_to_half = Expr::composite(Kind::Power, &[x.view(), half.view()]).unwrap();
        let p_to_half = Expr::composite(Kind::Power, &[p.view(), half.view()]).unwrap();
        let x_squared = Expr::composite(Kind::Power, &[x.view(), Expr::from(2).view()]).unwrap();
        assert!(!is::<RealDomain>(x_to_half.view()));
        assert!(is::<RealDomain>(p_to_half.view()));
        assert!(is::<RealDomain>(x_squared.view()));

        assert!(is::<ComplexDomain>(Expr::complex(1, 2).unwrap().view()));
        assert!(!is::<RealDomain>(Expr::complex(1, 2).unwrap().view()));
    }

    #[test]
    fn sign() {
        let p = symbol("p", Domain::PositiveReal);
        let x = symbol("x", Domain::Real);

        assert!(is::<Positive>(Expr::from(3).view()));
        assert!(!is::<Positive>(Expr::from(0).view()));
        assert!(is::<Negative>(Expr::rational(-1, 3).unwrap().view()));
        assert!(is::<Positive>(p.view()));
        assert!(!is::<Positive>(x.view()));
        assert!(!is::<Negative>(x.view()));

        let pi = Expr::constant("pi", std::f64::consts::PI).unwrap();
        assert!(is::<Positive>(pi.view()));
        assert!(is::<NumericallyEvaluable>(pi.view()));

        let sum = Expr::composite(Kind::Sum, &[p.view(), pi.view()]).unwrap();
        assert!(is::<Positive>(sum.view()));
    }

    #[test]
    fn zero_and_one() {
        assert!(is::<Zero>(Expr::from(0).view()));
        assert!(is::<One>(Expr::from(1).view()));
        assert!(!is::<One>(Expr::float(1.0).unwrap().view()));
        assert_eq!(is::<Zero>(Expr::float(0.0).unwrap().view()), false);
    }
}
