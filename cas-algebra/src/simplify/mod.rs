//! Automatic simplification of sums, products and powers.
//!
//! The functions in this module are the canonicalizing constructors of composite expressions.
//! Given operands that are already in canonical form, they build a sum, product or power that is
//! in canonical form too:
//!
//! - nested sums and products are flattened,
//! - numbers are combined into a single numeric operand, and identities (`0` in a sum, `1` in a
//!   product) are removed,
//! - like terms (`2*a + 3*a = 5*a`) and like factors (`a^2*a^3 = a^5`) are collected,
//! - operands are sorted with the [order relation](crate::order).
//!
//! The algorithm is the automatic simplification described in "Computer Algebra and Symbolic
//! Computation" by Joel S. Cohen. Sums and products are reduced pairwise and merged like the lists
//! of a merge sort, so that simplifying an operand list never requires sorting it from scratch.
//!
//! ```
//! use cas_algebra::{simplify::auto_sum, Expr};
//!
//! let a = Expr::symbol("a").unwrap();
//! let two_a = auto_sum(&[a.view(), a.view()]).unwrap();
//! assert_eq!(two_a.to_string(), "2*a");
//! ```
//!
//! Every function has a `*_with_steps` variant that reports the [`Step`]s it took to a
//! [`StepCollector`]. Each applied rule is also traced at the `TRACE` level under the `simplify`
//! target.

mod merge;
mod power;
mod product;
mod step;
mod sum;

pub use step::Step;

use cas_error::Error;
use crate::{
    consts::{I, MINUS_ONE},
    expr::{Expr, ExprView},
    number::{Numeric, Real},
    predicate::{ComplexDomain, Number},
    step_collector::StepCollector,
};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

/// Operands produced while reducing a sum or product.
type Terms = SmallVec<[Expr; 4]>;

/// Reports an applied rule.
fn record(step: Step, steps: &mut dyn StepCollector<Step>) {
    trace!(target: "simplify", ?step, "rule applied");
    steps.push(step);
}

/// Logs an error before it is handed to the caller.
fn reject(op: &'static str, err: Error) -> Error {
    warn!(target: "simplify", op, error = %err, "simplification rejected");
    err
}

/// Builds the canonical sum of the operands. An empty sum is `0`.
pub fn auto_sum(ops: &[ExprView<'_>]) -> Result<Expr, Error> {
    auto_sum_with_steps(ops, &mut ())
}

/// Builds the canonical sum of the operands, reporting the applied rules.
pub fn auto_sum_with_steps(
    ops: &[ExprView<'_>],
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    debug!(target: "simplify", operands = ops.len(), "auto_sum");
    sum::simplify_sum(ops, steps).map_err(|err| reject("auto_sum", err))
}

/// Builds the canonical product of the operands. An empty product is `1`.
pub fn auto_product(ops: &[ExprView<'_>]) -> Result<Expr, Error> {
    auto_product_with_steps(ops, &mut ())
}

/// Builds the canonical product of the operands, reporting the applied rules.
pub fn auto_product_with_steps(
    ops: &[ExprView<'_>],
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    debug!(target: "simplify", operands = ops.len(), "auto_product");
    product::simplify_product(ops, steps).map_err(|err| reject("auto_product", err))
}

/// Builds the canonical power `base^exp`.
///
/// # Errors
///
/// Fails for `0^0` and for zero raised to a negative exponent.
pub fn auto_power(base: ExprView<'_>, exp: ExprView<'_>) -> Result<Expr, Error> {
    auto_power_with_steps(base, exp, &mut ())
}

/// Builds the canonical power `base^exp`, reporting the applied rules.
pub fn auto_power_with_steps(
    base: ExprView<'_>,
    exp: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    debug!(target: "simplify", "auto_power");
    power::simplify_power(base, exp, steps).map_err(|err| reject("auto_power", err))
}

/// Builds `1/e`, which is `e^-1`.
pub fn auto_one_over(e: ExprView<'_>) -> Result<Expr, Error> {
    auto_one_over_with_steps(e, &mut ())
}

/// Builds `1/e`, reporting the applied rules.
pub fn auto_one_over_with_steps(
    e: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    auto_power_with_steps(e, MINUS_ONE.view(), steps)
}

/// Builds `-e`, which is `-1*e`.
pub fn auto_minus(e: ExprView<'_>) -> Result<Expr, Error> {
    auto_minus_with_steps(e, &mut ())
}

/// Builds `-e`, reporting the applied rules.
pub fn auto_minus_with_steps(
    e: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    auto_product_with_steps(&[MINUS_ONE.view(), e], steps)
}

/// Builds `re + im*i`.
///
/// If both parts are real numbers, the result is a complex number, or a real number if `im` is
/// zero. Otherwise, the result is the canonical sum of `re` and `im*i`.
pub fn auto_complex(re: ExprView<'_>, im: ExprView<'_>) -> Result<Expr, Error> {
    auto_complex_with_steps(re, im, &mut ())
}

/// Builds `re + im*i`, reporting the applied rules.
pub fn auto_complex_with_steps(
    re: ExprView<'_>,
    im: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    let real_number = Number & !ComplexDomain;
    if re.satisfies(real_number) && im.satisfies(real_number) {
        return Numeric::Complex(Real::from_view(re), Real::from_view(im)).to_expr();
    }

    let im = auto_product_with_steps(&[im, I.view()], steps)?;
    auto_sum_with_steps(&[re, im.view()], steps)
}

#[cfg(test)]
mod tests {
    use crate::{blob::Kind, consts::{ONE, ONE_HALF, ZERO}};
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name).unwrap()
    }

    fn raw(kind: Kind, ops: &[&Expr]) -> Expr {
        Expr::composite(kind, &ops.iter().map(|op| op.view()).collect::<Vec<_>>()).unwrap()
    }

    fn sum(ops: &[&Expr]) -> Expr {
        auto_sum(&ops.iter().map(|op| op.view()).collect::<Vec<_>>()).unwrap()
    }

    fn product(ops: &[&Expr]) -> Expr {
        auto_product(&ops.iter().map(|op| op.view()).collect::<Vec<_>>()).unwrap()
    }

    fn frac(num: i64, denom: i64) -> Expr {
        Expr::rational(num, denom).unwrap()
    }

    #[test]
    fn numeric_product() {
        assert_eq!(product(&[&Expr::from(2), &Expr::from(3)]), Expr::from(6));
    }

    #[test]
    fn symbol_sum() {
        let a = sym("a");
        assert_eq!(sum(&[&a, &a]), raw(Kind::Product, &[&Expr::from(2), &a]));
    }

    #[test]
    fn power_of_power() {
        let (a, b) = (sym("a"), sym("b"));
        let c = Expr::from(5);
        let a_b = auto_power(a.view(), b.view()).unwrap();
        let result = auto_power(a_b.view(), c.view()).unwrap();
        assert_eq!(result, raw(Kind::Power, &[&a, &raw(Kind::Product, &[&c, &b])]));
    }

    #[test]
    fn square_roots() {
        assert_eq!(auto_power(Expr::from(4).view(), ONE_HALF.view()).unwrap(), Expr::from(2));
        assert_eq!(auto_power(Expr::from(-1).view(), ONE_HALF.view()).unwrap(), *I);
    }

    #[test]
    fn chained_arithmetic() {
        let (a, b) = (sym("a"), sym("b"));
        let (two, three, four) = (Expr::from(2), Expr::from(3), Expr::from(4));

        // a + a + 2*b + 2*a/3
        let two_b = product(&[&two, &b]);
        let two_a_thirds = product(&[&two, &a, &auto_one_over(three.view()).unwrap()]);
        let c = sum(&[&a, &a, &two_b, &two_a_thirds]);
        let eight_a_thirds = raw(Kind::Product, &[&frac(8, 3), &a]);
        assert_eq!(c, raw(Kind::Sum, &[&eight_a_thirds, &two_b]));

        // 3*b*b*c + 2*a - 4*b
        let b_squared = raw(Kind::Power, &[&b, &two]);
        let minus_four_b = auto_minus(product(&[&four, &b]).view()).unwrap();
        let d = sum(&[&product(&[&three, &b, &b, &c]), &product(&[&two, &a]), &minus_four_b]);
        let expected = raw(Kind::Sum, &[
            &raw(Kind::Product, &[&two, &a]),
            &raw(Kind::Product, &[&Expr::from(-4), &b]),
            &raw(Kind::Product, &[&three, &b_squared, &c]),
        ]);
        assert_eq!(d, expected);

        // 2*a/7*b*d*d - 2*b
        let seventh = auto_one_over(Expr::from(7).view()).unwrap();
        let minus_two_b = auto_minus(two_b.view()).unwrap();
        let e = sum(&[&product(&[&two, &a, &seventh, &b, &d, &d]), &minus_two_b]);
        let expected = raw(Kind::Sum, &[
            &raw(Kind::Product, &[&Expr::from(-2), &b]),
            &raw(Kind::Product, &[&frac(2, 7), &a, &b, &raw(Kind::Power, &[&d, &two])]),
        ]);
        assert_eq!(e, expected);
    }

    #[test]
    fn minus_and_one_over() {
        let a = sym("a");
        assert_eq!(auto_minus(Expr::from(5).view()).unwrap(), Expr::from(-5));
        assert_eq!(auto_minus(auto_minus(a.view()).unwrap().view()).unwrap(), a);
        assert_eq!(auto_one_over(frac(2, 3).view()).unwrap(), frac(3, 2));
        assert_eq!(
            auto_one_over(a.view()).unwrap(),
            raw(Kind::Power, &[&a, &Expr::from(-1)]),
        );
    }

    #[test]
    fn complex_construction() {
        let (two, three) = (Expr::from(2), Expr::from(3));
        assert_eq!(auto_complex(two.view(), three.view()).unwrap(), Expr::complex(2, 3).unwrap());
        assert_eq!(auto_complex(two.view(), ZERO.view()).unwrap(), two);

        let (a, b) = (sym("a"), sym("b"));
        let result = auto_complex(a.view(), b.view()).unwrap();
        let b_i = raw(Kind::Product, &[&I, &b]);
        assert_eq!(result, raw(Kind::Sum, &[&a, &b_i]));
    }

    #[test]
    fn empty_operands() {
        assert_eq!(auto_sum(&[]).unwrap(), *ZERO);
        assert_eq!(auto_product(&[]).unwrap(), *ONE);
    }

    #[test]
    fn errors_propagate() {
        use crate::error::{ZeroToNegative, ZeroToZero};

        assert!(auto_one_over(ZERO.view()).unwrap_err().is::<ZeroToNegative>());
        assert!(auto_power(ZERO.view(), ZERO.view()).unwrap_err().is::<ZeroToZero>());

        // raised while combining like factors deep inside a product
        let a = sym("a");
        let zero_to_a = raw(Kind::Power, &[&ZERO, &a]);
        let minus_a = auto_minus(a.view()).unwrap();
        let zero_to_minus_a = raw(Kind::Power, &[&ZERO, &minus_a]);
        assert!(auto_product(&[zero_to_a.view(), zero_to_minus_a.view()]).unwrap_err().is::<ZeroToZero>());
    }

    #[test]
    fn steps() {
        let (a, b) = (sym("a"), sym("b"));
        let mut steps = Vec::new();
        let sum = auto_sum_with_steps(&[b.view(), a.view(), ZERO.view()], &mut steps).unwrap();
        assert_eq!(sum, raw(Kind::Sum, &[&a, &b]));
        assert!(steps.contains(&Step::AddZero));
        assert!(steps.contains(&Step::Reorder));
    }
}
