//! Simplification of products.

use cas_error::Error;
use crate::{
    consts::ZERO,
    expr::{Expr, ExprView},
    number,
    operands::split_as_power,
    order::order_less_than,
    predicate::{are_all, is, Number, One, Zero},
    step_collector::StepCollector,
};
use super::{merge::Operation, power::simplify_power, record, step::Step, sum::simplify_sum, Terms};

/// Simplifies the product of the given operands.
pub(crate) fn simplify_product(
    ops: &[ExprView<'_>],
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    match ops {
        [] => Operation::Product.collapse(Terms::new()),
        [op] => Ok(op.to_expr()),
        _ if ops.iter().any(|&op| is::<Zero>(op)) => {
            record(Step::MultiplyZero, steps);
            Ok(ZERO.clone())
        },
        _ => {
            let terms = Operation::Product.reduce(ops, steps)?;
            Operation::Product.collapse(terms)
        },
    }
}

/// Reduces two factors, neither of which is a product.
pub(super) fn binary_product(
    lhs: ExprView<'_>,
    rhs: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Terms, Error> {
    let mut out = Terms::new();
    let ((lhs_base, lhs_exp), (rhs_base, rhs_exp)) = (split_as_power(lhs), split_as_power(rhs));

    if are_all::<Number>(&[lhs, rhs]) {
        record(Step::MultiplyNumbers, steps);
        let product = number::mul(lhs, rhs)?;
        if !product.satisfies(One) {
            out.push(product);
        }
    } else if is::<One>(lhs) {
        record(Step::MultiplyOne, steps);
        out.push(rhs.to_expr());
    } else if is::<One>(rhs) {
        record(Step::MultiplyOne, steps);
        out.push(lhs.to_expr());
    } else if lhs_base == rhs_base {
        record(Step::CombineLikeFactors, steps);
        let exp = simplify_sum(&[lhs_exp, rhs_exp], steps)?;
        let power = simplify_power(lhs_base, exp.view(), steps)?;
        if !power.satisfies(One) {
            out.push(power);
        }
    } else if order_less_than(lhs, rhs) {
        out.push(lhs.to_expr());
        out.push(rhs.to_expr());
    } else {
        record(Step::Reorder, steps);
        out.push(rhs.to_expr());
        out.push(lhs.to_expr());
    }

    Ok(out)
}
