//! Simplification of sums.

use cas_error::Error;
use crate::{
    expr::{Expr, ExprView},
    number,
    operands::split_const_term,
    order::order_less_than,
    predicate::{are_all, is, is_one_of, Number, Zero},
    step_collector::StepCollector,
};
use smallvec::SmallVec;
use super::{merge::Operation, product::simplify_product, record, step::Step, Terms};

/// Simplifies the sum of the given operands.
pub(crate) fn simplify_sum(
    ops: &[ExprView<'_>],
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    match ops {
        [] => Operation::Sum.collapse(Terms::new()),
        [op] => Ok(op.to_expr()),
        _ => {
            let terms = Operation::Sum.reduce(ops, steps)?;
            Operation::Sum.collapse(terms)
        },
    }
}

/// Returns true if both summands have the same non-numeric term, like `2*a*b` and `a*b`.
fn have_equal_term(lhs: ExprView<'_>, rhs: ExprView<'_>) -> bool {
    if is_one_of::<Number>(&[lhs, rhs]) {
        return false;
    }

    split_const_term(lhs).term.eq(split_const_term(rhs).term)
}

/// Reduces two summands, neither of which is a sum.
pub(super) fn binary_sum(
    lhs: ExprView<'_>,
    rhs: ExprView<'_>,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Terms, Error> {
    let mut out = Terms::new();

    if is::<Zero>(lhs) {
        record(Step::AddZero, steps);
        out.push(rhs.to_expr());
    } else if is::<Zero>(rhs) {
        record(Step::AddZero, steps);
        out.push(lhs.to_expr());
    } else if are_all::<Number>(&[lhs, rhs]) {
        record(Step::AddNumbers, steps);
        let sum = number::add(lhs, rhs)?;
        if !sum.satisfies(Zero) {
            out.push(sum);
        }
    } else if have_equal_term(lhs, rhs) {
        record(Step::CombineLikeTerms, steps);
        let (lhs, rhs) = (split_const_term(lhs), split_const_term(rhs));
        let factor = simplify_sum(&[lhs.constant, rhs.constant], steps)?;

        // a term cancelled out, like `a - a`
        if !factor.satisfies(Zero) {
            let mut factors = SmallVec::<[ExprView<'_>; 8]>::new();
            factors.push(factor.view());
            factors.extend(lhs.term);
            out.push(simplify_product(&factors, steps)?);
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
