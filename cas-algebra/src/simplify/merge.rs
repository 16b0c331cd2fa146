//! The parts of sum and product simplification that do not depend on the operation.
//!
//! Both are simplified by reducing pairs of operands with a binary rule, and merging the reduced
//! operand lists like the merge step of a merge sort. Since both lists are already in canonical
//! order, a merge only has to look at the heads of the lists.

use cas_error::Error;
use crate::{
    blob::Kind,
    consts::{ONE, ZERO},
    expr::{Expr, ExprView},
    operands::{operands_of, single_operand, Operands},
    step_collector::StepCollector,
};
use smallvec::SmallVec;
use super::{product, record, step::Step, sum, Terms};

/// Borrowed operand lists.
type Views<'a> = SmallVec<[ExprView<'a>; 8]>;

/// An associative and commutative operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operation {
    Sum,
    Product,
}

impl Operation {
    fn kind(self) -> Kind {
        match self {
            Self::Sum => Kind::Sum,
            Self::Product => Kind::Product,
        }
    }

    /// Reduces two operands, neither of which is a composite of this operation.
    fn binary(
        self,
        lhs: ExprView<'_>,
        rhs: ExprView<'_>,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Terms, Error> {
        match self {
            Self::Sum => sum::binary_sum(lhs, rhs, steps),
            Self::Product => product::binary_product(lhs, rhs, steps),
        }
    }

    /// Returns the operands of a composite of this operation, or the expression itself.
    fn operands_of(self, e: ExprView<'_>) -> Operands<'_> {
        if e.kind() == self.kind() {
            operands_of(e)
        } else {
            single_operand(e)
        }
    }

    /// Reduces a list of at least two operands into canonical order.
    pub(super) fn reduce(
        self,
        ops: &[ExprView<'_>],
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Terms, Error> {
        debug_assert!(ops.len() >= 2);

        let n = ops.len();
        let mut terms = self.reduce_two(ops[n - 2], ops[n - 1], steps)?;
        for &op in ops[..n - 2].iter().rev() {
            if op.kind() == self.kind() {
                record(Step::Flatten, steps);
            }

            let merged = {
                let rest = terms.iter().map(Expr::view).collect::<Views<'_>>();
                self.merge(op, &rest, steps)?
            };
            terms = merged;
        }

        Ok(terms)
    }

    fn reduce_two(
        self,
        lhs: ExprView<'_>,
        rhs: ExprView<'_>,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Terms, Error> {
        if lhs.kind() == self.kind() || rhs.kind() == self.kind() {
            record(Step::Flatten, steps);
            let rhs = self.operands_of(rhs).collect::<Views<'_>>();
            self.merge(lhs, &rhs, steps)
        } else {
            let terms = self.binary(lhs, rhs, steps)?;
            if terms.len() == 1 && terms[0].view().kind() == self.kind() {
                record(Step::Flatten, steps);
                return Ok(operands_of(terms[0].view()).map(|op| op.to_expr()).collect());
            }
            Ok(terms)
        }
    }

    /// Merges the operands of `lhs` into the canonical list `rhs`.
    fn merge(
        self,
        lhs: ExprView<'_>,
        rhs: &[ExprView<'_>],
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Terms, Error> {
        let lhs = self.operands_of(lhs).collect::<Views<'_>>();
        self.merge_lists(&lhs, rhs, steps)
    }

    /// Merges two canonical operand lists, neither of which contains a composite of this operation.
    fn merge_lists(
        self,
        mut p: &[ExprView<'_>],
        mut q: &[ExprView<'_>],
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Terms, Error> {
        let mut out = Terms::with_capacity(p.len() + q.len());

        loop {
            let ((&p1, p_rest), (&q1, q_rest)) = match (p.split_first(), q.split_first()) {
                (Some(p), Some(q)) => (p, q),
                _ => break,
            };

            let heads = self.binary(p1, q1, steps)?;
            match heads.len() {
                0 => (p, q) = (p_rest, q_rest),
                // combining like terms can produce a composite of this operation, like
                // `2*(a+b) - (a+b)`, whose operands go back into the lists
                1 if heads[0].view().kind() == self.kind() => {
                    record(Step::Flatten, steps);
                    return self.merge_nested(out, heads[0].view(), p_rest, q_rest, steps);
                },
                1 => {
                    out.extend(heads);
                    (p, q) = (p_rest, q_rest);
                },
                _ if heads[0] == p1 && heads[1] == q1 => {
                    out.push(p1.to_expr());
                    p = p_rest;
                },
                _ => {
                    out.push(q1.to_expr());
                    q = q_rest;
                },
            }
        }

        out.extend(p.iter().map(|op| op.to_expr()));
        out.extend(q.iter().map(|op| op.to_expr()));
        Ok(out)
    }

    /// Merges the operands of `nested` with the rest of both lists, then with the operands that
    /// were already merged.
    fn merge_nested(
        self,
        done: Terms,
        nested: ExprView<'_>,
        p: &[ExprView<'_>],
        q: &[ExprView<'_>],
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Terms, Error> {
        let nested = operands_of(nested).collect::<Views<'_>>();
        let with_p = self.merge_lists(&nested, p, steps)?;
        let rest = {
            let with_p = with_p.iter().map(Expr::view).collect::<Views<'_>>();
            self.merge_lists(&with_p, q, steps)?
        };

        let done = done.iter().map(Expr::view).collect::<Views<'_>>();
        let rest = rest.iter().map(Expr::view).collect::<Views<'_>>();
        self.merge_lists(&done, &rest, steps)
    }

    /// Builds the final expression from reduced operands.
    pub(super) fn collapse(self, mut terms: Terms) -> Result<Expr, Error> {
        match terms.len() {
            0 => Ok(match self {
                Self::Sum => ZERO.clone(),
                Self::Product => ONE.clone(),
            }),
            1 => Ok(terms.swap_remove(0)),
            _ => {
                let views = terms.iter().map(Expr::view).collect::<Views<'_>>();
                Expr::composite(self.kind(), &views)
            },
        }
    }
}
