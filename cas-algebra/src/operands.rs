//! Traversal of the logical operands of an expression.
//!
//! The logical operands of a sum or product are its summands or factors, those of a power are its
//! base and exponent, and those of a function are its arguments. Physical bookkeeping blobs, like
//! the evaluator and name of a function, are skipped.
//!
//! [`single_operand`] treats any expression as a sequence of exactly one operand, itself. This
//! lets code that merges operand lists handle "a sum" and "a single summand" the same way.

use crate::{
    blob::{self, Blob, Kind},
    consts::ONE,
    expr::ExprView,
    predicate::{Number, Predicate, Product},
};
use std::iter::FusedIterator;

/// A forward iterator over the operands of an expression.
#[derive(Debug, Clone)]
pub struct Operands<'a> {
    /// The blobs starting at the root of the next operand.
    tail: &'a [Blob],

    /// The number of operands left.
    remaining: usize,
}

impl<'a> Operands<'a> {
    /// An iterator over no operands.
    pub fn empty() -> Self {
        Self { tail: &[], remaining: 0 }
    }

    /// Returns true if there are no operands left.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

impl<'a> Iterator for Operands<'a> {
    type Item = ExprView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let operand = ExprView::new(self.tail);
        self.remaining -= 1;
        if self.remaining > 0 {
            // operand roots are stored next to each other
            self.tail = &self.tail[1..];
        }
        Some(operand)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Operands<'_> {}

impl FusedIterator for Operands<'_> {}

/// Returns the operands of an expression. Scalars have no operands.
pub fn operands_of(e: ExprView<'_>) -> Operands<'_> {
    let header = e.header();
    let n = blob::n_operands(header);
    if n == 0 {
        return Operands::empty();
    }

    Operands { tail: &e.blobs()[blob::first_operand(header)..], remaining: n }
}

/// Returns a sequence containing only the expression itself.
pub fn single_operand(e: ExprView<'_>) -> Operands<'_> {
    Operands { tail: e.blobs(), remaining: 1 }
}

/// Returns the operand at the given index.
///
/// # Panics
///
/// Panics if the expression has no more than `n` operands.
pub fn nth_operand(e: ExprView<'_>, n: usize) -> ExprView<'_> {
    let header = e.header();
    assert!(
        n < blob::n_operands(header),
        "operand {} requested from {} with {} operands",
        n,
        header.kind().name(),
        blob::n_operands(header),
    );
    ExprView::new(&e.blobs()[blob::first_operand(header) + n..])
}

/// Returns the base and exponent of a power, or the expression and `1` for anything else.
pub fn split_as_power(e: ExprView<'_>) -> (ExprView<'_>, ExprView<'_>) {
    if e.kind() == Kind::Power {
        (e.first_operand(), e.second_operand())
    } else {
        (e, ONE.view())
    }
}

/// A product split into its numeric coefficient and the remaining factors.
#[derive(Debug, Clone)]
pub struct ConstAndTerm<'a> {
    /// The numeric coefficient, `1` if there is none.
    pub constant: ExprView<'a>,

    /// The non-numeric factors.
    pub term: Operands<'a>,
}

/// Splits an expression into its numeric coefficient and non-numeric term.
///
/// - `2*a*b` splits into `2` and `[a, b]`.
/// - `a*b` splits into `1` and `[a, b]`.
/// - `a` splits into `1` and `[a]`.
/// - `2` splits into `2` and no factors.
pub fn split_const_term(e: ExprView<'_>) -> ConstAndTerm<'_> {
    if Number.test(e) {
        return ConstAndTerm { constant: e, term: Operands::empty() };
    }

    if !Product.test(e) {
        return ConstAndTerm { constant: ONE.view(), term: single_operand(e) };
    }

    let mut factors = operands_of(e);
    let first = e.first_operand();
    if Number.test(first) {
        factors.next();
        ConstAndTerm { constant: first, term: factors }
    } else {
        ConstAndTerm { constant: ONE.view(), term: factors }
    }
}

/// Returns the real part of a number. Real numbers are their own real part.
pub fn real(e: ExprView<'_>) -> ExprView<'_> {
    if e.kind() == Kind::ComplexNumber {
        e.real_part()
    } else {
        e
    }
}

/// Returns the imaginary part of a complex number, or `0` for real numbers.
pub fn imag(e: ExprView<'_>) -> ExprView<'_> {
    if e.kind() == Kind::ComplexNumber {
        e.imag_part()
    } else {
        crate::consts::ZERO.view()
    }
}

/// Returns true if `needle` occurs anywhere in `haystack`, including as `haystack` itself.
pub fn contains(haystack: ExprView<'_>, needle: ExprView<'_>) -> bool {
    let mut pending = vec![haystack];
    while let Some(e) = pending.pop() {
        if e == needle {
            return true;
        }
        pending.extend(operands_of(e));
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::{blob::Kind, Expr};
    use pretty_assertions::assert_eq;
    use super::*;

    fn symbols() -> (Expr, Expr, Expr) {
        (
            Expr::symbol("a").unwrap(),
            Expr::symbol("b").unwrap(),
            Expr::symbol("a_long_name").unwrap(),
        )
    }

    #[test]
    fn sum_operands() {
        let (a, b, c) = symbols();
        let sum = Expr::composite(Kind::Sum, &[a.view(), c.view(), b.view()]).unwrap();

        let ops = operands_of(sum.view());
        assert_eq!(ops.len(), 3);
        let ops = ops.collect::<Vec<_>>();
        assert_eq!(ops[0], a);
        assert_eq!(ops[1], c);
        assert_eq!(ops[2], b);
        assert_eq!(nth_operand(sum.view(), 1).name(), "a_long_name");
    }

    #[test]
    fn function_operands_skip_bookkeeping() {
        let (a, b, _) = symbols();
        let f = Expr::function("atan2", &[a.view(), b.view()]).unwrap();
        let ops = operands_of(f.view()).collect::<Vec<_>>();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], a);
        assert_eq!(ops[1], b);
    }

    #[test]
    fn scalars() {
        let (a, _, _) = symbols();
        assert_eq!(operands_of(a.view()).len(), 0);

        let single = single_operand(a.view()).collect::<Vec<_>>();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0], a);
    }

    #[test]
    fn power_split() {
        let (a, b, _) = symbols();
        let power = Expr::composite(Kind::Power, &[a.view(), b.view()]).unwrap();
        let (base, exp) = split_as_power(power.view());
        assert_eq!((base, exp), (a.view(), b.view()));

        let (base, exp) = split_as_power(a.view());
        assert_eq!(base, a);
        assert_eq!(exp, Expr::from(1));
    }

    #[test]
    fn const_term_split() {
        let (a, b, _) = symbols();
        let two = Expr::from(2);
        let product = Expr::composite(Kind::Product, &[two.view(), a.view(), b.view()]).unwrap();

        let split = split_const_term(product.view());
        assert_eq!(split.constant, two);
        assert_eq!(split.term.collect::<Vec<_>>(), vec![a.view(), b.view()]);

        let product = Expr::composite(Kind::Product, &[a.view(), b.view()]).unwrap();
        let split = split_const_term(product.view());
        assert_eq!(split.constant, Expr::from(1));
        assert_eq!(split.term.len(), 2);

        let split = split_const_term(a.view());
        assert_eq!(split.constant, Expr::from(1));
        assert_eq!(split.term.collect::<Vec<_>>(), vec![a.view()]);
    }

    #[test]
    fn complex_parts() {
        let z = Expr::complex(3, 4).unwrap();
        assert_eq!(real(z.view()), Expr::from(3));
        assert_eq!(imag(z.view()), Expr::from(4));

        let five = Expr::from(5);
        assert_eq!(real(five.view()), five);
        assert_eq!(imag(five.view()), Expr::from(0));
    }

    #[test]
    fn containment() {
        let (a, b, c) = symbols();
        let power = Expr::composite(Kind::Power, &[c.view(), b.view()]).unwrap();
        let sum = Expr::composite(Kind::Sum, &[a.view(), power.view()]).unwrap();

        assert!(contains(sum.view(), c.view()));
        assert!(contains(sum.view(), power.view()));
        assert!(contains(sum.view(), sum.view()));
        assert!(!contains(power.view(), a.view()));
    }
}
