//! The order relation that puts the operands of sums and products into canonical order.
//!
//! [`order_less_than`] is a strict weak order over all expressions. Expressions of the same kind
//! are compared by their values, names or operands; expressions of different kinds are compared
//! by a fixed set of rules that treat, for example, a symbol compared to a product as a product
//! of one factor. The relation follows the one described in "Computer Algebra and Symbolic
//! Computation" by Joel S. Cohen, with constants ordered right after numbers.
//!
//! ```
//! use cas_algebra::{order::order_less_than, Expr};
//!
//! let two = Expr::from(2);
//! let a = Expr::symbol("a").unwrap();
//! let b = Expr::symbol("b").unwrap();
//!
//! assert!(order_less_than(two.view(), a.view()));
//! assert!(order_less_than(a.view(), b.view()));
//! assert!(!order_less_than(b.view(), a.view()));
//! ```

use crate::{
    consts::ONE,
    expr::ExprView,
    number::Numeric,
    operands::{operands_of, single_operand, split_as_power, Operands},
    predicate::{are_all, is, Constant, Function, Number, Power, Product, Sum, Symbol},
};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// The number of trailing operands that are buffered at a time when comparing sums or products.
const BATCH: usize = 10;

/// Returns true if `lhs` comes before `rhs` in canonical order.
pub fn order_less_than(lhs: ExprView<'_>, rhs: ExprView<'_>) -> bool {
    let pair = [lhs, rhs];
    if are_all::<Number>(&pair) {
        return numbers(lhs, rhs);
    } else if are_all::<Symbol>(&pair) {
        return symbols(lhs, rhs);
    } else if are_all::<Power>(&pair) {
        return powers(split_as_power(lhs), split_as_power(rhs));
    } else if are_all::<Product>(&pair) || are_all::<Sum>(&pair) {
        return operands_less_than(operands_of(lhs), operands_of(rhs));
    } else if are_all::<Constant>(&pair) {
        return constants(lhs, rhs);
    } else if are_all::<Function>(&pair) {
        return functions(lhs, rhs);
    }

    if is::<Number>(lhs) {
        return true;
    } else if is::<Number>(rhs) {
        return false;
    } else if is::<Constant>(lhs) {
        return true;
    } else if lhs.satisfies(Product) && rhs.satisfies(Power | Sum | Symbol | Function) {
        return operands_less_than(operands_of(lhs), single_operand(rhs));
    } else if lhs.satisfies(Power) && rhs.satisfies(Sum | Symbol | Function) {
        return powers(split_as_power(lhs), (rhs, ONE.view()));
    } else if lhs.satisfies(Sum) && rhs.satisfies(Symbol | Function) {
        return operands_less_than(operands_of(lhs), single_operand(rhs));
    } else if lhs.satisfies(Function) && rhs.satisfies(Symbol) {
        return lhs.name() < rhs.name();
    }

    // every remaining pair of distinct kinds is resolved above with the operands swapped
    !order_less_than(rhs, lhs)
}

/// Compares two expressions with [`order_less_than`], treating expressions as equal if neither
/// is less than the other. This can be passed to [`slice::sort_by`].
pub fn order(lhs: ExprView<'_>, rhs: ExprView<'_>) -> Ordering {
    if order_less_than(lhs, rhs) {
        Ordering::Less
    } else if order_less_than(rhs, lhs) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Numbers compare by their real parts, then by their imaginary parts.
fn numbers(lhs: ExprView<'_>, rhs: ExprView<'_>) -> bool {
    let (lhs_re, lhs_im) = Numeric::from_view(lhs).into_parts();
    let (rhs_re, rhs_im) = Numeric::from_view(rhs).into_parts();

    match lhs_re.partial_cmp(&rhs_re) {
        Some(Ordering::Equal) => lhs_im < rhs_im,
        ordering => ordering == Some(Ordering::Less),
    }
}

/// Symbols compare by name. Symbols with the same name are ordered by domain, positive reals
/// first.
fn symbols(lhs: ExprView<'_>, rhs: ExprView<'_>) -> bool {
    (lhs.name(), lhs.domain()) < (rhs.name(), rhs.domain())
}

/// Powers compare by base, then by exponent.
fn powers(
    (lhs_base, lhs_exp): (ExprView<'_>, ExprView<'_>),
    (rhs_base, rhs_exp): (ExprView<'_>, ExprView<'_>),
) -> bool {
    if lhs_base == rhs_base {
        order_less_than(lhs_exp, rhs_exp)
    } else {
        order_less_than(lhs_base, rhs_base)
    }
}

fn constants(lhs: ExprView<'_>, rhs: ExprView<'_>) -> bool {
    let (lhs_name, rhs_name) = (lhs.name(), rhs.name());
    if lhs_name != rhs_name {
        lhs_name < rhs_name
    } else {
        lhs.floating_point() < rhs.floating_point()
    }
}

/// Functions compare by name, then by their arguments from the first one on, then by the number
/// of arguments. Functions that only differ in their evaluator compare by evaluator id.
fn functions(lhs: ExprView<'_>, rhs: ExprView<'_>) -> bool {
    let (lhs_name, rhs_name) = (lhs.name(), rhs.name());
    if lhs_name != rhs_name {
        return lhs_name < rhs_name;
    }

    if let Some((l, r)) = operands_of(lhs).zip(operands_of(rhs)).find(|(l, r)| l != r) {
        return order_less_than(l, r);
    }

    match lhs.n_operands().cmp(&rhs.n_operands()) {
        Ordering::Equal => lhs.evaluator().index() < rhs.evaluator().index(),
        ordering => ordering == Ordering::Less,
    }
}

/// Compares two operand sequences starting at the last (most significant) operand. If the common
/// suffix is equal, the shorter sequence comes first.
///
/// ```text
/// lhs: b c d       lhs: a b c       lhs: a b c
/// rhs: a c d       rhs: b c d       rhs:   b c
///      => false         => true          => false
/// ```
fn operands_less_than(lhs: Operands<'_>, rhs: Operands<'_>) -> bool {
    let (n_lhs, n_rhs) = (lhs.len(), rhs.len());
    let common = n_lhs.min(n_rhs);

    compare_suffix(lhs, n_lhs - common, rhs, n_rhs - common, common)
        .unwrap_or(n_lhs < n_rhs)
}

/// Compares the last `n` operands of both sequences, back to front. Returns [`None`] if they are
/// pairwise equal.
///
/// The operands can only be iterated forward. Instead of collecting all of them, at most
/// [`BATCH`] trailing operands of each side are buffered at a time, and the sequences are walked
/// again for earlier batches only if the later ones compared equal.
fn compare_suffix(
    lhs: Operands<'_>,
    lhs_skip: usize,
    rhs: Operands<'_>,
    rhs_skip: usize,
    n: usize,
) -> Option<bool> {
    let mut end = n;
    while end > 0 {
        let start = end.saturating_sub(BATCH);
        let lhs_batch = batch(&lhs, lhs_skip + start, end - start);
        let rhs_batch = batch(&rhs, rhs_skip + start, end - start);

        let unequal = lhs_batch.iter()
            .zip(rhs_batch.iter())
            .rev()
            .find(|(l, r)| l != r);
        if let Some((&l, &r)) = unequal {
            return Some(order_less_than(l, r));
        }

        end = start;
    }

    None
}

/// Buffers `len` operands, starting at index `from`.
fn batch<'a>(ops: &Operands<'a>, from: usize, len: usize) -> SmallVec<[ExprView<'a>; BATCH]> {
    ops.clone().skip(from).take(len).collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        blob::{Domain, Kind},
        consts::{E, I, PI},
        Expr,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name).unwrap()
    }

    fn raw(kind: Kind, ops: &[&Expr]) -> Expr {
        Expr::composite(kind, &ops.iter().map(|op| op.view()).collect::<Vec<_>>()).unwrap()
    }

    fn less(lhs: &Expr, rhs: &Expr) -> bool {
        order_less_than(lhs.view(), rhs.view())
    }

    #[test]
    fn numbers_compare_by_value() {
        let half = Expr::rational(1, 2).unwrap();
        let third = Expr::rational(1, 3).unwrap();
        assert!(less(&third, &half));
        assert!(less(&Expr::from(-3), &third));
        assert!(less(&Expr::float(0.4).unwrap(), &half));
        assert!(less(&Expr::from(0), &I));
        assert!(!less(&I, &Expr::from(0)));
        assert!(!less(&half, &half));
    }

    #[test]
    fn symbols_compare_by_name_then_domain() {
        assert!(less(&sym("a"), &sym("b")));
        assert!(less(&sym("a"), &sym("a_long_name")));

        let positive = Expr::symbol_with("x", Domain::PositiveReal).unwrap();
        let real = Expr::symbol_with("x", Domain::Real).unwrap();
        let complex = sym("x");
        assert!(less(&positive, &real));
        assert!(less(&real, &complex));
        assert!(less(&positive, &complex));
        assert!(!less(&complex, &positive));
    }

    #[test]
    fn numbers_and_constants_come_first() {
        let a = sym("a");
        assert!(less(&Expr::from(1000), &PI));
        assert!(less(&PI, &a));
        assert!(less(&E, &PI));
        assert!(!less(&a, &E));
    }

    #[test]
    fn powers() {
        let (a, b) = (sym("a"), sym("b"));
        let two = Expr::from(2);
        let three = Expr::from(3);
        let a2 = raw(Kind::Power, &[&a, &two]);
        let a3 = raw(Kind::Power, &[&a, &three]);
        let b2 = raw(Kind::Power, &[&b, &two]);

        assert!(less(&a2, &a3));
        assert!(less(&a3, &b2));

        // a < a^2 < b
        assert!(less(&a, &a2));
        assert!(less(&a2, &b));
    }

    #[test]
    fn products_compare_from_the_back() {
        let (a, b, c, d) = (sym("a"), sym("b"), sym("c"), sym("d"));
        let bcd = raw(Kind::Product, &[&b, &c, &d]);
        let acd = raw(Kind::Product, &[&a, &c, &d]);
        let abc = raw(Kind::Product, &[&a, &b, &c]);
        let bc = raw(Kind::Product, &[&b, &c]);

        assert!(!less(&bcd, &acd));
        assert!(less(&acd, &bcd));
        assert!(less(&abc, &bcd));
        assert!(!less(&abc, &bc));
        assert!(less(&bc, &abc));
    }

    #[test]
    fn product_against_single_factor() {
        let (a, b) = (sym("a"), sym("b"));
        let two_a = raw(Kind::Product, &[&Expr::from(2), &a]);
        let two_b = raw(Kind::Product, &[&Expr::from(2), &b]);

        assert!(less(&a, &two_a));
        assert!(!less(&two_a, &a));
        assert!(less(&two_a, &b));
        assert!(less(&a, &two_b));
    }

    #[test]
    fn long_operand_lists() {
        // more than one batch, differing only in the first operand
        let symbols = (0..25).map(|i| sym(&format!("s{:02}", i))).collect::<Vec<_>>();
        let x = sym("a");
        let y = sym("b");

        let mut lhs = vec![&x];
        lhs.extend(symbols.iter());
        let mut rhs = vec![&y];
        rhs.extend(symbols.iter());

        let lhs = raw(Kind::Sum, &lhs);
        let rhs = raw(Kind::Sum, &rhs);
        assert!(less(&lhs, &rhs));
        assert!(!less(&rhs, &lhs));
        assert!(!less(&lhs, &lhs));
    }

    #[test]
    fn functions() {
        let (a, b) = (sym("a"), sym("b"));
        let cos_a = Expr::function("cos", &[a.view()]).unwrap();
        let cos_b = Expr::function("cos", &[b.view()]).unwrap();
        let sin_a = Expr::function("sin", &[a.view()]).unwrap();
        let atan2 = Expr::function("atan2", &[a.view(), b.view()]).unwrap();

        assert!(less(&cos_a, &cos_b));
        assert!(less(&cos_b, &sin_a));
        assert!(less(&atan2, &cos_a));

        // functions sort against symbols by name
        assert!(less(&cos_a, &sym("d")));
        assert!(less(&a, &cos_a));
    }

    fn halve(x: f64) -> f64 {
        x / 2.0
    }

    fn third(x: f64) -> f64 {
        x / 3.0
    }

    #[test]
    fn functions_with_different_evaluators() {
        let a = sym("a");
        let f = Expr::unary("scale", halve, a.view()).unwrap();
        let g = Expr::unary("scale", third, a.view()).unwrap();
        assert_ne!(f, g);

        // exactly one of them sorts first
        assert!(less(&f, &g) != less(&g, &f));
        assert_ne!(order(f.view(), g.view()), Ordering::Equal);

        let fg = crate::simplify::auto_sum(&[f.view(), g.view()]).unwrap();
        let gf = crate::simplify::auto_sum(&[g.view(), f.view()]).unwrap();
        assert_eq!(fg, gf);
        assert_eq!(fg.view().kind(), Kind::Sum);
    }

    #[test]
    fn total_over_mixed_kinds() {
        let (a, b) = (sym("a"), sym("b"));
        let items = vec![
            Expr::from(3),
            I.clone(),
            PI.clone(),
            a.clone(),
            raw(Kind::Sum, &[&a, &b]),
            raw(Kind::Product, &[&Expr::from(2), &b]),
            raw(Kind::Power, &[&a, &Expr::from(2)]),
            Expr::function("sin", &[b.view()]).unwrap(),
        ];

        for x in &items {
            assert!(!less(x, x));
            for y in &items {
                if x != y {
                    assert_eq!(less(x, y), !less(y, x), "{} vs {}", x, y);
                }
            }
        }
    }
}
