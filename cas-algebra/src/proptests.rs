//! Property-based tests for the canonical order and the simplifier.

use crate::{
    blob::{Domain, Kind},
    consts::{ONE, PI, ZERO},
    order::{order, order_less_than},
    simplify::{auto_power, auto_product, auto_sum},
    Expr,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Short and long symbol names, in every domain.
fn symbol() -> impl Strategy<Value = Expr> {
    let names = prop::sample::select(vec!["a", "b", "c", "velocity", "temperature"]);
    let domains = prop::sample::select(vec![Domain::PositiveReal, Domain::Real, Domain::Complex]);
    (names, domains).prop_map(|(name, domain)| Expr::symbol_with(name, domain).unwrap())
}

// small exact numbers only, so that distinct expressions never compare as equivalent
fn number() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-5i32..=5).prop_map(Expr::from),
        (-5i32..=5, 2i32..=4).prop_map(|(n, d)| Expr::rational(n, d).unwrap()),
    ]
}

/// A monomial like `-3/2*a^2*b`, built through the simplifier.
fn monomial() -> impl Strategy<Value = Expr> {
    let powers = prop::collection::vec((symbol(), 1i32..=3), 0..=2);
    (number(), powers).prop_map(|(coefficient, powers)| {
        let powers = powers
            .iter()
            .map(|(base, exp)| auto_power(base.view(), Expr::from(*exp).view()).unwrap())
            .collect::<Vec<_>>();
        let mut factors = vec![coefficient.view()];
        factors.extend(powers.iter().map(Expr::view));
        auto_product(&factors).unwrap()
    })
}

/// A simplified expression of any kind.
fn canonical() -> impl Strategy<Value = Expr> {
    prop_oneof![
        number(),
        symbol(),
        Just(PI.clone()),
        monomial(),
        (monomial(), monomial()).prop_map(|(p, q)| auto_sum(&[p.view(), q.view()]).unwrap()),
        (number(), monomial(), monomial(), monomial()).prop_map(|(c, f, p, q)| {
            let sum = auto_sum(&[p.view(), q.view()]).unwrap();
            auto_product(&[c.view(), f.view(), sum.view()]).unwrap()
        }),
        (prop::sample::select(vec!["sin", "cos"]), monomial())
            .prop_map(|(name, arg)| Expr::function(name, &[arg.view()]).unwrap()),
    ]
}

/// Returns true if no operand of a sum or product is itself of the same kind.
fn is_flat(e: &Expr) -> bool {
    let kind = e.view().kind();
    !matches!(kind, Kind::Sum | Kind::Product) || e.view().operands().all(|op| op.kind() != kind)
}

fn sum(ops: &[&Expr]) -> Expr {
    auto_sum(&ops.iter().map(|op| op.view()).collect::<Vec<_>>()).unwrap()
}

fn product(ops: &[&Expr]) -> Expr {
    auto_product(&ops.iter().map(|op| op.view()).collect::<Vec<_>>()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn order_is_irreflexive(x in canonical()) {
        prop_assert!(!order_less_than(x.view(), x.view()));
    }

    #[test]
    fn order_is_asymmetric(x in canonical(), y in canonical()) {
        prop_assert!(!(order_less_than(x.view(), y.view()) && order_less_than(y.view(), x.view())));
    }

    #[test]
    fn order_is_transitive(x in canonical(), y in canonical(), z in canonical()) {
        if order_less_than(x.view(), y.view()) && order_less_than(y.view(), z.view()) {
            prop_assert!(order_less_than(x.view(), z.view()), "{} < {} < {}", x, y, z);
        }
    }

    #[test]
    fn distinct_expressions_are_ordered(x in canonical(), y in canonical()) {
        if x != y {
            prop_assert!(order_less_than(x.view(), y.view()) || order_less_than(y.view(), x.view()));
        }
    }

    #[test]
    fn sorting_ignores_input_order(
        mut items in prop::collection::vec(canonical(), 1..12),
        seed in any::<u64>(),
    ) {
        items.sort_by(|x, y| order(x.view(), y.view()));
        items.dedup();

        let mut shuffled = items.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        shuffled.sort_by(|x, y| order(x.view(), y.view()));
        prop_assert_eq!(shuffled, items);
    }

    #[test]
    fn sum_is_commutative(p in canonical(), q in canonical()) {
        prop_assert_eq!(sum(&[&p, &q]), sum(&[&q, &p]));
    }

    #[test]
    fn product_is_commutative(p in canonical(), q in canonical()) {
        prop_assert_eq!(product(&[&p, &q]), product(&[&q, &p]));
    }

    #[test]
    fn sum_is_associative(p in monomial(), q in monomial(), r in monomial()) {
        let left = sum(&[&sum(&[&p, &q]), &r]);
        let right = sum(&[&p, &sum(&[&q, &r])]);
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(left, sum(&[&p, &q, &r]));
    }

    #[test]
    fn product_is_associative(p in monomial(), q in monomial(), r in monomial()) {
        let left = product(&[&product(&[&p, &q]), &r]);
        let right = product(&[&p, &product(&[&q, &r])]);
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(left, product(&[&p, &q, &r]));
    }

    #[test]
    fn results_are_flat(p in canonical(), q in canonical(), r in canonical()) {
        let results = [sum(&[&p, &q, &r]), product(&[&p, &q, &r]), sum(&[&p, &product(&[&q, &r])])];
        for result in &results {
            prop_assert!(is_flat(result), "{}", result);
        }
    }

    #[test]
    fn like_terms_of_sums_are_flattened(c in symbol(), p in monomial(), q in monomial()) {
        let s = sum(&[&p, &q]);
        let double = product(&[&Expr::from(2), &s]);
        let negated = product(&[&Expr::from(-1), &s]);
        let result = sum(&[&c, &double, &negated]);
        prop_assert!(is_flat(&result), "{}", result);
        prop_assert_eq!(result, sum(&[&c, &p, &q]));
    }

    #[test]
    fn simplification_is_idempotent(x in canonical()) {
        let view = x.view();
        let again = match view.kind() {
            Kind::Sum => auto_sum(&view.operands().collect::<Vec<_>>()).unwrap(),
            Kind::Product => auto_product(&view.operands().collect::<Vec<_>>()).unwrap(),
            Kind::Power => auto_power(view.first_operand(), view.second_operand()).unwrap(),
            _ => x.clone(),
        };
        prop_assert_eq!(again, x);
    }

    #[test]
    fn identities_are_eliminated(x in canonical()) {
        prop_assert_eq!(&sum(&[&x, &ZERO]), &x);
        prop_assert_eq!(&sum(&[&ZERO, &x]), &x);
        prop_assert_eq!(&product(&[&x, &ONE]), &x);
        prop_assert_eq!(&product(&[&x, &ZERO]), &*ZERO);
    }

    #[test]
    fn machine_integers_pick_encoding(n in any::<i64>()) {
        let e = Expr::from(n);
        let expected = if i16::try_from(n).is_ok() { Kind::SmallInt } else { Kind::LargeInt };
        prop_assert_eq!(e.view().kind(), expected);
        prop_assert_eq!(e.view().integer(), n);
    }
}

#[test]
fn small_integer_boundary() {
    let max = i16::MAX as i64;
    assert_eq!(Expr::from(max - 1).view().kind(), Kind::SmallInt);
    assert_eq!(Expr::from(max).view().kind(), Kind::SmallInt);
    assert_eq!(Expr::from(max + 1).view().kind(), Kind::LargeInt);
}
