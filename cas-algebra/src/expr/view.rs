use crate::{
    blob::{self, Blob, Domain, Kind},
    funcs::EvalId,
    operands::{nth_operand, operands_of, Operands},
    predicate::{Any, Predicate, Tag},
};
use rug::{Integer, Rational};
use std::{borrow::Cow, fmt, marker::PhantomData};
use super::Expr;

/// Returns true if tag assertions are compiled in.
const CHECKED: bool = cfg!(any(debug_assertions, feature = "checked"));

/// A non-owning, read-only view of an expression.
///
/// The view borrows the blobs of an [`Expr`] starting at the root of the viewed expression. Since
/// the remote data of a node always follows its header, the borrowed slice extends to the end of
/// the buffer it was taken from; it is not the exact extent of the viewed expression.
///
/// The type parameter `T` is a [`Tag`] recording a shape the expression is known to have. It is
/// asserted when the view is created or re-tagged in debug builds, or in release builds with the
/// `checked` feature enabled. A mismatch is a logic error and panics in those builds.
pub struct ExprView<'a, T: Tag = Any> {
    blobs: &'a [Blob],
    tag: PhantomData<T>,
}

impl<T: Tag> Clone for ExprView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tag> Copy for ExprView<'_, T> {}

impl<'a, T: Tag> ExprView<'a, T> {
    /// Creates a view of the expression whose root is `blobs[0]`.
    pub(crate) fn new(blobs: &'a [Blob]) -> Self {
        let view = Self { blobs, tag: PhantomData };
        if CHECKED {
            assert!(
                T::default().test(view.erase()),
                "expression of kind {:?} does not satisfy the tag `{}`",
                view.kind(),
                std::any::type_name::<T>(),
            );
        }
        view
    }

    /// Returns the blobs starting at the root of this expression.
    pub fn blobs(self) -> &'a [Blob] {
        self.blobs
    }

    /// Returns the header blob of the root.
    pub fn header(self) -> Blob {
        self.blobs[0]
    }

    /// Returns the kind of the root.
    pub fn kind(self) -> Kind {
        self.blobs[0].kind()
    }

    /// Drops the tag.
    pub fn erase(self) -> ExprView<'a> {
        ExprView { blobs: self.blobs, tag: PhantomData }
    }

    /// Re-tags the view, asserting the new tag in checked builds.
    pub fn retag<U: Tag>(self) -> ExprView<'a, U> {
        ExprView::new(self.blobs)
    }

    /// Re-tags the view if the expression satisfies the new tag.
    pub fn try_retag<U: Tag>(self) -> Option<ExprView<'a, U>> {
        U::default().test(self.erase()).then(|| ExprView { blobs: self.blobs, tag: PhantomData })
    }

    /// Returns true if the expression satisfies the tag `U`.
    pub fn is<U: Tag>(self) -> bool {
        U::default().test(self.erase())
    }

    /// Returns true if the expression satisfies the predicate.
    pub fn satisfies<P: Predicate>(self, predicate: P) -> bool {
        predicate.test(self.erase())
    }

    /// Copies the expression into a new, independent [`Expr`].
    pub fn to_expr(self) -> Expr {
        Expr::from_buffer(blob::construct_duplicate_sequence(self.blobs))
    }

    /// Returns the number of logical operands. Only sums, products, powers and functions have
    /// operands.
    pub fn n_operands(self) -> usize {
        blob::n_operands(self.header())
    }

    /// Returns an iterator over the logical operands.
    pub fn operands(self) -> Operands<'a> {
        operands_of(self.erase())
    }

    /// Returns the operand at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn nth_operand(self, n: usize) -> ExprView<'a> {
        nth_operand(self.erase(), n)
    }

    /// Returns the first operand: the first summand or factor, the base of a power, or the first
    /// argument of a function.
    pub fn first_operand(self) -> ExprView<'a> {
        self.nth_operand(0)
    }

    /// Returns the second operand.
    pub fn second_operand(self) -> ExprView<'a> {
        self.nth_operand(1)
    }

    /// Returns the name of a symbol, constant or function.
    pub fn name(self) -> Cow<'a, str> {
        match self.kind() {
            Kind::ShortSymbol | Kind::LongSymbol => blob::symbol_name(self.blobs),
            Kind::Constant => blob::constant_name(self.blobs),
            Kind::Function => blob::function_name(self.blobs),
            kind => unreachable!("{} has no name", kind.name()),
        }
    }

    /// Returns the domain of a symbol.
    pub fn domain(self) -> Domain {
        blob::domain(self.header())
    }

    /// Returns the value of a small integer.
    pub fn small_int(self) -> i16 {
        blob::small_int(self.header())
    }

    /// Returns the numerator and denominator of a small rational or small integer.
    pub fn small_rational(self) -> (i16, i16) {
        blob::small_rational(self.header())
    }

    /// Returns the value of an integer, small or large.
    pub fn integer(self) -> Integer {
        match self.kind() {
            Kind::SmallInt => Integer::from(self.small_int()),
            Kind::LargeInt => blob::large_int(self.blobs),
            kind => unreachable!("{} is not an integer", kind.name()),
        }
    }

    /// Returns the value of an exact rational number, which includes integers.
    pub fn rational(self) -> Rational {
        match self.kind() {
            Kind::SmallInt | Kind::LargeInt => Rational::from(self.integer()),
            Kind::SmallRational => {
                let (num, denom) = self.small_rational();
                Rational::from((num, denom))
            },
            Kind::LargeRational => {
                let num = ExprView::<Any>::new(blob::numerator_of_large_rational(self.blobs));
                let denom = ExprView::<Any>::new(blob::denominator_of_large_rational(self.blobs));
                Rational::from((num.integer(), denom.integer()))
            },
            kind => unreachable!("{} is not a rational number", kind.name()),
        }
    }

    /// Returns the value of a floating-point number or constant.
    pub fn floating_point(self) -> f64 {
        blob::floating_point(self.blobs)
    }

    /// Returns the evaluator id of a function.
    pub fn evaluator(self) -> EvalId {
        blob::function_evaluator(self.blobs)
    }

    /// Returns the real part of a complex number.
    pub fn real_part(self) -> ExprView<'a> {
        ExprView::new(blob::real_of_complex(self.blobs))
    }

    /// Returns the imaginary part of a complex number.
    pub fn imag_part(self) -> ExprView<'a> {
        ExprView::new(blob::imag_of_complex(self.blobs))
    }
}

impl<'a, T: Tag> From<&'a Expr> for ExprView<'a, T> {
    fn from(expr: &'a Expr) -> Self {
        ExprView::new(expr.blobs())
    }
}

impl<T: Tag, U: Tag> PartialEq<ExprView<'_, U>> for ExprView<'_, T> {
    fn eq(&self, other: &ExprView<'_, U>) -> bool {
        blob::equal(self.blobs, other.blobs)
    }
}

impl<T: Tag> Eq for ExprView<'_, T> {}

impl<T: Tag> PartialEq<Expr> for ExprView<'_, T> {
    fn eq(&self, other: &Expr) -> bool {
        blob::equal(self.blobs, other.blobs())
    }
}

impl<T: Tag> fmt::Debug for ExprView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprView({})", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{predicate::{Number, Product, Symbol}, primitive::{int, rational}};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn views_alias_the_buffer() {
        let a = Expr::symbol("a").unwrap();
        let view = a.view();
        assert!(std::ptr::eq(view.blobs().as_ptr(), a.blobs().as_ptr()));
        assert_eq!(view, a);
    }

    #[test]
    fn retag() {
        let two = Expr::from(2);
        let number = two.view().retag::<Number>();
        assert_eq!(number.small_int(), 2);
        assert!(two.view().try_retag::<Symbol>().is_none());
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "checked"))]
    #[should_panic(expected = "does not satisfy the tag")]
    fn retag_mismatch() {
        let two = Expr::from(2);
        two.view().retag::<Product>();
    }

    #[test]
    fn exact_values() {
        let big = Expr::integer(int(1) << 70u32).unwrap();
        assert_eq!(big.view().integer(), int(1) << 70u32);

        let r = Expr::from_rational(rational(int(1) << 70u32, 7)).unwrap();
        assert_eq!(r.view().rational(), rational(int(1) << 70u32, 7));

        let small = Expr::rational(-6, 4).unwrap();
        assert_eq!(small.view().small_rational(), (-3, 2));
        assert_eq!(small.view().rational(), rational(-3, 2));
    }

    #[test]
    fn to_expr_is_independent() {
        let a = Expr::symbol("a").unwrap();
        let sum = Expr::composite(Kind::Sum, &[a.view(), Expr::from(1).view()]).unwrap();
        let copy = sum.view().nth_operand(0).to_expr();
        drop(sum);
        assert_eq!(copy, a);
    }
}
