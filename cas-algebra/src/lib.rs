//! Compact expression trees for computer algebra, kept in canonical form by automatic
//! simplification.
//!
//! Expressions are stored as flat sequences of fixed-size [blobs](blob), which makes them cheap to
//! copy and compare. An [`Expr`] owns such a sequence, and an [`ExprView`] borrows the root of any
//! sub-expression inside one. Predicates from the [`predicate`] module classify expressions, and the
//! [`operands`] module walks their children.
//!
//! The [`simplify`] module implements automatic simplification in the style of Cohen's
//! *Computer Algebra and Symbolic Computation*: sums and products are flattened, numbers are
//! combined, like terms and like factors are collected, and operands are sorted by the canonical
//! [order](order). Every expression built through it, or through the arithmetic operators on
//! [`Expr`], is in canonical form, so structurally different results are mathematically different
//! expressions as far as the simplifier can tell.
//!
//! ```
//! use cas_algebra::Expr;
//!
//! let a = Expr::symbol("a").unwrap();
//! let b = Expr::symbol("b").unwrap();
//!
//! let lhs = (&(&a + &b).unwrap() + &a).unwrap();
//! let rhs = (&(&Expr::from(2) * &a).unwrap() + &b).unwrap();
//! assert_eq!(lhs, rhs);
//! assert_eq!(lhs.to_string(), "2*a + b");
//! ```
//!
//! Failures, such as dividing by zero or exceeding the capacity of the encoding, are reported as
//! a [`cas_error::Error`] carrying one of the kinds in the [`error`] module.
//!
//! # Features
//!
//! - `checked`: assert the tags of [`ExprView`]s in release builds as well. The assertions are
//!   always enabled with `debug_assertions`.

pub mod blob;
pub mod consts;
pub mod error;
pub mod eval;
pub mod expr;
mod fmt;
pub mod funcs;
pub mod number;
pub mod operands;
pub mod order;
pub mod predicate;
pub mod primitive;
pub mod simplify;
pub mod step_collector;

#[cfg(test)]
mod proptests;

pub use expr::{Expr, ExprView};
pub use simplify::Step;
pub use step_collector::StepCollector;
