//! Arithmetic operators on expressions.
//!
//! The operators are implemented for references and simplify their result. Since simplification
//! can fail (for example, dividing by zero), every operator returns a [`Result`].
//!
//! ```
//! use cas_algebra::Expr;
//!
//! let a = Expr::symbol("a").unwrap();
//! let b = Expr::symbol("b").unwrap();
//! let sum = (&a + &b).unwrap();
//! let difference = (&sum - &b).unwrap();
//! assert_eq!(difference, a);
//!
//! assert!((&a / &Expr::from(0)).is_err());
//! ```

use cas_error::Error;
use crate::simplify::{auto_minus, auto_one_over, auto_power, auto_product, auto_sum};
use std::ops::{Add, Div, Mul, Neg, Sub};
use super::Expr;

impl Add for &Expr {
    type Output = Result<Expr, Error>;

    fn add(self, rhs: Self) -> Self::Output {
        auto_sum(&[self.view(), rhs.view()])
    }
}

impl Sub for &Expr {
    type Output = Result<Expr, Error>;

    fn sub(self, rhs: Self) -> Self::Output {
        let rhs = auto_minus(rhs.view())?;
        auto_sum(&[self.view(), rhs.view()])
    }
}

impl Mul for &Expr {
    type Output = Result<Expr, Error>;

    fn mul(self, rhs: Self) -> Self::Output {
        auto_product(&[self.view(), rhs.view()])
    }
}

impl Div for &Expr {
    type Output = Result<Expr, Error>;

    fn div(self, rhs: Self) -> Self::Output {
        let rhs = auto_one_over(rhs.view())?;
        auto_product(&[self.view(), rhs.view()])
    }
}

impl Neg for &Expr {
    type Output = Result<Expr, Error>;

    fn neg(self) -> Self::Output {
        auto_minus(self.view())
    }
}

impl Expr {
    /// Raises the expression to the given power, simplifying the result.
    pub fn pow(&self, exp: &Expr) -> Result<Expr, Error> {
        auto_power(self.view(), exp.view())
    }
}
