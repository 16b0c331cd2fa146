//! Commonly used expressions. This module consists of lazily built static [`Expr`]s, so that
//! views of them can be handed out with a `'static` lifetime.

use cas_error::Error;
use crate::expr::Expr;
use once_cell::sync::Lazy;

/// Unwraps an expression built from literals that are known to be valid.
fn literal(e: Result<Expr, Error>) -> Expr {
    match e {
        Ok(e) => e,
        Err(_) => unreachable!("invalid literal constant"),
    }
}

pub static ZERO: Lazy<Expr> = Lazy::new(|| Expr::from(0));

pub static ONE: Lazy<Expr> = Lazy::new(|| Expr::from(1));

pub static MINUS_ONE: Lazy<Expr> = Lazy::new(|| Expr::from(-1));

pub static ONE_HALF: Lazy<Expr> = Lazy::new(|| literal(Expr::rational(1, 2)));

/// The imaginary unit.
pub static I: Lazy<Expr> = Lazy::new(|| literal(Expr::complex(0, 1)));

/// Archimedes' constant.
pub static PI: Lazy<Expr> = Lazy::new(|| literal(Expr::constant("pi", std::f64::consts::PI)));

/// Euler's number.
pub static E: Lazy<Expr> = Lazy::new(|| literal(Expr::constant("e", std::f64::consts::E)));
