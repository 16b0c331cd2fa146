//! Numeric evaluation of expressions.
//!
//! Evaluation works in double precision. Complex intermediate values are carried as
//! [`rug::Complex`] with [`PRECISION`] bits, so that `i*i` evaluates to the real number `-1`.
//! Functions are evaluated through their registered [`Evaluator`](crate::funcs::Evaluator) and
//! only accept real arguments.

use crate::{
    blob::Kind,
    expr::ExprView,
    funcs,
    primitive::{complex, PRECISION},
};
use rug::{ops::Pow, Complex};

/// Evaluates an expression to a complex number. Returns [`None`] if the expression contains a
/// symbol, or a function was given a complex argument.
pub fn eval_complex(e: ExprView<'_>) -> Option<Complex> {
    let value = match e.kind() {
        Kind::ShortSymbol | Kind::LongSymbol => return None,
        Kind::SmallInt | Kind::SmallRational | Kind::LargeInt | Kind::LargeRational => {
            complex(&e.rational())
        },
        Kind::FloatingPoint | Kind::Constant => complex(e.floating_point()),
        Kind::ComplexNumber => {
            let re = eval_complex(e.real_part())?;
            let im = eval_complex(e.imag_part())?;
            complex((re.real(), im.real()))
        },
        Kind::Sum => e.operands().try_fold(complex(0), |acc, op| Some(acc + eval_complex(op)?))?,
        Kind::Product => e.operands().try_fold(complex(1), |acc, op| Some(acc * eval_complex(op)?))?,
        Kind::Power => {
            let base = eval_complex(e.first_operand())?;
            let exp = eval_complex(e.second_operand())?;
            Complex::with_val(PRECISION, base.pow(&exp))
        },
        Kind::Function => {
            let eval = funcs::evaluator(e.evaluator())?;
            let args = e.operands()
                .map(eval_real)
                .collect::<Option<Vec<_>>>()?;
            complex(eval.apply(&args)?)
        },
    };

    let (re, im) = (value.real(), value.imag());
    (re.is_finite() && im.is_finite()).then_some(value)
}

/// Evaluates an expression to a real number. Returns [`None`] if the expression cannot be
/// evaluated, or evaluates to a number with a nonzero imaginary part.
pub fn eval_real(e: ExprView<'_>) -> Option<f64> {
    let value = eval_complex(e)?;
    value.imag().is_zero().then(|| value.real().to_f64())
}
