//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Complex`] numbers from various types.

use cas_error::Error;
use crate::error::NonFiniteFloat;
use rug::{Assign, Complex, Integer, Rational};

/// The number of bits of precision used for complex evaluation. This matches the 53-bit
/// significand of an IEEE double, which is the only floating-point format expressions store.
pub const PRECISION: u32 = 53;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given numerator and denominator. The result is reduced to
/// lowest terms with a positive denominator.
///
/// The denominator must not be zero.
pub fn rational<N, D>(num: N, denom: D) -> Rational
where
    Integer: From<N> + From<D>,
{
    Rational::from((Integer::from(num), Integer::from(denom)))
}

/// Creates a [`Complex`] with the given value, at double precision.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

/// Returns the value as an [`i16`] if it fits.
pub fn to_small(n: &Integer) -> Option<i16> {
    n.to_i16()
}

/// Checks that the value is finite, normalizing negative zero to positive zero so that equal
/// values have equal encodings.
pub fn finite(value: f64) -> Result<f64, Error> {
    if !value.is_finite() {
        return Err(NonFiniteFloat { value }.into());
    }

    if value == 0.0 {
        Ok(0.0)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn rational_is_reduced() {
        let r = rational(9, 6);
        assert_eq!((r.numer().clone(), r.denom().clone()), (int(3), int(2)));

        let r = rational(-2, -3);
        assert_eq!((r.numer().clone(), r.denom().clone()), (int(2), int(3)));

        let r = rational(2, -3);
        assert_eq!((r.numer().clone(), r.denom().clone()), (int(-2), int(3)));
    }

    #[test]
    fn small_boundary() {
        assert_eq!(to_small(&int(i16::MAX)), Some(i16::MAX));
        assert_eq!(to_small(&(int(i16::MAX) + 1)), None);
        assert_eq!(to_small(&int(i16::MIN)), Some(i16::MIN));
    }

    #[test]
    fn non_finite() {
        assert!(finite(f64::NAN).is_err());
        assert!(finite(f64::INFINITY).is_err());
        assert_eq!(finite(-0.0).unwrap().to_bits(), 0.0f64.to_bits());
    }
}
