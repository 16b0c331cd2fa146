/// A rule applied by the simplifier.
///
/// Pass a `Vec<Step>` to one of the `*_with_steps` functions to find out which rules were used to
/// reach the canonical form of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// A sum or product operand of the same kind was expanded into its own operands.
    ///
    /// `a+(b+c) = a+b+c`
    Flatten,

    /// `0+a = a`
    AddZero,

    /// Two numbers were added.
    AddNumbers,

    /// Like terms were combined, possibly cancelling each other.
    ///
    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// Two numbers were multiplied.
    MultiplyNumbers,

    /// Like factors were combined by adding their exponents.
    ///
    /// `a^2*a^3 = a^5`
    CombineLikeFactors,

    /// Two operands were swapped into canonical order.
    Reorder,

    /// `1^a = 1`
    PowerOfOne,

    /// `0^a = 0`
    PowerOfZero,

    /// `a^0 = 1`
    ZeroExponent,

    /// `a^1 = a`
    UnitExponent,

    /// A negative number was raised to a non-integer power, giving a complex number.
    ComplexPower,

    /// A power of numbers was evaluated in floating-point.
    EvaluatePower,

    /// A rational number was raised to an integer power.
    IntegerPower,

    /// Nested powers were combined by multiplying their exponents.
    ///
    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// An exact root of a rational number was extracted.
    ///
    /// `sqrt(4) = 2`
    Root,

    /// The square root of a negative number was written in terms of the imaginary unit.
    ///
    /// `sqrt(-4) = 2i`
    ImaginaryRoot,
}
