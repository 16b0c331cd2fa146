//! The compact binary encoding of expression trees.
//!
//! # Blobs
//!
//! An expression is stored as a contiguous sequence of fixed-size, 8-byte records called
//! [`Blob`]s. Some blobs are _headers_: their first byte classifies the node they describe (see
//! [`Kind`]). Other blobs are plain _payload_ that only make sense in the context of the header
//! that owns them: the bytes of a double, a 64-bit limb of a large integer, or eight characters
//! of a long name. A payload blob cannot answer "what am I", which is why all traversal goes
//! through headers.
//!
//! Header blobs are laid out as follows:
//!
//! | Byte  | Content                                                                          |
//! | ----- | -------------------------------------------------------------------------------- |
//! | 0     | the [`Kind`] of the node                                                         |
//! | 1     | symbol [`Domain`], sign of a large integer, or bits 16..24 of the extent        |
//! | 2..4  | bits 0..16 of the extent, or the first two characters of a short symbol         |
//! | 4..6  | offset to the remote data, numerator of a small rational, or name characters    |
//! | 6..8  | operand / limb / name blob count, denominator of a small rational, or characters |
//!
//! # Self-contained nodes and remote data
//!
//! Small integers, small rationals and short symbols are _self-contained_: everything fits into
//! the header. Every other node points to _remote data_ with two numbers:
//!
//! - the **offset**, the distance in blobs from the header to the first remote blob, and
//! - the **extent**, the number of remote blobs used by the node and, recursively, all of its
//!   descendants.
//!
//! The remote region of a node is always contiguous. For composites (sums, products, powers,
//! functions and complex numbers), it begins with the header blobs of all operands, one after
//! another, followed by the remote data of each operand in order. Offsets are relative, so any
//! header together with its remote region is itself a valid expression that can be copied to a
//! new position by rewriting nothing but the offset of its header. This is what
//! [`append_duplicate_sequence`] does, and it is the only way composites are assembled.
//!
//! Offsets are 16-bit, extents of composites 24-bit, and operand, limb and name blob counts
//! 16-bit. Exceeding any of them is reported as a range error at construction time.

use cas_error::Error;
use crate::{
    error::{
        EmptyName,
        ExtentOverflow,
        IntegerOutOfRange,
        LimbCountOverflow,
        NameTooLong,
        NulInName,
        OffsetOverflow,
        OperandCountOverflow,
        ZeroDenominator,
    },
    funcs::EvalId,
    primitive::{finite, to_small},
};
use rug::{integer::Order, Integer, Rational};
use smallvec::SmallVec;
use std::{borrow::Cow, fmt};

/// The size of a single blob, in bytes.
pub const BLOB_SIZE: usize = 8;

/// The maximum length of a symbol name that fits into a single header blob.
pub const SHORT_NAME_LEN: usize = 6;

/// The largest offset from a header to its remote data.
pub const MAX_OFFSET: usize = u16::MAX as usize;

/// The largest extent of a node with a 24-bit extent field.
pub const MAX_EXTENT: usize = (1 << 24) - 1;

/// The largest number of logical operands of a sum, product or function.
pub const MAX_OPERANDS: usize = u16::MAX as usize;

/// The largest number of 64-bit limbs of a large integer.
pub const MAX_LIMBS: usize = u16::MAX as usize;

/// The largest number of blobs used for the characters of a long name, including the NUL
/// terminator.
pub const MAX_NAME_BLOBS: usize = u16::MAX as usize - 1;

/// The number of blobs an owned buffer can hold before spilling to the heap.
pub const INLINE_BLOBS: usize = 4;

/// An owned sequence of blobs.
pub type Buffer = SmallVec<[Blob; INLINE_BLOBS]>;

/// The classification of a header blob.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    ShortSymbol = 1,
    LongSymbol,
    Constant,
    SmallInt,
    SmallRational,
    FloatingPoint,
    LargeInt,
    LargeRational,
    ComplexNumber,
    Sum,
    Product,
    Power,
    Function,
}

impl Kind {
    /// Decodes the classification byte of a header.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            1 => Self::ShortSymbol,
            2 => Self::LongSymbol,
            3 => Self::Constant,
            4 => Self::SmallInt,
            5 => Self::SmallRational,
            6 => Self::FloatingPoint,
            7 => Self::LargeInt,
            8 => Self::LargeRational,
            9 => Self::ComplexNumber,
            10 => Self::Sum,
            11 => Self::Product,
            12 => Self::Power,
            13 => Self::Function,
            _ => return None,
        })
    }

    /// Returns true if the node is any kind of number.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            Self::SmallInt
                | Self::SmallRational
                | Self::FloatingPoint
                | Self::LargeInt
                | Self::LargeRational
                | Self::ComplexNumber
        )
    }

    /// Returns true if the node is an integer, small or large.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::SmallInt | Self::LargeInt)
    }

    /// Returns true if the node is an exact rational number (which includes integers).
    pub fn is_rational(self) -> bool {
        matches!(self, Self::SmallInt | Self::SmallRational | Self::LargeInt | Self::LargeRational)
    }

    /// Returns true if the node is a floating-point number.
    pub fn is_floating_point(self) -> bool {
        self == Self::FloatingPoint
    }

    /// Returns true if the node is a complex number.
    pub fn is_complex(self) -> bool {
        self == Self::ComplexNumber
    }

    /// Returns true if the node is a number stored entirely in its header.
    pub fn is_small(self) -> bool {
        matches!(self, Self::SmallInt | Self::SmallRational)
    }

    /// Returns true if the node is a sum, product, power or function.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Sum | Self::Product | Self::Power | Self::Function)
    }

    /// Returns true if the node is a symbol, short or long.
    pub fn is_symbol(self) -> bool {
        matches!(self, Self::ShortSymbol | Self::LongSymbol)
    }

    /// Returns true if the node stores everything in its header and has no remote data.
    pub fn is_self_contained(self) -> bool {
        matches!(self, Self::ShortSymbol | Self::SmallInt | Self::SmallRational)
    }

    /// Returns true if the extent of the node is stored in the 24-bit extent field.
    fn has_wide_extent(self) -> bool {
        matches!(
            self,
            Self::Constant
                | Self::LargeRational
                | Self::ComplexNumber
                | Self::Sum
                | Self::Product
                | Self::Power
                | Self::Function
        )
    }

    /// A short, human-readable name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::ShortSymbol | Self::LongSymbol => "symbol",
            Self::Constant => "constant",
            Self::SmallInt | Self::LargeInt => "integer",
            Self::SmallRational | Self::LargeRational => "rational",
            Self::FloatingPoint => "floating-point number",
            Self::ComplexNumber => "complex number",
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Power => "power",
            Self::Function => "function",
        }
    }
}

/// The domain a symbol is constrained to.
///
/// The derived order `PositiveReal < Real < Complex` is used to order symbols that share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    /// The symbol is a positive real number.
    PositiveReal,

    /// The symbol is a real number.
    Real,

    /// The symbol is unconstrained.
    #[default]
    Complex,
}

impl Domain {
    fn to_byte(self) -> u8 {
        match self {
            Self::Complex => 0,
            Self::PositiveReal => 1,
            Self::Real => 2,
        }
    }

    fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Self::PositiveReal,
            2 => Self::Real,
            _ => Self::Complex,
        }
    }

    /// Returns true if values in this domain are real.
    pub fn is_real(self) -> bool {
        matches!(self, Self::PositiveReal | Self::Real)
    }
}

/// A single 8-byte record of an expression.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Blob([u8; BLOB_SIZE]);

impl Blob {
    /// Creates a zeroed header of the given kind.
    fn header(kind: Kind) -> Self {
        let mut bytes = [0; BLOB_SIZE];
        bytes[0] = kind as u8;
        Self(bytes)
    }

    /// Creates a header pointing to `len` remote blobs at the given offset.
    fn located(kind: Kind, offset: u16, len: u16) -> Self {
        let mut blob = Self::header(kind);
        blob.set_offset(offset);
        blob.set_len(len);
        blob
    }

    /// Returns the raw bytes of the blob.
    pub fn bytes(&self) -> &[u8; BLOB_SIZE] {
        &self.0
    }

    /// Returns the kind of this header, or [`None`] if the blob is not a header.
    pub fn try_kind(self) -> Option<Kind> {
        Kind::from_byte(self.0[0])
    }

    /// Returns the kind of this header.
    ///
    /// # Panics
    ///
    /// Expressions only ever hand out header blobs through their public interface; calling this
    /// on a payload blob is a logic error and panics.
    pub fn kind(self) -> Kind {
        match self.try_kind() {
            Some(kind) => kind,
            None => unreachable!("payload blob {:?} used as a header", self),
        }
    }

    fn pre0(self) -> u8 {
        self.0[1]
    }

    fn offset(self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    fn set_offset(&mut self, offset: u16) {
        self.0[4..6].copy_from_slice(&offset.to_le_bytes());
    }

    fn len(self) -> u16 {
        u16::from_le_bytes([self.0[6], self.0[7]])
    }

    fn set_len(&mut self, len: u16) {
        self.0[6..8].copy_from_slice(&len.to_le_bytes());
    }

    fn wide_extent(self) -> usize {
        (self.0[1] as usize) << 16 | (self.0[2] as usize) << 8 | self.0[3] as usize
    }

    fn set_wide_extent(&mut self, extent: usize) -> Result<(), Error> {
        if extent > MAX_EXTENT {
            return Err(ExtentOverflow { extent, max: MAX_EXTENT }.into());
        }

        self.0[1] = (extent >> 16) as u8;
        self.0[2] = (extent >> 8) as u8;
        self.0[3] = extent as u8;
        Ok(())
    }

    /// Creates a payload blob holding a double.
    fn double(value: f64) -> Self {
        Self(value.to_le_bytes())
    }

    /// Creates a payload blob holding a limb of a large integer.
    fn limb(limb: u64) -> Self {
        Self(limb.to_le_bytes())
    }

    /// Creates a payload blob holding an evaluator id.
    fn evaluator(id: EvalId) -> Self {
        let mut bytes = [0; BLOB_SIZE];
        bytes[..4].copy_from_slice(&id.0.to_le_bytes());
        Self(bytes)
    }

    fn as_double(self) -> f64 {
        f64::from_le_bytes(self.0)
    }

    fn as_limb(self) -> u64 {
        u64::from_le_bytes(self.0)
    }

    fn as_evaluator(self) -> EvalId {
        EvalId(u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]))
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_kind() {
            Some(kind) => write!(f, "Blob({:?}, {:?})", kind, &self.0[1..]),
            None => write!(f, "Blob({:?})", self.0),
        }
    }
}

/// Returns true if the name fits into a single header blob.
pub fn is_short_name(name: &str) -> bool {
    name.len() <= SHORT_NAME_LEN
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        Err(EmptyName.into())
    } else if name.as_bytes().contains(&0) {
        Err(NulInName { name: name.to_string() }.into())
    } else {
        Ok(())
    }
}

/// Constructs a self-contained small integer.
pub fn construct_small_int(n: i16) -> Blob {
    let mut blob = Blob::header(Kind::SmallInt);
    blob.0[4..6].copy_from_slice(&n.to_le_bytes());
    blob.0[6..8].copy_from_slice(&1i16.to_le_bytes());
    blob
}

/// Constructs a self-contained small rational, reduced to lowest terms with a positive
/// denominator. If the denominator becomes one, a small integer is returned instead.
pub fn construct_small_rational(num: i16, denom: i16) -> Result<Blob, Error> {
    if denom == 0 {
        return Err(ZeroDenominator.into());
    }

    // widen so that negating `i16::MIN` cannot overflow
    let (mut num, mut denom) = (num as i32, denom as i32);
    if denom < 0 {
        num = -num;
        denom = -denom;
    }

    let divisor = gcd(num.unsigned_abs(), denom.unsigned_abs()) as i32;
    num /= divisor;
    denom /= divisor;

    let (Ok(num), Ok(denom)) = (i16::try_from(num), i16::try_from(denom)) else {
        return Err(IntegerOutOfRange { value: num.to_string(), target: "a small rational" }.into());
    };

    if denom == 1 {
        return Ok(construct_small_int(num));
    }

    let mut blob = Blob::header(Kind::SmallRational);
    blob.0[4..6].copy_from_slice(&num.to_le_bytes());
    blob.0[6..8].copy_from_slice(&denom.to_le_bytes());
    Ok(blob)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Constructs a self-contained short symbol.
pub fn construct_short_symbol(name: &str, domain: Domain) -> Result<Blob, Error> {
    check_name(name)?;
    if !is_short_name(name) {
        return Err(NameTooLong { len: name.len(), max: SHORT_NAME_LEN }.into());
    }

    let mut blob = Blob::header(Kind::ShortSymbol);
    blob.0[1] = domain.to_byte();
    blob.0[2..2 + name.len()].copy_from_slice(name.as_bytes());
    Ok(blob)
}

/// Constructs a floating-point number: a header followed by one blob holding the double.
pub fn construct_float(value: f64) -> Result<Buffer, Error> {
    let value = finite(value)?;
    Ok(SmallVec::from_slice(&[Blob::located(Kind::FloatingPoint, 1, 1), Blob::double(value)]))
}

/// The number of remote blobs needed to store a long name plus its NUL terminator, or zero if the
/// name is short.
fn name_blobs(name: &str) -> Result<usize, Error> {
    if is_short_name(name) {
        return Ok(0);
    }

    let n_blobs = (name.len() + BLOB_SIZE) / BLOB_SIZE;
    if n_blobs > MAX_NAME_BLOBS {
        return Err(NameTooLong { len: name.len(), max: MAX_NAME_BLOBS * BLOB_SIZE - 1 }.into());
    }

    Ok(n_blobs)
}

/// Writes the header of a short or long symbol to `out[at]` and appends the characters of a long
/// name to the end of `out`.
fn append_symbol(name: &str, domain: Domain, at: usize, out: &mut Buffer) -> Result<(), Error> {
    check_name(name)?;
    if out.len() < at + 1 {
        out.resize(at + 1, Blob::default());
    }

    if is_short_name(name) {
        out[at] = construct_short_symbol(name, domain)?;
        return Ok(());
    }

    let n_blobs = name_blobs(name)?;
    let mut header = Blob::located(Kind::LongSymbol, checked_offset(out.len() - at)?, n_blobs as u16);
    header.0[1] = domain.to_byte();
    out[at] = header;

    for chunk in name.as_bytes().chunks(BLOB_SIZE) {
        let mut bytes = [0; BLOB_SIZE];
        bytes[..chunk.len()].copy_from_slice(chunk);
        out.push(Blob(bytes));
    }
    if name.len() % BLOB_SIZE == 0 {
        // room for the terminator
        out.push(Blob::default());
    }

    Ok(())
}

fn checked_offset(offset: usize) -> Result<u16, Error> {
    u16::try_from(offset).map_err(|_| OffsetOverflow { offset, max: MAX_OFFSET }.into())
}

/// Constructs a symbol. Names of up to [`SHORT_NAME_LEN`] bytes are stored in a single blob,
/// longer names are stored as remote data terminated by a NUL byte.
pub fn construct_symbol(name: &str, domain: Domain) -> Result<Buffer, Error> {
    let mut out = Buffer::new();
    append_symbol(name, domain, 0, &mut out)?;
    Ok(out)
}

/// Constructs a named constant with a floating-point value.
///
/// The remote data holds the value followed by the symbol blob(s) of the name.
pub fn construct_constant(name: &str, value: f64) -> Result<Buffer, Error> {
    let value = finite(value)?;
    let extent = 2 + name_blobs(name)?;

    let mut out = Buffer::with_capacity(1 + extent);
    out.push(Blob::located(Kind::Constant, 1, 2));
    out.push(Blob::double(value));
    append_symbol(name, Domain::Real, 2, &mut out)?;
    out[0].set_wide_extent(extent)?;

    Ok(out)
}

/// Appends the magnitude limbs of `n` to `out`, least significant first, returning their count.
fn append_limbs(n: &Integer, out: &mut Buffer) -> Result<u16, Error> {
    let limbs = n.to_digits::<u64>(Order::Lsf);
    if limbs.len() > MAX_LIMBS {
        return Err(LimbCountOverflow { limbs: limbs.len(), max: MAX_LIMBS }.into());
    }

    out.extend(limbs.iter().map(|&limb| Blob::limb(limb)));
    Ok(limbs.len() as u16)
}

fn large_int_header(n: &Integer, offset: u16) -> Blob {
    let mut header = Blob::located(Kind::LargeInt, offset, 0);
    header.0[1] = u8::from(*n < 0);
    header
}

/// Constructs a large integer: a header storing the sign, followed by the limbs of the
/// magnitude.
///
/// The value should not fit into a small integer; see [`construct_integer`] for the variant that
/// picks the encoding.
pub fn construct_large_int(n: &Integer) -> Result<Buffer, Error> {
    debug_assert!(to_small(n).is_none());

    let mut out = Buffer::new();
    out.push(large_int_header(n, 1));
    let len = append_limbs(n, &mut out)?;
    out[0].set_len(len);
    Ok(out)
}

/// Constructs a machine integer. Values outside the small range need a single limb, so this
/// cannot fail.
pub fn construct_word(n: i64) -> Buffer {
    if let Ok(small) = i16::try_from(n) {
        return SmallVec::from_slice(&[construct_small_int(small)]);
    }

    let mut header = Blob::located(Kind::LargeInt, 1, 1);
    header.0[1] = u8::from(n < 0);
    SmallVec::from_slice(&[header, Blob::limb(n.unsigned_abs())])
}

/// Constructs an integer, using the small encoding whenever the value fits.
pub fn construct_integer(n: &Integer) -> Result<Buffer, Error> {
    match to_small(n) {
        Some(small) => Ok(SmallVec::from_slice(&[construct_small_int(small)])),
        None => construct_large_int(n),
    }
}

/// Constructs a large rational: a header, the roots of the numerator and denominator (either of
/// which may be a small integer), followed by the limbs of whichever of them is large.
///
/// The value should be in lowest terms and not fit into a small rational; see
/// [`construct_rational`] for the variant that picks the encoding.
pub fn construct_large_rational(n: &Rational) -> Result<Buffer, Error> {
    let (num, denom) = (n.numer(), n.denom());

    let mut out = Buffer::with_capacity(3);
    out.push(Blob::located(Kind::LargeRational, 1, 2));

    match to_small(num) {
        Some(small) => out.push(construct_small_int(small)),
        None => out.push(large_int_header(num, 0)),
    }
    match to_small(denom) {
        Some(small) => out.push(construct_small_int(small)),
        None => out.push(large_int_header(denom, 0)),
    }

    let mut num_limbs = 0;
    if out[1].kind() == Kind::LargeInt {
        out[1].set_offset(2);
        num_limbs = append_limbs(num, &mut out)?;
        out[1].set_len(num_limbs);
    }
    if out[2].kind() == Kind::LargeInt {
        out[2].set_offset(checked_offset(1 + num_limbs as usize)?);
        let denom_limbs = append_limbs(denom, &mut out)?;
        out[2].set_len(denom_limbs);
    }

    let extent = out.len() - 1;
    out[0].set_wide_extent(extent)?;
    Ok(out)
}

/// Constructs an exact rational number, using the most compact encoding: small integer, large
/// integer, small rational or large rational.
pub fn construct_rational(n: &Rational) -> Result<Buffer, Error> {
    if *n.denom() == 1 {
        return construct_integer(n.numer());
    }

    match (to_small(n.numer()), to_small(n.denom())) {
        (Some(num), Some(denom)) => Ok(SmallVec::from_slice(&[construct_small_rational(num, denom)?])),
        _ => construct_large_rational(n),
    }
}

/// Constructs a function with one or two arguments.
///
/// The remote data holds the evaluator, the symbol blob of the name and the roots of the
/// arguments, followed by the characters of a long name and the remote data of the arguments.
pub fn construct_function(name: &str, eval: EvalId, args: &[&[Blob]]) -> Result<Buffer, Error> {
    debug_assert!(matches!(args.len(), 1 | 2));
    check_name(name)?;

    let mut out = Buffer::with_capacity(3 + args.len());
    out.push(Blob::located(Kind::Function, 1, args.len() as u16));
    out.push(Blob::evaluator(eval));
    append_symbol(name, Domain::Complex, 2, &mut out)?;

    // reserve the argument roots right after the name root; the remote data of a long name is
    // already appended, so it must be moved behind the roots
    let name_data = out.drain(3..).collect::<Buffer>();
    out.resize(3 + args.len(), Blob::default());
    if !name_data.is_empty() {
        let offset = checked_offset(out.len() - 2)?;
        out[2].set_offset(offset);
        out.extend(name_data);
    }

    for (i, arg) in args.iter().enumerate() {
        append_duplicate_sequence(arg, 3 + i, &mut out)?;
    }

    let extent = out.len() - 1;
    out[0].set_wide_extent(extent)?;
    Ok(out)
}

/// Constructs the header of a composite (sum, product, power or complex number) with the given
/// number of operands and extent.
pub fn construct_composite_header(kind: Kind, n_operands: usize, extent: usize) -> Result<Blob, Error> {
    debug_assert!(matches!(kind, Kind::Sum | Kind::Product | Kind::Power | Kind::ComplexNumber));

    if n_operands > MAX_OPERANDS {
        return Err(OperandCountOverflow { count: n_operands, max: MAX_OPERANDS }.into());
    }

    let mut header = Blob::located(kind, 1, n_operands as u16);
    header.set_wide_extent(extent)?;
    Ok(header)
}

/// Assembles a composite from its operands, without any simplification. Each operand is the
/// sequence of a complete expression, starting at its root.
pub fn construct_composite(kind: Kind, operands: &[&[Blob]]) -> Result<Buffer, Error> {
    if operands.len() > MAX_OPERANDS {
        return Err(OperandCountOverflow { count: operands.len(), max: MAX_OPERANDS }.into());
    }

    let mut out = Buffer::with_capacity(1 + operands.len());
    out.resize(1 + operands.len(), Blob::default());
    for (i, operand) in operands.iter().enumerate() {
        append_duplicate_sequence(operand, 1 + i, &mut out)?;
    }

    out[0] = construct_composite_header(kind, operands.len(), out.len() - 1)?;
    Ok(out)
}

/// Copies the expression starting at `from[0]` into `out`, placing its root at `out[at]` and
/// appending its remote data to the end of `out`. Only the offset of the root is rewritten.
///
/// `out` is grown if it has fewer than `at + 1` blobs.
pub fn append_duplicate_sequence(from: &[Blob], at: usize, out: &mut Buffer) -> Result<(), Error> {
    if out.len() < at + 1 {
        out.resize(at + 1, Blob::default());
    }

    let root = from[0];
    if root.kind().is_self_contained() {
        out[at] = root;
        return Ok(());
    }

    let mut duplicate = root;
    duplicate.set_offset(checked_offset(out.len() - at)?);
    out[at] = duplicate;
    out.extend_from_slice(remote(from));
    Ok(())
}

/// Copies the expression starting at `from[0]` into a new buffer. The root lands at index zero,
/// so its offset is always one and the copy cannot fail.
pub fn construct_duplicate_sequence(from: &[Blob]) -> Buffer {
    let root = from[0];
    let mut out = Buffer::with_capacity(1 + remote_extent(from));
    if root.kind().is_self_contained() {
        out.push(root);
    } else {
        let mut duplicate = root;
        duplicate.set_offset(1);
        out.push(duplicate);
        out.extend_from_slice(remote(from));
    }
    out
}

/// Returns the distance from the header to its remote data, or zero for self-contained nodes.
pub fn offset_to_remote(header: Blob) -> usize {
    if header.kind().is_self_contained() {
        0
    } else {
        header.offset() as usize
    }
}

/// Returns the number of remote blobs used by the node starting at `e[0]` and all of its
/// descendants.
pub fn remote_extent(e: &[Blob]) -> usize {
    let header = e[0];
    match header.kind() {
        Kind::ShortSymbol | Kind::SmallInt | Kind::SmallRational => 0,
        Kind::FloatingPoint => 1,
        Kind::LongSymbol | Kind::LargeInt => header.len() as usize,
        kind => {
            debug_assert!(kind.has_wide_extent());
            header.wide_extent()
        },
    }
}

/// Returns the remote region of the node starting at `e[0]`.
pub fn remote(e: &[Blob]) -> &[Blob] {
    let offset = offset_to_remote(e[0]);
    &e[offset..offset + remote_extent(e)]
}

/// Returns the number of logical operands of the node. Only sums, products, powers and functions
/// have operands.
pub fn n_operands(header: Blob) -> usize {
    match header.kind() {
        Kind::Power => 2,
        Kind::Sum | Kind::Product | Kind::Function => header.len() as usize,
        _ => 0,
    }
}

/// Deep value comparison of the expressions starting at `lhs[0]` and `rhs[0]`.
///
/// Self-contained nodes compare by their bytes. Other nodes compare by kind, extent and operand
/// count, followed by the bytes of their remote regions.
pub fn equal(lhs: &[Blob], rhs: &[Blob]) -> bool {
    let (lhs_header, rhs_header) = (lhs[0], rhs[0]);
    let kind = lhs_header.kind();
    if kind != rhs_header.kind() {
        return false;
    }

    if kind.is_self_contained() {
        return lhs_header == rhs_header;
    }

    // the sign of a large integer and the domain of a long symbol live in the header
    if matches!(kind, Kind::LargeInt | Kind::LongSymbol) && lhs_header.pre0() != rhs_header.pre0() {
        return false;
    }

    remote_extent(lhs) == remote_extent(rhs)
        && n_operands(lhs_header) == n_operands(rhs_header)
        && remote(lhs) == remote(rhs)
}

/// Returns the value of a small integer.
pub fn small_int(header: Blob) -> i16 {
    debug_assert_eq!(header.kind(), Kind::SmallInt);
    i16::from_le_bytes([header.0[4], header.0[5]])
}

/// Returns the numerator and denominator of a small rational (or small integer, whose
/// denominator is one).
pub fn small_rational(header: Blob) -> (i16, i16) {
    debug_assert!(header.kind().is_small());
    (
        i16::from_le_bytes([header.0[4], header.0[5]]),
        i16::from_le_bytes([header.0[6], header.0[7]]),
    )
}

/// Returns the value of a floating-point number or of a constant.
pub fn floating_point(e: &[Blob]) -> f64 {
    debug_assert!(matches!(e[0].kind(), Kind::FloatingPoint | Kind::Constant));
    e[offset_to_remote(e[0])].as_double()
}

/// Reconstructs a large integer from its limbs and sign.
pub fn large_int(e: &[Blob]) -> Integer {
    debug_assert_eq!(e[0].kind(), Kind::LargeInt);
    let limbs = remote(e).iter().map(|blob| blob.as_limb()).collect::<Vec<_>>();
    let magnitude = Integer::from_digits(&limbs, Order::Lsf);
    if e[0].pre0() != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Returns the name of a symbol. Short names alias the header; long names are collected from the
/// remote blobs.
pub fn symbol_name(e: &[Blob]) -> Cow<'_, str> {
    let header = &e[0];
    debug_assert!(header.kind().is_symbol());

    if header.kind() == Kind::ShortSymbol {
        let name = &header.0[2..];
        let len = name.iter().position(|&b| b == 0).unwrap_or(SHORT_NAME_LEN);
        String::from_utf8_lossy(&name[..len])
    } else {
        let bytes = remote(e).iter()
            .flat_map(|blob| blob.0)
            .take_while(|&b| b != 0)
            .collect::<Vec<_>>();
        Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Returns the domain of a symbol.
pub fn domain(header: Blob) -> Domain {
    debug_assert!(header.kind().is_symbol());
    Domain::from_byte(header.pre0())
}

/// Returns the name of a constant.
pub fn constant_name(e: &[Blob]) -> Cow<'_, str> {
    debug_assert_eq!(e[0].kind(), Kind::Constant);
    symbol_name(&e[offset_to_remote(e[0]) + 1..])
}

/// Returns the name of a function.
pub fn function_name(e: &[Blob]) -> Cow<'_, str> {
    debug_assert_eq!(e[0].kind(), Kind::Function);
    symbol_name(&e[offset_to_remote(e[0]) + 1..])
}

/// Returns the evaluator id of a function.
pub fn function_evaluator(e: &[Blob]) -> EvalId {
    debug_assert_eq!(e[0].kind(), Kind::Function);
    e[offset_to_remote(e[0])].as_evaluator()
}

/// Returns the real part of a complex number.
pub fn real_of_complex(e: &[Blob]) -> &[Blob] {
    debug_assert_eq!(e[0].kind(), Kind::ComplexNumber);
    &e[offset_to_remote(e[0])..]
}

/// Returns the imaginary part of a complex number.
pub fn imag_of_complex(e: &[Blob]) -> &[Blob] {
    &real_of_complex(e)[1..]
}

/// Returns the numerator of a large rational.
pub fn numerator_of_large_rational(e: &[Blob]) -> &[Blob] {
    debug_assert_eq!(e[0].kind(), Kind::LargeRational);
    &e[offset_to_remote(e[0])..]
}

/// Returns the denominator of a large rational.
pub fn denominator_of_large_rational(e: &[Blob]) -> &[Blob] {
    &numerator_of_large_rational(e)[1..]
}

/// Returns the index of the root of the first logical operand. Functions store their evaluator
/// and name before the arguments, which are skipped.
pub fn first_operand(header: Blob) -> usize {
    let skip = if header.kind() == Kind::Function { 2 } else { 0 };
    offset_to_remote(header) + skip
}

/// Returns the index one past the root of the last logical operand.
pub fn past_the_end_operand(header: Blob) -> usize {
    first_operand(header) + n_operands(header)
}
