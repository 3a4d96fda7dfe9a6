//! Integer backend contract for generic rational arithmetic.
//!
//! [`Ratio<T>`](crate::Ratio) never touches the representation of its
//! numerator and denominator directly. Everything it needs from an integer
//! type goes through [`IntegerBackend`], so the same fraction logic runs over
//! a heap-allocated big integer, a native machine integer or a fixed-width
//! crypto-bigint magnitude with a separate sign.
//!
//! # Implemented Types
//!
//! - [`num_bigint::BigInt`]: arbitrary precision, never overflows.
//! - `i64`, `i128`: native fixed width; overflow panics.
//! - [`SignMagnitude<LIMBS>`]: a `crypto_bigint::Uint<LIMBS>` magnitude plus a
//!   sign flag; overflow panics.
//!
//! # Example
//!
//! ```
//! use bigratio::{FormatFlags, IntegerBackend};
//! use num_bigint::BigInt;
//!
//! let x = BigInt::parse_literal("-0x1f").unwrap();
//! assert_eq!(x, BigInt::from(-31));
//! assert_eq!(x.format(0, FormatFlags::DECIMAL), "-31");
//! assert_eq!(x.format(4, FormatFlags::HEX.with_show_base()), "-0x001f");
//! ```

mod bigint;
mod primitive;
mod sign_magnitude;

pub use self::sign_magnitude::{SignMagnitude, I1024, I128, I2048, I256, I512, I64};

use core::fmt::Debug;
use core::hash::Hash;

/// Arbitrary-precision (or fixed-width) signed integer usable as the
/// component type of a [`Ratio`](crate::Ratio).
///
/// Division is truncating: `div_trunc` rounds toward zero and `rem_trunc`
/// takes the sign of the dividend. Shifts and [`bit_len`] act on the
/// magnitude.
///
/// Fixed-width implementations panic when a result does not fit, the same
/// way the machine integers they model do.
///
/// [`bit_len`]: IntegerBackend::bit_len
pub trait IntegerBackend: Clone + Debug + PartialEq + Eq + PartialOrd + Ord + Hash + 'static {
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Create from a signed 64-bit value.
    fn from_i64(n: i64) -> Self;

    /// Create from an unsigned 64-bit value.
    fn from_u64(n: u64) -> Self;

    /// Returns `true` if this value is zero.
    fn is_zero(&self) -> bool;

    /// Returns `-1`, `0` or `1` according to the sign of the value.
    fn signum(&self) -> i32;

    /// Additive inverse.
    fn negated(&self) -> Self;

    fn add_int(&self, other: &Self) -> Self;

    fn sub_int(&self, other: &Self) -> Self;

    fn mul_int(&self, other: &Self) -> Self;

    /// Quotient rounded toward zero, panicking on division by zero.
    fn div_trunc(&self, other: &Self) -> Self;

    /// Remainder with the sign of `self`, panicking on division by zero.
    fn rem_trunc(&self, other: &Self) -> Self;

    /// Multiply by `2^shift`.
    fn shl_bits(&self, shift: u32) -> Self;

    /// Divide the magnitude by `2^shift`, keeping the sign.
    fn shr_bits(&self, shift: u32) -> Self;

    /// Number of significant bits in the magnitude (zero for zero).
    fn bit_len(&self) -> u64;

    /// The magnitude as a `u64`, or `None` if it does not fit.
    fn magnitude_u64(&self) -> Option<u64>;

    /// The magnitude as little-endian bytes without trailing zero bytes.
    fn magnitude_le_bytes(&self) -> Vec<u8>;

    /// Rebuild a value from a sign and little-endian magnitude bytes.
    ///
    /// Returns `None` if the magnitude does not fit this backend.
    fn from_sign_magnitude(negative: bool, bytes: &[u8]) -> Option<Self>;

    /// Digits of the magnitude in `radix` (8, 10 or 16), lowercase, without
    /// sign or prefix.
    fn to_digits(&self, radix: u32) -> String;

    /// Parse a digit string (no sign, no prefix) in `radix`.
    ///
    /// Returns `None` if a digit is invalid or the value does not fit.
    fn from_digits(negative: bool, digits: &str, radix: u32) -> Option<Self>;

    /// Absolute value.
    #[inline]
    fn abs_int(&self) -> Self {
        if self.signum() < 0 {
            self.negated()
        } else {
            self.clone()
        }
    }

    /// Greatest common divisor of the magnitudes; `gcd(0, 0) == 0`.
    #[inline]
    fn gcd(&self, other: &Self) -> Self {
        gcd_generic(self, other)
    }

    /// Parse an integer literal: optional `+`/`-`, then at least one digit.
    /// A `0x`/`0X` prefix selects hexadecimal and a leading `0` followed by
    /// more digits selects octal.
    fn parse_literal(text: &str) -> Option<Self> {
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            Some(hex) => (16, hex),
            None if rest.len() > 1 && rest.starts_with('0') => (8, &rest[1..]),
            None => (10, rest),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        Self::from_digits(negative, digits, radix)
    }

    /// Format with at least `digits` digits (zero padded) using `flags`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::{FormatFlags, IntegerBackend};
    ///
    /// assert_eq!(255i64.format(0, FormatFlags::HEX.with_uppercase().with_show_base()), "0XFF");
    /// assert_eq!(7i64.format(3, FormatFlags::DECIMAL.with_show_pos()), "+007");
    /// ```
    fn format(&self, digits: usize, flags: FormatFlags) -> String {
        let mut body = self.to_digits(flags.radix.value());
        if flags.uppercase {
            body.make_ascii_uppercase();
        }

        let mut out = String::with_capacity(body.len().max(digits) + 3);
        if self.signum() < 0 {
            out.push('-');
        } else if flags.show_pos {
            out.push('+');
        }
        if flags.show_base {
            match flags.radix {
                Radix::Hex if flags.uppercase => out.push_str("0X"),
                Radix::Hex => out.push_str("0x"),
                Radix::Octal if !body.starts_with('0') => out.push('0'),
                _ => {}
            }
        }
        for _ in body.len()..digits {
            out.push('0');
        }
        out.push_str(&body);
        out
    }
}

/// Output base for [`IntegerBackend::format`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Radix {
    Octal,
    #[default]
    Decimal,
    Hex,
}

impl Radix {
    /// The numeric base.
    #[inline]
    pub const fn value(self) -> u32 {
        match self {
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }
}

/// Formatting options forwarded to the backend formatter of each component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FormatFlags {
    pub radix: Radix,
    /// Prefix hexadecimal with `0x` and octal with `0`.
    pub show_base: bool,
    /// Prefix non-negative values with `+`.
    pub show_pos: bool,
    /// Uppercase hexadecimal digits and prefix.
    pub uppercase: bool,
}

impl FormatFlags {
    pub const DECIMAL: Self = Self::with_radix(Radix::Decimal);
    pub const HEX: Self = Self::with_radix(Radix::Hex);
    pub const OCTAL: Self = Self::with_radix(Radix::Octal);

    const fn with_radix(radix: Radix) -> Self {
        Self {
            radix,
            show_base: false,
            show_pos: false,
            uppercase: false,
        }
    }

    #[must_use]
    pub const fn with_show_base(mut self) -> Self {
        self.show_base = true;
        self
    }

    #[must_use]
    pub const fn with_show_pos(mut self) -> Self {
        self.show_pos = true;
        self
    }

    #[must_use]
    pub const fn with_uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }
}

/// Compute the GCD of the magnitudes of `a` and `b`.
///
/// Euclidean reduction on the backend values until both operands fit in a
/// `u64`, then finishes with native arithmetic.
///
/// # Examples
///
/// ```
/// use bigratio::backend::gcd_generic;
/// use num_bigint::BigInt;
///
/// let g = gcd_generic(&BigInt::from(-48), &BigInt::from(18));
/// assert_eq!(g, BigInt::from(6));
/// ```
pub fn gcd_generic<T: IntegerBackend>(a: &T, b: &T) -> T {
    if let (Some(x), Some(y)) = (a.magnitude_u64(), b.magnitude_u64()) {
        return T::from_u64(gcd_u64(x, y));
    }

    // One remainder step on the signed values first, so that taking
    // magnitudes cannot overflow a fixed-width backend.
    let (large, small) = if a.bit_len() >= b.bit_len() { (a, b) } else { (b, a) };
    if small.is_zero() {
        return large.abs_int();
    }
    if small.bit_len() == 1 {
        return T::one();
    }
    let mut a = small.abs_int();
    let mut b = large.rem_trunc(small).abs_int();

    loop {
        if b.is_zero() {
            return a;
        }
        if let (Some(x), Some(y)) = (a.magnitude_u64(), b.magnitude_u64()) {
            return T::from_u64(gcd_u64(x, y));
        }
        let rem = a.rem_trunc(&b);
        a = b;
        b = rem;
    }
}

/// Fast u64 GCD using the Euclidean algorithm.
#[inline]
pub(crate) fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_gcd_bigint() {
        let a = BigInt::from(48);
        let b = BigInt::from(18);
        assert_eq!(IntegerBackend::gcd(&a, &b), BigInt::from(6));
    }

    #[test]
    fn test_gcd_signs_and_zero() {
        assert_eq!(gcd_generic(&-100i64, &35i64), 5);
        assert_eq!(gcd_generic(&0i64, &-7i64), 7);
        assert_eq!(gcd_generic(&-7i128, &0i128), 7);
        assert_eq!(gcd_generic(&0i64, &0i64), 0);
    }

    #[test]
    fn test_gcd_beyond_u64() {
        let big = BigInt::from(u64::MAX) * BigInt::from(1_000_003u64);
        let other = BigInt::from(u64::MAX) * BigInt::from(999_983u64);
        assert_eq!(gcd_generic(&big, &other), BigInt::from(u64::MAX));
    }

    #[test]
    fn test_gcd_most_negative() {
        assert_eq!(gcd_generic(&i64::MIN, &1i64), 1);
        assert_eq!(gcd_generic(&i128::MIN, &6i128), 2);
        assert_eq!(gcd_generic(&-3i128, &i128::MIN), 1);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(i64::parse_literal("42"), Some(42));
        assert_eq!(i64::parse_literal("+42"), Some(42));
        assert_eq!(i64::parse_literal("-0x10"), Some(-16));
        assert_eq!(i64::parse_literal("0XfF"), Some(255));
        assert_eq!(i64::parse_literal(""), None);
        assert_eq!(i64::parse_literal("-"), None);
        assert_eq!(i64::parse_literal("0x"), None);
        assert_eq!(i64::parse_literal("12x"), None);
        assert_eq!(i64::parse_literal("--1"), None);
        assert_eq!(i64::parse_literal("ff"), None);
        assert_eq!(i64::parse_literal("017"), Some(15));
        assert_eq!(i64::parse_literal("-010"), Some(-8));
        assert_eq!(i64::parse_literal("0"), Some(0));
        assert_eq!(i64::parse_literal("08"), None);
    }

    #[test]
    fn test_format_flags() {
        assert_eq!((-5i64).format(0, FormatFlags::DECIMAL), "-5");
        assert_eq!(0i64.format(0, FormatFlags::DECIMAL.with_show_pos()), "+0");
        assert_eq!(8i64.format(0, FormatFlags::OCTAL.with_show_base()), "010");
        assert_eq!(0i64.format(0, FormatFlags::OCTAL.with_show_base()), "0");
        assert_eq!(
            (-171i64).format(4, FormatFlags::HEX.with_show_base()),
            "-0x00ab"
        );
        assert_eq!(171i64.format(0, FormatFlags::HEX.with_uppercase()), "AB");
    }
}
