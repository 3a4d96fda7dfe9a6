//! Conversions between [`Ratio`] and other numeric representations.
//!
//! Conversion out of a ratio is selected by the target's
//! [`NumberCategory`], fixed at compile time through [`FromRatio`]:
//!
//! - **Integer** targets take the quotient truncated toward zero.
//! - **Floating-point** targets are rounded to nearest, ties to even.
//! - **Rational** targets convert numerator and denominator separately and
//!   divide in the target type.
//!
//! Conversion into a ratio from a float is exact: every finite binary float
//! is a dyadic rational.

use crate::backend::IntegerBackend;
use crate::error::{RatioError, Result};
use crate::ratio::Ratio;
use num_bigint::{BigInt, Sign};
use num_rational::BigRational;

/// Classification of conversion targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberCategory {
    Integer,
    FloatingPoint,
    Rational,
}

/// Types a [`Ratio<T>`] can be converted into with [`Ratio::convert_to`].
pub trait FromRatio<T: IntegerBackend>: Sized {
    /// The category that selected this conversion.
    const CATEGORY: NumberCategory;

    fn from_ratio(value: &Ratio<T>) -> Self;
}

/// Binary floating-point formats supported for exact construction and
/// correctly rounded conversion.
pub trait Float: Copy {
    /// Significand precision, including the implicit bit.
    const MANTISSA_DIGITS: u32;
    /// One more than the exponent of the smallest normal value.
    const MIN_EXP: i32;
    /// One more than the exponent of the largest finite value.
    const MAX_EXP: i32;

    /// Split a finite value into `(negative, mantissa, exp)` with
    /// `value == ±mantissa * 2^exp`. Returns `None` for NaN and infinities.
    fn decompose(self) -> Option<(bool, u64, i32)>;

    /// `±mantissa * 2^exp`, which must be representable (or overflow to
    /// infinity).
    fn compose(negative: bool, mantissa: u64, exp: i32) -> Self;

    fn infinity(negative: bool) -> Self;

    fn is_nan(self) -> bool;

    fn is_sign_negative(self) -> bool;
}

/// `2^k` for `k` in the normal exponent range of `f64`.
#[inline]
fn pow2_f64(k: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&k));
    f64::from_bits(((k + 1023) as u64) << 52)
}

impl Float for f64 {
    const MANTISSA_DIGITS: u32 = f64::MANTISSA_DIGITS;
    const MIN_EXP: i32 = f64::MIN_EXP;
    const MAX_EXP: i32 = f64::MAX_EXP;

    fn decompose(self) -> Option<(bool, u64, i32)> {
        let bits = self.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        match biased {
            0x7ff => None,
            0 => Some((negative, fraction, -1074)),
            _ => Some((negative, fraction | (1u64 << 52), biased - 1075)),
        }
    }

    fn compose(negative: bool, mantissa: u64, exp: i32) -> Self {
        // Two steps so that neither power of two leaves the normal range;
        // the final product is exact by construction.
        let half = exp / 2;
        let v = (mantissa as f64) * pow2_f64(half) * pow2_f64(exp - half);
        if negative {
            -v
        } else {
            v
        }
    }

    #[inline]
    fn infinity(negative: bool) -> Self {
        if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn is_sign_negative(self) -> bool {
        f64::is_sign_negative(self)
    }
}

impl Float for f32 {
    const MANTISSA_DIGITS: u32 = f32::MANTISSA_DIGITS;
    const MIN_EXP: i32 = f32::MIN_EXP;
    const MAX_EXP: i32 = f32::MAX_EXP;

    fn decompose(self) -> Option<(bool, u64, i32)> {
        let bits = self.to_bits();
        let negative = bits >> 31 == 1;
        let biased = ((bits >> 23) & 0xff) as i32;
        let fraction = u64::from(bits & ((1u32 << 23) - 1));
        match biased {
            0xff => None,
            0 => Some((negative, fraction, -149)),
            _ => Some((negative, fraction | (1u64 << 23), biased - 150)),
        }
    }

    fn compose(negative: bool, mantissa: u64, exp: i32) -> Self {
        // Exact in f64; the cast only rounds when the value overflows f32.
        let v = ((mantissa as f64) * pow2_f64(exp)) as f32;
        if negative {
            -v
        } else {
            v
        }
    }

    #[inline]
    fn infinity(negative: bool) -> Self {
        if negative {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        }
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn is_sign_negative(self) -> bool {
        f32::is_sign_negative(self)
    }
}

impl<T: IntegerBackend> Ratio<T> {
    // ========================================================================
    // FLOAT CONVERSION
    // ========================================================================

    /// Convert a float to the exactly equal ratio.
    ///
    /// Returns [`RatioError::NonFinite`] if the input is infinite or NaN,
    /// and [`RatioError::Overflow`] if a component does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let r = Ratio::<i64>::from_float(0.75).unwrap();
    /// assert_eq!((*r.numer(), *r.denom()), (3, 4));
    ///
    /// let tenth = Ratio::<i64>::from_float(0.1f64).unwrap();
    /// assert_eq!(*tenth.denom(), 1 << 55);
    /// ```
    pub fn from_float<F: Float>(value: F) -> Result<Self> {
        let (negative, mut mantissa, mut exp) = match value.decompose() {
            Some(parts) => parts,
            None if value.is_nan() => return Err(RatioError::NonFinite { kind: "NaN" }),
            None => return Err(RatioError::NonFinite { kind: "infinity" }),
        };
        if mantissa == 0 {
            return Ok(Self::zero());
        }

        // An odd mantissa over a power of two is already in lowest terms.
        let tz = mantissa.trailing_zeros();
        mantissa >>= tz;
        exp += tz as i32;

        let mut numer = BigInt::from(mantissa);
        if negative {
            numer = -numer;
        }
        let (numer, denom) = if exp >= 0 {
            (numer << exp as usize, BigInt::from(1u8))
        } else {
            (numer, BigInt::from(1u8) << exp.unsigned_abs() as usize)
        };
        let numer = convert_component::<BigInt, T>(&numer)?;
        let denom = convert_component::<BigInt, T>(&denom)?;
        Ok(Self::from_canonical(numer, denom))
    }

    /// Round to the nearest `f64` (ties to even).
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let r = Ratio::<i64>::from_parts(1, 3).unwrap();
    /// assert_eq!(r.to_f64(), 1.0 / 3.0);
    /// ```
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.convert_to()
    }

    /// Round to the nearest `f32` (ties to even).
    #[inline]
    pub fn to_f32(&self) -> f32 {
        self.convert_to()
    }

    // ========================================================================
    // GENERIC CONVERSION
    // ========================================================================

    /// Convert to any [`FromRatio`] target.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    /// use num_bigint::BigInt;
    ///
    /// let r = Ratio::<BigInt>::from_parts(BigInt::from(-7), BigInt::from(2)).unwrap();
    /// assert_eq!(r.convert_to::<i32>(), -3);
    /// assert_eq!(r.convert_to::<f64>(), -3.5);
    /// let narrow: Ratio<i64> = r.convert_to();
    /// assert_eq!((*narrow.numer(), *narrow.denom()), (-7, 2));
    /// ```
    #[inline]
    pub fn convert_to<R: FromRatio<T>>(&self) -> R {
        R::from_ratio(self)
    }

    /// The integer part, truncated toward zero.
    #[inline]
    pub fn trunc(&self) -> T {
        if self.is_integer() {
            return self.numer().clone();
        }
        self.numer().div_trunc(self.denom())
    }

    /// Convert both components to backend `U`, then divide.
    ///
    /// Fails with [`RatioError::Overflow`] if a component does not fit `U`.
    pub fn try_convert<U: IntegerBackend>(&self) -> Result<Ratio<U>> {
        let numer = convert_component::<T, U>(self.numer())?;
        let denom = convert_component::<T, U>(self.denom())?;
        Ratio::from_integer(numer).checked_div(&Ratio::from_integer(denom))
    }

    /// The same value over `BigInt` components.
    pub(crate) fn to_big(&self) -> Ratio<BigInt> {
        Ratio::from_canonical(to_bigint(self.numer()), to_bigint(self.denom()))
    }
}

impl<T: IntegerBackend> TryFrom<f64> for Ratio<T> {
    type Error = RatioError;

    #[inline]
    fn try_from(value: f64) -> Result<Self> {
        Self::from_float(value)
    }
}

impl<T: IntegerBackend> TryFrom<f32> for Ratio<T> {
    type Error = RatioError;

    #[inline]
    fn try_from(value: f32) -> Result<Self> {
        Self::from_float(value)
    }
}

// ============================================================================
// TARGET IMPLEMENTATIONS
// ============================================================================

impl<T: IntegerBackend> FromRatio<T> for f64 {
    const CATEGORY: NumberCategory = NumberCategory::FloatingPoint;

    fn from_ratio(value: &Ratio<T>) -> Self {
        ratio_to_float(&to_bigint(value.numer()), &to_bigint(value.denom()))
    }
}

impl<T: IntegerBackend> FromRatio<T> for f32 {
    const CATEGORY: NumberCategory = NumberCategory::FloatingPoint;

    fn from_ratio(value: &Ratio<T>) -> Self {
        ratio_to_float(&to_bigint(value.numer()), &to_bigint(value.denom()))
    }
}

macro_rules! impl_signed_target {
    ($($int:ty),*) => {
        $(
            impl<T: IntegerBackend> FromRatio<T> for $int {
                const CATEGORY: NumberCategory = NumberCategory::Integer;

                /// Truncates toward zero, saturating at the bounds of the type.
                fn from_ratio(value: &Ratio<T>) -> Self {
                    let q = value.trunc();
                    let mag = saturating_magnitude(&q);
                    if q.signum() < 0 {
                        if mag > <$int>::MIN.unsigned_abs() as u128 {
                            <$int>::MIN
                        } else {
                            (0 as $int).wrapping_sub(mag as $int)
                        }
                    } else if mag > <$int>::MAX as u128 {
                        <$int>::MAX
                    } else {
                        mag as $int
                    }
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_target {
    ($($uint:ty),*) => {
        $(
            impl<T: IntegerBackend> FromRatio<T> for $uint {
                const CATEGORY: NumberCategory = NumberCategory::Integer;

                /// Truncates toward zero, saturating at the bounds of the type.
                fn from_ratio(value: &Ratio<T>) -> Self {
                    let q = value.trunc();
                    if q.signum() < 0 {
                        return 0;
                    }
                    let mag = saturating_magnitude(&q);
                    if mag > <$uint>::MAX as u128 {
                        <$uint>::MAX
                    } else {
                        mag as $uint
                    }
                }
            }
        )*
    };
}

impl_signed_target!(i8, i16, i32, i64, i128, isize);
impl_unsigned_target!(u8, u16, u32, u64, u128, usize);

impl<T: IntegerBackend> FromRatio<T> for BigInt {
    const CATEGORY: NumberCategory = NumberCategory::Integer;

    fn from_ratio(value: &Ratio<T>) -> Self {
        to_bigint(&value.trunc())
    }
}

impl<T: IntegerBackend, U: IntegerBackend> FromRatio<T> for Ratio<U> {
    const CATEGORY: NumberCategory = NumberCategory::Rational;

    /// # Panics
    ///
    /// Panics if a component does not fit `U`; use
    /// [`Ratio::try_convert`] to handle that case.
    fn from_ratio(value: &Ratio<T>) -> Self {
        match value.try_convert() {
            Ok(r) => r,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: IntegerBackend> FromRatio<T> for BigRational {
    const CATEGORY: NumberCategory = NumberCategory::Rational;

    fn from_ratio(value: &Ratio<T>) -> Self {
        let numer = BigRational::from_integer(to_bigint(value.numer()));
        let denom = BigRational::from_integer(to_bigint(value.denom()));
        numer / denom
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn convert_component<T: IntegerBackend, U: IntegerBackend>(value: &T) -> Result<U> {
    U::from_sign_magnitude(value.signum() < 0, &value.magnitude_le_bytes()).ok_or(RatioError::Overflow)
}

pub(crate) fn to_bigint<T: IntegerBackend>(value: &T) -> BigInt {
    let sign = if value.signum() < 0 { Sign::Minus } else { Sign::Plus };
    BigInt::from_bytes_le(sign, &value.magnitude_le_bytes())
}

/// `|value|` as a `u128`, or `u128::MAX` if it is larger.
fn saturating_magnitude<T: IntegerBackend>(value: &T) -> u128 {
    let bytes = value.magnitude_le_bytes();
    if bytes.len() > 16 {
        return u128::MAX;
    }
    bytes.iter().rev().fold(0u128, |acc, &b| (acc << 8) | u128::from(b))
}

/// Round `numer / denom` (with `denom > 0`) to the nearest `F`, ties to even.
///
/// Produces a quotient with two guard bits beyond the target precision plus
/// a sticky bit from the remainder, then rounds once. Subnormal results keep
/// the fixed minimum exponent; values beyond the range become infinities.
fn ratio_to_float<F: Float>(numer: &BigInt, denom: &BigInt) -> F {
    if IntegerBackend::is_zero(numer) {
        return F::compose(false, 0, 0);
    }
    let negative = IntegerBackend::signum(numer) < 0;
    let a = numer.abs_int();
    let p = i64::from(F::MANTISSA_DIGITS);

    // 2^(e-1) < |value| < 2^(e+1)
    let e = a.bit_len() as i64 - denom.bit_len() as i64;
    if e - 1 >= i64::from(F::MAX_EXP) {
        return F::infinity(negative);
    }
    // Exponent of the smallest subnormal.
    let lsb_min = i64::from(F::MIN_EXP) - p;
    if e + 2 <= lsb_min {
        // Below half the smallest subnormal.
        return F::compose(negative, 0, 0);
    }

    // q = floor(|value| * 2^shift), with 2^(p+1) <= q < 2^(p+3)
    let shift = p + 2 - e;
    let (q, r) = if shift >= 0 {
        let scaled = a.shl_bits(shift as u32);
        (scaled.div_trunc(denom), scaled.rem_trunc(denom))
    } else {
        let scaled = denom.shl_bits((-shift) as u32);
        (a.div_trunc(&scaled), a.rem_trunc(&scaled))
    };
    let Some(q) = q.magnitude_u64() else {
        return F::infinity(negative);
    };
    let sticky = !IntegerBackend::is_zero(&r);

    let q_bits = i64::from(64 - q.leading_zeros());
    let top = q_bits - 1 - shift;
    let lsb = (top - (p - 1)).max(lsb_min);
    let drop = (lsb + shift) as u32;

    let mut mantissa = q >> drop;
    let half = (q >> (drop - 1)) & 1 == 1;
    let rest = sticky || q & ((1u64 << (drop - 1)) - 1) != 0;
    if half && (rest || mantissa & 1 == 1) {
        mantissa += 1;
    }
    F::compose(negative, mantissa, lsb as i32)
}
