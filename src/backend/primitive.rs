//! [`IntegerBackend`] for native signed machine integers.
//!
//! These are fixed-width backends: any result that does not fit panics,
//! in release builds as well as debug builds.

use super::IntegerBackend;

#[cold]
#[inline(never)]
fn overflow(op: &str) -> ! {
    panic!("attempt to {op} with overflow")
}

macro_rules! impl_primitive_backend {
    ($int:ty, $uint:ty) => {
        impl IntegerBackend for $int {
            #[inline(always)]
            fn zero() -> Self {
                0
            }

            #[inline(always)]
            fn one() -> Self {
                1
            }

            #[inline]
            fn from_i64(n: i64) -> Self {
                <$int>::try_from(n).unwrap_or_else(|_| overflow("convert"))
            }

            #[inline]
            fn from_u64(n: u64) -> Self {
                <$int>::try_from(n).unwrap_or_else(|_| overflow("convert"))
            }

            #[inline(always)]
            fn is_zero(&self) -> bool {
                *self == 0
            }

            #[inline(always)]
            fn signum(&self) -> i32 {
                <$int>::signum(*self) as i32
            }

            #[inline]
            fn negated(&self) -> Self {
                self.checked_neg().unwrap_or_else(|| overflow("negate"))
            }

            #[inline]
            fn add_int(&self, other: &Self) -> Self {
                self.checked_add(*other).unwrap_or_else(|| overflow("add"))
            }

            #[inline]
            fn sub_int(&self, other: &Self) -> Self {
                self.checked_sub(*other).unwrap_or_else(|| overflow("subtract"))
            }

            #[inline]
            fn mul_int(&self, other: &Self) -> Self {
                self.checked_mul(*other).unwrap_or_else(|| overflow("multiply"))
            }

            #[inline]
            fn div_trunc(&self, other: &Self) -> Self {
                *self / *other
            }

            #[inline]
            fn rem_trunc(&self, other: &Self) -> Self {
                *self % *other
            }

            fn shl_bits(&self, shift: u32) -> Self {
                let mag = self.unsigned_abs();
                if mag == 0 {
                    return 0;
                }
                if mag.leading_zeros() < shift {
                    overflow("shift left");
                }
                from_magnitude(*self < 0, mag << shift).unwrap_or_else(|| overflow("shift left"))
            }

            fn shr_bits(&self, shift: u32) -> Self {
                let mag = self.unsigned_abs().checked_shr(shift).unwrap_or(0);
                // A magnitude only shrinks, so it always fits again.
                from_magnitude(*self < 0, mag).unwrap_or(0)
            }

            #[inline]
            fn bit_len(&self) -> u64 {
                u64::from(<$uint>::BITS - self.unsigned_abs().leading_zeros())
            }

            #[inline]
            fn magnitude_u64(&self) -> Option<u64> {
                u64::try_from(self.unsigned_abs()).ok()
            }

            fn magnitude_le_bytes(&self) -> Vec<u8> {
                let mut bytes = self.unsigned_abs().to_le_bytes().to_vec();
                while bytes.last() == Some(&0) {
                    bytes.pop();
                }
                bytes
            }

            fn from_sign_magnitude(negative: bool, bytes: &[u8]) -> Option<Self> {
                let mut le = [0u8; core::mem::size_of::<$uint>()];
                for (i, &b) in bytes.iter().enumerate() {
                    match le.get_mut(i) {
                        Some(slot) => *slot = b,
                        None if b == 0 => {}
                        None => return None,
                    }
                }
                from_magnitude(negative, <$uint>::from_le_bytes(le))
            }

            fn to_digits(&self, radix: u32) -> String {
                let mag = self.unsigned_abs();
                match radix {
                    8 => format!("{mag:o}"),
                    16 => format!("{mag:x}"),
                    _ => mag.to_string(),
                }
            }

            fn from_digits(negative: bool, digits: &str, radix: u32) -> Option<Self> {
                if digits.starts_with('+') {
                    return None;
                }
                let mag = <$uint>::from_str_radix(digits, radix).ok()?;
                from_magnitude(negative, mag)
            }
        }

        impl FromMagnitude for $int {
            type Magnitude = $uint;

            fn from_magnitude(negative: bool, mag: $uint) -> Option<Self> {
                if negative {
                    if mag > <$int>::MAX.unsigned_abs() + 1 {
                        return None;
                    }
                    Some((0 as $int).wrapping_sub(mag as $int))
                } else {
                    <$int>::try_from(mag).ok()
                }
            }
        }
    };
}

trait FromMagnitude: Sized {
    type Magnitude;

    fn from_magnitude(negative: bool, mag: Self::Magnitude) -> Option<Self>;
}

#[inline]
fn from_magnitude<T: FromMagnitude>(negative: bool, mag: T::Magnitude) -> Option<T> {
    T::from_magnitude(negative, mag)
}

impl_primitive_backend!(i64, u64);
impl_primitive_backend!(i128, u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        assert_eq!(i64::from_sign_magnitude(true, &(1u64 << 63).to_le_bytes()), Some(i64::MIN));
        assert_eq!(i64::from_sign_magnitude(false, &(1u64 << 63).to_le_bytes()), None);
        assert_eq!(i64::MIN.magnitude_u64(), Some(1u64 << 63));
        assert_eq!(i64::MIN.bit_len(), 64);
        assert_eq!((-1i64).shl_bits(63), i64::MIN);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn test_shl_overflow_panics() {
        let _ = 3i64.shl_bits(62);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn test_mul_overflow_panics() {
        let _ = i128::MAX.mul_int(&2);
    }

    #[test]
    fn test_shr_truncates_toward_zero() {
        assert_eq!((-13i128).shr_bits(2), -3);
        assert_eq!((-13i128).shr_bits(200), 0);
    }

    #[test]
    fn test_digits() {
        assert_eq!((-255i128).to_digits(16), "ff");
        assert_eq!(0i64.to_digits(8), "0");
        assert_eq!(i64::MIN.to_digits(8), "1000000000000000000000");
        assert_eq!(i128::MIN.to_digits(10), "170141183460469231731687303715884105728");
        assert_eq!(i64::from_digits(true, "9223372036854775808", 10), Some(i64::MIN));
        assert_eq!(i64::from_digits(false, "9223372036854775808", 10), None);
        assert_eq!(i128::from_digits(false, "zz", 16), None);
    }

    #[test]
    fn test_bytes_trim_trailing_zeros() {
        assert_eq!(0x0102i64.magnitude_le_bytes(), vec![0x02, 0x01]);
        assert!(0i128.magnitude_le_bytes().is_empty());
        assert_eq!(i64::from_sign_magnitude(false, &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]), Some(1));
    }
}
