//! [`IntegerBackend`] for `num_bigint::BigInt`.

use super::IntegerBackend;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

impl IntegerBackend for BigInt {
    #[inline]
    fn zero() -> Self {
        <BigInt as Zero>::zero()
    }

    #[inline]
    fn one() -> Self {
        BigInt::from(1u8)
    }

    #[inline]
    fn from_i64(n: i64) -> Self {
        BigInt::from(n)
    }

    #[inline]
    fn from_u64(n: u64) -> Self {
        BigInt::from(n)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        <BigInt as Zero>::is_zero(self)
    }

    #[inline]
    fn signum(&self) -> i32 {
        match self.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    #[inline]
    fn negated(&self) -> Self {
        -self
    }

    #[inline]
    fn add_int(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn sub_int(&self, other: &Self) -> Self {
        self - other
    }

    #[inline]
    fn mul_int(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn div_trunc(&self, other: &Self) -> Self {
        self / other
    }

    #[inline]
    fn rem_trunc(&self, other: &Self) -> Self {
        self % other
    }

    #[inline]
    fn shl_bits(&self, shift: u32) -> Self {
        self << shift
    }

    #[inline]
    fn shr_bits(&self, shift: u32) -> Self {
        // `>>` on a negative BigInt rounds toward negative infinity.
        BigInt::from_biguint(self.sign(), self.magnitude() >> shift)
    }

    #[inline]
    fn bit_len(&self) -> u64 {
        self.bits()
    }

    #[inline]
    fn magnitude_u64(&self) -> Option<u64> {
        u64::try_from(self.magnitude()).ok()
    }

    fn magnitude_le_bytes(&self) -> Vec<u8> {
        if IntegerBackend::is_zero(self) {
            return Vec::new();
        }
        self.magnitude().to_bytes_le()
    }

    fn from_sign_magnitude(negative: bool, bytes: &[u8]) -> Option<Self> {
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Some(BigInt::from_biguint(sign, BigUint::from_bytes_le(bytes)))
    }

    fn to_digits(&self, radix: u32) -> String {
        self.magnitude().to_str_radix(radix)
    }

    fn from_digits(negative: bool, digits: &str, radix: u32) -> Option<Self> {
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Some(BigInt::from_biguint(sign, magnitude))
    }
}
