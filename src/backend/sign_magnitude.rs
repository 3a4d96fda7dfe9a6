//! Signed fixed-width integers built from crypto-bigint unsigned magnitudes.
//!
//! crypto-bigint only offers unsigned `Uint<LIMBS>` values. A rational needs a
//! signed component, so [`SignMagnitude`] pairs a magnitude with a sign flag
//! and implements [`IntegerBackend`] on top of the wrapping/wide primitives.
//!
//! Results that do not fit in `LIMBS` limbs panic.

use super::{FormatFlags, IntegerBackend};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use crypto_bigint::{Uint, Word, U1024, U128, U2048, U256, U512, U64};

/// A signed integer stored as a sign flag and a `Uint<LIMBS>` magnitude.
///
/// # Invariants
///
/// - Zero is always stored with `negative = false`
///
/// # Examples
///
/// ```
/// use bigratio::{I256, IntegerBackend};
///
/// let a = I256::from_i64(-6);
/// let b = I256::from_i64(4);
/// assert_eq!(a.mul_int(&b), I256::from_i64(-24));
/// assert_eq!(a.add_int(&b).to_string(), "-2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignMagnitude<const LIMBS: usize> {
    negative: bool,
    magnitude: Uint<LIMBS>,
}

/// 64-bit signed backend.
pub type I64 = SignMagnitude<{ U64::LIMBS }>;

/// 128-bit signed backend.
pub type I128 = SignMagnitude<{ U128::LIMBS }>;

/// 256-bit signed backend.
pub type I256 = SignMagnitude<{ U256::LIMBS }>;

/// 512-bit signed backend.
pub type I512 = SignMagnitude<{ U512::LIMBS }>;

/// 1024-bit signed backend.
pub type I1024 = SignMagnitude<{ U1024::LIMBS }>;

/// 2048-bit signed backend.
pub type I2048 = SignMagnitude<{ U2048::LIMBS }>;

#[cold]
#[inline(never)]
fn overflow(op: &str, bits: usize) -> ! {
    panic!("attempt to {op} with overflow in {bits}-bit backend")
}

impl<const LIMBS: usize> SignMagnitude<LIMBS> {
    /// Create from a sign and magnitude, normalizing negative zero.
    #[inline]
    pub fn from_uint(negative: bool, magnitude: Uint<LIMBS>) -> Self {
        Self {
            negative: negative && magnitude != Uint::ZERO,
            magnitude,
        }
    }

    /// The unsigned magnitude.
    #[inline(always)]
    pub fn magnitude(&self) -> &Uint<LIMBS> {
        &self.magnitude
    }

    #[inline(always)]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    fn add_signed(&self, other_negative: bool, other: &Uint<LIMBS>) -> Self {
        if self.negative == other_negative {
            let sum = self.magnitude.wrapping_add(other);
            if sum < self.magnitude {
                overflow("add", Uint::<LIMBS>::BITS as usize);
            }
            return Self::from_uint(self.negative, sum);
        }

        if self.magnitude >= *other {
            Self::from_uint(self.negative, self.magnitude.wrapping_sub(other))
        } else {
            Self::from_uint(other_negative, other.wrapping_sub(&self.magnitude))
        }
    }
}

impl<const LIMBS: usize> IntegerBackend for SignMagnitude<LIMBS> {
    #[inline(always)]
    fn zero() -> Self {
        Self::from_uint(false, Uint::ZERO)
    }

    #[inline(always)]
    fn one() -> Self {
        Self::from_uint(false, Uint::ONE)
    }

    #[inline]
    fn from_i64(n: i64) -> Self {
        Self::from_uint(n < 0, Uint::from_u64(n.unsigned_abs()))
    }

    #[inline]
    fn from_u64(n: u64) -> Self {
        Self::from_uint(false, Uint::from_u64(n))
    }

    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.magnitude == Uint::ZERO
    }

    #[inline]
    fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    #[inline]
    fn negated(&self) -> Self {
        Self::from_uint(!self.negative, self.magnitude)
    }

    #[inline]
    fn add_int(&self, other: &Self) -> Self {
        self.add_signed(other.negative, &other.magnitude)
    }

    #[inline]
    fn sub_int(&self, other: &Self) -> Self {
        self.add_signed(!other.negative, &other.magnitude)
    }

    #[inline]
    fn mul_int(&self, other: &Self) -> Self {
        let (lo, hi) = self.magnitude.mul_wide(&other.magnitude);
        if hi != Uint::ZERO {
            overflow("multiply", Uint::<LIMBS>::BITS as usize);
        }
        Self::from_uint(self.negative ^ other.negative, lo)
    }

    #[inline]
    fn div_trunc(&self, other: &Self) -> Self {
        if other.is_zero() {
            panic!("attempt to divide by zero");
        }
        let q = self.magnitude.wrapping_div(&other.magnitude);
        Self::from_uint(self.negative ^ other.negative, q)
    }

    #[inline]
    fn rem_trunc(&self, other: &Self) -> Self {
        if other.is_zero() {
            panic!("attempt to calculate the remainder with a divisor of zero");
        }
        let r = self.magnitude.wrapping_rem(&other.magnitude);
        Self::from_uint(self.negative, r)
    }

    fn shl_bits(&self, shift: u32) -> Self {
        if self.is_zero() {
            return *self;
        }
        if self.bit_len() + u64::from(shift) > Uint::<LIMBS>::BITS as u64 {
            overflow("shift left", Uint::<LIMBS>::BITS as usize);
        }
        Self::from_uint(self.negative, self.magnitude.shl_vartime(shift as usize))
    }

    fn shr_bits(&self, shift: u32) -> Self {
        if u64::from(shift) >= Uint::<LIMBS>::BITS as u64 {
            return Self::zero();
        }
        Self::from_uint(self.negative, self.magnitude.shr_vartime(shift as usize))
    }

    #[inline]
    fn bit_len(&self) -> u64 {
        self.magnitude.bits() as u64
    }

    fn magnitude_u64(&self) -> Option<u64> {
        let bytes = self.magnitude_le_bytes();
        if bytes.len() > 8 {
            return None;
        }
        Some(
            bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        )
    }

    fn magnitude_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(LIMBS * core::mem::size_of::<Word>());
        for word in self.magnitude.as_words() {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        bytes
    }

    fn from_sign_magnitude(negative: bool, bytes: &[u8]) -> Option<Self> {
        let word_bytes = core::mem::size_of::<Word>();
        let mut words = [0 as Word; LIMBS];
        for (i, &b) in bytes.iter().enumerate() {
            match words.get_mut(i / word_bytes) {
                Some(word) => *word |= (b as Word) << (8 * (i % word_bytes)),
                None if b == 0 => {}
                None => return None,
            }
        }
        Some(Self::from_uint(negative, Uint::from_words(words)))
    }

    fn to_digits(&self, radix: u32) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }
        let base = Uint::<LIMBS>::from_u64(u64::from(radix));
        let mut mag = self.magnitude;
        let mut out = Vec::new();
        while mag != Uint::ZERO {
            let q = mag.wrapping_div(&base);
            let digit = mag.wrapping_sub(&q.wrapping_mul(&base)).as_words()[0];
            out.push(char::from_digit(digit as u32, radix).unwrap_or('?'));
            mag = q;
        }
        out.iter().rev().collect()
    }

    fn from_digits(negative: bool, digits: &str, radix: u32) -> Option<Self> {
        let base = Uint::<LIMBS>::from_u64(u64::from(radix));
        let mut acc = Uint::<LIMBS>::ZERO;
        for c in digits.chars() {
            let digit = c.to_digit(radix)?;
            let (lo, hi) = acc.mul_wide(&base);
            if hi != Uint::ZERO {
                return None;
            }
            acc = lo.wrapping_add(&Uint::from_u64(u64::from(digit)));
            if acc < lo {
                return None;
            }
        }
        Some(Self::from_uint(negative, acc))
    }
}

impl<const LIMBS: usize> PartialOrd for SignMagnitude<LIMBS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const LIMBS: usize> Ord for SignMagnitude<LIMBS> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
        }
    }
}

impl<const LIMBS: usize> Hash for SignMagnitude<LIMBS> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.magnitude.as_words().hash(state);
    }
}

impl<const LIMBS: usize> fmt::Display for SignMagnitude<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(0, FormatFlags::DECIMAL))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::SignMagnitude;
    use crate::backend::IntegerBackend;
    use serde::de::{Deserialize, Deserializer, Error as DeError};
    use serde::ser::{Serialize, Serializer};

    impl<const LIMBS: usize> Serialize for SignMagnitude<LIMBS> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de, const LIMBS: usize> Deserialize<'de> for SignMagnitude<LIMBS> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            Self::parse_literal(&text)
                .ok_or_else(|| DeError::custom(format!("invalid integer literal \"{text}\"")))
        }
    }
}
