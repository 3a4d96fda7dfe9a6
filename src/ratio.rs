//! The [`Ratio`] type: construction, canonical form, accessors and queries.

use crate::backend::IntegerBackend;
use crate::error::{RatioError, Result};
use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use tracing::{debug, trace};

/// An exact rational number `numer / denom` over an integer backend `T`.
///
/// # Type Parameter
///
/// `T` must implement [`IntegerBackend`]: `num_bigint::BigInt`, `i64`,
/// `i128` or one of the crypto-bigint [`SignMagnitude`](crate::SignMagnitude)
/// widths.
///
/// # Invariants
///
/// Every public constructor and mutator leaves the value canonical:
///
/// - `gcd(|numer|, denom) == 1`
/// - `denom > 0`, so the sign is carried by the numerator alone
/// - Zero is always `0/1`
///
/// Because of this, structural equality of `(numer, denom)` is value
/// equality, and hashing the pair is coherent with `==`.
///
/// # Examples
///
/// ```
/// use bigratio::Ratio;
///
/// let r = Ratio::<i64>::from_parts(6, -8).unwrap();
/// assert_eq!(*r.numer(), -3);
/// assert_eq!(*r.denom(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ratio<T: IntegerBackend> {
    numer: T,
    denom: T,
}

impl<T: IntegerBackend> Ratio<T> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// The value zero, `0/1`.
    #[inline]
    pub fn new() -> Self {
        Self::zero()
    }

    /// Create a ratio representing 0.
    #[inline]
    pub fn zero() -> Self {
        Self {
            numer: T::zero(),
            denom: T::one(),
        }
    }

    /// Create a ratio representing 1.
    #[inline]
    pub fn one() -> Self {
        Self {
            numer: T::one(),
            denom: T::one(),
        }
    }

    /// The integer `value` as `value/1`.
    #[inline]
    pub fn from_integer(value: T) -> Self {
        Self {
            numer: value,
            denom: T::one(),
        }
    }

    /// Explicit conversion from an integer of another backend.
    ///
    /// Fails with [`RatioError::Overflow`] if the value does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::{Ratio, RatioError};
    /// use num_bigint::BigInt;
    ///
    /// let big = BigInt::from(1u8) << 100;
    /// assert!(Ratio::<BigInt>::try_from_integer(&big).is_ok());
    /// assert_eq!(Ratio::<i64>::try_from_integer(&big), Err(RatioError::Overflow));
    /// ```
    pub fn try_from_integer<U: IntegerBackend>(value: &U) -> Result<Self> {
        let numer = T::from_sign_magnitude(value.signum() < 0, &value.magnitude_le_bytes())
            .ok_or(RatioError::Overflow)?;
        Ok(Self::from_integer(numer))
    }

    /// Build a ratio from a raw numerator/denominator pair, reducing it to
    /// canonical form.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::{Ratio, RatioError};
    ///
    /// let r = Ratio::<i64>::from_parts(4, 6).unwrap();
    /// assert_eq!((*r.numer(), *r.denom()), (2, 3));
    ///
    /// assert_eq!(Ratio::<i64>::from_parts(1, 0), Err(RatioError::ZeroDenominator));
    /// ```
    pub fn from_parts(numer: T, denom: T) -> Result<Self> {
        let mut r = Self::zero();
        r.assign_parts(numer, denom)?;
        Ok(r)
    }

    /// Replace the value with `numer / denom`, reduced to canonical form.
    ///
    /// This is the single entry point through which parsing,
    /// deserialization and float conversion set both components. On error
    /// the value is left unchanged.
    pub fn assign_parts(&mut self, numer: T, denom: T) -> Result<()> {
        if denom.is_zero() {
            debug!(?numer, "rejecting zero denominator");
            return Err(RatioError::ZeroDenominator);
        }
        trace!(?numer, ?denom, "canonicalising raw parts");
        let (numer, denom) = canonicalize(numer, denom);
        self.numer = numer;
        self.denom = denom;
        Ok(())
    }

    /// Wrap a pair already known to be canonical.
    #[inline]
    pub(crate) fn from_canonical(numer: T, denom: T) -> Self {
        debug_assert!(denom.signum() > 0, "denominator must be positive");
        debug_assert!(
            numer.gcd(&denom) == T::one() || (numer.is_zero() && denom == T::one()),
            "ratio must be in lowest terms"
        );
        Self { numer, denom }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// The numerator; carries the sign of the value.
    #[inline(always)]
    pub fn numer(&self) -> &T {
        &self.numer
    }

    /// The denominator; always positive.
    #[inline(always)]
    pub fn denom(&self) -> &T {
        &self.denom
    }

    /// Consume the ratio, returning `(numer, denom)`.
    #[inline]
    pub fn into_parts(self) -> (T, T) {
        (self.numer, self.denom)
    }

    /// Edit both components in place, then restore canonical form.
    ///
    /// If the closure leaves a zero denominator the edit is discarded and
    /// [`RatioError::ZeroDenominator`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let mut r = Ratio::<i64>::from_parts(1, 3).unwrap();
    /// r.mutate_parts(|n, d| {
    ///     *n *= 4;
    ///     *d *= 2;
    /// })
    /// .unwrap();
    /// assert_eq!((*r.numer(), *r.denom()), (2, 3));
    /// ```
    pub fn mutate_parts<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut T, &mut T),
    {
        let mut numer = self.numer.clone();
        let mut denom = self.denom.clone();
        f(&mut numer, &mut denom);
        self.assign_parts(numer, denom)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Check if the ratio is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Returns `-1`, `0` or `1`: the sign of the numerator.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.numer.signum()
    }

    /// Check if the ratio is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// Check if the ratio is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Check if the ratio represents an integer (denominator is 1).
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom == T::one()
    }

    // ========================================================================
    // HASHING
    // ========================================================================

    /// A 64-bit hash of the canonical pair: the numerator hash combined with
    /// the denominator hash, in that order.
    ///
    /// Equal ratios always have equal hash values.
    pub fn hash_value(&self) -> u64 {
        let mut seed = hash_one(&self.numer);
        hash_combine(&mut seed, hash_one(&self.denom));
        seed
    }
}

impl<T: IntegerBackend> Default for Ratio<T> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: IntegerBackend> Hash for Ratio<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numer.hash(state);
        self.denom.hash(state);
    }
}

impl<T: IntegerBackend> From<T> for Ratio<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::from_integer(value)
    }
}

macro_rules! impl_from_primitive {
    ($via:ident: $($prim:ty),*) => {
        $(
            impl<T: IntegerBackend> From<$prim> for Ratio<T> {
                #[inline]
                fn from(value: $prim) -> Self {
                    Self::from_integer(T::$via(value.into()))
                }
            }
        )*
    };
}

impl_from_primitive!(from_i64: i8, i16, i32);
impl_from_primitive!(from_u64: u8, u16, u32, u64);

// ============================================================================
// HELPERS
// ============================================================================

/// Reduce `numer / denom` to lowest terms with a positive denominator.
///
/// `denom` must be nonzero.
pub(crate) fn canonicalize<T: IntegerBackend>(numer: T, denom: T) -> (T, T) {
    if numer.is_zero() {
        return (T::zero(), T::one());
    }
    // Equal parts may share a gcd the backend cannot hold, e.g. `i64::MIN`.
    if numer == denom {
        return (T::one(), T::one());
    }

    let g = numer.gcd(&denom);
    let (mut numer, mut denom) = if g == T::one() {
        (numer, denom)
    } else {
        (numer.div_trunc(&g), denom.div_trunc(&g))
    };

    if denom.signum() < 0 {
        numer = numer.negated();
        denom = denom.negated();
    }
    (numer, denom)
}

fn hash_one<V: Hash>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Order-sensitive golden-ratio mixing step.
#[inline]
fn hash_combine(seed: &mut u64, value: u64) {
    *seed ^= value
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}
