//! Arithmetic on [`Ratio`].
//!
//! Every operation returns a canonical result. Common factors are cancelled
//! before multiplying, so intermediate products stay as small as the result
//! allows; this matters for fixed-width backends, which panic on overflow.

use crate::backend::IntegerBackend;
use crate::error::{RatioError, Result};
use crate::ratio::Ratio;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use tracing::debug;

impl<T: IntegerBackend> Ratio<T> {
    // ========================================================================
    // BASIC OPERATIONS
    // ========================================================================

    /// Negate the ratio, flipping its sign.
    #[allow(clippy::should_implement_trait)] // We do implement Neg trait, clippy doesn't detect it
    #[inline]
    pub fn neg(self) -> Self {
        let (numer, denom) = self.into_parts();
        Self::from_canonical(numer.negated(), denom)
    }

    /// Negate in place.
    #[inline]
    pub fn negate(&mut self) {
        *self = core::mem::take(self).neg();
    }

    /// Get the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::from_canonical(self.numer().abs_int(), self.denom().clone())
    }

    /// Get the reciprocal (1/x).
    ///
    /// Fails with [`RatioError::DivideByZero`] if the ratio is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let r = Ratio::<i64>::from_parts(-2, 3).unwrap();
    /// assert_eq!(r.recip().unwrap(), Ratio::from_parts(-3, 2).unwrap());
    /// assert!(Ratio::<i64>::zero().recip().is_err());
    /// ```
    pub fn recip(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(RatioError::DivideByZero);
        }
        let (numer, denom) = (self.numer(), self.denom());
        if numer.signum() < 0 {
            Ok(Self::from_canonical(denom.negated(), numer.negated()))
        } else {
            Ok(Self::from_canonical(denom.clone(), numer.clone()))
        }
    }

    // ========================================================================
    // ARITHMETIC - ADDITION
    // ========================================================================

    /// Add two ratios.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let a = Ratio::<i64>::from_parts(1, 6).unwrap();
    /// let b = Ratio::<i64>::from_parts(1, 3).unwrap();
    /// assert_eq!(a.add(&b), Ratio::from_parts(1, 2).unwrap());
    /// ```
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        self.add_or_sub(other, false)
    }

    /// Subtract another ratio.
    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        self.add_or_sub(other, true)
    }

    /// `self + other` or `self - other`; the right-hand numerator is never
    /// negated on its own.
    fn add_or_sub(&self, other: &Self, subtract: bool) -> Self {
        let (a, b) = (self.numer(), self.denom());
        let (c, d) = (other.numer(), other.denom());
        let combine = |x: T, y: T| if subtract { x.sub_int(&y) } else { x.add_int(&y) };

        if b == d {
            let numer = combine(a.clone(), c.clone());
            if numer.is_zero() {
                return Self::zero();
            }
            let g = numer.gcd(b);
            return Self::from_canonical(div_exact(&numer, &g), div_exact(b, &g));
        }

        let g = b.gcd(d);
        if g == T::one() {
            // b and d coprime: (ad + cb) shares no factor with bd.
            let numer = combine(a.mul_int(d), c.mul_int(b));
            if numer.is_zero() {
                return Self::zero();
            }
            return Self::from_canonical(numer, b.mul_int(d));
        }

        let b1 = b.div_trunc(&g);
        let numer = combine(a.mul_int(&d.div_trunc(&g)), c.mul_int(&b1));
        if numer.is_zero() {
            return Self::zero();
        }
        let g2 = numer.gcd(&g);
        let denom = b1.mul_int(&div_exact(d, &g2));
        Self::from_canonical(div_exact(&numer, &g2), denom)
    }

    // ========================================================================
    // ARITHMETIC - MULTIPLICATION
    // ========================================================================

    /// Multiply two ratios, cancelling cross factors first.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let a = Ratio::<i64>::from_parts(2, 3).unwrap();
    /// let b = Ratio::<i64>::from_parts(3, 4).unwrap();
    /// let product = a.mul(&b);
    /// assert_eq!((*product.numer(), *product.denom()), (1, 2));
    /// ```
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let (a, b) = (self.numer(), self.denom());
        let (c, d) = (other.numer(), other.denom());

        let g_ad = a.gcd(d);
        let g_bc = c.gcd(b);

        let numer = div_exact(a, &g_ad).mul_int(&div_exact(c, &g_bc));
        let denom = div_exact(b, &g_bc).mul_int(&div_exact(d, &g_ad));
        Self::from_canonical(numer, denom)
    }

    // ========================================================================
    // ARITHMETIC - DIVISION
    // ========================================================================

    /// Divide by another ratio.
    ///
    /// Fails with [`RatioError::DivideByZero`] if `other` is zero; there is
    /// no infinite or NaN rational.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::{Ratio, RatioError};
    ///
    /// let a = Ratio::<i64>::from_parts(1, 2).unwrap();
    /// let b = Ratio::<i64>::from_parts(-3, 4).unwrap();
    /// assert_eq!(a.checked_div(&b), Ok(Ratio::from_parts(-2, 3).unwrap()));
    /// assert_eq!(a.checked_div(&Ratio::zero()), Err(RatioError::DivideByZero));
    /// ```
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            debug!(dividend = ?self, "divide by zero");
            return Err(RatioError::DivideByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let (a, b) = (self.numer(), self.denom());
        let (c, d) = (other.numer(), other.denom());

        let g_ac = a.gcd(c);
        let g_bd = b.gcd(d);

        let mut numer = div_exact(a, &g_ac).mul_int(&div_exact(d, &g_bd));
        let mut denom = div_exact(b, &g_bd).mul_int(&div_exact(c, &g_ac));
        if denom.signum() < 0 {
            numer = numer.negated();
            denom = denom.negated();
        }
        Ok(Self::from_canonical(numer, denom))
    }

    /// Divide by another ratio.
    ///
    /// # Panics
    ///
    /// Panics with "divide by zero" if `other` is zero. Use
    /// [`checked_div`](Ratio::checked_div) to handle that case.
    #[inline]
    pub fn div(&self, other: &Self) -> Self {
        match self.checked_div(other) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }

    /// `self /= other`, failing with [`RatioError::DivideByZero`] and leaving
    /// `self` unchanged if `other` is zero.
    pub fn try_div_assign(&mut self, other: &Self) -> Result<()> {
        *self = self.checked_div(other)?;
        Ok(())
    }
}

/// `x / g`, skipping the division when `g` is one.
#[inline]
fn div_exact<T: IntegerBackend>(x: &T, g: &T) -> T {
    if *g == T::one() {
        x.clone()
    } else {
        x.div_trunc(g)
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<T: IntegerBackend> $Op for Ratio<T> {
            type Output = Self;
            #[inline(always)]
            fn $op(self, other: Self) -> Self {
                Ratio::$op(&self, &other)
            }
        }

        impl<T: IntegerBackend> $Op<&Ratio<T>> for Ratio<T> {
            type Output = Self;
            #[inline(always)]
            fn $op(self, other: &Self) -> Self {
                Ratio::$op(&self, other)
            }
        }

        impl<T: IntegerBackend> $Op for &Ratio<T> {
            type Output = Ratio<T>;
            #[inline(always)]
            fn $op(self, other: Self) -> Ratio<T> {
                Ratio::$op(self, other)
            }
        }

        impl<T: IntegerBackend> $Op<Ratio<T>> for &Ratio<T> {
            type Output = Ratio<T>;
            #[inline(always)]
            fn $op(self, other: Ratio<T>) -> Ratio<T> {
                Ratio::$op(self, &other)
            }
        }

        impl<T: IntegerBackend> $OpAssign<&Ratio<T>> for Ratio<T> {
            #[inline]
            fn $op_assign(&mut self, other: &Self) {
                *self = Ratio::$op(&*self, other);
            }
        }

        impl<T: IntegerBackend> $OpAssign for Ratio<T> {
            #[inline]
            fn $op_assign(&mut self, other: Self) {
                *self = Ratio::$op(&*self, &other);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);

impl<T: IntegerBackend> Neg for Ratio<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Ratio::neg(self)
    }
}

impl<T: IntegerBackend> Neg for &Ratio<T> {
    type Output = Ratio<T>;
    #[inline(always)]
    fn neg(self) -> Ratio<T> {
        Ratio::neg(self.clone())
    }
}

impl<T: IntegerBackend> core::iter::Sum for Ratio<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc.add(&x))
    }
}

impl<T: IntegerBackend> core::iter::Product for Ratio<T> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc.mul(&x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::I256;
    use num_bigint::BigInt;

    fn r(n: i64, d: i64) -> Ratio<i64> {
        Ratio::from_parts(n, d).unwrap()
    }

    fn parts(x: &Ratio<i64>) -> (i64, i64) {
        (*x.numer(), *x.denom())
    }

    #[test]
    fn test_add_reduces() {
        assert_eq!(parts(&(r(1, 6) + r(1, 3))), (1, 2));
        assert_eq!(parts(&(r(1, 4) + r(1, 4))), (1, 2));
        assert_eq!(parts(&(r(1, 2) + r(1, 3))), (5, 6));
        assert_eq!(parts(&(r(5, 12) + r(1, 12))), (1, 2));
        assert_eq!(parts(&(r(3, 10) + r(1, 15))), (11, 30));
        assert_eq!(parts(&(r(7, 12) + r(5, 12))), (1, 1));
    }

    #[test]
    fn test_add_to_zero() {
        assert!((r(3, 4) + r(-3, 4)).is_zero());
        assert_eq!(parts(&(r(1, 6) + r(-1, 6))), (0, 1));
        assert_eq!(parts(&(r(2, 6 * 5) - r(1, 15))), (0, 1));
    }

    #[test]
    fn test_sub_mixed_signs() {
        assert_eq!(parts(&(r(1, 2) - r(3, 4))), (-1, 4));
        assert_eq!(parts(&(r(-1, 2) - r(-3, 4))), (1, 4));
        assert_eq!(parts(&(r(-1, 2) - r(1, 3))), (-5, 6));
    }

    #[test]
    fn test_sub_at_backend_bounds() {
        let min = r(i64::MIN, 1);
        assert!((&min - &min).is_zero());
        let third = r(i64::MIN, 3);
        assert!((&third - &third).is_zero());
        assert_eq!(parts(&(r(i64::MIN, 5) - r(-1, 5))), (i64::MIN + 1, 5));
        assert_eq!(parts(&(r(-1, 1) - r(i64::MAX, 1))), (i64::MIN, 1));
    }

    #[test]
    fn test_operator_forms_agree() {
        let (a, b) = (r(1, 6), r(-3, 4));
        let expected = Ratio::add(&a, &b);
        assert_eq!(a.clone() + b.clone(), expected);
        assert_eq!(a.clone() + &b, expected);
        assert_eq!(&a + b.clone(), expected);
        assert_eq!(&a + &b, expected);
        assert_eq!(&a * r(2, 1), r(1, 3));
        assert_eq!(&a - r(1, 6), Ratio::zero());
        assert_eq!(&a / r(1, 3), r(1, 2));
    }

    #[test]
    fn test_mul_cancels_cross_factors() {
        assert_eq!(parts(&(r(2, 3) * r(3, 4))), (1, 2));
        assert_eq!(parts(&(r(-15, 35) * r(21, 28))), (-9, 28));
        assert_eq!(parts(&(r(-2, 3) * r(-3, 2))), (1, 1));
        assert!((r(0, 1) * r(5, 7)).is_zero());
    }

    #[test]
    fn test_mul_avoids_overflow_on_fixed_width() {
        let big = Ratio::<i64>::from_parts(i64::MAX, 3).unwrap();
        let inv = Ratio::<i64>::from_parts(3, i64::MAX).unwrap();
        assert_eq!(big * inv, Ratio::one());
    }

    #[test]
    fn test_div() {
        assert_eq!(parts(&(r(1, 2) / r(3, 4))), (2, 3));
        assert_eq!(parts(&(r(1, 2) / r(-3, 4))), (-2, 3));
        assert_eq!(parts(&(r(-4, 9) / r(-2, 3))), (2, 3));
        assert_eq!(parts(&(r(0, 1) / r(-2, 3))), (0, 1));
    }

    #[test]
    fn test_divide_by_zero() {
        let zero = Ratio::<BigInt>::zero();
        for n in -3..=3 {
            let a = Ratio::<BigInt>::from_integer(BigInt::from(n));
            assert_eq!(a.checked_div(&zero), Err(RatioError::DivideByZero));
        }
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn test_div_operator_panics_on_zero() {
        let _ = r(1, 2) / Ratio::zero();
    }

    #[test]
    fn test_try_div_assign_leaves_value_on_error() {
        let mut x = r(5, 7);
        assert_eq!(x.try_div_assign(&Ratio::zero()), Err(RatioError::DivideByZero));
        assert_eq!(parts(&x), (5, 7));
        x.try_div_assign(&r(5, 14)).unwrap();
        assert_eq!(parts(&x), (2, 1));
    }

    #[test]
    fn test_compound_assign() {
        let mut x = r(1, 2);
        x += &r(1, 3);
        x -= r(1, 6);
        x *= &r(9, 4);
        x /= r(3, 2);
        assert_eq!(parts(&x), (1, 1));
    }

    #[test]
    fn test_negate_touches_numerator_only() {
        let mut x = r(3, 8);
        x.negate();
        assert_eq!(parts(&x), (-3, 8));
        assert_eq!(parts(&-&x), (3, 8));
        assert_eq!(parts(&-Ratio::<i64>::zero()), (0, 1));
        assert_eq!(parts(&x.abs()), (3, 8));
    }

    #[test]
    fn test_operands_untouched() {
        let a = r(2, 9);
        let b = r(4, 3);
        let _ = &a + &b;
        let _ = &a / &b;
        assert_eq!(parts(&a), (2, 9));
        assert_eq!(parts(&b), (4, 3));
    }

    #[test]
    fn test_sum_and_product() {
        let terms: Vec<Ratio<i64>> = (1..=4).map(|k| r(1, k * (k + 1))).collect();
        let total: Ratio<i64> = terms.iter().cloned().sum();
        assert_eq!(parts(&total), (4, 5));

        let prod: Ratio<i64> = (1..=5).map(|k| r(k, k + 1)).product();
        assert_eq!(parts(&prod), (1, 6));
    }

    #[test]
    fn test_sign_magnitude_backend() {
        let a = Ratio::<I256>::from_parts(I256::from_i64(-3), I256::from_i64(9)).unwrap();
        let b = Ratio::<I256>::from_parts(I256::from_i64(5), I256::from_i64(6)).unwrap();
        let sum = &a + &b;
        assert_eq!(sum.numer(), &I256::from_i64(1));
        assert_eq!(sum.denom(), &I256::from_i64(2));
        let q = &a / &b;
        assert_eq!(q.numer(), &I256::from_i64(-2));
        assert_eq!(q.denom(), &I256::from_i64(5));
    }
}
