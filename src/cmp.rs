//! Ordering of ratios against ratios, integers and floats.
//!
//! Comparison never cross-multiplies: after the cheap sign and magnitude
//! checks it walks the continued-fraction expansions of both operands, so
//! fixed-width backends cannot overflow while comparing.

use crate::backend::IntegerBackend;
use crate::convert::Float;
use crate::ratio::Ratio;
use core::cmp::Ordering;
use num_bigint::BigInt;

#[inline]
fn ordering_to_int(ord: Ordering) -> i32 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

impl<T: IntegerBackend> Ratio<T> {
    // ========================================================================
    // THREE-WAY COMPARISON
    // ========================================================================

    /// Three-way comparison: negative, zero or positive as `self` is less
    /// than, equal to or greater than `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let a = Ratio::<i64>::from_parts(1, 3).unwrap();
    /// let b = Ratio::<i64>::from_parts(1, 2).unwrap();
    /// assert!(a.compare(&b) < 0);
    /// assert_eq!(a.compare(&a), 0);
    /// ```
    #[inline]
    pub fn compare(&self, other: &Self) -> i32 {
        ordering_to_int(self.cmp(other))
    }

    /// Three-way comparison against an integer.
    #[inline]
    pub fn compare_integer(&self, value: &T) -> i32 {
        ordering_to_int(self.cmp_integer(value))
    }

    /// Three-way comparison against a float, using the float's exact value.
    ///
    /// Returns `None` when `value` is NaN. Infinities compare beyond every
    /// ratio.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::Ratio;
    ///
    /// let third = Ratio::<i64>::from_parts(1, 3).unwrap();
    /// // 0.3333333333333333 is slightly below one third.
    /// assert_eq!(third.compare_float(1.0 / 3.0), Some(1));
    /// assert_eq!(third.compare_float(f64::INFINITY), Some(-1));
    /// assert_eq!(third.compare_float(f64::NAN), None);
    /// ```
    #[inline]
    pub fn compare_float<F: Float>(&self, value: F) -> Option<i32> {
        self.partial_cmp_float(value).map(ordering_to_int)
    }

    fn cmp_integer(&self, value: &T) -> Ordering {
        if self.is_integer() {
            return self.numer().cmp(value);
        }
        cmp_parts(self.numer(), self.denom(), value, &T::one())
    }

    fn partial_cmp_float<F: Float>(&self, value: F) -> Option<Ordering> {
        if value.is_nan() {
            return None;
        }
        match Ratio::<BigInt>::from_float(value) {
            Ok(exact) => Some(self.to_big().cmp(&exact)),
            // Remaining non-finite values are the infinities.
            Err(_) if value.is_sign_negative() => Some(Ordering::Greater),
            Err(_) => Some(Ordering::Less),
        }
    }
}

// ============================================================================
// ORDERING IMPLEMENTATIONS
// ============================================================================

impl<T: IntegerBackend> Ord for Ratio<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_parts(self.numer(), self.denom(), other.numer(), other.denom())
    }
}

impl<T: IntegerBackend> PartialOrd for Ratio<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IntegerBackend> PartialEq<i64> for Ratio<T> {
    #[inline]
    fn eq(&self, other: &i64) -> bool {
        self.is_integer() && *self.numer() == T::from_i64(*other)
    }
}

impl<T: IntegerBackend> PartialOrd<i64> for Ratio<T> {
    #[inline]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp_integer(&T::from_i64(*other)))
    }
}

impl<T: IntegerBackend> PartialEq<f64> for Ratio<T> {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp_float(*other) == Some(Ordering::Equal)
    }
}

impl<T: IntegerBackend> PartialOrd<f64> for Ratio<T> {
    #[inline]
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp_float(*other)
    }
}

// ============================================================================
// COMPARISON HELPERS
// ============================================================================

/// Compare `a/b` with `c/d`, both with positive denominators.
fn cmp_parts<T: IntegerBackend>(a: &T, b: &T, c: &T, d: &T) -> Ordering {
    let (s1, s2) = (a.signum(), c.signum());
    if s1 != s2 {
        return s1.cmp(&s2);
    }
    if s1 == 0 {
        return Ordering::Equal;
    }
    if b == d {
        return a.cmp(c);
    }

    // Fast path: |x| lies strictly between 2^(e-1) and 2^(e+1) where
    // e = bits(numer) - bits(denom).
    let e1 = a.bit_len() as i64 - b.bit_len() as i64;
    let e2 = c.bit_len() as i64 - d.bit_len() as i64;
    let positive = s1 > 0;
    if e1 - e2 >= 2 {
        return if positive { Ordering::Greater } else { Ordering::Less };
    }
    if e2 - e1 >= 2 {
        return if positive { Ordering::Less } else { Ordering::Greater };
    }

    cmp_continued_fraction(a, b, c, d)
}

/// Quotient and remainder with the quotient rounded toward negative
/// infinity, so that `0 <= rem < d` for positive `d`.
fn floor_div_rem<T: IntegerBackend>(n: &T, d: &T) -> (T, T) {
    let mut q = n.div_trunc(d);
    let mut r = n.rem_trunc(d);
    if r.signum() < 0 {
        r = r.add_int(d);
        q = q.sub_int(&T::one());
    }
    (q, r)
}

/// Compare `a/b` with `c/d` term by term on their continued fractions.
///
/// Every intermediate value is bounded by the inputs.
fn cmp_continued_fraction<T: IntegerBackend>(a: &T, b: &T, c: &T, d: &T) -> Ordering {
    let (mut q1, mut r1) = floor_div_rem(a, b);
    let (mut q2, mut r2) = floor_div_rem(c, d);
    let (mut d1, mut d2) = (b.clone(), d.clone());
    // Each step inverts the remainders, which flips the ordering.
    let mut reverse = false;

    loop {
        if q1 != q2 {
            let ord = q1.cmp(&q2);
            return if reverse { ord.reverse() } else { ord };
        }
        reverse = !reverse;
        if r1.is_zero() || r2.is_zero() {
            break;
        }

        let n1 = core::mem::replace(&mut d1, r1);
        q1 = n1.div_trunc(&d1);
        r1 = n1.rem_trunc(&d1);

        let n2 = core::mem::replace(&mut d2, r2);
        q2 = n2.div_trunc(&d2);
        r2 = n2.rem_trunc(&d2);
    }

    match (r1.is_zero(), r2.is_zero()) {
        (true, true) => Ordering::Equal,
        // The expansion that continues has an extra term beyond the common
        // prefix; which side that puts it on depends on the parity.
        (r1_zero, _) => {
            if !r1_zero != reverse {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}
