//! Exact rational number arithmetic over a pluggable integer backend.
//!
//! This library provides `Ratio<T>`, a fraction type that keeps its value in
//! lowest terms with a positive denominator. The integer type `T` is any
//! [`IntegerBackend`]: a heap-allocated `num_bigint::BigInt`, a native `i64`
//! or `i128`, or a fixed-width crypto-bigint [`SignMagnitude`] integer.
//!
//! # Features
//!
//! - **Canonical form everywhere**: every constructor, operator, parse and
//!   deserialization leaves `gcd(numer, denom) == 1` and `denom > 0`
//! - **Overflow-aware algorithms**: addition and multiplication cancel common
//!   factors before multiplying, and comparison never cross-multiplies
//! - **Conversions**: truncating integer conversion, correctly rounded `f32`/
//!   `f64` conversion, exact construction from floats, and rational-to-rational
//!   conversion across backends
//! - **Text**: `N` or `N/D` with optional `0x` hex components; decimal, hex
//!   and octal output
//! - **serde** (default feature): `{ numerator, denominator }`
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use bigratio::BigRatio;
//!
//! let a: BigRatio = "1/6".parse().unwrap();
//! let b: BigRatio = "1/3".parse().unwrap();
//!
//! let sum = &a + &b;
//! assert_eq!(sum.to_string(), "1/2");
//! assert!(sum > a);
//! assert_eq!(sum.to_f64(), 0.5);
//! ```
//!
//! ## Fixed-Width Backends
//!
//! ```
//! use bigratio::{IntegerBackend, RatioI256, I256};
//!
//! let x = RatioI256::from_parts(I256::from_i64(-10), I256::from_i64(4)).unwrap();
//! assert_eq!(format!("{x:#x}"), "-0x5/0x2");
//! assert_eq!(x.convert_to::<i32>(), -2);
//! ```
//!
//! ## Division by Zero
//!
//! ```
//! use bigratio::{RatioError, RatioI64};
//!
//! let one = RatioI64::one();
//! assert_eq!(one.checked_div(&RatioI64::zero()), Err(RatioError::DivideByZero));
//! assert_eq!(RatioI64::zero().recip(), Err(RatioError::DivideByZero));
//! ```

pub mod backend;

mod arith;
mod cmp;
mod convert;
mod error;
mod ratio;
#[cfg(feature = "serde")]
mod serde;
mod text;

pub use crate::backend::{FormatFlags, IntegerBackend, Radix, SignMagnitude, I1024, I128, I2048, I256, I512, I64};
pub use crate::convert::{Float, FromRatio, NumberCategory};
pub use crate::error::{RatioError, Result};
pub use crate::ratio::Ratio;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Ratio over arbitrary-precision `num_bigint::BigInt` components.
pub type BigRatio = Ratio<num_bigint::BigInt>;

/// Ratio over native `i64` components.
pub type RatioI64 = Ratio<i64>;

/// Ratio over native `i128` components.
pub type RatioI128 = Ratio<i128>;

/// Ratio using 256-bit sign-magnitude integers.
pub type RatioI256 = Ratio<I256>;

/// Ratio using 512-bit sign-magnitude integers.
pub type RatioI512 = Ratio<I512>;

/// Ratio using 1024-bit sign-magnitude integers.
pub type RatioI1024 = Ratio<I1024>;

/// Ratio using 2048-bit sign-magnitude integers.
pub type RatioI2048 = Ratio<I2048>;
