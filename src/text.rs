//! Textual parsing and formatting.
//!
//! The accepted grammar is `N` or `N/D`, where each part is an integer
//! literal read by the backend's own parser: an optional sign, an optional
//! `0x`/`0X` (hex) or `0` (octal) prefix, then digits. Output is the numerator, followed by `/`
//! and the denominator only when the denominator is not one.

use crate::backend::{FormatFlags, IntegerBackend, Radix};
use crate::error::{RatioError, Result};
use crate::ratio::Ratio;
use core::fmt;
use core::str::FromStr;
use tracing::{debug, trace};

/// Split off the longest prefix made of integer-literal characters.
///
/// Hex digit letters are only accepted once an `x`/`X` has been seen; that
/// state carries over from the numerator to the denominator.
fn scan_integer<'a>(text: &'a str, have_hex: &mut bool) -> (&'a str, &'a str) {
    let end = text
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' | '+' | '-' => false,
            'x' | 'X' => {
                *have_hex = true;
                false
            }
            'a'..='f' | 'A'..='F' => !*have_hex,
            _ => true,
        })
        .map_or(text.len(), |(i, _)| i);
    text.split_at(end)
}

impl<T: IntegerBackend> Ratio<T> {
    /// Parse `N` or `N/D`.
    ///
    /// The result is canonical. Fails with [`RatioError::Parse`] on trailing
    /// characters or a component the backend rejects, and with
    /// [`RatioError::ZeroDenominator`] when `D` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::{Ratio, RatioError};
    ///
    /// let r = Ratio::<i64>::parse("3/6").unwrap();
    /// assert_eq!((*r.numer(), *r.denom()), (1, 2));
    ///
    /// let r = Ratio::<i64>::parse("0x10/0x4").unwrap();
    /// assert_eq!(r.to_string(), "4");
    ///
    /// assert_eq!(Ratio::<i64>::parse("5/0"), Err(RatioError::ZeroDenominator));
    /// assert!(Ratio::<i64>::parse("1/2x").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        trace!(input, "parsing ratio");
        let mut have_hex = false;

        let (numer_text, rest) = scan_integer(input, &mut have_hex);
        let (denom_text, rest) = match rest.strip_prefix('/') {
            Some(after) => {
                let (d, rest) = scan_integer(after, &mut have_hex);
                (Some(d), rest)
            }
            None => (None, rest),
        };
        if !rest.is_empty() {
            debug!(input, trailing = rest, "trailing characters after rational literal");
            return Err(RatioError::parse(input));
        }

        let component = |text: &str| {
            T::parse_literal(text).ok_or_else(|| {
                debug!(input, component = text, "backend rejected integer literal");
                RatioError::parse(input)
            })
        };
        let numer = component(numer_text)?;
        let denom = match denom_text {
            Some(text) => component(text)?,
            None => T::one(),
        };

        let mut value = Self::zero();
        value.assign_parts(numer, denom)?;
        Ok(value)
    }

    /// Format with each component given at least `digits` digits under
    /// `flags`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bigratio::{FormatFlags, Ratio};
    ///
    /// let r = Ratio::<i64>::from_parts(-255, 16).unwrap();
    /// assert_eq!(r.to_string_with(0, FormatFlags::DECIMAL), "-255/16");
    /// assert_eq!(r.to_string_with(0, FormatFlags::HEX.with_show_base()), "-0xff/0x10");
    /// assert_eq!(r.to_string_with(3, FormatFlags::DECIMAL.with_show_pos()), "-255/+016");
    /// ```
    pub fn to_string_with(&self, digits: usize, flags: FormatFlags) -> String {
        let mut out = self.numer().format(digits, flags);
        if *self.denom() != T::one() {
            out.push('/');
            out.push_str(&self.denom().format(digits, flags));
        }
        out
    }

    fn fmt_radix(&self, f: &mut fmt::Formatter<'_>, radix: Radix, uppercase: bool) -> fmt::Result {
        let flags = FormatFlags {
            radix,
            show_base: f.alternate(),
            show_pos: f.sign_plus(),
            uppercase,
        };
        let text = self.to_string_with(f.precision().unwrap_or(0), flags);
        pad_to_width(f, &text)
    }
}

/// Honour the formatter's width, fill and alignment without truncating.
fn pad_to_width(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let len = text.chars().count();
    let Some(width) = f.width().filter(|&w| w > len) else {
        return f.write_str(text);
    };
    let pad = width - len;
    let (before, after) = match f.align() {
        Some(fmt::Alignment::Left) => (0, pad),
        Some(fmt::Alignment::Center) => (pad / 2, pad - pad / 2),
        Some(fmt::Alignment::Right) | None => (pad, 0),
    };
    let fill = f.fill();
    for _ in 0..before {
        write!(f, "{fill}")?;
    }
    f.write_str(text)?;
    for _ in 0..after {
        write!(f, "{fill}")?;
    }
    Ok(())
}

impl<T: IntegerBackend> FromStr for Ratio<T> {
    type Err = RatioError;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<T: IntegerBackend> fmt::Display for Ratio<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Radix::Decimal, false)
    }
}

impl<T: IntegerBackend> fmt::LowerHex for Ratio<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Radix::Hex, false)
    }
}

impl<T: IntegerBackend> fmt::UpperHex for Ratio<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Radix::Hex, true)
    }
}

impl<T: IntegerBackend> fmt::Octal for Ratio<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Radix::Octal, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::I512;
    use num_bigint::BigInt;

    #[test]
    fn test_parse_reduces() {
        let r: Ratio<i64> = "3/6".parse().unwrap();
        assert_eq!((*r.numer(), *r.denom()), (1, 2));
        assert_eq!(r.to_string(), "1/2");

        let r: Ratio<i64> = "-4/-6".parse().unwrap();
        assert_eq!(r.to_string(), "2/3");

        let r: Ratio<i64> = "+7".parse().unwrap();
        assert_eq!(r.to_string(), "7");
    }

    #[test]
    fn test_parse_hex_components() {
        let r: Ratio<i64> = "0x10/0x4".parse().unwrap();
        assert_eq!((*r.numer(), *r.denom()), (4, 1));
        assert_eq!(r.to_string(), "4");

        let r: Ratio<BigInt> = "0XfF/10".parse().unwrap();
        assert_eq!(r.to_string(), "51/2");

        let r: Ratio<i64> = "-0x1/0x10".parse().unwrap();
        assert_eq!(format!("{r:x}"), "-1/10");
        assert_eq!(format!("{r:#X}"), "-0X1/0X10");
    }

    #[test]
    fn test_parse_zero_denominator_rejected() {
        assert_eq!(Ratio::<i64>::parse("5/0"), Err(RatioError::ZeroDenominator));
        assert_eq!(Ratio::<BigInt>::parse("0/0x0"), Err(RatioError::ZeroDenominator));
    }

    #[test]
    fn test_parse_errors_keep_input() {
        for input in ["1/2x", "abc", "", "1/", "/3", "3 / 4", "1.5", "0x", "1/2/3", "ff"] {
            assert_eq!(
                Ratio::<i64>::parse(input),
                Err(RatioError::Parse { input: input.to_owned() }),
                "input {input:?}"
            );
        }
        // Hex letters in the denominator are scanned but rejected as decimal.
        assert!(Ratio::<i64>::parse("0x1/ff").is_err());
    }

    #[test]
    fn test_parse_overflowing_component() {
        let err = Ratio::<i64>::parse("99999999999999999999/7").unwrap_err();
        assert_eq!(err.to_string(), "could not parse the string \"99999999999999999999/7\" as a valid rational number");

        let r = Ratio::<BigInt>::parse("99999999999999999999/7").unwrap();
        assert_eq!(r.numer(), &"99999999999999999999".parse::<BigInt>().unwrap());
    }

    #[test]
    fn test_format_flags_and_width() {
        let r = Ratio::<i64>::from_parts(9, 8).unwrap();
        assert_eq!(format!("{r:o}"), "11/10");
        assert_eq!(format!("{r:#o}"), "011/010");
        assert_eq!(format!("{r:+}"), "+9/+8");
        assert_eq!(format!("{r:.3}"), "009/008");
        assert_eq!(format!("{r:>7}"), "    9/8");
        assert_eq!(format!("{r:*<6}"), "9/8***");
        assert_eq!(format!("{r:^7}"), "  9/8  ");
        assert_eq!(format!("{:2}", Ratio::<i64>::from_parts(-10, 3).unwrap()), "-10/3");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        let values = [
            Ratio::<I512>::parse("-123456789012345678901234567890/7").unwrap(),
            Ratio::<I512>::parse("0").unwrap(),
            Ratio::<I512>::parse("0x7fffffffffffffffffffffffffffffff/0x3").unwrap(),
        ];
        for v in values.iter() {
            assert_eq!(&Ratio::<I512>::parse(&v.to_string()).unwrap(), v);
            assert_eq!(&Ratio::<I512>::parse(&format!("{v:#x}")).unwrap(), v);
            assert_eq!(&Ratio::<I512>::parse(&format!("{v:#o}")).unwrap(), v);
        }
    }

    #[test]
    fn test_parse_octal_components() {
        let r = Ratio::<i64>::from_parts(9, 8).unwrap();
        assert_eq!(Ratio::<i64>::parse(&format!("{r:#o}")).unwrap(), r);
        assert_eq!(Ratio::<i64>::parse("-011/010").unwrap(), Ratio::from_parts(-9, 8).unwrap());
        assert_eq!(Ratio::<i64>::parse("00/7").unwrap(), Ratio::zero());
        assert!(Ratio::<i64>::parse("09/2").is_err());
    }
}
