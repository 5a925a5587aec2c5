// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-point format descriptor and the derived-format algebra.
//!
//! A format `(S,I,F)` stores `S + I + F` bits. The stored integer `raw`
//! represents the real value `raw * 2^-F`. Either `I` or `F` may be negative,
//! which shifts the binary point outside the stored bits.

use crate::error::FormatError;
use core::fmt;
use core::str::FromStr;
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// Bound on the stored width and on the magnitude of either bit count.
pub const MAX_FORMAT_BITS: i32 = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixFormat {
    signed: bool,
    int_bits: i32,
    frac_bits: i32,
}

impl FixFormat {
    pub fn new(signed: bool, int_bits: i32, frac_bits: i32) -> Result<Self, FormatError> {
        Self::from_wide(signed, int_bits as i64, frac_bits as i64)
    }

    /// Validates bit counts computed in `i64`, so derived formats never
    /// overflow before the bound check.
    fn from_wide(signed: bool, int_bits: i64, frac_bits: i64) -> Result<Self, FormatError> {
        let limit = MAX_FORMAT_BITS as i64;
        let width = signed as i64 + int_bits + frac_bits;
        if width > limit || int_bits.abs() > limit || frac_bits.abs() > limit {
            return Err(FormatError::TooWide {
                signed: signed as u8,
                int_bits,
                frac_bits,
                limit: MAX_FORMAT_BITS,
            });
        }
        // Both counts are within the limit from here on.
        let int_bits = int_bits as i32;
        let frac_bits = frac_bits as i32;
        if width < 1 {
            return Err(FormatError::NonPositiveWidth {
                signed: signed as u8,
                int_bits,
                frac_bits,
                width,
            });
        }
        Ok(Self {
            signed,
            int_bits,
            frac_bits,
        })
    }

    pub const fn signed(&self) -> bool {
        self.signed
    }

    pub const fn int_bits(&self) -> i32 {
        self.int_bits
    }

    pub const fn frac_bits(&self) -> i32 {
        self.frac_bits
    }

    /// Total stored bit width, sign bit included.
    pub const fn width(&self) -> u32 {
        (self.signed as i32 + self.int_bits + self.frac_bits) as u32
    }

    /// Smallest stored integer.
    pub fn raw_min(&self) -> BigInt {
        if self.signed {
            -(BigInt::one() << self.magnitude_bits())
        } else {
            BigInt::zero()
        }
    }

    /// Largest stored integer.
    pub fn raw_max(&self) -> BigInt {
        (BigInt::one() << self.magnitude_bits()) - BigInt::one()
    }

    pub fn contains_raw(&self, raw: &BigInt) -> bool {
        *raw >= self.raw_min() && *raw <= self.raw_max()
    }

    /// Smallest representable real value.
    pub fn min_value(&self) -> f64 {
        raw_to_real(&self.raw_min(), self.frac_bits)
    }

    /// Largest representable real value.
    pub fn max_value(&self) -> f64 {
        raw_to_real(&self.raw_max(), self.frac_bits)
    }

    /// Quantization step, `2^-frac_bits`.
    pub fn step(&self) -> f64 {
        pow2(-self.frac_bits)
    }

    /// Bits below the sign bit: `int_bits + frac_bits`, never negative for a
    /// valid format.
    fn magnitude_bits(&self) -> usize {
        (self.int_bits + self.frac_bits) as usize
    }
}

/// `2^exp` as an `f64`.
pub(crate) fn pow2(exp: i32) -> f64 {
    2f64.powi(exp)
}

/// Real value of a stored integer with `frac_bits` fraction bits.
pub(crate) fn raw_to_real(raw: &BigInt, frac_bits: i32) -> f64 {
    let base = raw.to_f64().unwrap_or(f64::NAN);
    // Split the scaling so huge fraction counts do not underflow powi.
    if frac_bits.abs() > 1000 {
        base * pow2(-frac_bits / 2) * pow2(-(frac_bits - frac_bits / 2))
    } else {
        base * pow2(-frac_bits)
    }
}

/// Exact result format of `a * b`.
///
/// Only a signed-by-signed product needs the extra integer bit:
/// `-2^Ia * -2^Ib = 2^(Ia+Ib)` is one past the largest value of
/// `(1, Ia+Ib, Fa+Fb)`.
pub fn derive_mult_format(a: FixFormat, b: FixFormat) -> Result<FixFormat, FormatError> {
    let both_signed = a.signed && b.signed;
    FixFormat::from_wide(
        a.signed || b.signed,
        a.int_bits as i64 + b.int_bits as i64 + both_signed as i64,
        a.frac_bits as i64 + b.frac_bits as i64,
    )
}

/// Exact result format of `a + b`: one carry bit over the wider integer part.
pub fn derive_add_format(a: FixFormat, b: FixFormat) -> Result<FixFormat, FormatError> {
    FixFormat::from_wide(
        a.signed || b.signed,
        a.int_bits.max(b.int_bits) as i64 + 1,
        a.frac_bits.max(b.frac_bits) as i64,
    )
}

impl fmt::Display for FixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.signed as u8, self.int_bits, self.frac_bits)
    }
}

impl FromStr for FixFormat {
    type Err = FormatError;

    /// Parses `"(S,I,F)"`; whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: &str| FormatError::Parse {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = compact
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| parse_err("expected parentheses"))?;

        let fields: Vec<&str> = inner.split(',').collect();
        if fields.len() != 3 {
            return Err(parse_err("expected three comma-separated fields"));
        }

        let signed = match fields[0] {
            "0" => false,
            "1" => true,
            _ => return Err(parse_err("sign field must be 0 or 1")),
        };
        let int_bits = fields[1]
            .parse::<i32>()
            .map_err(|_| parse_err("integer bits are not a number"))?;
        let frac_bits = fields[2]
            .parse::<i32>()
            .map_err(|_| parse_err("fraction bits are not a number"))?;

        FixFormat::new(signed, int_bits, frac_bits)
    }
}

impl TryFrom<String> for FixFormat {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FixFormat> for String {
    fn from(fmt: FixFormat) -> Self {
        fmt.to_string()
    }
}
