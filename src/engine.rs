// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Rounding/saturation engine.
//!
//! Every narrowing step in the crate goes through [`convert`]. Conversion is
//! two stages: rescale the stored integer to the target fraction count
//! (rounding whatever bits fall off), then bring it into the target range
//! (wrap or clamp). Overflow is an outcome, never an error.

use crate::error::FormatError;
use crate::format::FixFormat;
use crate::mode::{RoundMode, SaturateMode};
use crate::value::FixValue;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Result of a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Converted {
    pub value: FixValue,
    /// Set only when the value was out of range and the saturation mode
    /// reports overflows.
    pub overflowed: bool,
}

/// Converts `value` into `target`.
pub fn convert(
    value: &FixValue,
    target: FixFormat,
    round: RoundMode,
    saturate: SaturateMode,
) -> Converted {
    convert_raw(
        value.raw(),
        value.format().frac_bits(),
        target,
        round,
        saturate,
    )
}

/// Converts a bare stored integer with `source_frac` fraction bits.
pub fn convert_raw(
    raw: &BigInt,
    source_frac: i32,
    target: FixFormat,
    round: RoundMode,
    saturate: SaturateMode,
) -> Converted {
    let drop_bits = source_frac as i64 - target.frac_bits() as i64;
    let rescaled = rescale(raw, drop_bits, round);
    let (raw, out_of_range) = fit(rescaled, target, saturate);
    Converted {
        value: FixValue::exact(raw, target),
        overflowed: out_of_range && saturate.reports(),
    }
}

/// Shifts `raw` right by `drop_bits` (left when negative), rounding the
/// discarded bits.
pub fn rescale(raw: &BigInt, drop_bits: i64, round: RoundMode) -> BigInt {
    if drop_bits <= 0 {
        return raw << (-drop_bits) as usize;
    }

    let divisor = BigInt::one() << drop_bits as usize;
    let (q, r) = raw.div_mod_floor(&divisor);
    if r.is_zero() {
        return q;
    }

    let half = BigInt::one() << (drop_bits - 1) as usize;
    let round_up = match round {
        RoundMode::Truncate => false,
        RoundMode::NonSymPos => r >= half,
        RoundMode::NonSymNeg => r > half,
        RoundMode::SymInf => r > half || (r == half && raw.is_positive()),
        RoundMode::SymZero => r > half || (r == half && raw.is_negative()),
        RoundMode::ConvEven => r > half || (r == half && q.is_odd()),
        RoundMode::ConvOdd => r > half || (r == half && q.is_even()),
    };

    if round_up {
        q + BigInt::one()
    } else {
        q
    }
}

/// Brings `raw` into the stored range of `target`. Returns the fitted value
/// and whether it was out of range.
fn fit(raw: BigInt, target: FixFormat, saturate: SaturateMode) -> (BigInt, bool) {
    let min = target.raw_min();
    let max = target.raw_max();

    if raw >= min && raw <= max {
        return (raw, false);
    }

    if saturate.clamps() {
        let clamped = if raw < min { min } else { max };
        return (clamped, true);
    }

    let modulus = BigInt::one() << target.width() as usize;
    let wrapped = (raw - &min).mod_floor(&modulus) + min;
    (wrapped, true)
}

/// Quantizes `x` into `target`.
pub fn from_real(
    x: f64,
    target: FixFormat,
    round: RoundMode,
    saturate: SaturateMode,
) -> Result<Converted, FormatError> {
    let (mantissa, exp) = decompose(x)?;
    // x == mantissa * 2^exp, i.e. a stored integer with -exp fraction bits.
    Ok(convert_raw(&mantissa, -exp, target, round, saturate))
}

/// Splits a finite `f64` into `mantissa * 2^exp` without rounding.
pub(crate) fn decompose(x: f64) -> Result<(BigInt, i32), FormatError> {
    if !x.is_finite() {
        return Err(FormatError::NonFinite(x));
    }

    let bits = x.to_bits();
    let negative = bits >> 63 == 1;
    let exp_field = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mantissa, exp) = if exp_field == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_field - 1075)
    };

    let mantissa = BigInt::from(mantissa);
    Ok((if negative { -mantissa } else { mantissa }, exp))
}
