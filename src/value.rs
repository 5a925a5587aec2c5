// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Format-tagged fixed-point values.

use crate::engine::{self, Converted};
use crate::error::FormatError;
use crate::format::{raw_to_real, FixFormat};
use crate::mode::{RoundMode, SaturateMode};
use core::fmt;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

/// A stored integer together with the format it occupies.
///
/// The real value is `raw * 2^-frac_bits`. `raw` is unbounded so that exact
/// intermediates never overflow before the engine narrows them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixValue {
    raw: BigInt,
    format: FixFormat,
}

impl FixValue {
    /// Wraps a stored integer, rejecting values outside the format's range.
    pub fn new(raw: impl Into<BigInt>, format: FixFormat) -> Result<Self, FormatError> {
        let raw = raw.into();
        if !format.contains_raw(&raw) {
            return Err(FormatError::RawOutOfRange { raw, format });
        }
        Ok(Self { raw, format })
    }

    /// Caller guarantees `raw` fits `format`.
    pub(crate) fn exact(raw: BigInt, format: FixFormat) -> Self {
        debug_assert!(format.contains_raw(&raw), "{raw} outside {format}");
        Self { raw, format }
    }

    pub fn zero(format: FixFormat) -> Self {
        Self::exact(BigInt::zero(), format)
    }

    pub fn min_of(format: FixFormat) -> Self {
        Self::exact(format.raw_min(), format)
    }

    pub fn max_of(format: FixFormat) -> Self {
        Self::exact(format.raw_max(), format)
    }

    /// Quantizes a real number into `format`.
    pub fn from_real(
        x: f64,
        format: FixFormat,
        round: RoundMode,
        saturate: SaturateMode,
    ) -> Result<Converted, FormatError> {
        engine::from_real(x, format, round, saturate)
    }

    /// Quantizes a real number that must already lie on the format's grid and
    /// inside its range.
    pub fn from_real_exact(x: f64, format: FixFormat) -> Result<Self, FormatError> {
        let (mantissa, exp) = engine::decompose(x)?;
        let shift = exp + format.frac_bits();
        let raw = if shift >= 0 {
            mantissa << shift as usize
        } else {
            let divisor = BigInt::one() << (-shift) as usize;
            if !(&mantissa % &divisor).is_zero() {
                return Err(FormatError::OffGrid { value: x, format });
            }
            mantissa / divisor
        };
        Self::new(raw, format)
    }

    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    pub fn format(&self) -> FixFormat {
        self.format
    }

    pub fn to_real(&self) -> f64 {
        raw_to_real(&self.raw, self.format.frac_bits())
    }

    /// Stored bit pattern: two's complement within `width` bits, so the result
    /// is always in `[0, 2^width)`.
    pub fn to_bits(&self) -> BigInt {
        if self.raw.sign() == Sign::Minus {
            &self.raw + (BigInt::one() << self.format.width() as usize)
        } else {
            self.raw.clone()
        }
    }

    /// Converts into another format through the rounding/saturation engine.
    pub fn convert(
        &self,
        target: FixFormat,
        round: RoundMode,
        saturate: SaturateMode,
    ) -> Converted {
        engine::convert(self, target, round, saturate)
    }
}

impl fmt::Display for FixValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.raw, self.format)
    }
}
