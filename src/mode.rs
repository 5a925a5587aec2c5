// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Rounding and saturation policies.

use crate::error::FormatError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// How discarded fraction bits are rounded away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    /// Drop the bits (floor toward negative infinity).
    #[default]
    #[serde(alias = "trunc")]
    Truncate,
    /// Nearest, ties toward positive infinity.
    NonSymPos,
    /// Nearest, ties toward negative infinity.
    NonSymNeg,
    /// Nearest, ties away from zero.
    SymInf,
    /// Nearest, ties toward zero.
    SymZero,
    /// Nearest, ties to even.
    ConvEven,
    /// Nearest, ties to odd.
    ConvOdd,
}

/// What happens when a value does not fit the target range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturateMode {
    /// Two's-complement wraparound, silent.
    Wrap,
    /// Wraparound, reported as an overflow.
    WrapWarn,
    /// Clamp to the nearest bound, silent.
    Saturate,
    /// Clamp to the nearest bound, reported as an overflow.
    #[default]
    SaturateWarn,
}

impl SaturateMode {
    pub const fn clamps(&self) -> bool {
        matches!(self, SaturateMode::Saturate | SaturateMode::SaturateWarn)
    }

    pub const fn reports(&self) -> bool {
        matches!(self, SaturateMode::WrapWarn | SaturateMode::SaturateWarn)
    }
}

impl RoundMode {
    pub const ALL: [RoundMode; 7] = [
        RoundMode::Truncate,
        RoundMode::NonSymPos,
        RoundMode::NonSymNeg,
        RoundMode::SymInf,
        RoundMode::SymZero,
        RoundMode::ConvEven,
        RoundMode::ConvOdd,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            RoundMode::Truncate => "truncate",
            RoundMode::NonSymPos => "non_sym_pos",
            RoundMode::NonSymNeg => "non_sym_neg",
            RoundMode::SymInf => "sym_inf",
            RoundMode::SymZero => "sym_zero",
            RoundMode::ConvEven => "conv_even",
            RoundMode::ConvOdd => "conv_odd",
        }
    }
}

impl SaturateMode {
    pub const ALL: [SaturateMode; 4] = [
        SaturateMode::Wrap,
        SaturateMode::WrapWarn,
        SaturateMode::Saturate,
        SaturateMode::SaturateWarn,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            SaturateMode::Wrap => "wrap",
            SaturateMode::WrapWarn => "wrap_warn",
            SaturateMode::Saturate => "saturate",
            SaturateMode::SaturateWarn => "saturate_warn",
        }
    }
}

impl fmt::Display for RoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SaturateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundMode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "trunc" {
            return Ok(RoundMode::Truncate);
        }
        RoundMode::ALL
            .into_iter()
            .find(|mode| mode.name() == key)
            .ok_or_else(|| FormatError::Parse {
                input: s.to_string(),
                reason: "unknown rounding mode".to_string(),
            })
    }
}

impl FromStr for SaturateMode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        SaturateMode::ALL
            .into_iter()
            .find(|mode| mode.name() == key)
            .ok_or_else(|| FormatError::Parse {
                input: s.to_string(),
                reason: "unknown saturation mode".to_string(),
            })
    }
}
