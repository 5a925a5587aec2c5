// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-point multiplier and adder.
//!
//! An operator is elaborated once with its input formats, output format and
//! policies, then applied any number of times. `process` computes the exact
//! result in the derived format and narrows it with the engine.

use crate::engine;
use crate::error::{FormatError, Result, ShapeError};
use crate::format::{derive_add_format, derive_mult_format, FixFormat};
use crate::mode::{RoundMode, SaturateMode};
use crate::overflow::{OverflowLog, OverflowNotice};
use crate::value::FixValue;
use num_bigint::BigInt;

/// A two-input fixed-point operator.
pub trait FixOperator {
    /// Short name used in overflow notices.
    fn name(&self) -> &'static str;

    fn input_formats(&self) -> (FixFormat, FixFormat);

    fn output_format(&self) -> FixFormat;

    /// Lossless intermediate format.
    fn exact_format(&self) -> FixFormat;

    fn round(&self) -> RoundMode;

    fn saturate(&self) -> SaturateMode;

    /// Exact stored integer of `a op b` in `exact_format`. Operands are
    /// already checked.
    fn exact_raw(&self, a: &FixValue, b: &FixValue) -> BigInt;

    /// Lossless result, before any rounding or saturation.
    fn exact(&self, a: &FixValue, b: &FixValue) -> Result<FixValue> {
        let (fmt_a, fmt_b) = self.input_formats();
        check_operand(self.name(), 0, fmt_a, a)?;
        check_operand(self.name(), 1, fmt_b, b)?;
        Ok(FixValue::exact(self.exact_raw(a, b), self.exact_format()))
    }

    /// `a op b` narrowed to the output format. Overflows are recorded in `log`.
    fn process(&self, a: &FixValue, b: &FixValue, log: &mut OverflowLog) -> Result<FixValue> {
        let exact = self.exact(a, b)?;
        let converted = engine::convert(&exact, self.output_format(), self.round(), self.saturate());
        if converted.overflowed {
            log.record(OverflowNotice {
                operator: self.name(),
                exact,
                target: self.output_format(),
                result: converted.value.clone(),
            });
        }
        Ok(converted.value)
    }

    /// Position-wise application over two equal-length slices.
    fn process_slice(
        &self,
        a: &[FixValue],
        b: &[FixValue],
        log: &mut OverflowLog,
    ) -> Result<Vec<FixValue>> {
        if a.len() != b.len() {
            return Err(ShapeError::LengthMismatch {
                expected: a.len(),
                actual: b.len(),
            }
            .into());
        }
        a.iter().zip(b).map(|(x, y)| self.process(x, y, log)).collect()
    }
}

fn check_operand(
    operator: &'static str,
    position: usize,
    expected: FixFormat,
    value: &FixValue,
) -> core::result::Result<(), FormatError> {
    if value.format() != expected {
        return Err(FormatError::OperandMismatch {
            operator,
            position,
            expected,
            found: value.format(),
        });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixMultiplier {
    fmt_a: FixFormat,
    fmt_b: FixFormat,
    fmt_exact: FixFormat,
    fmt_out: FixFormat,
    round: RoundMode,
    saturate: SaturateMode,
}

impl FixMultiplier {
    pub fn new(
        fmt_a: FixFormat,
        fmt_b: FixFormat,
        fmt_out: FixFormat,
        round: RoundMode,
        saturate: SaturateMode,
    ) -> core::result::Result<Self, FormatError> {
        let fmt_exact = derive_mult_format(fmt_a, fmt_b)?;
        tracing::debug!(%fmt_a, %fmt_b, %fmt_exact, %fmt_out, "multiplier elaborated");
        Ok(Self {
            fmt_a,
            fmt_b,
            fmt_exact,
            fmt_out,
            round,
            saturate,
        })
    }
}

impl FixOperator for FixMultiplier {
    fn name(&self) -> &'static str {
        "mult"
    }

    fn input_formats(&self) -> (FixFormat, FixFormat) {
        (self.fmt_a, self.fmt_b)
    }

    fn output_format(&self) -> FixFormat {
        self.fmt_out
    }

    fn exact_format(&self) -> FixFormat {
        self.fmt_exact
    }

    fn round(&self) -> RoundMode {
        self.round
    }

    fn saturate(&self) -> SaturateMode {
        self.saturate
    }

    fn exact_raw(&self, a: &FixValue, b: &FixValue) -> BigInt {
        // Fraction counts add, so the raw product is already in fmt_exact.
        a.raw() * b.raw()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixAdder {
    fmt_a: FixFormat,
    fmt_b: FixFormat,
    fmt_exact: FixFormat,
    fmt_out: FixFormat,
    round: RoundMode,
    saturate: SaturateMode,
}

impl FixAdder {
    pub fn new(
        fmt_a: FixFormat,
        fmt_b: FixFormat,
        fmt_out: FixFormat,
        round: RoundMode,
        saturate: SaturateMode,
    ) -> core::result::Result<Self, FormatError> {
        let fmt_exact = derive_add_format(fmt_a, fmt_b)?;
        tracing::debug!(%fmt_a, %fmt_b, %fmt_exact, %fmt_out, "adder elaborated");
        Ok(Self {
            fmt_a,
            fmt_b,
            fmt_exact,
            fmt_out,
            round,
            saturate,
        })
    }
}

impl FixOperator for FixAdder {
    fn name(&self) -> &'static str {
        "add"
    }

    fn input_formats(&self) -> (FixFormat, FixFormat) {
        (self.fmt_a, self.fmt_b)
    }

    fn output_format(&self) -> FixFormat {
        self.fmt_out
    }

    fn exact_format(&self) -> FixFormat {
        self.fmt_exact
    }

    fn round(&self) -> RoundMode {
        self.round
    }

    fn saturate(&self) -> SaturateMode {
        self.saturate
    }

    fn exact_raw(&self, a: &FixValue, b: &FixValue) -> BigInt {
        let frac = self.fmt_exact.frac_bits();
        let align = |v: &FixValue| v.raw() << (frac - v.format().frac_bits()) as usize;
        align(a) + align(b)
    }
}
