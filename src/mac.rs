// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Multiply-accumulate: dot product and matrix-vector product.

use crate::error::{FormatError, Result, ShapeError};
use crate::format::FixFormat;
use crate::mode::{RoundMode, SaturateMode};
use crate::ops::{FixAdder, FixMultiplier, FixOperator};
use crate::overflow::OverflowLog;
use crate::value::FixValue;

/// Element-wise multiply followed by a left-to-right accumulation.
///
/// The accumulator is narrowed to the output format after every addition,
/// one term per step, the same as a hardware accumulator adding one product
/// per cycle. Rounding and saturation make that order observable, so the
/// reduction is never reordered or split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixDotProduct {
    mult: FixMultiplier,
    add: FixAdder,
}

impl FixDotProduct {
    pub fn new(
        fmt_a: FixFormat,
        fmt_b: FixFormat,
        fmt_out: FixFormat,
        round: RoundMode,
        saturate: SaturateMode,
    ) -> core::result::Result<Self, FormatError> {
        Ok(Self {
            mult: FixMultiplier::new(fmt_a, fmt_b, fmt_out, round, saturate)?,
            add: FixAdder::new(fmt_out, fmt_out, fmt_out, round, saturate)?,
        })
    }

    pub fn multiplier(&self) -> &FixMultiplier {
        &self.mult
    }

    pub fn adder(&self) -> &FixAdder {
        &self.add
    }

    pub fn output_format(&self) -> FixFormat {
        self.add.output_format()
    }

    pub fn calc(
        &self,
        vector_a: &[FixValue],
        vector_b: &[FixValue],
        log: &mut OverflowLog,
    ) -> Result<FixValue> {
        if vector_a.is_empty() || vector_b.is_empty() {
            return Err(ShapeError::Empty("input vector").into());
        }
        if vector_a.len() != vector_b.len() {
            return Err(ShapeError::LengthMismatch {
                expected: vector_a.len(),
                actual: vector_b.len(),
            }
            .into());
        }

        let products = self.mult.process_slice(vector_a, vector_b, log)?;
        let mut terms = products.into_iter();
        let mut acc = match terms.next() {
            Some(first) => first,
            None => return Err(ShapeError::Empty("input vector").into()),
        };
        for term in terms {
            acc = self.add.process(&acc, &term, log)?;
        }
        Ok(acc)
    }
}

/// One independent dot product per matrix row against a shared vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixVectorProduct {
    dot: FixDotProduct,
}

impl MatrixVectorProduct {
    pub fn new(
        fmt_matrix: FixFormat,
        fmt_vector: FixFormat,
        fmt_out: FixFormat,
        round: RoundMode,
        saturate: SaturateMode,
    ) -> core::result::Result<Self, FormatError> {
        Ok(Self {
            dot: FixDotProduct::new(fmt_matrix, fmt_vector, fmt_out, round, saturate)?,
        })
    }

    pub fn dot_product(&self) -> &FixDotProduct {
        &self.dot
    }

    pub fn calc<R: AsRef<[FixValue]>>(
        &self,
        matrix: &[R],
        vector: &[FixValue],
        log: &mut OverflowLog,
    ) -> Result<Vec<FixValue>> {
        if matrix.is_empty() {
            return Err(ShapeError::Empty("matrix").into());
        }
        for (row, cols) in matrix.iter().enumerate() {
            let actual = cols.as_ref().len();
            if actual != vector.len() {
                return Err(ShapeError::RowLengthMismatch {
                    row,
                    expected: vector.len(),
                    actual,
                }
                .into());
            }
        }

        matrix
            .iter()
            .map(|row| self.dot.calc(row.as_ref(), vector, log))
            .collect()
    }
}
