// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::format::FixFormat;
use num_bigint::BigInt;
use thiserror::Error;

/// Malformed or unrepresentable formats, and operands that do not match an
/// operator's declared formats.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Non-positive bit width {width} for format ({signed},{int_bits},{frac_bits})")]
    NonPositiveWidth {
        signed: u8,
        int_bits: i32,
        frac_bits: i32,
        width: i64,
    },

    #[error("Format ({signed},{int_bits},{frac_bits}) exceeds the {limit}-bit limit")]
    TooWide {
        signed: u8,
        int_bits: i64,
        frac_bits: i64,
        limit: i32,
    },

    #[error("Cannot parse fixed-point format {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("Raw value {raw} does not fit format {format}")]
    RawOutOfRange { raw: BigInt, format: FixFormat },

    #[error("Operand {position} of {operator} has format {found}, expected {expected}")]
    OperandMismatch {
        operator: &'static str,
        position: usize,
        expected: FixFormat,
        found: FixFormat,
    },

    #[error("Cannot convert non-finite value {0} to fixed point")]
    NonFinite(f64),

    #[error("Value {value} is not a multiple of the {format} step")]
    OffGrid { value: f64, format: FixFormat },
}

/// Empty or mismatched vectors and matrices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Empty {0}")]
    Empty(&'static str),

    #[error("Length mismatch: expected {expected}, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Matrix row {row} has {actual} columns, vector has {expected} elements")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, FixError>;
