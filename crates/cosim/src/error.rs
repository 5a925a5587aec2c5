// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use fixmac_kernel::{FixError, FixFormat, FormatError, ShapeError};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CosimError {
    #[error("Fixed-point error: {0}")]
    Fix(#[from] FixError),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{file} line {line}: expected {expected} values, found {actual}")]
    InvalidRecordShape {
        file: String,
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{file} line {line}: invalid value {token:?}")]
    InvalidValue {
        file: String,
        line: usize,
        token: String,
    },
    #[error("{file}: value has format {found}, file is declared {expected}")]
    FormatMismatch {
        file: String,
        expected: FixFormat,
        found: FixFormat,
    },
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

impl From<FormatError> for CosimError {
    fn from(e: FormatError) -> Self {
        CosimError::Fix(e.into())
    }
}

impl From<ShapeError> for CosimError {
    fn from(e: ShapeError) -> Self {
        CosimError::Fix(e.into())
    }
}

pub type Result<T> = std::result::Result<T, CosimError>;
