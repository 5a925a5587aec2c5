// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! fixmac-kernel: a bit-exact fixed-point multiply-accumulate reference model.
//!
//! Values are unbounded scaled integers tagged with a [`FixFormat`]. Every
//! narrowing step goes through one rounding/saturation engine, and the
//! accumulation order of the dot product matches a one-term-per-cycle
//! hardware accumulator.

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod mac;
pub mod mode;
pub mod ops;
pub mod overflow;
pub mod stimulus;
pub mod value;

pub use error::{FixError, FormatError, Result, ShapeError};
pub use format::{derive_add_format, derive_mult_format, FixFormat, MAX_FORMAT_BITS};
pub use mac::{FixDotProduct, MatrixVectorProduct};
pub use mode::{RoundMode, SaturateMode};
pub use ops::{FixAdder, FixMultiplier, FixOperator};
pub use overflow::{OverflowLog, OverflowNotice};
pub use stimulus::{MatrixPattern, StimulusGenerator, SweepDirection};
pub use value::FixValue;

#[cfg(test)]
pub mod tests;
