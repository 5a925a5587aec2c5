// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod format_tests;
pub mod engine_tests;
pub mod stimulus_tests;

use crate::format::FixFormat;
use crate::value::FixValue;
use num_traits::ToPrimitive;

/// Parses a `(S,I,F)` literal.
pub fn fmt(s: &str) -> FixFormat {
    s.parse().expect("valid format literal")
}

pub fn val(raw: i64, format: FixFormat) -> FixValue {
    FixValue::new(raw, format).expect("raw in range")
}

pub fn raw_i64(v: &FixValue) -> i64 {
    v.raw().to_i64().expect("raw fits i64")
}

pub fn raws(values: &[FixValue]) -> Vec<i64> {
    values.iter().map(raw_i64).collect()
}
