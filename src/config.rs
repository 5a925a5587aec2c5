// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

use crate::mode::{RoundMode, SaturateMode};

/// Seed used by the reference test benches.
pub const DEFAULT_SEED: u64 = 42;

/// Rounding applied by arithmetic operators unless configured otherwise.
pub const DEFAULT_ROUND: RoundMode = RoundMode::Truncate;

/// Saturation applied by arithmetic operators unless configured otherwise.
pub const DEFAULT_SATURATE: SaturateMode = SaturateMode::SaturateWarn;
