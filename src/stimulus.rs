// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic stimulus generation.
//!
//! All randomness comes from one `Xoshiro256StarStar` seeded once from an
//! explicit `u64`. A uniform sample is `(next_u64() >> 11) * 2^-53`, so the
//! stream is reproducible in any language that implements xoshiro256**
//! and SplitMix64 seeding. The generator is never reseeded; callers draw in
//! a fixed order (boundaries, then sweeps, then random fill).

use crate::engine;
use crate::error::FormatError;
use crate::format::FixFormat;
use crate::mode::{RoundMode, SaturateMode};
use crate::value::FixValue;
use num_bigint::BigInt;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    /// `min` up to (excluding) `max`.
    Forward,
    /// `max` down to (including) `min`.
    Reverse,
}

/// Deterministic matrix fill used by the matrix-vector scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixPattern {
    /// Element `(r, c)` is `min + (c + r*cols)` steps.
    #[serde(alias = "ASCENDING")]
    Ascending,
    /// Element `(r, c)` is `max - (c + r*cols)` steps.
    #[serde(alias = "DESCENDING")]
    Descending,
}

pub struct StimulusGenerator {
    rng: Xoshiro256StarStar,
    round: RoundMode,
    saturate: SaturateMode,
}

impl StimulusGenerator {
    /// Real samples are quantized to nearest (ties up) and clamped silently.
    pub fn new(seed: u64) -> Self {
        Self::with_quantizer(seed, RoundMode::NonSymPos, SaturateMode::Saturate)
    }

    pub fn with_quantizer(seed: u64, round: RoundMode, saturate: SaturateMode) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            round,
            saturate,
        }
    }

    pub fn quantize(&self, x: f64, fmt: FixFormat) -> Result<FixValue, FormatError> {
        Ok(FixValue::from_real(x, fmt, self.round, self.saturate)?.value)
    }

    /// `[max, min]` of the format.
    pub fn boundaries(fmt: FixFormat) -> Vec<FixValue> {
        vec![FixValue::max_of(fmt), FixValue::min_of(fmt)]
    }

    /// `n` evenly spaced samples, numpy `linspace` semantics.
    pub fn linspace(
        &self,
        fmt: FixFormat,
        start: f64,
        stop: f64,
        n: usize,
        endpoint: bool,
    ) -> Result<Vec<FixValue>, FormatError> {
        let div = if endpoint { n.saturating_sub(1) } else { n };
        let step = if div > 0 {
            (stop - start) / div as f64
        } else {
            0.0
        };

        (0..n)
            .map(|i| {
                let x = if endpoint && n > 1 && i == n - 1 {
                    stop
                } else {
                    i as f64 * step + start
                };
                self.quantize(x, fmt)
            })
            .collect()
    }

    /// Linear sweep across the whole representable range.
    pub fn sweep(
        &self,
        fmt: FixFormat,
        n: usize,
        direction: SweepDirection,
    ) -> Result<Vec<FixValue>, FormatError> {
        let (min, max) = (fmt.min_value(), fmt.max_value());
        match direction {
            SweepDirection::Forward => self.linspace(fmt, min, max, n, false),
            SweepDirection::Reverse => self.linspace(fmt, max, min, n, true),
        }
    }

    /// Next uniform sample in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// `n` uniform samples over the representable range.
    pub fn uniform(&mut self, fmt: FixFormat, n: usize) -> Result<Vec<FixValue>, FormatError> {
        let (low, high) = (fmt.min_value(), fmt.max_value());
        (0..n)
            .map(|_| {
                let u = self.next_unit();
                self.quantize(low + (high - low) * u, fmt)
            })
            .collect()
    }

    /// `[full(max), full(min), random_1, ..., random_k]`, each of length `dim`.
    pub fn vector_set(
        &mut self,
        fmt: FixFormat,
        dim: usize,
        num_random: usize,
    ) -> Result<Vec<Vec<FixValue>>, FormatError> {
        let mut set: Vec<Vec<FixValue>> = Self::boundaries(fmt)
            .into_iter()
            .map(|v| vec![v; dim])
            .collect();
        for _ in 0..num_random {
            set.push(self.uniform(fmt, dim)?);
        }
        Ok(set)
    }

    /// Every `(a_i, b_j)` pair, `a` as the outer loop.
    pub fn cross_product<T: Clone>(a: &[T], b: &[T]) -> (Vec<T>, Vec<T>) {
        let mut left = Vec::with_capacity(a.len() * b.len());
        let mut right = Vec::with_capacity(a.len() * b.len());
        for x in a {
            for y in b {
                left.push(x.clone());
                right.push(y.clone());
            }
        }
        (left, right)
    }

    /// Pattern matrix of `rows x cols`; values past the range saturate.
    pub fn matrix(
        &self,
        fmt: FixFormat,
        rows: usize,
        cols: usize,
        pattern: MatrixPattern,
    ) -> Vec<Vec<FixValue>> {
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        let offset = BigInt::from(c + r * cols);
                        let raw = match pattern {
                            MatrixPattern::Ascending => fmt.raw_min() + offset,
                            MatrixPattern::Descending => fmt.raw_max() - offset,
                        };
                        engine::convert_raw(
                            &raw,
                            fmt.frac_bits(),
                            fmt,
                            RoundMode::Truncate,
                            SaturateMode::Saturate,
                        )
                        .value
                    })
                    .collect()
            })
            .collect()
    }
}
