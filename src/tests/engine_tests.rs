// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{fmt, raw_i64, val};
use crate::engine::{convert, from_real};
use crate::error::FormatError;
use crate::mode::{RoundMode, SaturateMode};
use crate::value::FixValue;
use num_bigint::BigInt;

/// Narrows a quarter-step value of `(1,8,2)` to an integer with `mode`.
fn round_to_int(real: f64, mode: RoundMode) -> i64 {
    let src = fmt("(1,8,2)");
    let v = val((real * 4.0) as i64, src);
    let out = convert(&v, fmt("(1,8,0)"), mode, SaturateMode::Saturate);
    assert!(!out.overflowed);
    raw_i64(&out.value)
}

#[test]
fn test_truncate_floors() {
    assert_eq!(round_to_int(2.5, RoundMode::Truncate), 2);
    assert_eq!(round_to_int(2.75, RoundMode::Truncate), 2);
    assert_eq!(round_to_int(-2.5, RoundMode::Truncate), -3);
    assert_eq!(round_to_int(-2.25, RoundMode::Truncate), -3);
}

#[test]
fn test_nearest_modes_on_ties() {
    let cases = [
        // (value, NonSymPos, NonSymNeg, SymInf, SymZero, ConvEven, ConvOdd)
        (2.5, 3, 2, 3, 2, 2, 3),
        (-2.5, -2, -3, -3, -2, -2, -3),
        (3.5, 4, 3, 4, 3, 4, 3),
        (-3.5, -3, -4, -4, -3, -4, -3),
    ];
    for (x, pos, neg, inf, zero, even, odd) in cases {
        assert_eq!(round_to_int(x, RoundMode::NonSymPos), pos, "NonSymPos {x}");
        assert_eq!(round_to_int(x, RoundMode::NonSymNeg), neg, "NonSymNeg {x}");
        assert_eq!(round_to_int(x, RoundMode::SymInf), inf, "SymInf {x}");
        assert_eq!(round_to_int(x, RoundMode::SymZero), zero, "SymZero {x}");
        assert_eq!(round_to_int(x, RoundMode::ConvEven), even, "ConvEven {x}");
        assert_eq!(round_to_int(x, RoundMode::ConvOdd), odd, "ConvOdd {x}");
    }
}

#[test]
fn test_nearest_modes_off_ties() {
    for mode in RoundMode::ALL.into_iter().filter(|m| *m != RoundMode::Truncate) {
        assert_eq!(round_to_int(2.25, mode), 2, "{mode}");
        assert_eq!(round_to_int(2.75, mode), 3, "{mode}");
        assert_eq!(round_to_int(-2.25, mode), -2, "{mode}");
        assert_eq!(round_to_int(-2.75, mode), -3, "{mode}");
    }
}

#[test]
fn test_widening_is_exact() {
    let v = val(17, fmt("(0,4,4)"));
    let out = convert(&v, fmt("(0,6,8)"), RoundMode::Truncate, SaturateMode::Wrap);
    assert_eq!(raw_i64(&out.value), 272);
    assert_eq!(out.value.to_real(), v.to_real());
}

#[test]
fn test_negative_fraction_target() {
    let src = fmt("(0,8,0)");
    let dst = fmt("(0,11,-4)");
    let trunc = convert(&val(100, src), dst, RoundMode::Truncate, SaturateMode::Saturate);
    assert_eq!(raw_i64(&trunc.value), 6);
    assert_eq!(trunc.value.to_real(), 96.0);

    let nearest = convert(&val(104, src), dst, RoundMode::NonSymPos, SaturateMode::Saturate);
    assert_eq!(raw_i64(&nearest.value), 7);
}

#[test]
fn test_saturation_modes_above_range() {
    let big = val(300, fmt("(0,10,0)"));
    let target = fmt("(0,4,4)");

    let sat = convert(&big, target, RoundMode::Truncate, SaturateMode::Saturate);
    assert_eq!(sat.value, FixValue::max_of(target));
    assert!(!sat.overflowed);

    let warn = convert(&big, target, RoundMode::Truncate, SaturateMode::SaturateWarn);
    assert_eq!(warn.value, FixValue::max_of(target));
    assert!(warn.overflowed);

    // 300 * 16 = 4800 = 18 * 256 + 192
    let wrap = convert(&big, target, RoundMode::Truncate, SaturateMode::Wrap);
    assert_eq!(raw_i64(&wrap.value), 192);
    assert!(!wrap.overflowed);

    let wrap_warn = convert(&big, target, RoundMode::Truncate, SaturateMode::WrapWarn);
    assert_eq!(raw_i64(&wrap_warn.value), 192);
    assert!(wrap_warn.overflowed);
}

#[test]
fn test_saturation_below_range() {
    let v = val(-129, fmt("(1,10,0)"));
    let target = fmt("(1,7,0)");

    let sat = convert(&v, target, RoundMode::Truncate, SaturateMode::SaturateWarn);
    assert_eq!(raw_i64(&sat.value), -128);
    assert!(sat.overflowed);

    let wrap = convert(&v, target, RoundMode::Truncate, SaturateMode::Wrap);
    assert_eq!(raw_i64(&wrap.value), 127);

    // negative into unsigned clamps to zero
    let neg = val(-1, fmt("(1,4,4)"));
    let out = convert(&neg, fmt("(0,4,4)"), RoundMode::Truncate, SaturateMode::Saturate);
    assert_eq!(raw_i64(&out.value), 0);
}

#[test]
fn test_rounding_can_push_into_saturation() {
    // 15.96875 rounds up to 16.0, one step past the max of (0,4,4).
    let v = val(511, fmt("(0,4,5)"));
    let out = convert(&v, fmt("(0,4,4)"), RoundMode::NonSymPos, SaturateMode::SaturateWarn);
    assert_eq!(raw_i64(&out.value), 255);
    assert!(out.overflowed);
}

#[test]
fn test_from_real() {
    let f = fmt("(0,4,4)");
    let max = from_real(15.9375, f, RoundMode::Truncate, SaturateMode::Saturate).unwrap();
    assert_eq!(raw_i64(&max.value), 255);

    let tenth = from_real(0.1, f, RoundMode::Truncate, SaturateMode::Saturate).unwrap();
    assert_eq!(raw_i64(&tenth.value), 1);
    let tenth = from_real(0.1, f, RoundMode::NonSymPos, SaturateMode::Saturate).unwrap();
    assert_eq!(raw_i64(&tenth.value), 2);

    let neg = from_real(-1.0, f, RoundMode::Truncate, SaturateMode::Saturate).unwrap();
    assert_eq!(raw_i64(&neg.value), 0);

    let huge = from_real(1e300, fmt("(1,4,4)"), RoundMode::Truncate, SaturateMode::SaturateWarn).unwrap();
    assert_eq!(raw_i64(&huge.value), 255);
    assert!(huge.overflowed);

    assert!(matches!(
        from_real(f64::NAN, f, RoundMode::Truncate, SaturateMode::Saturate),
        Err(FormatError::NonFinite(_))
    ));
}

#[test]
fn test_from_real_exact() {
    let f = fmt("(0,4,4)");
    assert_eq!(raw_i64(&FixValue::from_real_exact(2.5, f).unwrap()), 40);
    assert!(matches!(
        FixValue::from_real_exact(0.3, f),
        Err(FormatError::OffGrid { .. })
    ));
    assert!(matches!(
        FixValue::from_real_exact(16.0, f),
        Err(FormatError::RawOutOfRange { .. })
    ));
    let coarse = fmt("(1,7,-2)");
    assert_eq!(raw_i64(&FixValue::from_real_exact(-12.0, coarse).unwrap()), -3);
}

#[test]
fn test_value_range_check() {
    let f = fmt("(1,4,4)");
    assert!(FixValue::new(255, f).is_ok());
    assert!(FixValue::new(-256, f).is_ok());
    assert!(matches!(
        FixValue::new(256, f),
        Err(FormatError::RawOutOfRange { .. })
    ));
}

#[test]
fn test_to_bits_twos_complement() {
    let f = fmt("(1,4,4)");
    assert_eq!(val(-1, f).to_bits(), BigInt::from(511));
    assert_eq!(val(-256, f).to_bits(), BigInt::from(256));
    assert_eq!(val(37, f).to_bits(), BigInt::from(37));
}
