// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::fmt;
use crate::error::FormatError;
use crate::format::{derive_add_format, derive_mult_format, FixFormat, MAX_FORMAT_BITS};

#[test]
fn test_format_ranges() {
    let f = fmt("(0,4,4)");
    assert!(!f.signed());
    assert_eq!(f.width(), 8);
    assert_eq!(f.min_value(), 0.0);
    assert_eq!(f.max_value(), 15.9375);
    assert_eq!(f.step(), 0.0625);

    let s = fmt("(1,3,2)");
    assert_eq!(s.width(), 6);
    assert_eq!(s.min_value(), -8.0);
    assert_eq!(s.max_value(), 7.75);
}

#[test]
fn test_negative_fraction_bits() {
    // Stores 6 bits, each step worth 4.
    let f = fmt("(1, 7, -2)");
    assert_eq!(f.width(), 6);
    assert_eq!(f.step(), 4.0);
    assert_eq!(f.min_value(), -128.0);
    assert_eq!(f.max_value(), 124.0);
}

#[test]
fn test_negative_int_bits() {
    let f = fmt("(0,-2,6)");
    assert_eq!(f.width(), 4);
    assert_eq!(f.max_value(), 0.25 - 1.0 / 64.0);
}

#[test]
fn test_parse_errors() {
    for bad in ["(2,4,4)", "0,4,4", "(0,4)", "(0,x,4)", "(0,4,4,1)", ""] {
        let err = bad.parse::<FixFormat>().unwrap_err();
        assert!(matches!(err, FormatError::Parse { .. }), "{bad}: {err:?}");
    }
}

#[test]
fn test_non_positive_width() {
    assert!(matches!(
        FixFormat::new(false, 0, 0),
        Err(FormatError::NonPositiveWidth { width: 0, .. })
    ));
    assert!(matches!(
        "(0,-3,2)".parse::<FixFormat>(),
        Err(FormatError::NonPositiveWidth { width: -1, .. })
    ));
    assert!(FixFormat::new(true, -1, 1).is_ok());
}

#[test]
fn test_oversized_formats_are_rejected() {
    for bad in [
        "(0,2000000000,2000000000)",
        "(1,2147483647,0)",
        "(0,4,-2147483648)",
        "(0,1048577,0)",
    ] {
        let err = bad.parse::<FixFormat>().unwrap_err();
        assert!(matches!(err, FormatError::TooWide { .. }), "{bad}: {err:?}");
    }
    let widest = FixFormat::new(true, MAX_FORMAT_BITS - 1, 0).unwrap();
    assert_eq!(widest.width(), MAX_FORMAT_BITS as u32);
    assert_eq!(
        FixFormat::new(false, -MAX_FORMAT_BITS, MAX_FORMAT_BITS).unwrap_err(),
        FormatError::NonPositiveWidth {
            signed: 0,
            int_bits: -MAX_FORMAT_BITS,
            frac_bits: MAX_FORMAT_BITS,
            width: 0,
        }
    );
}

#[test]
fn test_derived_formats_past_the_limit_fail() {
    let a = FixFormat::new(false, MAX_FORMAT_BITS / 2 + 1, 0).unwrap();
    assert!(matches!(derive_mult_format(a, a), Err(FormatError::TooWide { .. })));

    let wide = FixFormat::new(true, MAX_FORMAT_BITS - 1, 0).unwrap();
    assert!(matches!(derive_add_format(wide, wide), Err(FormatError::TooWide { .. })));

    let fine = FixFormat::new(false, 0, MAX_FORMAT_BITS).unwrap();
    assert!(matches!(derive_mult_format(fine, fine), Err(FormatError::TooWide { .. })));
}

#[test]
fn test_display_is_canonical() {
    assert_eq!(fmt("( 1 , 7 , -2 )").to_string(), "(1,7,-2)");
    assert_eq!(fmt("(0,4,4)").to_string(), "(0,4,4)");
}

#[test]
fn test_serde_as_string() {
    let f: FixFormat = serde_json::from_str("\"(0, 10, 8)\"").unwrap();
    assert_eq!(f, fmt("(0,10,8)"));
    assert_eq!(serde_json::to_string(&f).unwrap(), "\"(0,10,8)\"");
    assert!(serde_json::from_str::<FixFormat>("\"(0,0,0)\"").is_err());
}

#[test]
fn test_mult_format() {
    assert_eq!(derive_mult_format(fmt("(0,4,4)"), fmt("(0,4,4)")).unwrap(), fmt("(0,8,8)"));
    // signed * signed needs the extra integer bit
    assert_eq!(derive_mult_format(fmt("(1,5,8)"), fmt("(1,7,9)")).unwrap(), fmt("(1,13,17)"));
    assert_eq!(derive_mult_format(fmt("(0,11,-4)"), fmt("(1,6,2)")).unwrap(), fmt("(1,17,-2)"));
    assert_eq!(derive_mult_format(fmt("(1,7,-2)"), fmt("(0,2,8)")).unwrap(), fmt("(1,9,6)"));
}

#[test]
fn test_add_format() {
    assert_eq!(derive_add_format(fmt("(0,4,4)"), fmt("(0,4,4)")).unwrap(), fmt("(0,5,4)"));
    assert_eq!(derive_add_format(fmt("(1,3,2)"), fmt("(0,5,8)")).unwrap(), fmt("(1,6,8)"));
    assert_eq!(derive_add_format(fmt("(0,11,-4)"), fmt("(0,4,5)")).unwrap(), fmt("(0,12,5)"));
}

#[test]
fn test_derived_formats_are_symmetric() {
    let a = fmt("(1,3,2)");
    let b = fmt("(0,5,8)");
    assert_eq!(derive_mult_format(a, b).unwrap(), derive_mult_format(b, a).unwrap());
    assert_eq!(derive_add_format(a, b).unwrap(), derive_add_format(b, a).unwrap());
}
