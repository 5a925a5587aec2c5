// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{fmt, raws};
use crate::stimulus::{MatrixPattern, StimulusGenerator, SweepDirection};
use crate::value::FixValue;

#[test]
fn test_boundaries_are_max_then_min() {
    let f = fmt("(1,3,2)");
    let b = StimulusGenerator::boundaries(f);
    assert_eq!(raws(&b), vec![31, -32]);
}

#[test]
fn test_forward_sweep_excludes_max() {
    let f = fmt("(0,4,4)");
    let stim = StimulusGenerator::new(42);
    // step 15.9375 / 4; the 127.5 tie rounds up
    let s = stim.sweep(f, 4, SweepDirection::Forward).unwrap();
    assert_eq!(raws(&s), vec![0, 64, 128, 191]);
}

#[test]
fn test_reverse_sweep_includes_min() {
    let f = fmt("(0,4,4)");
    let stim = StimulusGenerator::new(42);
    let s = stim.sweep(f, 3, SweepDirection::Reverse).unwrap();
    assert_eq!(raws(&s), vec![255, 128, 0]);
}

#[test]
fn test_linspace_degenerate_lengths() {
    let f = fmt("(0,4,4)");
    let stim = StimulusGenerator::new(42);
    assert!(stim.linspace(f, 0.0, 1.0, 0, true).unwrap().is_empty());
    assert_eq!(raws(&stim.linspace(f, 2.0, 5.0, 1, true).unwrap()), vec![32]);
}

#[test]
fn test_uniform_stays_in_range() {
    let f = fmt("(1,3,2)");
    let mut stim = StimulusGenerator::new(7);
    let samples = stim.uniform(f, 500).unwrap();
    assert_eq!(samples.len(), 500);
    for s in &samples {
        assert_eq!(s.format(), f);
        assert!(s.to_real() >= f.min_value() && s.to_real() <= f.max_value());
    }
    // Not all the same value.
    assert!(samples.iter().any(|s| *s != samples[0]));
}

#[test]
fn test_unit_samples() {
    let mut stim = StimulusGenerator::new(1);
    for _ in 0..1000 {
        let u = stim.next_unit();
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn test_vector_set_layout() {
    let f = fmt("(0,4,4)");
    let mut stim = StimulusGenerator::new(42);
    let set = stim.vector_set(f, 4, 3).unwrap();
    assert_eq!(set.len(), 5);
    assert!(set.iter().all(|v| v.len() == 4));
    assert!(set[0].iter().all(|v| *v == FixValue::max_of(f)));
    assert!(set[1].iter().all(|v| *v == FixValue::min_of(f)));
}

#[test]
fn test_cross_product_order() {
    let (left, right) = StimulusGenerator::cross_product(&[1, 2], &[10, 20, 30]);
    assert_eq!(left, vec![1, 1, 1, 2, 2, 2]);
    assert_eq!(right, vec![10, 20, 30, 10, 20, 30]);
}

#[test]
fn test_cross_product_covers_boundary_pairs() {
    let f = fmt("(1,3,2)");
    let mut stim = StimulusGenerator::new(42);
    let a = stim.vector_set(f, 2, 1).unwrap();
    let b = stim.vector_set(f, 2, 1).unwrap();
    let (left, right) = StimulusGenerator::cross_product(&a, &b);
    assert_eq!(left.len(), 9);
    let max = vec![FixValue::max_of(f); 2];
    let min = vec![FixValue::min_of(f); 2];
    for (x, y) in [(&max, &max), (&max, &min), (&min, &max), (&min, &min)] {
        assert!(left.iter().zip(&right).any(|(l, r)| l == x && r == y));
    }
}

#[test]
fn test_matrix_patterns() {
    let stim = StimulusGenerator::new(0);
    let f = fmt("(0,4,1)");
    let desc = stim.matrix(f, 2, 2, MatrixPattern::Descending);
    assert_eq!(raws(&desc[0]), vec![31, 30]);
    assert_eq!(raws(&desc[1]), vec![29, 28]);

    // past the range the pattern saturates
    let tiny = fmt("(0,1,0)");
    let asc = stim.matrix(tiny, 2, 2, MatrixPattern::Ascending);
    assert_eq!(raws(&asc[0]), vec![0, 1]);
    assert_eq!(raws(&asc[1]), vec![1, 1]);
}

#[test]
fn test_matrix_pattern_serde_accepts_upper_case() {
    let p: MatrixPattern = serde_json::from_str("\"ASCENDING\"").unwrap();
    assert_eq!(p, MatrixPattern::Ascending);
    let p: MatrixPattern = serde_json::from_str("\"descending\"").unwrap();
    assert_eq!(p, MatrixPattern::Descending);
}
