//! Property-based tests for the padding layer, block algebra and engine.

use proptest::collection::vec;
use proptest::prelude::*;

use strassen::matrix::block;
use strassen::matrix::naive_ijk::reference_product;
use strassen::padding::{is_splittable, pad, padded_dimension, unpad};
use strassen::{Matrix, PaddingScheme, Strassen, StrassenConfig};

/// An n×n matrix with entries in [-100, 100].
fn matrix(n: usize) -> impl Strategy<Value = Matrix> {
    vec(-100.0f64..100.0, n * n).prop_map(move |data| Matrix::from_vec(n, data).unwrap())
}

/// Two matrices of the same random dimension.
fn operands(max_n: usize) -> impl Strategy<Value = (Matrix, Matrix)> {
    (1..=max_n).prop_flat_map(|n| (matrix(n), matrix(n)))
}

fn close(expected: &Matrix, actual: &Matrix, tol: f64) -> bool {
    expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .all(|(x, y)| (x - y).abs() <= tol * (1.0 + x.abs()))
}

fn scheme() -> impl Strategy<Value = PaddingScheme> {
    prop_oneof![Just(PaddingScheme::PowerOfTwo), Just(PaddingScheme::Halving)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Strassen agrees with the triple loop for any size and threshold.
    #[test]
    fn strassen_matches_reference((a, b) in operands(24), threshold in 1usize..8, padding in scheme()) {
        let engine = Strassen::new(StrassenConfig {
            base_case_threshold: threshold,
            padding,
            ..StrassenConfig::default()
        });
        let product = engine.multiply(&a, &b).unwrap();
        let expected = reference_product(&a, &b);
        prop_assert!(close(&expected, &product, 1e-6), "n={} threshold={}", a.dim(), threshold);
    }

    /// The padded dimension is never smaller and always halves cleanly.
    #[test]
    fn padded_dimension_is_splittable(n in 1usize..5000, threshold in 1usize..128, padding in scheme()) {
        let target = padded_dimension(n, threshold, padding).unwrap();
        prop_assert!(target >= n);
        prop_assert!(is_splittable(target, threshold));
        if padding == PaddingScheme::PowerOfTwo {
            prop_assert!(target.is_power_of_two());
        } else {
            let pow2 = padded_dimension(n, threshold, PaddingScheme::PowerOfTwo).unwrap();
            prop_assert!(target <= pow2);
        }
    }

    /// Padding then unpadding gives back the exact matrix.
    #[test]
    fn pad_unpad_round_trip(m in (1usize..20).prop_flat_map(matrix), extra in 0usize..10) {
        let n = m.dim();
        let padded = pad(&m, n + extra).unwrap();
        prop_assert_eq!(padded.dim(), n + extra);
        prop_assert_eq!(unpad(&padded, n).unwrap(), m);
    }

    /// Merging the quadrants of a split reproduces the input.
    #[test]
    fn split_merge_round_trip(m in (1usize..12).prop_flat_map(|h| matrix(2 * h))) {
        let quadrants = block::split(&m).unwrap();
        prop_assert_eq!(quadrants.dim(), m.dim() / 2);
        prop_assert_eq!(block::merge(quadrants).unwrap(), m);
    }

    /// (x + y) - y == x up to one rounding step per element.
    #[test]
    fn add_then_subtract((x, y) in operands(10)) {
        let sum = block::add(&x, &y).unwrap();
        let back = block::subtract(&sum, &y).unwrap();
        prop_assert!(close(&x, &back, 1e-12));
    }

    /// Sequential and parallel runs are bit-identical.
    #[test]
    fn parallel_is_deterministic((a, b) in operands(40)) {
        let sequential = Strassen::new(StrassenConfig::with_threshold(2));
        let parallel = Strassen::new(StrassenConfig {
            base_case_threshold: 2,
            parallel: true,
            parallel_threshold: 4,
            ..StrassenConfig::default()
        });
        prop_assert_eq!(
            sequential.multiply(&a, &b).unwrap(),
            parallel.multiply(&a, &b).unwrap()
        );
    }
}
