//! Padding and unpadding around the recursion.
//!
//! Zero rows and columns multiply to zero, so a padded product restricted
//! to the top-left n×n block is exactly the unpadded product.

use crate::config::PaddingScheme;
use crate::error::{StrassenError, element_count};
use crate::matrix::Matrix;

/// Smallest dimension `>= n` the recursion can halve down to the base case.
///
/// ```
/// use strassen::PaddingScheme;
/// use strassen::padding::padded_dimension;
///
/// assert_eq!(padded_dimension(65, 64, PaddingScheme::PowerOfTwo).unwrap(), 128);
/// assert_eq!(padded_dimension(65, 64, PaddingScheme::Halving).unwrap(), 66);
/// ```
pub fn padded_dimension(
    n: usize,
    threshold: usize,
    scheme: PaddingScheme,
) -> Result<usize, StrassenError> {
    if n == 0 {
        return Err(StrassenError::invalid(n, "dimension must be positive"));
    }
    let threshold = threshold.max(1);
    let target = match scheme {
        PaddingScheme::PowerOfTwo => n.checked_next_power_of_two(),
        PaddingScheme::Halving => {
            let mut block = n;
            let mut halvings = 0u32;
            while block > threshold {
                block = block.div_ceil(2);
                halvings += 1;
            }
            1usize
                .checked_shl(halvings)
                .and_then(|scale| block.checked_mul(scale))
        }
    };
    let target = target.ok_or_else(|| StrassenError::invalid(n, "padded dimension overflows"))?;
    element_count(target)?;
    Ok(target)
}

/// Whether `n` halves evenly at every level above `threshold`.
pub fn is_splittable(n: usize, threshold: usize) -> bool {
    let threshold = threshold.max(1);
    let mut n = n;
    if n == 0 {
        return false;
    }
    while n > threshold {
        if n % 2 != 0 {
            return false;
        }
        n /= 2;
    }
    true
}

/// Zero-padded copy of `m` at dimension `target`.
pub fn pad(m: &Matrix, target: usize) -> Result<Matrix, StrassenError> {
    pad_slice(m.as_slice(), m.dim(), target)
}

/// Zero-padded `target`×`target` copy of an n×n row-major slice.
pub fn pad_slice(src: &[f64], n: usize, target: usize) -> Result<Matrix, StrassenError> {
    let required = element_count(n)?;
    if target < n {
        return Err(StrassenError::invalid(target, "pad target smaller than source"));
    }
    if src.len() < required {
        return Err(StrassenError::InputTooSmall {
            operand: "source",
            required,
            len: src.len(),
        });
    }
    element_count(target)?;
    let mut out = Matrix::zeros(target);
    for (i, row) in src[..required].chunks_exact(n).enumerate() {
        out.row_mut(i)[..n].copy_from_slice(row);
    }
    Ok(out)
}

/// The top-left n×n block of `padded`.
pub fn unpad(padded: &Matrix, n: usize) -> Result<Matrix, StrassenError> {
    let mut out = Matrix::zeros(n);
    unpad_into(padded, n, out.as_mut_slice())?;
    Ok(out)
}

/// Write the top-left n×n block of `padded` into the first n² slots of `out`.
pub fn unpad_into(padded: &Matrix, n: usize, out: &mut [f64]) -> Result<(), StrassenError> {
    let required = element_count(n)?;
    if n > padded.dim() {
        return Err(StrassenError::invalid(n, "unpad target larger than source"));
    }
    if out.len() < required {
        return Err(StrassenError::BufferTooSmall {
            required,
            capacity: out.len(),
        });
    }
    for (i, row) in out[..required].chunks_exact_mut(n).enumerate() {
        row.copy_from_slice(&padded.row(i)[..n]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_targets() {
        let cases = [(1, 1), (2, 2), (3, 4), (5, 8), (17, 32), (128, 128)];
        for (n, expected) in cases {
            assert_eq!(padded_dimension(n, 1, PaddingScheme::PowerOfTwo).unwrap(), expected);
        }
    }

    #[test]
    fn halving_targets() {
        let cases = [
            (5, 64, 5),
            (64, 64, 64),
            (65, 64, 66),
            (129, 64, 132),
            (3, 1, 4),
            (17, 1, 32),
            (100, 16, 104),
        ];
        for (n, threshold, expected) in cases {
            let target = padded_dimension(n, threshold, PaddingScheme::Halving).unwrap();
            assert_eq!(target, expected, "n={n} threshold={threshold}");
            assert!(is_splittable(target, threshold));
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        for scheme in [PaddingScheme::PowerOfTwo, PaddingScheme::Halving] {
            assert!(matches!(
                padded_dimension(0, 64, scheme),
                Err(StrassenError::InvalidDimension { dim: 0, .. })
            ));
        }
    }

    #[test]
    fn overflowing_target_is_rejected() {
        assert!(padded_dimension(usize::MAX / 2 + 2, 1, PaddingScheme::PowerOfTwo).is_err());
    }

    #[test]
    fn splittable_dimensions() {
        assert!(is_splittable(1, 1));
        assert!(is_splittable(96, 3));
        assert!(is_splittable(7, 8));
        assert!(!is_splittable(6, 1));
        assert!(!is_splittable(0, 4));
    }

    #[test]
    fn pad_zeroes_the_border() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let p = pad(&m, 3).unwrap();
        assert_eq!(p.as_slice(), &[1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn pad_then_unpad_round_trips() {
        let m = Matrix::from_vec(5, (0..25i32).map(|i| f64::from(i) * 0.1).collect()).unwrap();
        for target in [5, 6, 8, 13] {
            let back = unpad(&pad(&m, target).unwrap(), 5).unwrap();
            assert_eq!(back, m);
        }
    }

    #[test]
    fn pad_rejects_shrinking() {
        assert!(pad(&Matrix::identity(4), 3).is_err());
    }

    #[test]
    fn unpad_into_checks_capacity() {
        let p = Matrix::identity(4);
        let mut small = [0.0; 8];
        assert!(matches!(
            unpad_into(&p, 3, &mut small),
            Err(StrassenError::BufferTooSmall { required: 9, capacity: 8 })
        ));
        let mut big = [7.0; 10];
        unpad_into(&p, 3, &mut big).unwrap();
        assert_eq!(&big[..9], &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(big[9], 7.0);
        assert!(unpad(&p, 5).is_err());
    }
}
