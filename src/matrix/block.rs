//! Block algebra: elementwise add/subtract and quadrant split/merge.
//!
//! The public functions validate their operands. The engine calls the
//! crate-private variants, whose preconditions the recursion guarantees.

use super::Matrix;
use crate::error::StrassenError;

/// The four equal blocks of a square matrix.
///
/// ```text
/// | q11 | q12 |
/// | q21 | q22 |
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrants {
    pub q11: Matrix,
    pub q12: Matrix,
    pub q21: Matrix,
    pub q22: Matrix,
}

impl Quadrants {
    /// Dimension of each block.
    pub fn dim(&self) -> usize {
        self.q11.dim()
    }
}

/// Elementwise `x + y`.
pub fn add(x: &Matrix, y: &Matrix) -> Result<Matrix, StrassenError> {
    same_dim(x, y)?;
    Ok(sum(x, y))
}

/// Elementwise `x - y`.
pub fn subtract(x: &Matrix, y: &Matrix) -> Result<Matrix, StrassenError> {
    same_dim(x, y)?;
    Ok(difference(x, y))
}

/// Copy the four quadrants of `m` into freshly owned matrices.
pub fn split(m: &Matrix) -> Result<Quadrants, StrassenError> {
    let n = m.dim();
    if n == 0 || n % 2 != 0 {
        return Err(StrassenError::invalid(n, "split needs a positive even dimension"));
    }
    Ok(quadrants(m))
}

/// Place four equal quadrants into the corners of one matrix.
pub fn merge(q: Quadrants) -> Result<Matrix, StrassenError> {
    let h = q.dim();
    for block in [&q.q12, &q.q21, &q.q22] {
        if block.dim() != h {
            return Err(StrassenError::DimensionMismatch {
                left: h,
                right: block.dim(),
            });
        }
    }
    if h == 0 {
        return Err(StrassenError::invalid(h, "cannot merge empty quadrants"));
    }
    Ok(assemble(&q))
}

fn same_dim(x: &Matrix, y: &Matrix) -> Result<(), StrassenError> {
    if x.dim() != y.dim() {
        return Err(StrassenError::DimensionMismatch {
            left: x.dim(),
            right: y.dim(),
        });
    }
    Ok(())
}

#[inline]
fn zip_with(x: &Matrix, y: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix {
    debug_assert_eq!(x.dim(), y.dim());
    let data = x
        .as_slice()
        .iter()
        .zip(y.as_slice())
        .map(|(&p, &q)| f(p, q))
        .collect();
    Matrix { n: x.dim(), data }
}

pub(crate) fn sum(x: &Matrix, y: &Matrix) -> Matrix {
    zip_with(x, y, |p, q| p + q)
}

pub(crate) fn difference(x: &Matrix, y: &Matrix) -> Matrix {
    zip_with(x, y, |p, q| p - q)
}

/// `acc += y`
pub(crate) fn add_assign(acc: &mut Matrix, y: &Matrix) {
    debug_assert_eq!(acc.dim(), y.dim());
    for (a, &b) in acc.as_mut_slice().iter_mut().zip(y.as_slice()) {
        *a += b;
    }
}

/// `acc -= y`
pub(crate) fn sub_assign(acc: &mut Matrix, y: &Matrix) {
    debug_assert_eq!(acc.dim(), y.dim());
    for (a, &b) in acc.as_mut_slice().iter_mut().zip(y.as_slice()) {
        *a -= b;
    }
}

/// Split without checks. `m.dim()` must be even.
pub(crate) fn quadrants(m: &Matrix) -> Quadrants {
    let n = m.dim();
    debug_assert!(n % 2 == 0);
    let h = n / 2;
    let mut q = Quadrants {
        q11: Matrix::zeros(h),
        q12: Matrix::zeros(h),
        q21: Matrix::zeros(h),
        q22: Matrix::zeros(h),
    };
    for i in 0..h {
        let (left, right) = m.row(i).split_at(h);
        q.q11.row_mut(i).copy_from_slice(left);
        q.q12.row_mut(i).copy_from_slice(right);

        let (left, right) = m.row(i + h).split_at(h);
        q.q21.row_mut(i).copy_from_slice(left);
        q.q22.row_mut(i).copy_from_slice(right);
    }
    q
}

/// Merge without checks. All four blocks must share one dimension.
pub(crate) fn assemble(q: &Quadrants) -> Matrix {
    let h = q.dim();
    let mut m = Matrix::zeros(2 * h);
    for i in 0..h {
        let (left, right) = m.row_mut(i).split_at_mut(h);
        left.copy_from_slice(q.q11.row(i));
        right.copy_from_slice(q.q12.row(i));

        let (left, right) = m.row_mut(i + h).split_at_mut(h);
        left.copy_from_slice(q.q21.row(i));
        right.copy_from_slice(q.q22.row(i));
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(n: usize) -> Matrix {
        Matrix::from_vec(n, (0..n * n).map(|i| i as f64).collect()).unwrap()
    }

    #[test]
    fn add_and_subtract_are_elementwise() {
        let x = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let y = Matrix::from_rows(&[[10.0, 20.0], [30.0, 40.0]]).unwrap();
        assert_eq!(add(&x, &y).unwrap().as_slice(), &[11.0, 22.0, 33.0, 44.0]);
        assert_eq!(subtract(&y, &x).unwrap().as_slice(), &[9.0, 18.0, 27.0, 36.0]);
    }

    #[test]
    fn add_rejects_mismatched_operands() {
        let err = add(&Matrix::zeros(2), &Matrix::zeros(3)).unwrap_err();
        assert!(matches!(err, StrassenError::DimensionMismatch { left: 2, right: 3 }));
        assert!(subtract(&Matrix::zeros(4), &Matrix::zeros(1)).is_err());
    }

    #[test]
    fn split_picks_the_right_corners() {
        let m = counting(4);
        let q = split(&m).unwrap();
        assert_eq!(q.q11.as_slice(), &[0.0, 1.0, 4.0, 5.0]);
        assert_eq!(q.q12.as_slice(), &[2.0, 3.0, 6.0, 7.0]);
        assert_eq!(q.q21.as_slice(), &[8.0, 9.0, 12.0, 13.0]);
        assert_eq!(q.q22.as_slice(), &[10.0, 11.0, 14.0, 15.0]);
    }

    #[test]
    fn split_rejects_odd_dimension() {
        assert!(matches!(
            split(&counting(3)),
            Err(StrassenError::InvalidDimension { dim: 3, .. })
        ));
    }

    #[test]
    fn merge_undoes_split() {
        for n in [2, 6, 10] {
            let m = counting(n);
            assert_eq!(merge(split(&m).unwrap()).unwrap(), m);
        }
    }

    #[test]
    fn merge_rejects_uneven_quadrants() {
        let q = Quadrants {
            q11: Matrix::zeros(2),
            q12: Matrix::zeros(2),
            q21: Matrix::zeros(3),
            q22: Matrix::zeros(2),
        };
        assert!(matches!(
            merge(q),
            Err(StrassenError::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn in_place_updates() {
        let mut acc = counting(2);
        add_assign(&mut acc, &Matrix::identity(2));
        assert_eq!(acc.as_slice(), &[1.0, 1.0, 2.0, 4.0]);
        sub_assign(&mut acc, &counting(2));
        assert_eq!(acc, Matrix::identity(2));
    }
}
