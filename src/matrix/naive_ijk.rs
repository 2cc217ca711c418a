use super::Matrix;

/// Textbook triple-loop product: `c = a * b` for n×n row-major buffers.
///
/// Each output element is one dot product accumulated in a local, in
/// k order. This is the reference every other multiply in the crate is
/// measured against, so keep it boring.
///
/// # Arguments
///
/// * `a` - Left operand (n × n), row-major
/// * `b` - Right operand (n × n), row-major
/// * `c` - Output (n × n), row-major, overwritten
/// * `n` - Dimension
pub fn matmul_naive_ijk(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for p in 0..n {
                acc += a[i * n + p] * b[p * n + j];
            }
            c[i * n + j] = acc;
        }
    }
}

/// Reference product of two matrices of equal dimension.
///
/// # Panics
///
/// Panics if the dimensions differ.
#[must_use]
pub fn reference_product(a: &Matrix, b: &Matrix) -> Matrix {
    assert_eq!(a.dim(), b.dim(), "reference_product: dimension mismatch");
    let mut c = Matrix::zeros(a.dim());
    matmul_naive_ijk(a.as_slice(), b.as_slice(), c.as_mut_slice(), a.dim());
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [f64::NAN; 4];
        matmul_naive_ijk(&a, &b, &mut c, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }
}
