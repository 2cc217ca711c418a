/// Cache-friendly direct multiply using i-k-j loop order: `c = a * b`.
///
/// Swapping the j and k loops makes the innermost loop walk both B and C
/// with stride 1. This is the Strassen base case, so it runs on every
/// leaf block of the recursion.
///
/// `c` is zeroed first; it is an output, not an accumulator.
///
/// # Arguments
///
/// * `a` - Left operand (n × n), row-major
/// * `b` - Right operand (n × n), row-major
/// * `c` - Output (n × n), row-major
/// * `n` - Dimension
pub fn matmul_naive_ikj(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    let c = &mut c[..n * n];
    c.fill(0.0);
    for i in 0..n {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..n {
            let a_ip = a[i * n + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    #[test]
    fn overwrites_stale_output() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [100.0; 4];
        matmul_naive_ikj(&a, &b, &mut c, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn agrees_with_ijk_on_integers() {
        for n in [1, 3, 7, 16] {
            let a: Vec<f64> = (0..n * n).map(|i| (i % 10) as f64).collect();
            let b: Vec<f64> = (0..n * n).map(|i| (i % 7) as f64 - 3.0).collect();
            let mut ikj = vec![0.0; n * n];
            let mut ijk = vec![0.0; n * n];
            matmul_naive_ikj(&a, &b, &mut ikj, n);
            matmul_naive_ijk(&a, &b, &mut ijk, n);
            assert_eq!(ikj, ijk, "n = {n}");
        }
    }
}
