//! Multi-threaded Strassen via nested `rayon::join`.

use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::config::StrassenConfig;
use crate::error::StrassenError;
use crate::matrix::Matrix;
use crate::matrix::block::Quadrants;
use crate::strassen::{self, Products, recurse};

/// Run the recursion on rayon, in a dedicated pool when `num_threads > 0`.
///
/// Each product is computed by the same sequence of operations as in
/// the sequential path, so the result is bit-identical to it.
pub(crate) fn run_in_pool(
    a: &Matrix,
    b: &Matrix,
    cfg: &StrassenConfig,
) -> Result<Matrix, StrassenError> {
    if cfg.num_threads == 0 {
        return Ok(recurse(a, b, cfg));
    }
    let pool = ThreadPoolBuilder::new()
        .num_threads(cfg.num_threads)
        .thread_name(|i| format!("strassen-{i}"))
        .build()?;
    debug!(threads = cfg.num_threads, n = a.dim(), "dedicated strassen pool");
    Ok(pool.install(|| recurse(a, b, cfg)))
}

/// Compute M1..M7 of one level concurrently.
pub(crate) fn products_parallel(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Products {
    let ((m1, m2), ((m3, m4), (m5, (m6, m7)))) = rayon::join(
        || {
            rayon::join(
                || strassen::m1(a, b, cfg),
                || strassen::m2(a, b, cfg),
            )
        },
        || {
            rayon::join(
                || {
                    rayon::join(
                        || strassen::m3(a, b, cfg),
                        || strassen::m4(a, b, cfg),
                    )
                },
                || {
                    rayon::join(
                        || strassen::m5(a, b, cfg),
                        || {
                            rayon::join(
                                || strassen::m6(a, b, cfg),
                                || strassen::m7(a, b, cfg),
                            )
                        },
                    )
                },
            )
        },
    );
    Products {
        m1,
        m2,
        m3,
        m4,
        m5,
        m6,
        m7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(n: usize, modulus: usize) -> Matrix {
        Matrix::from_vec(n, (0..n * n).map(|i| ((i * 7) % modulus) as f64 * 0.37 - 1.5).collect())
            .unwrap()
    }

    fn forking_config(num_threads: usize) -> StrassenConfig {
        StrassenConfig {
            base_case_threshold: 4,
            parallel: true,
            parallel_threshold: 8,
            num_threads,
            ..StrassenConfig::default()
        }
    }

    #[test]
    fn parallel_is_bit_identical_to_sequential() {
        let a = pattern(32, 17);
        let b = pattern(32, 13);
        let sequential = recurse(&a, &b, &StrassenConfig::with_threshold(4));
        for threads in [0, 1, 3] {
            let parallel = run_in_pool(&a, &b, &forking_config(threads)).unwrap();
            assert_eq!(parallel, sequential, "threads={threads}");
        }
    }

    #[test]
    fn products_parallel_matches_sequential_products() {
        let cfg = forking_config(0);
        let a = crate::matrix::block::quadrants(&pattern(16, 11));
        let b = crate::matrix::block::quadrants(&pattern(16, 5));
        let p = products_parallel(&a, &b, &cfg);
        assert_eq!(p.m1, strassen::m1(&a, &b, &cfg));
        assert_eq!(p.m4, strassen::m4(&a, &b, &cfg));
        assert_eq!(p.m7, strassen::m7(&a, &b, &cfg));
    }
}
