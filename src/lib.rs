//! Strassen matrix multiplication in Rust.
//!
//! Square dense `f64` matrices are multiplied by recursively splitting both
//! operands into quadrants and combining seven sub-products instead of
//! eight, giving O(n^2.807) scalar multiplications. Inputs of any size are
//! zero-padded so every level splits evenly, and small blocks fall back to
//! a cache-friendly direct loop.
//!
//! ## Usage
//!
//! ```
//! use strassen::multiply;
//!
//! let a = vec![1.0, 2.0, 3.0, 4.0];
//! let b = vec![5.0, 6.0, 7.0, 8.0];
//! let mut c = vec![0.0; 4];
//!
//! multiply(&a, &b, &mut c, 2).unwrap();
//! assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
//! ```
//!
//! For large matrices, fork the seven products across threads:
//!
//! ```
//! use strassen::multiply_parallel;
//!
//! let a = vec![1.0f64; 300 * 300];
//! let b = vec![1.0f64; 300 * 300];
//! let mut c = vec![0.0f64; 300 * 300];
//!
//! multiply_parallel(&a, &b, &mut c, 300, 4).unwrap();
//! assert_eq!(c[0], 300.0);
//! ```
//!
//! ## What's inside
//!
//! - Padding to a halvable dimension (next power of two, or minimal halving)
//! - Quadrant block algebra
//! - Recursive seven-product engine with an i-k-j base case
//! - rayon fork-join of the seven products
//! - A four-step task pipeline and timing entry points for benchmark harnesses

pub mod config;
pub mod error;
pub mod matrix;
pub mod padding;
pub mod perf;
pub mod strassen;
pub mod task;
pub mod threaded;

pub use config::{PaddingScheme, StrassenConfig};
pub use error::StrassenError;
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::naive_ikj::matmul_naive_ikj;
pub use strassen::Strassen;

/// Matrix multiply: C = A * B
///
/// `a` and `b` are n×n row-major; the product is written to the first n²
/// elements of `c`. Uses the default configuration (base case at 64,
/// minimal halving padding, single thread).
///
/// # Errors
///
/// Returns an error, without touching `c`, if `n` is zero or a buffer is
/// shorter than n².
pub fn multiply(a: &[f64], b: &[f64], c: &mut [f64], n: usize) -> Result<(), StrassenError> {
    Strassen::default().multiply_into(a, b, c, n)
}

/// Same as [`multiply`] but forks the seven products onto rayon workers.
///
/// `num_threads == 0` uses rayon's global pool. Levels smaller than
/// [`config::DEFAULT_PARALLEL_THRESHOLD`] run sequentially because the
/// overhead isn't worth it.
pub fn multiply_parallel(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    n: usize,
    num_threads: usize,
) -> Result<(), StrassenError> {
    Strassen::new(StrassenConfig::parallel(num_threads)).multiply_into(a, b, c, n)
}
