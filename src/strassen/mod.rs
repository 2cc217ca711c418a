//! Strassen engine.
//!
//! Each level splits both operands into quadrants, forms seven products
//! from sums and differences of those quadrants, and recombines them:
//!
//! ```text
//! M1 = (A11 + A22)(B11 + B22)      C11 = M1 + M4 - M5 + M7
//! M2 = (A21 + A22) B11             C12 = M3 + M5
//! M3 = A11 (B12 - B22)             C21 = M2 + M4
//! M4 = A22 (B21 - B11)             C22 = M1 - M2 + M3 + M6
//! M5 = (A11 + A12) B22
//! M6 = (A21 - A11)(B11 + B12)
//! M7 = (A12 - A22)(B21 + B22)
//! ```
//!
//! Blocks at or below the base-case threshold go through the i-k-j loop.
//! Every intermediate is owned by the frame that created it and dropped
//! before the frame returns, so live memory stays O(n²).

use tracing::debug;

use crate::config::StrassenConfig;
use crate::error::{StrassenError, element_count};
use crate::matrix::Matrix;
use crate::matrix::block::{self, Quadrants};
use crate::matrix::naive_ikj::matmul_naive_ikj;
use crate::padding::{self, is_splittable, padded_dimension};
use crate::threaded::strassen_mt;

/// The seven sub-products of one recursion level.
pub(crate) struct Products {
    pub m1: Matrix,
    pub m2: Matrix,
    pub m3: Matrix,
    pub m4: Matrix,
    pub m5: Matrix,
    pub m6: Matrix,
    pub m7: Matrix,
}

/// Strassen multiplier holding a normalized configuration.
#[derive(Debug, Clone, Default)]
pub struct Strassen {
    config: StrassenConfig,
}

impl Strassen {
    #[must_use]
    pub fn new(config: StrassenConfig) -> Self {
        Self {
            config: config.normalize(),
        }
    }

    pub fn config(&self) -> &StrassenConfig {
        &self.config
    }

    /// Dimension an n×n input is padded to before recursing.
    pub fn padded_dimension(&self, n: usize) -> Result<usize, StrassenError> {
        padded_dimension(n, self.config.base_case_threshold, self.config.padding)
    }

    /// `a * b` for square matrices of any positive dimension.
    ///
    /// Pads both operands, recurses, and truncates the result.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, StrassenError> {
        let n = same_dimension(a, b)?;
        let target = self.padded_dimension(n)?;
        debug!(n, padded = target, parallel = self.config.parallel, "strassen multiply");
        if target == n {
            return self.run(a, b);
        }
        let product = self.run(&padding::pad(a, target)?, &padding::pad(b, target)?)?;
        padding::unpad(&product, n)
    }

    /// `a * b` where the dimension already halves cleanly down to the base case.
    pub fn multiply_padded(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, StrassenError> {
        let n = same_dimension(a, b)?;
        if !is_splittable(n, self.config.base_case_threshold) {
            return Err(StrassenError::invalid(
                n,
                "dimension does not halve evenly down to the base case",
            ));
        }
        self.run(a, b)
    }

    /// Flat-buffer entry point: writes `a * b` into the first n² slots of `c`.
    ///
    /// `a` and `b` are n×n row-major. Everything is validated before any
    /// work starts; on error `c` is left untouched.
    pub fn multiply_into(
        &self,
        a: &[f64],
        b: &[f64],
        c: &mut [f64],
        n: usize,
    ) -> Result<(), StrassenError> {
        let required = element_count(n)?;
        for (operand, buf) in [("lhs", a), ("rhs", b)] {
            if buf.len() < required {
                return Err(StrassenError::InputTooSmall {
                    operand,
                    required,
                    len: buf.len(),
                });
            }
        }
        if c.len() < required {
            return Err(StrassenError::BufferTooSmall {
                required,
                capacity: c.len(),
            });
        }
        let target = self.padded_dimension(n)?;
        debug!(n, padded = target, parallel = self.config.parallel, "strassen multiply_into");

        let a = padding::pad_slice(a, n, target)?;
        let b = padding::pad_slice(b, n, target)?;
        let product = self.run(&a, &b)?;
        padding::unpad_into(&product, n, c)
    }

    fn run(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, StrassenError> {
        if self.config.parallel {
            strassen_mt::run_in_pool(a, b, &self.config)
        } else {
            Ok(recurse(a, b, &self.config))
        }
    }
}

fn same_dimension(a: &Matrix, b: &Matrix) -> Result<usize, StrassenError> {
    if a.dim() != b.dim() {
        return Err(StrassenError::DimensionMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    element_count(a.dim())?;
    Ok(a.dim())
}

/// One level of the recursion. The dimension must be splittable.
pub(crate) fn recurse(a: &Matrix, b: &Matrix, cfg: &StrassenConfig) -> Matrix {
    let n = a.dim();
    if n <= cfg.base_case_threshold {
        let mut c = Matrix::zeros(n);
        matmul_naive_ikj(a.as_slice(), b.as_slice(), c.as_mut_slice(), n);
        return c;
    }
    debug_assert!(n % 2 == 0, "recursion reached odd dimension {n}");

    let products = {
        let qa = block::quadrants(a);
        let qb = block::quadrants(b);
        if cfg.forks_at(n) {
            strassen_mt::products_parallel(&qa, &qb, cfg)
        } else {
            products(&qa, &qb, cfg)
        }
    };
    combine(products)
}

fn products(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Products {
    Products {
        m1: m1(a, b, cfg),
        m2: m2(a, b, cfg),
        m3: m3(a, b, cfg),
        m4: m4(a, b, cfg),
        m5: m5(a, b, cfg),
        m6: m6(a, b, cfg),
        m7: m7(a, b, cfg),
    }
}

// Each product builds its own operands so they are dropped as soon as it returns.

pub(crate) fn m1(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&block::sum(&a.q11, &a.q22), &block::sum(&b.q11, &b.q22), cfg)
}

pub(crate) fn m2(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&block::sum(&a.q21, &a.q22), &b.q11, cfg)
}

pub(crate) fn m3(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&a.q11, &block::difference(&b.q12, &b.q22), cfg)
}

pub(crate) fn m4(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&a.q22, &block::difference(&b.q21, &b.q11), cfg)
}

pub(crate) fn m5(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&block::sum(&a.q11, &a.q12), &b.q22, cfg)
}

pub(crate) fn m6(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&block::difference(&a.q21, &a.q11), &block::sum(&b.q11, &b.q12), cfg)
}

pub(crate) fn m7(a: &Quadrants, b: &Quadrants, cfg: &StrassenConfig) -> Matrix {
    recurse(&block::difference(&a.q12, &a.q22), &block::sum(&b.q21, &b.q22), cfg)
}

fn combine(p: Products) -> Matrix {
    let mut c11 = block::sum(&p.m1, &p.m4);
    block::sub_assign(&mut c11, &p.m5);
    block::add_assign(&mut c11, &p.m7);

    let c12 = block::sum(&p.m3, &p.m5);
    let c21 = block::sum(&p.m2, &p.m4);

    let mut c22 = block::difference(&p.m1, &p.m2);
    block::add_assign(&mut c22, &p.m3);
    block::add_assign(&mut c22, &p.m6);
    drop(p);

    block::assemble(&Quadrants {
        q11: c11,
        q12: c12,
        q21: c21,
        q22: c22,
    })
}
