//! Engine configuration: base-case threshold, padding scheme, parallelism.

use std::fmt;
use std::str::FromStr;

/// Dimension at or below which the recursion switches to the direct loop.
pub const DEFAULT_BASE_CASE_THRESHOLD: usize = 64;

/// Smallest dimension at which the seven products are forked onto rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// How the input dimension is rounded up before recursing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingScheme {
    /// Next power of two.
    PowerOfTwo,
    /// Smallest `m * 2^k` with `m <= threshold`: only as much padding as
    /// the halvings down to the base case need.
    #[default]
    Halving,
}

impl fmt::Display for PaddingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerOfTwo => f.write_str("pow2"),
            Self::Halving => f.write_str("halving"),
        }
    }
}

impl FromStr for PaddingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pow2" | "power-of-two" => Ok(Self::PowerOfTwo),
            "halving" | "even" => Ok(Self::Halving),
            other => Err(format!(
                "unknown padding scheme '{other}' (expected 'pow2' or 'halving')"
            )),
        }
    }
}

/// Options for a Strassen multiplication.
#[derive(Debug, Clone)]
pub struct StrassenConfig {
    /// Blocks of this dimension or smaller are multiplied directly.
    pub base_case_threshold: usize,
    /// Rounding rule for the padded dimension.
    pub padding: PaddingScheme,
    /// Fork the seven products across rayon workers.
    pub parallel: bool,
    /// Only fork at levels whose dimension is at least this large.
    pub parallel_threshold: usize,
    /// Dedicated pool size; 0 uses rayon's global pool.
    pub num_threads: usize,
}

impl Default for StrassenConfig {
    fn default() -> Self {
        Self {
            base_case_threshold: DEFAULT_BASE_CASE_THRESHOLD,
            padding: PaddingScheme::default(),
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            num_threads: 0,
        }
    }
}

impl StrassenConfig {
    /// Sequential configuration with the given base-case threshold.
    #[must_use]
    pub fn with_threshold(base_case_threshold: usize) -> Self {
        Self {
            base_case_threshold,
            ..Self::default()
        }
    }

    /// Parallel configuration; `num_threads == 0` means the global pool.
    #[must_use]
    pub fn parallel(num_threads: usize) -> Self {
        Self {
            parallel: true,
            num_threads,
            ..Self::default()
        }
    }

    /// Replace zero thresholds with the defaults.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.base_case_threshold == 0 {
            self.base_case_threshold = DEFAULT_BASE_CASE_THRESHOLD;
        }
        if self.parallel_threshold == 0 {
            self.parallel_threshold = DEFAULT_PARALLEL_THRESHOLD;
        }
        self
    }

    /// Whether a level of dimension `n` forks its products.
    pub(crate) fn forks_at(&self, n: usize) -> bool {
        self.parallel && n >= self.parallel_threshold
    }
}
