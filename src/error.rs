//! Error type shared by the padding layer, block algebra and the engine.
//!
//! Every variant is a caller mistake detected before any recursive work
//! starts. Once inputs are validated the multiplication itself cannot fail.

/// Precondition violations reported by the engine.
#[derive(Debug, thiserror::Error)]
pub enum StrassenError {
    /// Zero dimension, odd split, overflow, or a size the recursion can't halve.
    #[error("invalid dimension {dim}: {reason}")]
    InvalidDimension { dim: usize, reason: &'static str },

    /// The two operands have different dimensions.
    #[error("dimension mismatch: {left}x{left} operand against {right}x{right} operand")]
    DimensionMismatch { left: usize, right: usize },

    /// A declared shape is rectangular.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The output buffer cannot hold n² values.
    #[error("output buffer too small: need {required} elements, have {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    /// An input buffer holds fewer than n² values.
    #[error("{operand} buffer too small: need {required} elements, have {len}")]
    InputTooSmall {
        operand: &'static str,
        required: usize,
        len: usize,
    },

    /// The dedicated rayon pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl StrassenError {
    pub(crate) fn invalid(dim: usize, reason: &'static str) -> Self {
        Self::InvalidDimension { dim, reason }
    }
}

/// Number of elements in an n×n matrix, rejecting zero and overflow.
pub(crate) fn element_count(n: usize) -> Result<usize, StrassenError> {
    if n == 0 {
        return Err(StrassenError::invalid(n, "dimension must be positive"));
    }
    n.checked_mul(n)
        .ok_or_else(|| StrassenError::invalid(n, "n*n overflows usize"))
}
