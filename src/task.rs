//! Harness boundary: marshaled buffers and the four-step task pipeline.
//!
//! A benchmark harness hands over raw row-major buffers with their declared
//! shapes and drives a [`Task`] through validation, pre-processing, run and
//! post-processing. `run` may be repeated to time the computation alone.

use tracing::trace;

use crate::error::{StrassenError, element_count};
use crate::matrix::Matrix;
use crate::padding;
use crate::strassen::Strassen;

/// Error from the task pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Strassen(#[from] StrassenError),

    /// A step was called before the steps it depends on.
    #[error("{step} called while task is {stage:?}")]
    OutOfOrder { step: &'static str, stage: Stage },
}

/// A unit of benchmarked work.
pub trait Task {
    type Error;

    /// Check the marshaled inputs. Must run first.
    fn validation(&mut self) -> Result<(), Self::Error>;

    /// Prepare internal state from the inputs.
    fn pre_processing(&mut self) -> Result<(), Self::Error>;

    /// The timed computation. Repeatable.
    fn run(&mut self) -> Result<(), Self::Error>;

    /// Publish the result to the output buffer.
    fn post_processing(&mut self) -> Result<(), Self::Error>;
}

/// Where a task is in its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Created,
    Validated,
    Prepared,
    Computed,
}

/// Borrowed buffers and declared `(rows, cols)` shapes.
#[derive(Debug)]
pub struct TaskData<'a> {
    pub lhs: &'a [f64],
    pub lhs_shape: (usize, usize),
    pub rhs: &'a [f64],
    pub rhs_shape: (usize, usize),
    pub out: &'a mut [f64],
}

impl<'a> TaskData<'a> {
    /// Square n×n operands and an output buffer.
    pub fn square(lhs: &'a [f64], rhs: &'a [f64], out: &'a mut [f64], n: usize) -> Self {
        Self {
            lhs,
            lhs_shape: (n, n),
            rhs,
            rhs_shape: (n, n),
            out,
        }
    }

    /// Validate the declared shapes and buffer sizes; returns n.
    pub fn validate(&self) -> Result<usize, StrassenError> {
        let n = square_dim(self.lhs_shape)?;
        let m = square_dim(self.rhs_shape)?;
        if n != m {
            return Err(StrassenError::DimensionMismatch { left: n, right: m });
        }
        let required = element_count(n)?;
        for (operand, buf) in [("lhs", self.lhs), ("rhs", self.rhs)] {
            if buf.len() < required {
                return Err(StrassenError::InputTooSmall {
                    operand,
                    required,
                    len: buf.len(),
                });
            }
        }
        if self.out.len() < required {
            return Err(StrassenError::BufferTooSmall {
                required,
                capacity: self.out.len(),
            });
        }
        Ok(n)
    }
}

fn square_dim((rows, cols): (usize, usize)) -> Result<usize, StrassenError> {
    if rows != cols {
        return Err(StrassenError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Strassen multiplication driven through the [`Task`] pipeline.
pub struct StrassenTask<'a> {
    data: TaskData<'a>,
    engine: Strassen,
    stage: Stage,
    n: usize,
    lhs: Option<Matrix>,
    rhs: Option<Matrix>,
    product: Option<Matrix>,
}

impl<'a> StrassenTask<'a> {
    pub fn new(data: TaskData<'a>, engine: Strassen) -> Self {
        Self {
            data,
            engine,
            stage: Stage::Created,
            n: 0,
            lhs: None,
            rhs: None,
            product: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Hand back the buffers, e.g. to read the output.
    pub fn into_data(self) -> TaskData<'a> {
        self.data
    }

    fn require(&self, step: &'static str, at_least: Stage) -> Result<(), TaskError> {
        if self.stage < at_least {
            return Err(TaskError::OutOfOrder {
                step,
                stage: self.stage,
            });
        }
        Ok(())
    }
}

impl Task for StrassenTask<'_> {
    type Error = TaskError;

    fn validation(&mut self) -> Result<(), TaskError> {
        self.n = self.data.validate()?;
        self.stage = Stage::Validated;
        trace!(n = self.n, "validation passed");
        Ok(())
    }

    fn pre_processing(&mut self) -> Result<(), TaskError> {
        self.require("pre_processing", Stage::Validated)?;
        let target = self.engine.padded_dimension(self.n)?;
        self.lhs = Some(padding::pad_slice(self.data.lhs, self.n, target)?);
        self.rhs = Some(padding::pad_slice(self.data.rhs, self.n, target)?);
        self.product = None;
        self.stage = Stage::Prepared;
        trace!(n = self.n, padded = target, "operands padded");
        Ok(())
    }

    fn run(&mut self) -> Result<(), TaskError> {
        self.require("run", Stage::Prepared)?;
        let (Some(lhs), Some(rhs)) = (&self.lhs, &self.rhs) else {
            return Err(TaskError::OutOfOrder {
                step: "run",
                stage: self.stage,
            });
        };
        self.product = Some(self.engine.multiply_padded(lhs, rhs)?);
        self.stage = Stage::Computed;
        Ok(())
    }

    fn post_processing(&mut self) -> Result<(), TaskError> {
        self.require("post_processing", Stage::Computed)?;
        let Some(product) = &self.product else {
            return Err(TaskError::OutOfOrder {
                step: "post_processing",
                stage: self.stage,
            });
        };
        padding::unpad_into(product, self.n, self.data.out)?;
        trace!(n = self.n, "result written");
        Ok(())
    }
}
