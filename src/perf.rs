//! Benchmark entry points: time a [`Task`] over repeated runs.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::task::Task;

/// How many times to repeat the timed section.
#[derive(Debug, Clone, Copy)]
pub struct PerfAttr {
    pub num_running: usize,
}

impl Default for PerfAttr {
    fn default() -> Self {
        Self { num_running: 10 }
    }
}

/// Which section was timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// Validation, pre-processing, run and post-processing, every iteration.
    Pipeline,
    /// Only `run`, after a single validation and pre-processing.
    TaskRun,
}

/// Timing summary of one benchmark call.
#[derive(Debug, Clone)]
pub struct PerfResults {
    pub kind: RunKind,
    pub num_running: usize,
    /// Total wall time over all iterations.
    pub total: Duration,
    /// Fastest single iteration.
    pub min: Duration,
}

impl PerfResults {
    /// Mean seconds per iteration.
    pub fn time_sec(&self) -> f64 {
        if self.num_running == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() / self.num_running as f64
    }
}

impl fmt::Display for PerfResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            RunKind::Pipeline => "pipeline_run",
            RunKind::TaskRun => "task_run",
        };
        write!(
            f,
            "{name}: {:.6} s/run (min {:.6} s) over {} runs",
            self.time_sec(),
            self.min.as_secs_f64(),
            self.num_running
        )
    }
}

/// Run the whole pipeline `attr.num_running` times.
pub fn pipeline_run<T: Task + ?Sized>(task: &mut T, attr: &PerfAttr) -> Result<PerfResults, T::Error> {
    let results = timed(RunKind::Pipeline, attr.num_running, || {
        task.validation()?;
        task.pre_processing()?;
        task.run()?;
        task.post_processing()
    })?;
    debug!(%results, "perf");
    Ok(results)
}

/// Prepare once, time `run` `attr.num_running` times, then publish the result.
pub fn task_run<T: Task + ?Sized>(task: &mut T, attr: &PerfAttr) -> Result<PerfResults, T::Error> {
    task.validation()?;
    task.pre_processing()?;
    let results = timed(RunKind::TaskRun, attr.num_running, || task.run())?;
    task.post_processing()?;
    debug!(%results, "perf");
    Ok(results)
}

fn timed<E>(
    kind: RunKind,
    num_running: usize,
    mut f: impl FnMut() -> Result<(), E>,
) -> Result<PerfResults, E> {
    let mut total = Duration::ZERO;
    let mut min = Duration::MAX;
    for _ in 0..num_running {
        let start = Instant::now();
        f()?;
        let elapsed = start.elapsed();
        total += elapsed;
        min = min.min(elapsed);
    }
    if num_running == 0 {
        min = Duration::ZERO;
    }
    Ok(PerfResults {
        kind,
        num_running,
        total,
        min,
    })
}
