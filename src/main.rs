//! Benchmark runner for the Strassen engine.

use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use strassen::perf::{self, PerfAttr};
use strassen::task::{StrassenTask, TaskData};
use strassen::{PaddingScheme, Strassen, StrassenConfig, matmul_naive_ijk, matmul_naive_ikj};

/// Compare naive and Strassen multiplication on square matrices.
#[derive(Parser, Debug)]
#[command(name = "strassen", version, about)]
struct Args {
    /// Matrix sizes to benchmark.
    #[arg(long, value_delimiter = ',', default_value = "128,256,512", env = "STRASSEN_SIZES")]
    sizes: Vec<usize>,

    /// Timed iterations per method.
    #[arg(short, long, default_value = "3", env = "STRASSEN_ITERATIONS")]
    iterations: usize,

    /// Base-case dimension for the recursion.
    #[arg(long, default_value = "64", env = "STRASSEN_THRESHOLD")]
    threshold: usize,

    /// Padding scheme: pow2 or halving.
    #[arg(long, default_value = "halving")]
    padding: PaddingScheme,

    /// Worker threads for the parallel run (0 = all cores).
    #[arg(short, long, default_value = "0")]
    threads: usize,

    /// Also run the task pipeline entry points.
    #[arg(long)]
    perf: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    ensure!(!args.sizes.is_empty(), "no sizes given");

    let sequential = Strassen::new(StrassenConfig {
        base_case_threshold: args.threshold,
        padding: args.padding,
        ..StrassenConfig::default()
    });
    let parallel = Strassen::new(StrassenConfig {
        parallel: true,
        num_threads: args.threads,
        ..sequential.config().clone()
    });

    println!("=== Strassen Matrix Multiplication Benchmark ===\n");
    println!(
        "Base case: {}  Padding: {}  Threads: {}\n",
        sequential.config().base_case_threshold,
        args.padding,
        if args.threads == 0 { "all".to_string() } else { args.threads.to_string() }
    );

    let mut all_results = Vec::new();
    for &size in &args.sizes {
        println!("Matrix: {}×{} (padded to {})", size, size, sequential.padded_dimension(size)?);
        println!("{}", "-".repeat(50));

        let n = size;
        let a: Vec<f64> = (0..n * n).map(|i| (i % 100) as f64 - 50.0).collect();
        let b: Vec<f64> = (0..n * n).map(|i| (i % 37) as f64 - 18.0).collect();

        let mut reference = vec![0.0; n * n];
        matmul_naive_ijk(&a, &b, &mut reference, n);

        let results: Vec<(&str, (f64, f64))> = vec![
            ("Naive (i-j-k)", bench_fn(&a, &b, n, args.iterations, |a, b, c, n| {
                matmul_naive_ijk(a, b, c, n);
                Ok(())
            })?),
            ("Scalar (i-k-j)", bench_fn(&a, &b, n, args.iterations, |a, b, c, n| {
                matmul_naive_ikj(a, b, c, n);
                Ok(())
            })?),
            ("Strassen", bench_fn(&a, &b, n, args.iterations, |a, b, c, n| {
                Ok(sequential.multiply_into(a, b, c, n)?)
            })?),
            ("Strassen MT", bench_fn(&a, &b, n, args.iterations, |a, b, c, n| {
                Ok(parallel.multiply_into(a, b, c, n)?)
            })?),
        ];

        let mut check = vec![0.0; n * n];
        sequential.multiply_into(&a, &b, &mut check, n)?;
        let max_err = max_abs_diff(&reference, &check);

        let baseline_time = results[0].1.0;
        for (i, (name, (time_ms, gflops))) in results.iter().enumerate() {
            println!(
                "{}. {:16} {:8.2} ms  {:6.2} GFLOPS  ({:.1}×)",
                i + 1,
                name,
                time_ms,
                gflops,
                baseline_time / time_ms
            );
        }
        println!("   max |strassen - naive| = {max_err:.3e}\n");

        if args.perf {
            run_perf(&sequential, &a, &b, n, args.iterations)?;
        }

        all_results.push((size, results));
    }

    print_summary_table(&all_results);
    Ok(())
}

/// Benchmark one multiply; returns (avg ms, naive-equivalent GFLOPS).
fn bench_fn<F>(a: &[f64], b: &[f64], n: usize, iterations: usize, f: F) -> Result<(f64, f64)>
where
    F: Fn(&[f64], &[f64], &mut [f64], usize) -> Result<()>,
{
    // Warmup
    let mut c = vec![0.0; n * n];
    f(a, b, &mut c, n)?;

    let mut total = 0.0;
    for _ in 0..iterations {
        let start = Instant::now();
        f(a, b, &mut c, n)?;
        total += start.elapsed().as_secs_f64();
    }

    let avg = total / iterations.max(1) as f64;
    let gflops = 2.0 * (n * n * n) as f64 / avg / 1e9;
    Ok((avg * 1000.0, gflops))
}

fn run_perf(engine: &Strassen, a: &[f64], b: &[f64], n: usize, iterations: usize) -> Result<()> {
    let attr = PerfAttr {
        num_running: iterations.max(1),
    };
    let mut out = vec![0.0; n * n];

    let pipeline = {
        let mut task = StrassenTask::new(TaskData::square(a, b, &mut out, n), engine.clone());
        perf::pipeline_run(&mut task, &attr).context("pipeline run failed")?
    };
    let task_only = {
        let mut task = StrassenTask::new(TaskData::square(a, b, &mut out, n), engine.clone());
        perf::task_run(&mut task, &attr).context("task run failed")?
    };

    println!("   {pipeline}");
    println!("   {task_only}\n");
    Ok(())
}

fn max_abs_diff(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(p, q)| (p - q).abs()).fold(0.0, f64::max)
}

#[allow(clippy::type_complexity)]
fn print_summary_table(all_results: &[(usize, Vec<(&str, (f64, f64))>)]) {
    println!("\n{}", "=".repeat(72));
    println!("SUMMARY (GFLOPS counted as 2n³, speedup vs Naive i-j-k)");
    println!("{}", "=".repeat(72));

    print!("\n{:<18}", "Method");
    for (size, _) in all_results {
        print!(" {:>12}", format!("{size}×{size}"));
    }
    println!(" {:>10}", "Speedup");
    println!("{}", "-".repeat(72));

    let num_methods = all_results[0].1.len();
    for method_idx in 0..num_methods {
        let method_name = all_results[0].1[method_idx].0;
        print!("{method_name:<18}");

        let mut speedups = Vec::new();
        for (_, results) in all_results {
            let (time_ms, gflops) = results[method_idx].1;
            speedups.push(results[0].1.0 / time_ms);
            print!(" {gflops:>9.2} GF");
        }
        let avg_speedup = speedups.iter().sum::<f64>() / speedups.len() as f64;
        println!(" {avg_speedup:>9.1}×");
    }
    println!("{}", "=".repeat(72));
}
